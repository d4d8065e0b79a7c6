use anyhow::{Result, bail};
use auto_media_import::cli::Cli;
use auto_media_import::component::MediaImporter;
use auto_media_import::component::media_import::{ImportSummary, locate_card_roots};
use auto_media_import::config::Config;
use auto_media_import::init;
use clap::Parser;
use console::style;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init::init(cli.verbose);

    match run(cli) {
        Ok(summary) if summary.has_errors() => {
            println!(
                "\n{}",
                style("⚠ 匯入完成，但有部分檔案失敗").yellow().bold()
            );
            ExitCode::FAILURE
        }
        Ok(_) => {
            println!("\n{}", style("✓ 匯入完成！").green().bold());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("匯入失敗: {e:#}");
            eprintln!("{} {e:#}", style("✗ 匯入失敗!").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ImportSummary> {
    let config = Config::new()?;

    let (photo_source, video_source) = resolve_sources(&cli)?;

    let importer = MediaImporter::new(
        config,
        photo_source,
        video_source,
        cli.destination,
        cli.dry_run,
    );

    let summary = importer.run()?;
    importer.print_summary(&summary);
    Ok(summary)
}

/// 決定照片與影片來源：使用者指定優先，否則自動偵測記憶卡
fn resolve_sources(cli: &Cli) -> Result<(PathBuf, Option<PathBuf>)> {
    if let Some(source) = &cli.source {
        return Ok((source.clone(), cli.video_source.clone()));
    }

    info!("搜尋記憶卡中...");
    let (dcim, clip) = locate_card_roots();

    let Some(dcim) = dcim else {
        bail!(
            "找不到記憶卡的 DCIM 資料夾，請用 --source 手動指定\n常見位置:\n  macOS: /Volumes/<記憶卡>/DCIM\n  Linux: /media/$USER/<記憶卡>/DCIM"
        );
    };

    Ok((dcim, cli.video_source.clone().or(clip)))
}
