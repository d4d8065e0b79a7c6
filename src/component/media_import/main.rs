use super::date_resolver::resolve_capture_date;
use super::destination_planner::plan_destination;
use super::duplicate_detector::{ImportAction, decide_action};
use crate::config::{Config, MediaKind};
use crate::tools::{
    SourceFile, copy_file_atomic, ensure_directory_exists, scan_media_files,
    validate_directory_exists,
};
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::PathBuf;

/// 單一檔案的匯入結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// 已複製到媒體庫
    Copied { bytes: u64 },
    /// 目標已有相同內容的檔案，跳過
    SkippedDuplicate,
    /// 試跑模式：記錄將複製的目標，不實際寫入
    DryRunPlanned { target: PathBuf },
}

/// 匯入統計
#[derive(Debug, Default)]
pub struct ImportSummary {
    /// 實際複製的檔案數
    pub copied: usize,
    /// 跳過的重複檔案數
    pub skipped_duplicates: usize,
    /// 試跑模式下將複製的檔案數
    pub planned: usize,
    /// 處理失敗的檔案數
    pub errors: usize,
    /// 實際複製的位元組總數
    pub bytes_copied: u64,
    /// 失敗的檔案與原因，供使用者逐一排查
    pub error_details: Vec<(PathBuf, String)>,
}

impl ImportSummary {
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.copied + self.skipped_duplicates + self.planned + self.errors
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// 媒體匯入元件
///
/// 掃描照片與影片來源，逐一處理每個檔案：
/// 解析拍攝日期 → 計算目標路徑 → 重複檢查 → 複製或跳過。
/// 單一檔案失敗只記錄到統計中，不會中斷整批匯入
pub struct MediaImporter {
    config: Config,
    photo_source: PathBuf,
    video_source: Option<PathBuf>,
    destination: PathBuf,
    dry_run: bool,
}

impl MediaImporter {
    #[must_use]
    pub const fn new(
        config: Config,
        photo_source: PathBuf,
        video_source: Option<PathBuf>,
        destination: PathBuf,
        dry_run: bool,
    ) -> Self {
        Self {
            config,
            photo_source,
            video_source,
            destination,
            dry_run,
        }
    }

    /// 執行匯入流程，回傳統計結果
    pub fn run(&self) -> Result<ImportSummary> {
        validate_directory_exists(&self.photo_source).context("照片來源資料夾無法使用")?;

        info!("照片來源: {}", self.photo_source.display());
        if let Some(video_source) = &self.video_source {
            info!("影片來源: {}", video_source.display());
        }
        info!("目的地: {}", self.destination.display());
        if self.dry_run {
            info!("試跑模式 - 不會實際複製檔案");
        }

        let files = self.scan_sources()?;
        if files.is_empty() {
            warn!("找不到任何照片或影片");
            return Ok(ImportSummary::default());
        }

        let photo_count = files
            .iter()
            .filter(|file| file.kind == MediaKind::Photo)
            .count();
        let video_count = files.len() - photo_count;
        info!("找到 {photo_count} 張照片、{video_count} 部影片");

        let progress_bar = self.create_progress_bar(files.len() as u64);

        let mut summary = ImportSummary::default();
        for file in &files {
            let file_name = file.path.file_name().unwrap_or_default().to_string_lossy();
            progress_bar.set_message(format!(
                "{} {}",
                file.kind.display_name(),
                truncate_name(&file_name, 40)
            ));

            match self.process_file(file) {
                Ok(ImportOutcome::Copied { bytes }) => {
                    summary.copied += 1;
                    summary.bytes_copied += bytes;
                }
                Ok(ImportOutcome::SkippedDuplicate) => {
                    summary.skipped_duplicates += 1;
                }
                Ok(ImportOutcome::DryRunPlanned { .. }) => {
                    summary.planned += 1;
                }
                Err(e) => {
                    warn!("處理檔案失敗 {}: {e:#}", file.path.display());
                    summary.errors += 1;
                    summary
                        .error_details
                        .push((file.path.clone(), format!("{e:#}")));
                }
            }

            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        Ok(summary)
    }

    /// 掃描照片與影片來源資料夾
    ///
    /// 影片來源不存在（例如記憶卡沒有影片結構）只是警告，
    /// 照片部分照常匯入
    fn scan_sources(&self) -> Result<Vec<SourceFile>> {
        info!("掃描照片: {}", self.photo_source.display());
        let mut files = scan_media_files(
            &self.photo_source,
            &self.config.media_type_table,
            MediaKind::Photo,
        )?;

        if let Some(video_source) = &self.video_source {
            if video_source.is_dir() {
                info!("掃描影片: {}", video_source.display());
                files.extend(scan_media_files(
                    video_source,
                    &self.config.media_type_table,
                    MediaKind::Video,
                )?);
            } else {
                warn!("影片來源不存在，略過: {}", video_source.display());
            }
        }

        Ok(files)
    }

    /// 處理單一檔案：解析日期 → 計算目標 → 重複檢查 → 複製
    fn process_file(&self, file: &SourceFile) -> Result<ImportOutcome> {
        let date = resolve_capture_date(&file.path, file.kind);
        let file_name = file
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("無法取得檔案名稱: {}", file.path.display()))?;

        let plan = plan_destination(&self.destination, file.kind, date, file_name);

        match decide_action(&file.path, file.size, &plan)? {
            ImportAction::SkipIdentical => {
                debug!("跳過重複檔案: {}", file.path.display());
                Ok(ImportOutcome::SkippedDuplicate)
            }
            ImportAction::Copy(target) | ImportAction::RenameAndCopy(target) => {
                if self.dry_run {
                    let shown = target.strip_prefix(&self.destination).unwrap_or(&target);
                    info!("[試跑] 將複製: {} -> {}", file_name, shown.display());
                    return Ok(ImportOutcome::DryRunPlanned { target });
                }

                ensure_directory_exists(&plan.target_dir)?;
                let bytes = copy_file_atomic(&file.path, &target)?;
                debug!("已複製: {} -> {}", file.path.display(), target.display());
                Ok(ImportOutcome::Copied { bytes })
            }
        }
    }

    fn create_progress_bar(&self, total: u64) -> ProgressBar {
        // 試跑模式只輸出日誌，進度條會干擾畫面
        if self.dry_run {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(total);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress_bar
    }

    /// 顯示匯入結果摘要
    pub fn print_summary(&self, summary: &ImportSummary) {
        println!();
        println!("{}", style("=== 匯入結果 ===").cyan().bold());

        if self.dry_run {
            println!("  將複製: {} 個檔案", style(summary.planned).green());
        } else {
            println!("  已複製: {} 個檔案", style(summary.copied).green());
        }
        println!("  跳過重複: {} 個", style(summary.skipped_duplicates).yellow());

        if summary.errors > 0 {
            println!("  錯誤: {} 個", style(summary.errors).red());
            for (path, reason) in &summary.error_details {
                println!("    {} {}: {}", style("✗").red(), path.display(), reason);
            }
        }

        if !self.dry_run && summary.bytes_copied > 0 {
            println!(
                "  總複製大小: {}",
                style(format_size(summary.bytes_copied)).cyan()
            );
        }

        info!(
            "匯入完成 - 複製: {}, 跳過: {}, 錯誤: {}",
            summary.copied, summary.skipped_duplicates, summary.errors
        );
    }
}

/// 將位元組數轉成 MB/GB 顯示
fn format_size(bytes: u64) -> String {
    let size_mb = bytes as f64 / 1024.0 / 1024.0;
    if size_mb >= 1024.0 {
        format!("{:.2} GB", size_mb / 1024.0)
    } else {
        format!("{size_mb:.2} MB")
    }
}

/// 截斷過長的檔名，避免撐爆進度條訊息
fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    name.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short.jpg", 40), "short.jpg");
        let long = "a".repeat(50);
        assert_eq!(truncate_name(&long, 40).chars().count(), 40);
    }

    #[test]
    fn test_summary_totals() {
        let summary = ImportSummary {
            copied: 3,
            skipped_duplicates: 2,
            planned: 0,
            errors: 1,
            bytes_copied: 100,
            error_details: vec![(PathBuf::from("/x"), "讀取失敗".to_string())],
        };
        assert_eq!(summary.total_files(), 6);
        assert!(summary.has_errors());
    }
}
