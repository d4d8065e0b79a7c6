use clap::Parser;
use std::path::PathBuf;

/// 相機記憶卡媒體匯入工具
///
/// 掃描記憶卡上的照片與影片，依拍攝日期複製到媒體庫
/// （`<媒體庫>/<年>/<月>/<日>/<pictures|videos>`），自動跳過重複檔案
#[derive(Debug, Parser)]
#[command(name = "auto_media_import")]
#[command(version)]
#[command(about = "依拍攝日期自動匯入相機記憶卡中的照片與影片")]
pub struct Cli {
    /// 整理後的媒體庫根目錄
    pub destination: PathBuf,

    /// 照片來源資料夾（DCIM），未指定時自動偵測記憶卡
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// 影片來源資料夾（PRIVATE/M4ROOT/CLIP），未指定時自動偵測
    #[arg(long)]
    pub video_source: Option<PathBuf>,

    /// 試跑模式：只顯示將執行的動作，不實際複製檔案
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// 顯示詳細日誌
    #[arg(short, long)]
    pub verbose: bool,
}
