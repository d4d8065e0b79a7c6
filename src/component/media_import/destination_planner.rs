use crate::config::MediaKind;
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

/// 一個來源檔案在媒體庫中的目標位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPlan {
    pub target_dir: PathBuf,
    pub target_name: String,
}

impl DestinationPlan {
    #[must_use]
    pub fn target_path(&self) -> PathBuf {
        self.target_dir.join(&self.target_name)
    }
}

/// 計算目標路徑：`<媒體庫>/<年>/<月>/<日>/<pictures|videos>/<原檔名>`
///
/// 月、日補零成兩位數；純計算，目錄由複製動作建立
#[must_use]
pub fn plan_destination(
    library_root: &Path,
    kind: MediaKind,
    date: NaiveDate,
    file_name: &str,
) -> DestinationPlan {
    let target_dir = library_root
        .join(format!("{:04}", date.year()))
        .join(format!("{:02}", date.month()))
        .join(format!("{:02}", date.day()))
        .join(kind.folder_name());

    DestinationPlan {
        target_dir,
        target_name: file_name.to_string(),
    }
}
