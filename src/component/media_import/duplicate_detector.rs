use super::destination_planner::DestinationPlan;
use crate::tools::files_identical;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// 重複檢查後決定的動作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportAction {
    /// 目標名稱未被使用，直接複製
    Copy(PathBuf),
    /// 目標已有內容完全相同的檔案，跳過
    SkipIdentical,
    /// 同名但內容不同，用編號後的新名稱複製
    RenameAndCopy(PathBuf),
}

/// 決定來源檔案要複製、跳過還是換名複製
///
/// 同名檔案先比大小（大小不同內容必定不同），大小相同才比對
/// BLAKE3 hash。名稱衝突時在副檔名前插入遞增數字後綴
/// （`IMG_0001_1.ARW` 起算），每個候選名稱都重新做同樣的
/// 相同性檢查，所以重跑一次匯入時先前換名複製過的檔案
/// 會被認出是重複而跳過，不會再複製一份
pub fn decide_action(source: &Path, source_size: u64, plan: &DestinationPlan) -> Result<ImportAction> {
    let mut candidate = plan.target_path();
    let mut counter = 0usize;

    loop {
        if !candidate.exists() {
            return Ok(if counter == 0 {
                ImportAction::Copy(candidate)
            } else {
                ImportAction::RenameAndCopy(candidate)
            });
        }

        if files_identical(source, source_size, &candidate)? {
            return Ok(ImportAction::SkipIdentical);
        }

        counter += 1;
        candidate = plan.target_dir.join(numbered_name(&plan.target_name, counter));
    }
}

/// 在副檔名前插入數字後綴
fn numbered_name(name: &str, counter: usize) -> String {
    let path = Path::new(name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem}_{counter}.{ext}"),
        None => format!("{stem}_{counter}"),
    }
}
