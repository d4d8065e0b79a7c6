use crate::config::{MediaKind, MediaTypeTable};
use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 來源資料夾中一個待匯入的媒體檔案
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: MediaKind,
    pub size: u64,
}

/// 遞迴掃描來源資料夾，只保留指定類型的媒體檔案，按路徑排序
///
/// 不支援的副檔名與隱藏檔在這裡被濾掉，不會進入後續流程
pub fn scan_media_files(
    directory: &Path,
    table: &MediaTypeTable,
    want: MediaKind,
) -> Result<Vec<SourceFile>> {
    let mut files: Vec<SourceFile> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let kind = table.classify(entry.path())?;
            if kind != want {
                return None;
            }
            let metadata = entry.metadata().ok()?;
            Some(SourceFile {
                path: entry.into_path(),
                kind,
                size: metadata.len(),
            })
        })
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
