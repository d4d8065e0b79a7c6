use anyhow::{Context, Result};
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

/// 複製檔案到目標路徑，保留來源的修改時間
///
/// 先寫入同目錄下以 `.` 開頭的暫存檔，全部寫完才改名成正式檔名，
/// 中途失敗或程式被中斷時不會留下掛著正式名稱的不完整檔案
pub fn copy_file_atomic(source: &Path, dest: &Path) -> Result<u64> {
    let temp_path = temp_path_for(dest)?;

    let result = copy_then_rename(source, &temp_path, dest);
    if result.is_err() {
        // 清掉不完整的暫存檔
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn temp_path_for(dest: &Path) -> Result<PathBuf> {
    let dest_name = dest
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("無法取得目標檔案名稱: {}", dest.display()))?;
    Ok(dest.with_file_name(format!(".{dest_name}.part")))
}

fn copy_then_rename(source: &Path, temp_path: &Path, dest: &Path) -> Result<u64> {
    let bytes = fs::copy(source, temp_path).with_context(|| {
        format!(
            "複製檔案失敗: {} -> {}",
            source.display(),
            temp_path.display()
        )
    })?;

    let modified = fs::metadata(source)
        .and_then(|metadata| metadata.modified())
        .with_context(|| format!("無法讀取來源修改時間: {}", source.display()))?;

    let temp_file = File::options()
        .write(true)
        .open(temp_path)
        .with_context(|| format!("無法開啟暫存檔: {}", temp_path.display()))?;
    temp_file
        .set_times(FileTimes::new().set_modified(modified))
        .with_context(|| format!("無法設定修改時間: {}", temp_path.display()))?;
    drop(temp_file);

    fs::rename(temp_path, dest).with_context(|| {
        format!(
            "無法改名暫存檔: {} -> {}",
            temp_path.display(),
            dest.display()
        )
    })?;

    Ok(bytes)
}
