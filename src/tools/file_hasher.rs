use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

const BUFFER_SIZE: usize = 4 * 1024 * 1024; // 4MB buffer

/// 計算檔案內容的 BLAKE3 hash（hex 字串）
pub fn calculate_file_hash(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("無法開啟檔案: {}", path.display()))?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("讀取檔案失敗: {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

/// 比對來源檔案與既有檔案的內容是否相同
///
/// 先比大小（大小不同內容必定不同，省掉大影片檔的 hash 計算），
/// 大小相同時才比對兩邊的 BLAKE3 hash
pub fn files_identical(source: &Path, source_size: u64, existing: &Path) -> Result<bool> {
    let existing_size = fs::metadata(existing)
        .with_context(|| format!("無法讀取檔案資訊: {}", existing.display()))?
        .len();

    if source_size != existing_size {
        return Ok(false);
    }

    Ok(calculate_file_hash(source)? == calculate_file_hash(existing)?)
}
