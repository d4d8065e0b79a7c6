use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// 確認路徑存在而且是資料夾
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

/// 建立目錄（含上層目錄），已存在時不視為錯誤
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("無法建立目錄: {}", path.display()))?;
    Ok(())
}
