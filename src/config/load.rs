use crate::config::types::{Config, MediaTypeTable};
use anyhow::{Context, Result};

/// 編譯時嵌入的媒體類型設定（不需要外部檔案）
const MEDIA_TYPE_TABLE_JSON: &str = include_str!("../data/media_type_table.json");

impl Config {
    pub fn new() -> Result<Self> {
        Ok(Self {
            media_type_table: Self::load_embedded_media_type_table()?,
        })
    }

    /// 從編譯時嵌入的 JSON 載入媒體類型表
    fn load_embedded_media_type_table() -> Result<MediaTypeTable> {
        serde_json::from_str(MEDIA_TYPE_TABLE_JSON).context("無法解析嵌入的媒體類型設定")
    }
}
