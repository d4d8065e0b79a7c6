use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// 媒體類型：照片或影片
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// 媒體庫中對應的子資料夾名稱
    #[must_use]
    pub const fn folder_name(self) -> &'static str {
        match self {
            Self::Photo => "pictures",
            Self::Video => "videos",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Photo => "照片",
            Self::Video => "影片",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTypeTable {
    #[serde(rename = "PHOTO_FILE")]
    pub photo_file: Vec<String>,
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
}

impl MediaTypeTable {
    fn extension_set(extensions: &[String]) -> HashSet<String> {
        extensions.iter().map(|ext| ext.to_lowercase()).collect()
    }

    /// 依副檔名判斷媒體類型，不分大小寫
    ///
    /// 隱藏檔（以 `.` 開頭）、沒有副檔名或副檔名不在表中的檔案
    /// 回傳 `None`，代表不支援、直接排除
    #[must_use]
    pub fn classify(&self, path: &Path) -> Option<MediaKind> {
        let file_name = path.file_name().and_then(|name| name.to_str())?;
        if file_name.starts_with('.') {
            return None;
        }

        let extension = path.extension().and_then(|ext| ext.to_str())?;
        let dotted = format!(".{}", extension.to_lowercase());

        if Self::extension_set(&self.photo_file).contains(&dotted) {
            return Some(MediaKind::Photo);
        }
        if Self::extension_set(&self.video_file).contains(&dotted) {
            return Some(MediaKind::Video);
        }
        None
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub media_type_table: MediaTypeTable,
}
