use crate::config::MediaKind;
use chrono::{DateTime, Local, NaiveDate};
use exif::{In, Tag, Value};
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// EXIF 日期欄位的優先順序
const EXIF_DATE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

/// 解析媒體檔案的拍攝日期，保證一定有結果
///
/// 照片優先讀取 EXIF 拍攝時間；影片容器通常沒有可靠的 EXIF，
/// 直接使用檔案修改時間。讀不到 EXIF 或檔案損毀時依序退回
/// 檔案修改時間、今天的日期，單一檔案的日期問題不會中斷整批匯入
#[must_use]
pub fn resolve_capture_date(path: &Path, kind: MediaKind) -> NaiveDate {
    if kind == MediaKind::Photo {
        if let Some(date) = read_exif_date(path) {
            return date;
        }
    }

    if let Some(date) = read_modified_date(path) {
        return date;
    }

    Local::now().date_naive()
}

fn read_exif_date(path: &Path) -> Option<NaiveDate> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;

    for tag in EXIF_DATE_TAGS {
        let Some(field) = exif.get_field(tag, In::PRIMARY) else {
            continue;
        };
        let Value::Ascii(ref values) = field.value else {
            continue;
        };
        let Some(raw) = values.first() else {
            continue;
        };
        let Ok(datetime) = exif::DateTime::from_ascii(raw) else {
            continue;
        };
        if let Some(date) = NaiveDate::from_ymd_opt(
            i32::from(datetime.year),
            u32::from(datetime.month),
            u32::from(datetime.day),
        ) {
            debug!("從 EXIF 讀到拍攝日期: {} -> {date}", path.display());
            return Some(date);
        }
    }

    None
}

/// 以本地時區解讀檔案修改時間（與相機螢幕顯示的日期一致）
fn read_modified_date(path: &Path) -> Option<NaiveDate> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let datetime: DateTime<Local> = modified.into();
    Some(datetime.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, FileTimes};
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    /// 組出只帶一個 DateTimeOriginal 欄位的最小 EXIF JPEG
    fn exif_jpeg_with_date(date_time: &str) -> Vec<u8> {
        assert_eq!(date_time.len(), 19);

        // TIFF 結構：IFD0 只有指向 Exif IFD 的欄位，
        // Exif IFD 只有 DateTimeOriginal
        let mut tiff: Vec<u8> = Vec::new();
        tiff.extend_from_slice(b"II*\0");
        tiff.extend_from_slice(&8u32.to_le_bytes()); // IFD0 位移

        tiff.extend_from_slice(&1u16.to_le_bytes()); // IFD0 欄位數
        tiff.extend_from_slice(&0x8769u16.to_le_bytes()); // Exif IFD pointer
        tiff.extend_from_slice(&4u16.to_le_bytes()); // LONG
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&26u32.to_le_bytes()); // Exif IFD 位移
        tiff.extend_from_slice(&0u32.to_le_bytes()); // 沒有下一個 IFD

        tiff.extend_from_slice(&1u16.to_le_bytes()); // Exif IFD 欄位數
        tiff.extend_from_slice(&0x9003u16.to_le_bytes()); // DateTimeOriginal
        tiff.extend_from_slice(&2u16.to_le_bytes()); // ASCII
        tiff.extend_from_slice(&20u32.to_le_bytes());
        tiff.extend_from_slice(&44u32.to_le_bytes()); // 字串位移
        tiff.extend_from_slice(&0u32.to_le_bytes());

        tiff.extend_from_slice(date_time.as_bytes());
        tiff.push(0);

        let mut app1: Vec<u8> = Vec::new();
        app1.extend_from_slice(b"Exif\0\0");
        app1.extend_from_slice(&tiff);

        let mut jpeg: Vec<u8> = vec![0xFF, 0xD8]; // SOI
        jpeg.extend_from_slice(&[0xFF, 0xE1]); // APP1
        jpeg.extend_from_slice(&u16::try_from(app1.len() + 2).unwrap().to_be_bytes());
        jpeg.extend_from_slice(&app1);
        jpeg.extend_from_slice(&[0xFF, 0xD9]); // EOI
        jpeg
    }

    fn set_mtime(path: &Path, unix_seconds: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_times(
            FileTimes::new().set_modified(UNIX_EPOCH + Duration::from_secs(unix_seconds)),
        )
        .unwrap();
    }

    #[test]
    fn test_photo_uses_exif_date() {
        let temp_dir = TempDir::new().unwrap();
        let photo = temp_dir.path().join("DSC00001.jpg");
        fs::write(&photo, exif_jpeg_with_date("2023:06:01 14:30:45")).unwrap();

        let date = resolve_capture_date(&photo, MediaKind::Photo);
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
    }

    #[test]
    fn test_photo_without_exif_falls_back_to_mtime() {
        let temp_dir = TempDir::new().unwrap();
        let photo = temp_dir.path().join("DSC00002.arw");
        fs::write(&photo, b"not a real raw file").unwrap();

        let unix_seconds = 1_700_000_000; // 2023-11-14 前後（依時區而定）
        set_mtime(&photo, unix_seconds);

        let expected: DateTime<Local> = (UNIX_EPOCH + Duration::from_secs(unix_seconds)).into();
        let date = resolve_capture_date(&photo, MediaKind::Photo);
        assert_eq!(date, expected.date_naive());
    }

    #[test]
    fn test_video_skips_exif_and_uses_mtime() {
        let temp_dir = TempDir::new().unwrap();
        // 故意給影片塞一個帶 EXIF 的內容，確認影片不讀 EXIF
        let video = temp_dir.path().join("C0001.MP4");
        fs::write(&video, exif_jpeg_with_date("2020:01:01 00:00:00")).unwrap();

        let unix_seconds = 1_685_600_000;
        set_mtime(&video, unix_seconds);

        let expected: DateTime<Local> = (UNIX_EPOCH + Duration::from_secs(unix_seconds)).into();
        let date = resolve_capture_date(&video, MediaKind::Video);
        assert_eq!(date, expected.date_naive());
    }

    #[test]
    fn test_missing_file_still_returns_a_date() {
        // 連檔案都讀不到時退回今天的日期，永遠不會失敗
        let before = Local::now().date_naive();
        let date = resolve_capture_date(Path::new("/nonexistent/DSC09999.ARW"), MediaKind::Photo);
        let after = Local::now().date_naive();

        assert!(date == before || date == after);
    }
}
