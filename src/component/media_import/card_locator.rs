use log::info;
use std::path::PathBuf;

/// Sony AVCHD/XAVC 結構中的影片資料夾位置
const VIDEO_CLIP_SUBPATH: [&str; 3] = ["PRIVATE", "M4ROOT", "CLIP"];

/// 自動尋找已掛載記憶卡上的照片與影片資料夾
///
/// 回傳 `(DCIM 資料夾, PRIVATE/M4ROOT/CLIP 資料夾)`，找不到的部分為 `None`
#[must_use]
pub fn locate_card_roots() -> (Option<PathBuf>, Option<PathBuf>) {
    search_mount_points(&mount_points())
}

#[cfg(target_os = "macos")]
fn mount_points() -> Vec<PathBuf> {
    vec![PathBuf::from("/Volumes")]
}

/// Linux 常見的卸除式媒體掛載點
#[cfg(not(target_os = "macos"))]
fn mount_points() -> Vec<PathBuf> {
    let mut points = Vec::new();
    if let Ok(user) = std::env::var("USER") {
        points.push(PathBuf::from("/media").join(&user));
        points.push(PathBuf::from("/run/media").join(&user));
    }
    points.push(PathBuf::from("/media"));
    points.push(PathBuf::from("/mnt"));
    points
}

fn search_mount_points(mount_points: &[PathBuf]) -> (Option<PathBuf>, Option<PathBuf>) {
    let mut dcim = None;
    let mut clip = None;

    for mount_point in mount_points {
        let Ok(entries) = std::fs::read_dir(mount_point) else {
            continue;
        };

        for entry in entries.flatten() {
            let volume = entry.path();
            if !volume.is_dir() {
                continue;
            }

            if dcim.is_none() {
                let candidate = volume.join("DCIM");
                if candidate.is_dir() {
                    info!("找到 DCIM 資料夾: {}", candidate.display());
                    dcim = Some(candidate);
                }
            }

            if clip.is_none() {
                let candidate = VIDEO_CLIP_SUBPATH
                    .iter()
                    .fold(volume.clone(), |path, part| path.join(part));
                if candidate.is_dir() {
                    info!("找到影片資料夾: {}", candidate.display());
                    clip = Some(candidate);
                }
            }

            if dcim.is_some() && clip.is_some() {
                return (dcim, clip);
            }
        }
    }

    (dcim, clip)
}
