use crate::config::ThumbnailSettings;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct VideoFileInfo {
    pub path: PathBuf,
    pub size: u64,
}

/// 遞迴掃描資料夾內的影片檔，依檔案大小排序（由小到大）
#[must_use]
pub fn scan_video_files(directory: &Path, settings: &ThumbnailSettings) -> Vec<VideoFileInfo> {
    let mut video_files: Vec<VideoFileInfo> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| settings.is_video_file(entry.path()))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            Some(VideoFileInfo {
                path: entry.into_path(),
                size: metadata.len(),
            })
        })
        .collect();

    video_files.sort_by_key(|file| file.size);
    video_files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir_all(&nested).unwrap();

        fs::write(dir.path().join("big.mp4"), vec![0u8; 300]).unwrap();
        fs::write(nested.join("small.MKV"), vec![0u8; 10]).unwrap();
        fs::write(dir.path().join("mid.mov"), vec![0u8; 100]).unwrap();
        fs::write(dir.path().join("readme.txt"), b"text").unwrap();
        fs::write(dir.path().join("big@320x180.jpg"), b"jpeg").unwrap();

        let files = scan_video_files(dir.path(), &ThumbnailSettings::default());
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["small.MKV", "mid.mov", "big.mp4"]);
        assert_eq!(files[0].size, 10);
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_video_files(dir.path(), &ThumbnailSettings::default()).is_empty());
    }
}
