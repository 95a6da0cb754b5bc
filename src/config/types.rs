use crate::component::video_thumbnailer::{
    DEFAULT_TIME_OFFSET_SECONDS, ExtractionOptions, SizeConstraint,
};
use crate::tools::FfmpegEngine;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 最近使用路徑的保留數量
pub const MAX_RECENT_PATHS: usize = 10;

const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".mkv", ".mov", ".avi", ".wmv", ".flv", ".webm", ".m4v", ".mpg", ".mpeg", ".ts",
    ".m2ts", ".3gp",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    pub time_offset_seconds: f64,
    pub default_width: Option<f64>,
    pub default_height: Option<f64>,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub video_extensions: Vec<String>,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            time_offset_seconds: DEFAULT_TIME_OFFSET_SECONDS,
            default_width: None,
            default_height: None,
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
        }
    }
}

impl ThumbnailSettings {
    pub fn validate(&self) -> Result<()> {
        self.extraction_options().validate()?;
        self.default_constraint().validate()?;
        Ok(())
    }

    #[must_use]
    pub const fn default_constraint(&self) -> SizeConstraint {
        SizeConstraint::new(self.default_width, self.default_height)
    }

    #[must_use]
    pub const fn extraction_options(&self) -> ExtractionOptions {
        ExtractionOptions {
            time_offset_seconds: self.time_offset_seconds,
        }
    }

    #[must_use]
    pub fn engine(&self) -> FfmpegEngine {
        FfmpegEngine::new(&self.ffmpeg_path, &self.ffprobe_path)
    }

    #[must_use]
    pub fn video_extensions_set(&self) -> HashSet<String> {
        self.video_extensions
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        let video_extensions = self.video_extensions_set();
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| video_extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub thumbnail: ThumbnailSettings,
    pub recent_paths: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: UserSettings,
    /// settings.json 的位置
    pub path: PathBuf,
    /// 原本的設定檔無法讀取且無法備份時為 false，避免覆蓋使用者的檔案
    pub persist: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ThumbnailSettings::default();
        assert!((settings.time_offset_seconds - 3.0).abs() < f64::EPSILON);
        assert!(settings.default_constraint().is_unconstrained());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"thumbnail": {"default_width": 320}}"#).unwrap();
        assert_eq!(settings.thumbnail.default_width, Some(320.0));
        assert_eq!(settings.thumbnail.ffmpeg_path, "ffmpeg");
        assert!((settings.thumbnail.time_offset_seconds - 3.0).abs() < f64::EPSILON);
        assert!(settings.recent_paths.is_empty());
    }

    #[test]
    fn test_validate_rejects_negative_offset() {
        let settings = ThumbnailSettings {
            time_offset_seconds: -1.0,
            ..ThumbnailSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_default_width() {
        let settings = ThumbnailSettings {
            default_width: Some(0.0),
            ..ThumbnailSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_is_video_file_case_insensitive() {
        let settings = ThumbnailSettings::default();
        assert!(settings.is_video_file(Path::new("/a/movie.MP4")));
        assert!(settings.is_video_file(Path::new("clip.mkv")));
        assert!(!settings.is_video_file(Path::new("notes.txt")));
        assert!(!settings.is_video_file(Path::new("no_extension")));
    }
}
