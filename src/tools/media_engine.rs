use super::ffmpeg_command::{FfmpegCommand, ScreenshotRequest};
use super::ffprobe_info::{VideoDescriptor, get_video_info};
use crate::error::ThumbnailError;
use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 外部影音引擎
///
/// 每個方法對應一次外部呼叫，完成或失敗後才返回。
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// 讀取影片的串流資訊
    async fn probe(&self, source_path: &Path) -> Result<VideoDescriptor, ThumbnailError>;

    /// 依請求擷取影格並寫入磁碟
    async fn screenshot(&self, request: &ScreenshotRequest) -> Result<(), ThumbnailError>;
}

/// 透過 ffprobe / ffmpeg 執行檔實作的引擎
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    ffmpeg_path: PathBuf,
    ffprobe_path: PathBuf,
}

impl FfmpegEngine {
    pub fn new(ffmpeg_path: impl Into<PathBuf>, ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

#[async_trait]
impl MediaEngine for FfmpegEngine {
    async fn probe(&self, source_path: &Path) -> Result<VideoDescriptor, ThumbnailError> {
        get_video_info(&self.ffprobe_path, source_path).await
    }

    async fn screenshot(&self, request: &ScreenshotRequest) -> Result<(), ThumbnailError> {
        let source = &request.source_path;
        let output_path = request.output_path();
        let command = FfmpegCommand::new(&self.ffmpeg_path, request);

        // 舊的同名縮圖會讓沒有寫出影格的執行看起來成功，先移除
        match tokio::fs::remove_file(&output_path).await {
            Ok(()) => debug!("移除舊縮圖: {}", output_path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ThumbnailError::extraction(
                    source,
                    format!("無法移除舊縮圖 {}: {e}", output_path.display()),
                ));
            }
        }

        debug!("ffmpeg {:?}", command.build_args());

        let output = command
            .build_command()
            .output()
            .await
            .map_err(|e| ThumbnailError::extraction(source, format!("無法執行 ffmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ThumbnailError::extraction(
                source,
                format!("ffmpeg 擷取影格失敗: {}", stderr.trim()),
            ));
        }

        // 確認輸出檔案存在
        if !tokio::fs::try_exists(&output_path).await.unwrap_or(false) {
            return Err(ThumbnailError::extraction(
                source,
                format!("縮圖檔案未建立: {}", output_path.display()),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::video_thumbnailer::ResolvedSize;
    use crate::tools::FRAME_COUNT;

    const MISSING_BINARY: &str = "/nonexistent/bin/ffmpeg";

    fn request(output_directory: &Path) -> ScreenshotRequest {
        ScreenshotRequest {
            source_path: PathBuf::from("/videos/movie.mp4"),
            output_directory: output_directory.to_path_buf(),
            output_filename: "movie@320x180.jpg".to_string(),
            time_offset_seconds: 60.0,
            count: FRAME_COUNT,
            size: ResolvedSize {
                width: 320,
                height: 180,
            },
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_screenshot_non_zero_exit_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FfmpegEngine::new("false", "ffprobe");

        let err = engine.screenshot(&request(dir.path())).await.unwrap_err();
        assert!(matches!(err, ThumbnailError::Extraction { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_screenshot_without_output_file_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FfmpegEngine::new("true", "ffprobe");

        let err = engine.screenshot(&request(dir.path())).await.unwrap_err();
        assert!(matches!(err, ThumbnailError::Extraction { .. }));
        assert!(err.to_string().contains("縮圖檔案未建立"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stale_thumbnail_does_not_mask_missing_frame() {
        let dir = tempfile::tempdir().unwrap();
        let request = request(dir.path());
        std::fs::write(request.output_path(), b"old jpeg").unwrap();

        let engine = FfmpegEngine::new("true", "ffprobe");
        let err = engine.screenshot(&request).await.unwrap_err();

        assert!(matches!(err, ThumbnailError::Extraction { .. }));
        assert!(!request.output_path().exists());
    }

    #[tokio::test]
    async fn test_screenshot_missing_binary_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FfmpegEngine::new(MISSING_BINARY, "ffprobe");

        let err = engine.screenshot(&request(dir.path())).await.unwrap_err();
        assert!(matches!(err, ThumbnailError::Extraction { .. }));
        assert!(err.to_string().contains("無法執行 ffmpeg"));
    }

    #[tokio::test]
    async fn test_probe_missing_binary_is_probe_error() {
        let engine = FfmpegEngine::new("ffmpeg", MISSING_BINARY);

        let err = engine.probe(Path::new("/videos/movie.mp4")).await.unwrap_err();
        assert!(matches!(err, ThumbnailError::Probe { .. }));
        assert!(err.to_string().contains("無法執行 ffprobe"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_non_zero_exit_is_probe_error() {
        let engine = FfmpegEngine::new("ffmpeg", "false");

        let err = engine.probe(Path::new("/videos/movie.mp4")).await.unwrap_err();
        assert!(matches!(err, ThumbnailError::Probe { .. }));
    }
}
