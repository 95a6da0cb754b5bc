use std::path::PathBuf;
use thiserror::Error;

/// 縮圖產生過程中的錯誤
///
/// 無法判定影片尺寸不屬於錯誤，會以 `Ok(None)` 回傳。
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("無法讀取影片資訊 {}: {message}", path.display())]
    Probe { path: PathBuf, message: String },

    #[error("無法擷取影格 {}: {message}", path.display())]
    Extraction { path: PathBuf, message: String },

    #[error("無效的尺寸設定: {0}")]
    InvalidConstraint(String),

    #[error("無效的擷取時間點: {0}")]
    InvalidTimeOffset(f64),

    #[error("無效的影片路徑: {}", .0.display())]
    InvalidSourcePath(PathBuf),
}

impl ThumbnailError {
    pub fn probe(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Probe {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn extraction(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Extraction {
            path: path.into(),
            message: message.into(),
        }
    }
}
