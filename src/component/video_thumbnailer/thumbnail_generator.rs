use super::dimension_resolver::{ResolvedSize, SizeConstraint, resolve_dimensions};
use crate::error::ThumbnailError;
use crate::tools::{FRAME_COUNT, MediaEngine, ScreenshotRequest};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// 預設擷取時間點（秒）
pub const DEFAULT_TIME_OFFSET_SECONDS: f64 = 3.0;

/// 影格擷取設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionOptions {
    pub time_offset_seconds: f64,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            time_offset_seconds: DEFAULT_TIME_OFFSET_SECONDS,
        }
    }
}

impl ExtractionOptions {
    /// 擷取時間點必須為有限且非負的秒數
    pub fn validate(&self) -> Result<(), ThumbnailError> {
        let offset = self.time_offset_seconds;
        if offset.is_finite() && offset >= 0.0 {
            Ok(())
        } else {
            Err(ThumbnailError::InvalidTimeOffset(offset))
        }
    }
}

/// 影片縮圖產生器
///
/// 流程：
/// 1. 讀取影片尺寸（probe）
/// 2. 計算縮圖尺寸
/// 3. 組出 `<檔名>@<寬>x<高>.jpg`
/// 4. 擷取單張影格到輸出資料夾
///
/// 產生器本身不保存狀態，可同時處理不同影片。
pub struct ThumbnailGenerator<E> {
    engine: E,
    options: ExtractionOptions,
}

impl<E: MediaEngine> ThumbnailGenerator<E> {
    pub fn new(engine: E) -> Self {
        Self::with_options(engine, ExtractionOptions::default())
    }

    pub const fn with_options(engine: E, options: ExtractionOptions) -> Self {
        Self { engine, options }
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub const fn options(&self) -> ExtractionOptions {
        self.options
    }

    /// 產生縮圖並回傳輸出路徑
    ///
    /// 影片沒有回報寬高時回傳 `Ok(None)`，不會進行擷取。
    /// probe 或擷取失敗的錯誤原樣回傳，不重試。
    pub async fn generate_thumbnail(
        &self,
        source_path: &Path,
        destination_directory: &Path,
        constraint: &SizeConstraint,
    ) -> Result<Option<PathBuf>, ThumbnailError> {
        let Some(request) = self
            .plan_thumbnail(source_path, destination_directory, constraint)
            .await?
        else {
            return Ok(None);
        };

        self.extract(&request).await.map(Some)
    }

    /// 讀取影片尺寸並組出擷取請求，不寫入任何檔案
    pub async fn plan_thumbnail(
        &self,
        source_path: &Path,
        destination_directory: &Path,
        constraint: &SizeConstraint,
    ) -> Result<Option<ScreenshotRequest>, ThumbnailError> {
        constraint.validate()?;
        self.options.validate()?;
        let label = base_label(source_path)?;

        let descriptor = self.engine.probe(source_path).await?;
        let Some((source_width, source_height)) = descriptor.dimensions() else {
            debug!("無法判定影片尺寸，略過: {}", source_path.display());
            return Ok(None);
        };

        let size = resolve_dimensions(source_width, source_height, constraint);
        debug!(
            "{}: {source_width}x{source_height} -> {size}",
            source_path.display()
        );

        let time_offset_seconds = self.options.time_offset_seconds;
        if let Some(duration) = descriptor
            .duration_seconds
            .filter(|&d| d <= time_offset_seconds)
        {
            warn!(
                "影片長度 {duration:.2}s 不超過擷取時間點 {time_offset_seconds:.2}s: {}",
                source_path.display()
            );
        }

        Ok(Some(ScreenshotRequest {
            source_path: source_path.to_path_buf(),
            output_directory: destination_directory.to_path_buf(),
            output_filename: thumbnail_filename(&label, size),
            time_offset_seconds,
            count: FRAME_COUNT,
            size,
        }))
    }

    /// 依請求擷取影格，回傳寫入的路徑
    pub async fn extract(&self, request: &ScreenshotRequest) -> Result<PathBuf, ThumbnailError> {
        let output_path = request.output_path();
        self.engine.screenshot(request).await?;

        info!("縮圖已建立: {}", output_path.display());
        Ok(output_path)
    }
}

/// 縮圖檔名：`<檔名>@<寬>x<高>.jpg`
#[must_use]
pub fn thumbnail_filename(base_label: &str, size: ResolvedSize) -> String {
    format!("{base_label}@{}x{}.jpg", size.width, size.height)
}

/// 取得不含副檔名的檔名
fn base_label(source_path: &Path) -> Result<String, ThumbnailError> {
    source_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| ThumbnailError::InvalidSourcePath(source_path.to_path_buf()))
}
