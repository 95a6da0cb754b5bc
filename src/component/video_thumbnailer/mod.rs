//! 影片縮圖元件
//!
//! 三個步驟：
//! A. 取得影片尺寸（ffprobe）
//! B. 計算縮圖尺寸
//! C. 擷取單張影格（ffmpeg）

mod dimension_resolver;
mod main;
mod thumbnail_generator;

pub use dimension_resolver::{ResolvedSize, SizeConstraint, resolve_dimensions};
pub use main::{GenerationResult, VideoThumbnailer, parse_dimension_input, process_videos};
pub use thumbnail_generator::{
    DEFAULT_TIME_OFFSET_SECONDS, ExtractionOptions, ThumbnailGenerator, thumbnail_filename,
};
