//! 功能元件模組

pub mod video_thumbnailer;

pub use video_thumbnailer::VideoThumbnailer;
