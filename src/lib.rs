pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod menu;
pub mod signal;
pub mod tools;

pub use component::video_thumbnailer::{
    ExtractionOptions, ResolvedSize, SizeConstraint, ThumbnailGenerator,
};
pub use error::ThumbnailError;
pub use tools::{FfmpegEngine, MediaEngine, VideoDescriptor};

use anyhow::Result;
use console::{Term, style};

pub fn pause(term: &Term) -> Result<()> {
    println!("\n{}", style("按 Enter 繼續...").dim());
    term.read_line()?;
    Ok(())
}
