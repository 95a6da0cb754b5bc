use crate::component::VideoThumbnailer;
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_single_thumbnail(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let mut thumbnailer = VideoThumbnailer::new(config, Arc::clone(shutdown_signal));

    if let Err(e) = thumbnailer.run_single() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_folder_thumbnails(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let mut thumbnailer = VideoThumbnailer::new(config, Arc::clone(shutdown_signal));

    if let Err(e) = thumbnailer.run_folder() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}
