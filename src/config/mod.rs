pub mod load;
pub mod save;
pub mod types;

pub use load::{SETTINGS_FILE, load_settings};
pub use save::{add_recent_path, save_settings};
pub use types::{Config, MAX_RECENT_PATHS, ThumbnailSettings, UserSettings};
