use crate::config::save::save_settings;
use crate::config::types::{Config, UserSettings};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

impl Config {
    /// 讀取目前工作目錄下的 settings.json
    #[must_use]
    pub fn new() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    /// 讀取設定檔，失敗時使用預設值
    ///
    /// 無效的設定檔會先改名為 `.bak` 再使用預設值；
    /// 備份失敗時不會寫回設定檔。
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        match load_settings(path) {
            Ok(settings) => Self {
                settings,
                path: path.to_path_buf(),
                persist: true,
            },
            Err(e) => {
                warn!("{e:#}，改用預設設定");
                let persist = match backup_invalid_settings(path) {
                    Ok(backup) => {
                        warn!("原設定檔已備份至 {}", backup.display());
                        true
                    }
                    Err(e) => {
                        warn!("{e:#}，本次不會儲存設定");
                        false
                    }
                };

                Self {
                    settings: UserSettings::default(),
                    path: path.to_path_buf(),
                    persist,
                }
            }
        }
    }

    /// 儲存設定，原設定檔未能備份時略過
    pub fn save(&self) -> Result<()> {
        if !self.persist {
            warn!("略過儲存設定，保留原本的 {}", self.path.display());
            return Ok(());
        }
        save_settings(&self.settings, &self.path)
    }
}

pub fn load_settings(path: &Path) -> Result<UserSettings> {
    if !path.exists() {
        return Ok(UserSettings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    let settings: UserSettings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

    settings
        .thumbnail
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;

    Ok(settings)
}

/// 將無效的設定檔改名為 `<檔名>.bak`
fn backup_invalid_settings(path: &Path) -> Result<PathBuf> {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    let backup = PathBuf::from(backup);

    fs::rename(path, &backup).with_context(|| {
        format!(
            "Failed to back up settings {} to {}",
            path.display(),
            backup.display()
        )
    })?;

    Ok(backup)
}
