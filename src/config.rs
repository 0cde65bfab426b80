use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::round::DistractorPolicy;
use crate::session::{SessionSettings, DEFAULT_SESSION_LENGTH};
use crate::words::{BundledList, LoadOptions, WordSource};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub session_length: usize,
    /// Word list file; the bundled list is used when unset.
    pub word_list: Option<PathBuf>,
    pub bundled_list: BundledList,
    pub sheet: Option<String>,
    pub distractors: DistractorPolicy,
    /// How long answer feedback stays on screen before the next word.
    pub feedback_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_length: DEFAULT_SESSION_LENGTH,
            word_list: None,
            bundled_list: BundledList::default(),
            sheet: None,
            distractors: DistractorPolicy::default(),
            feedback_delay_ms: 1500,
        }
    }
}

impl Config {
    pub fn word_source(&self) -> WordSource {
        match &self.word_list {
            Some(path) => WordSource::File {
                path: path.clone(),
                options: LoadOptions {
                    sheet: self.sheet.clone(),
                    ..LoadOptions::default()
                },
            },
            None => WordSource::Bundled(self.bundled_list),
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            session_length: self.session_length.max(1),
            distractors: self.distractors,
        }
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path().unwrap_or_else(|| PathBuf::from("wordmatch_config.json")),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}
