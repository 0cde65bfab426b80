use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::pool::{WordEntry, WordPool};
use crate::error::DataSourceError;

static LISTS_DIR: Dir = include_dir!("src/words/lists");

/// Word lists compiled into the binary.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BundledList {
    #[default]
    Starter,
    Everyday,
}

#[derive(Deserialize, Debug)]
struct ListFile {
    #[allow(dead_code)]
    name: String,
    words: Vec<WordEntry>,
}

impl BundledList {
    pub fn load(self) -> Result<WordPool, DataSourceError> {
        let file_name = format!("{self}.json");
        let file = LISTS_DIR
            .get_file(&file_name)
            .ok_or_else(|| DataSourceError::NoEntries(PathBuf::from(&file_name)))?;
        let list: ListFile = serde_json::from_slice(file.contents())?;
        Ok(WordPool::new(list.words))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_list_loads() {
        let pool = BundledList::Starter.load().unwrap();
        assert_eq!(pool.len(), 30);
        assert_eq!(pool.get(0), Some(&WordEntry::new("apple", "苹果")));
    }

    #[test]
    fn everyday_list_loads() {
        let pool = BundledList::Everyday.load().unwrap();
        assert!(pool.len() >= 20);
    }

    #[test]
    fn display_matches_file_stem() {
        assert_eq!(BundledList::Starter.to_string(), "starter");
        assert_eq!(BundledList::Everyday.to_string(), "everyday");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&BundledList::Everyday).unwrap();
        assert_eq!(json, "\"everyday\"");
        let back: BundledList = serde_json::from_str("\"starter\"").unwrap();
        assert_eq!(back, BundledList::Starter);
    }
}
