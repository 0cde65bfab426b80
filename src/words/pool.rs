use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One quiz word: an English term and its translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordEntry {
    pub term: String,
    pub translation: String,
}

impl WordEntry {
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
        }
    }
}

const FALLBACK_WORDS: [(&str, &str); 10] = [
    ("apple", "苹果"),
    ("banana", "香蕉"),
    ("computer", "电脑"),
    ("language", "语言"),
    ("book", "书"),
    ("student", "学生"),
    ("teacher", "老师"),
    ("water", "水"),
    ("fire", "火"),
    ("earth", "地球"),
];

/// Ordered, deduplicated sequence of words a session draws from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordPool {
    entries: Vec<WordEntry>,
}

impl WordPool {
    /// Build a pool from raw rows. Whitespace is trimmed, rows with a blank
    /// term or translation are dropped and the first occurrence of each term
    /// wins.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = WordEntry>,
    {
        let entries = entries
            .into_iter()
            .map(|e| WordEntry::new(e.term.trim(), e.translation.trim()))
            .filter(|e| !e.term.is_empty() && !e.translation.is_empty())
            .unique_by(|e| e.term.clone())
            .collect();
        Self { entries }
    }

    /// The built-in list used when no word list can be loaded.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_WORDS.iter().map(|(t, tr)| WordEntry::new(*t, *tr)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// First `n` entries, for the idle screen preview.
    pub fn preview(&self, n: usize) -> &[WordEntry] {
        &self.entries[..n.min(self.entries.len())]
    }
}

impl FromIterator<WordEntry> for WordPool {
    fn from_iter<T: IntoIterator<Item = WordEntry>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupes_by_term_keeping_first() {
        let pool = WordPool::new(vec![
            WordEntry::new("apple", "苹果"),
            WordEntry::new("apple", "苹果树"),
            WordEntry::new("cat", "猫"),
        ]);

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(0).unwrap().translation, "苹果");
        assert_eq!(pool.get(1).unwrap().term, "cat");
    }

    #[test]
    fn drops_blank_rows_and_trims() {
        let pool = WordPool::new(vec![
            WordEntry::new("  dog ", " 狗 "),
            WordEntry::new("", "空"),
            WordEntry::new("egg", "   "),
        ]);

        assert_eq!(pool.entries(), &[WordEntry::new("dog", "狗")]);
    }

    #[test]
    fn duplicate_translations_are_kept() {
        let pool = WordPool::new(vec![
            WordEntry::new("big", "大"),
            WordEntry::new("large", "大"),
        ]);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn fallback_is_never_empty() {
        let pool = WordPool::fallback();
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.get(0), Some(&WordEntry::new("apple", "苹果")));
    }

    #[test]
    fn preview_is_clamped_to_pool_size() {
        let pool = WordPool::fallback();
        assert_eq!(pool.preview(3).len(), 3);
        assert_eq!(pool.preview(50).len(), 10);
        assert!(WordPool::default().preview(5).is_empty());
    }
}
