use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::bundled::BundledList;
use super::pool::{WordEntry, WordPool};
use crate::error::DataSourceError;

const TERM_HEADERS: [&str; 4] = ["英文", "english", "term", "word"];
const TRANSLATION_HEADERS: [&str; 4] = ["中文", "chinese", "translation", "meaning"];

/// How to read a tabular word list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Workbook sheet to read. `None` reads the first sheet.
    pub sheet: Option<String>,
    /// Header of the term column, overriding detection.
    pub term_column: Option<String>,
    /// Header of the translation column, overriding detection.
    pub translation_column: Option<String>,
}

/// Where a session's word pool comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    File { path: PathBuf, options: LoadOptions },
    Bundled(BundledList),
}

/// Where the pool in use actually came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolOrigin {
    File(PathBuf),
    Bundled(BundledList),
    /// The requested source failed and the built-in list was substituted.
    Fallback { reason: String },
}

impl PoolOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, PoolOrigin::Fallback { .. })
    }
}

/// Load `source`, substituting [`WordPool::fallback`] on any failure or an
/// empty result. Load problems are logged and reported through the returned
/// origin, never as an error.
pub fn load_or_fallback(source: &WordSource) -> (WordPool, PoolOrigin) {
    let loaded = match source {
        WordSource::File { path, options } => {
            load_word_list(path, options).map(|pool| (pool, PoolOrigin::File(path.clone())))
        }
        WordSource::Bundled(list) => list.load().map(|pool| (pool, PoolOrigin::Bundled(*list))),
    };

    match loaded {
        Ok((pool, origin)) if !pool.is_empty() => {
            tracing::info!(words = pool.len(), ?origin, "word pool loaded");
            (pool, origin)
        }
        Ok((_, origin)) => {
            tracing::warn!(?origin, "word list is empty, using built-in words");
            (
                WordPool::fallback(),
                PoolOrigin::Fallback {
                    reason: "word list is empty".to_string(),
                },
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load word list, using built-in words");
            (
                WordPool::fallback(),
                PoolOrigin::Fallback {
                    reason: e.to_string(),
                },
            )
        }
    }
}

/// Read a word list file. The format follows the extension: `csv`, `json`,
/// or a spreadsheet (`xlsx`, `xls`, `xlsm`, `ods`).
pub fn load_word_list(path: &Path, options: &LoadOptions) -> Result<WordPool, DataSourceError> {
    fs::metadata(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let entries = match extension.as_str() {
        "csv" => read_csv(path, options)?,
        "json" => read_json(path)?,
        "xlsx" | "xls" | "xlsm" | "ods" => read_workbook(path, options)?,
        _ => return Err(DataSourceError::UnsupportedFormat(extension)),
    };

    let pool = WordPool::new(entries);
    if pool.is_empty() {
        return Err(DataSourceError::NoEntries(path.to_path_buf()));
    }
    Ok(pool)
}

fn find_column(
    headers: &[String],
    explicit: Option<&str>,
    candidates: &[&str],
) -> Result<usize, DataSourceError> {
    if let Some(name) = explicit {
        return headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| DataSourceError::MissingColumn(name.to_string()));
    }
    headers
        .iter()
        .position(|h| {
            let h = h.trim().to_lowercase();
            candidates.iter().any(|c| h == *c)
        })
        .ok_or_else(|| DataSourceError::MissingColumn(candidates[0].to_string()))
}

fn detect_columns(
    headers: &[String],
    options: &LoadOptions,
) -> Result<(usize, usize), DataSourceError> {
    let term = find_column(headers, options.term_column.as_deref(), &TERM_HEADERS)?;
    let translation = find_column(
        headers,
        options.translation_column.as_deref(),
        &TRANSLATION_HEADERS,
    )?;
    Ok((term, translation))
}

fn read_csv(path: &Path, options: &LoadOptions) -> Result<Vec<WordEntry>, DataSourceError> {
    let file = File::open(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let (term, translation) = detect_columns(&headers, options)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        entries.push(WordEntry::new(
            record.get(term).unwrap_or_default(),
            record.get(translation).unwrap_or_default(),
        ));
    }
    Ok(entries)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonList {
    Plain(Vec<WordEntry>),
    Named { words: Vec<WordEntry> },
}

fn read_json(path: &Path) -> Result<Vec<WordEntry>, DataSourceError> {
    let bytes = fs::read(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match serde_json::from_slice::<JsonList>(&bytes)? {
        JsonList::Plain(words) | JsonList::Named { words } => words,
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn read_workbook(path: &Path, options: &LoadOptions) -> Result<Vec<WordEntry>, DataSourceError> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match &options.sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(DataSourceError::MissingSheet(name.clone()));
            }
            name.clone()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DataSourceError::NoEntries(path.to_path_buf()))?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_text).collect(),
        None => return Ok(Vec::new()),
    };
    let (term, translation) = detect_columns(&headers, options)?;

    Ok(rows
        .map(|row| {
            let get = |i: usize| row.get(i).map(cell_text).unwrap_or_default();
            WordEntry::new(get(term), get(translation))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn detects_chinese_headers() {
        let headers = vec!["序号".to_string(), "英文".to_string(), "中文".to_string()];
        assert_eq!(
            detect_columns(&headers, &LoadOptions::default()).unwrap(),
            (1, 2)
        );
    }

    #[test]
    fn detects_english_headers_case_insensitively() {
        let headers = vec!["Translation".to_string(), "Word".to_string()];
        assert_eq!(
            detect_columns(&headers, &LoadOptions::default()).unwrap(),
            (1, 0)
        );
    }

    #[test]
    fn explicit_column_names_override_detection() {
        let headers = vec!["en".to_string(), "zh".to_string(), "term".to_string()];
        let options = LoadOptions {
            term_column: Some("en".into()),
            translation_column: Some("ZH".into()),
            ..LoadOptions::default()
        };
        assert_eq!(detect_columns(&headers, &options).unwrap(), (0, 1));
    }

    #[test]
    fn missing_translation_column_is_reported() {
        let headers = vec!["word".to_string(), "notes".to_string()];
        assert_matches!(
            detect_columns(&headers, &LoadOptions::default()),
            Err(DataSourceError::MissingColumn(c)) if c == "中文"
        );
    }

    #[test]
    fn csv_with_blank_and_duplicate_rows() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "words.csv",
            "英文,中文\napple,苹果\n,空\napple,苹果树\ncat,猫\n",
        );

        let pool = load_word_list(&path, &LoadOptions::default()).unwrap();
        assert_eq!(
            pool.entries(),
            &[WordEntry::new("apple", "苹果"), WordEntry::new("cat", "猫")]
        );
    }

    #[test]
    fn json_plain_and_named_shapes() {
        let dir = tempdir().unwrap();
        let plain = write_file(
            dir.path(),
            "plain.json",
            r#"[{"term": "dog", "translation": "狗"}]"#,
        );
        let named = write_file(
            dir.path(),
            "named.json",
            r#"{"words": [{"term": "egg", "translation": "蛋"}]}"#,
        );

        assert_eq!(load_word_list(&plain, &LoadOptions::default()).unwrap().len(), 1);
        assert_eq!(
            load_word_list(&named, &LoadOptions::default())
                .unwrap()
                .get(0),
            Some(&WordEntry::new("egg", "蛋"))
        );
    }

    #[test]
    fn unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "words.txt", "apple 苹果");
        assert_matches!(
            load_word_list(&path, &LoadOptions::default()),
            Err(DataSourceError::UnsupportedFormat(ext)) if ext == "txt"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        assert_matches!(
            load_word_list(&path, &LoadOptions::default()),
            Err(DataSourceError::Io { .. })
        );
    }

    #[test]
    fn header_only_csv_has_no_entries() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "empty.csv", "英文,中文\n");
        assert_matches!(
            load_word_list(&path, &LoadOptions::default()),
            Err(DataSourceError::NoEntries(_))
        );
    }

    #[test]
    fn fallback_on_failure_reports_reason() {
        let dir = tempdir().unwrap();
        let source = WordSource::File {
            path: dir.path().join("missing.xlsx"),
            options: LoadOptions::default(),
        };

        let (pool, origin) = load_or_fallback(&source);
        assert_eq!(pool, WordPool::fallback());
        assert_matches!(origin, PoolOrigin::Fallback { reason } if reason.contains("missing.xlsx"));
    }

    #[test]
    fn bundled_source_reports_origin() {
        let (pool, origin) = load_or_fallback(&WordSource::Bundled(BundledList::Starter));
        assert!(!pool.is_empty());
        assert_eq!(origin, PoolOrigin::Bundled(BundledList::Starter));
        assert!(!origin.is_fallback());
    }
}
