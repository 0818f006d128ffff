use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One official sample: input and its expected output, line breaks intact,
/// carriage returns already stripped at extraction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplePair {
    pub input: String,
    pub output: String,
}

/// Everything extracted from one problem page. `problem` is the stable key
/// ("A".."F"). Zero examples is a valid record (the page had nothing
/// extractable); "no record yet" is `None` at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub problem: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub examples: Vec<SamplePair>,
}

/// Contest-level metadata. `date` is the normalized `YYYY-MM-DD` form of
/// `start_time_raw`; every field except `url` may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestRecord {
    pub url: String,
    pub title: Option<String>,
    pub start_time_raw: Option<String>,
    pub date: Option<String>,
}

/// JSON-file cache under `<base>/cache/`: `contest.json` for the contest
/// record, `<P>.json` per problem. Records are overwritten whole, never
/// merged; nothing here deletes them.
pub struct CacheStore {
    base_dir: PathBuf,
}

impl CacheStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn cache_dir(&self) -> PathBuf {
        self.base_dir.join("cache")
    }

    fn contest_path(&self) -> PathBuf {
        self.cache_dir().join("contest.json")
    }

    fn problem_path(&self, problem: &str) -> PathBuf {
        self.cache_dir().join(format!("{}.json", problem))
    }

    pub fn load_contest(&self) -> Result<Option<ContestRecord>> {
        load_json(&self.contest_path())
    }

    pub fn save_contest(&self, record: &ContestRecord) -> Result<()> {
        self.save_json(&self.contest_path(), record)
    }

    pub fn load_problem(&self, problem: &str) -> Result<Option<ProblemRecord>> {
        load_json(&self.problem_path(problem))
    }

    pub fn save_problem(&self, record: &ProblemRecord) -> Result<()> {
        self.save_json(&self.problem_path(&record.problem), record)
    }

    fn save_json<T: Serialize>(&self, path: &Path, record: &T) -> Result<()> {
        let dir = self.cache_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create cache dir: {}", dir.display()))?;
        let text = serde_json::to_string_pretty(record)?;
        fs::write(path, text)
            .with_context(|| format!("failed to write cache file: {}", path.display()))?;
        Ok(())
    }
}

/// Missing file is a clean miss; a file that exists but does not parse is a
/// hard error, so stale or corrupt cache never masquerades as fresh data.
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read cache file: {}", path.display()))?;
    let record = serde_json::from_str(&text)
        .with_context(|| format!("corrupt cache file: {}", path.display()))?;
    Ok(Some(record))
}

// ── Tests ──
