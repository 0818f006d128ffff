//! Context records handed to the external template-rendering step.
//!
//! Rendering itself (solution skeletons, tests, README) is a downstream
//! concern; this module only shapes cached records into the structures the
//! templates consume and dumps them as JSON under `<base>/render/`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cache::{ContestRecord, ProblemRecord};
use crate::pipeline::task_url;

#[derive(Debug, Serialize)]
pub struct SampleCase {
    pub index: usize,
    pub input: String,
    pub output: String,
}

/// Per-problem template context: skeleton header fields plus the samples,
/// 1-based and with the trailing newline stripped for inline embedding.
#[derive(Debug, Serialize)]
pub struct ProblemContext {
    pub contest: String,
    pub problem: String,
    pub title: String,
    pub url: String,
    pub examples: Vec<SampleCase>,
}

#[derive(Debug, Serialize)]
pub struct ProblemLink {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Aggregate context for the generated contest summary document.
#[derive(Debug, Serialize)]
pub struct ContestContext {
    pub contest: String,
    pub date: String,
    pub url: String,
    pub problems: Vec<ProblemLink>,
}

pub fn problem_context(contest: &str, record: &ProblemRecord) -> ProblemContext {
    let examples = record
        .examples
        .iter()
        .enumerate()
        .map(|(i, pair)| SampleCase {
            index: i + 1,
            input: strip_last_newline(&pair.input),
            output: strip_last_newline(&pair.output),
        })
        .collect();

    ProblemContext {
        contest: contest.to_string(),
        problem: record.problem.clone(),
        title: fallback_title(record),
        url: record
            .url
            .clone()
            .unwrap_or_else(|| task_url(contest, &record.problem)),
        examples,
    }
}

pub fn contest_context(
    contest: &str,
    meta: &ContestRecord,
    records: &[ProblemRecord],
) -> ContestContext {
    ContestContext {
        contest: meta
            .title
            .clone()
            .unwrap_or_else(|| contest.to_uppercase()),
        date: meta
            .date
            .clone()
            .or_else(|| meta.start_time_raw.clone())
            .unwrap_or_default(),
        url: meta.url.clone(),
        problems: records
            .iter()
            .map(|record| ProblemLink {
                id: record.problem.clone(),
                title: fallback_title(record),
                url: record
                    .url
                    .clone()
                    .unwrap_or_else(|| task_url(contest, &record.problem)),
            })
            .collect(),
    }
}

/// Write all contexts under `<base>/render/` for the templating step.
pub fn write_contexts(
    base_dir: &Path,
    contest: &ContestContext,
    problems: &[ProblemContext],
) -> Result<()> {
    let dir = base_dir.join("render");
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create render dir: {}", dir.display()))?;

    write_json(&dir.join("contest.json"), contest)?;
    for ctx in problems {
        write_json(&dir.join(format!("{}.json", ctx.problem)), ctx)?;
    }
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

fn fallback_title(record: &ProblemRecord) -> String {
    record
        .title
        .clone()
        .unwrap_or_else(|| format!("Problem {}", record.problem))
}

/// Exactly one trailing newline removed; embedded ones stay.
fn strip_last_newline(s: &str) -> String {
    s.strip_suffix('\n').unwrap_or(s).to_string()
}

// ── Tests ──
