use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::cache::{CacheStore, ContestRecord, ProblemRecord};
use crate::fetch::{PageSource, REQUEST_DELAY};
use crate::parser;

pub fn contest_url(contest: &str) -> String {
    format!("https://atcoder.jp/contests/{}", contest)
}

pub fn task_url(contest: &str, problem: &str) -> String {
    format!(
        "https://atcoder.jp/contests/{}/tasks/{}_{}",
        contest,
        contest,
        problem.to_lowercase()
    )
}

/// What one full pass over the contest produced.
pub struct ScrapeSummary {
    pub contest: ContestRecord,
    pub problems: Vec<ProblemRecord>,
    pub fetched: usize,
    pub cache_hits: usize,
}

/// Process the contest and each catalog problem in order: cache check,
/// fetch + extract + persist on a miss, and sample projection always.
///
/// Strictly sequential. A fetch or persist failure propagates immediately;
/// records persisted before the failure stay on disk, so a re-run resumes
/// by cache-hitting everything already done.
pub async fn scrape_contest(
    source: &dyn PageSource,
    store: &CacheStore,
    contest: &str,
    problems: &[String],
) -> Result<ScrapeSummary> {
    let meta = match store.load_contest()? {
        Some(cached) => {
            println!("contest meta: cache hit");
            cached
        }
        None => {
            let url = contest_url(contest);
            println!("fetching contest page: {}", url);
            // One-time metadata fetch, no polite delay needed.
            let html = source.fetch(&url, Duration::ZERO).await?;
            let meta = parser::contest::extract_contest_meta(&html, &url);
            store.save_contest(&meta)?;
            meta
        }
    };

    let mut records = Vec::with_capacity(problems.len());
    let mut fetched = 0usize;
    let mut cache_hits = 0usize;

    for problem in problems {
        println!("=== Problem {} ===", problem);

        let record = match store.load_problem(problem)? {
            Some(cached) => {
                println!("cache hit");
                cache_hits += 1;
                cached
            }
            None => {
                let url = task_url(contest, problem);
                println!("fetching: {}", url);
                let html = source.fetch(&url, REQUEST_DELAY).await?;

                let record = ProblemRecord {
                    problem: problem.clone(),
                    title: parser::title::extract_title(&html),
                    url: Some(url),
                    examples: parser::samples::extract_samples(&html),
                };
                println!("title: {}", record.title.as_deref().unwrap_or("(none)"));
                println!("examples: {}", record.examples.len());

                store.save_problem(&record)?;
                fetched += 1;
                record
            }
        };

        // Re-run on every pass, hit or miss, so deleted sample files come
        // back without invalidating the JSON cache.
        project_samples(store.base_dir(), &record)?;
        records.push(record);
    }

    Ok(ScrapeSummary {
        contest: meta,
        problems: records,
        fetched,
        cache_hits,
    })
}

/// Write each sample pair out as `examples/<P>_<i>.in` / `<P>_<i>.out`,
/// 1-based.
pub fn project_samples(base_dir: &Path, record: &ProblemRecord) -> Result<()> {
    let dir = base_dir.join("examples");
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create examples dir: {}", dir.display()))?;

    for (i, pair) in record.examples.iter().enumerate() {
        let stem = format!("{}_{}", record.problem, i + 1);
        let in_path = dir.join(format!("{}.in", stem));
        let out_path = dir.join(format!("{}.out", stem));
        fs::write(&in_path, &pair.input)
            .with_context(|| format!("failed to write {}", in_path.display()))?;
        fs::write(&out_path, &pair.output)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }
    Ok(())
}

// ── Tests ──
