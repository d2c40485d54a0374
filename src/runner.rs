use crate::corpus::{partition, Fixture, FixtureGroup};
use crate::extractor::extract_product;
use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Floor below which an extracted image reference is considered a
/// placeholder rather than a usable URL.
pub const MIN_IMAGE_URL_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub batch_size: usize,
    pub progress: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            batch_size: 50,
            progress: true,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", content = "detail")]
pub enum FailureKind {
    /// The snapshot file itself was missing or unreadable.
    Setup(String),
    /// The extractor returned a typed failure for the snapshot bytes.
    Extract(String),
    /// The extractor produced a record but a field disagreed.
    Mismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CaseFailure {
    pub fixture: Fixture,
    pub kind: FailureKind,
}

#[derive(Debug, Serialize, Default)]
pub struct RunResult {
    pub total: usize,
    pub failures: Vec<CaseFailure>,
}

impl RunResult {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn merge(&mut self, other: RunResult) {
        self.total += other.total;
        self.failures.extend(other.failures);
    }
}

/// Run one fixture group against the extractor.
///
/// Every fixture is evaluated; failures are recorded in fixture order and
/// never abort the group, so one broken snapshot cannot mask the rest.
pub fn run_group(root: &Path, group: &FixtureGroup, options: &RunOptions) -> RunResult {
    let mut result = RunResult::default();

    for fixture in &group.fixtures {
        result.total += 1;

        // The file handle is closed and the buffer scoped to this iteration,
        // keeping peak memory bounded by a single snapshot.
        let bytes = match fs::read(root.join(&fixture.file)) {
            Ok(bytes) => bytes,
            Err(e) => {
                result.failures.push(CaseFailure {
                    fixture: fixture.clone(),
                    kind: FailureKind::Setup(e.to_string()),
                });
                continue;
            }
        };

        if let Some(kind) = check_fixture(&bytes, fixture) {
            result.failures.push(CaseFailure {
                fixture: fixture.clone(),
                kind,
            });
        }

        if options.progress {
            // Progress marker per completed case
            print!(".");
            let _ = std::io::stdout().flush();
        }
    }

    if options.progress {
        println!();
    }

    result
}

fn check_fixture(bytes: &[u8], fixture: &Fixture) -> Option<FailureKind> {
    let record = match extract_product(bytes, "text/html", &fixture.url) {
        Ok(record) => record,
        Err(e) => return Some(FailureKind::Extract(e.to_string())),
    };

    if record.title != fixture.expected_title {
        return Some(FailureKind::Mismatch {
            field: "title",
            expected: fixture.expected_title.clone(),
            actual: record.title,
        });
    }

    if record.price <= 0.0 {
        return Some(FailureKind::Mismatch {
            field: "price",
            expected: "> 0".to_string(),
            actual: format!("{}", record.price),
        });
    }

    if record.image_url.len() <= MIN_IMAGE_URL_LEN {
        return Some(FailureKind::Mismatch {
            field: "imageUrl",
            expected: format!("length > {}", MIN_IMAGE_URL_LEN),
            actual: record.image_url,
        });
    }

    None
}

/// Partition the corpus and run every group, merging the per-group results
/// into a single report.
pub fn run_corpus(root: &Path, fixtures: Vec<Fixture>, options: &RunOptions) -> Result<RunResult> {
    let groups = partition(fixtures, options.batch_size)?;
    let mut combined = RunResult::default();

    for group in &groups {
        if options.progress {
            println!("{}: {} cases", group.name, group.fixtures.len());
        }
        combined.merge(run_group(root, group, options));
    }

    Ok(combined)
}

/// Render a run result for human consumption: total case count, then every
/// failure with its fixture identity and mismatch detail. A clean run
/// reports only the total.
pub fn render_report(result: &RunResult) -> String {
    let mut report = format!("total cases: {}\n", result.total);

    if result.is_clean() {
        report.push_str("all cases passed\n");
        return report;
    }

    report.push_str(&format!("failures: {}\n", result.failures.len()));
    for failure in &result.failures {
        let detail = match &failure.kind {
            FailureKind::Setup(msg) => format!("setup failure: {}", msg),
            FailureKind::Extract(msg) => format!("extraction failure: {}", msg),
            FailureKind::Mismatch {
                field,
                expected,
                actual,
            } => format!(
                "{} mismatch: expected {:?}, got {:?}",
                field, expected, actual
            ),
        };
        report.push_str(&format!(
            "  {} ({}): {}\n",
            failure.fixture.file, failure.fixture.url, detail
        ));
    }

    report
}
