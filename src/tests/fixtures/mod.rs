use std::fs;
use std::path::{Path, PathBuf};

/// Root of the checked-in snapshot corpus
pub fn corpus_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("corpus")
}

pub fn manifest_path() -> PathBuf {
    corpus_dir().join("manifest.json")
}

/// Load corpus snapshot bytes by opaque numeric id
pub fn load_snapshot(id: &str) -> Vec<u8> {
    let path = corpus_dir().join(format!("{}.html", id));
    fs::read(&path).unwrap_or_else(|_| panic!("Failed to load snapshot fixture: {}", id))
}

/// Load a unit-test page that lives outside the corpus
pub fn load_page_fixture(fixture_name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src/tests/fixtures")
        .join(format!("{}.html", fixture_name));
    fs::read(&path).unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// Load a real failure case for regression testing
pub fn load_failure_snapshot(failure_name: &str) -> Option<Vec<u8>> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src/tests/fixtures/failures")
        .join(format!("{}.html", failure_name));
    fs::read(path).ok()
}
