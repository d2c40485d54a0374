use anyhow::Result;
use std::fs;
use std::path::Path;

pub mod fixtures;

/// Helper function to save a misbehaving snapshot for future regression testing
pub fn save_failed_snapshot(bytes: &[u8], test_name: &str) -> Result<()> {
    // Create tests/fixtures/failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir)?;

    // Save the snapshot for further analysis
    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, bytes)?;

    println!("Saved failed snapshot to {}", file_path.display());
    Ok(())
}
