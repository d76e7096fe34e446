use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/init")
        .join(name)
}

/// Copies a fixture into `<tempdir>/<name>` so the generated config carries
/// the fixture's name.
pub fn copy_fixture(name: &str) -> (TempDir, PathBuf) {
    try_copy_fixture(name).unwrap_or_else(|e| panic!("Failed to copy fixture {}: {:#}", name, e))
}

fn try_copy_fixture(name: &str) -> Result<(TempDir, PathBuf)> {
    let temp = TempDir::new().context("Failed to create temp dir")?;
    let dest = temp.path().join(name);
    copy_dir(&fixture_path(name), &dest)?;
    Ok((temp, dest))
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("creating {}", dest.display()))?;
    for entry in fs::read_dir(src).with_context(|| format!("reading {}", src.display()))? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("copying {}", entry.path().display()))?;
        }
    }
    Ok(())
}

/// Every file under `dir` with its content, sorted by relative path
#[allow(dead_code)]
pub fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files = Vec::new();
    collect(dir, dir, &mut files).expect("Failed to snapshot directory");
    files.sort();
    files
}

fn collect(root: &Path, dir: &Path, files: &mut Vec<(PathBuf, Vec<u8>)>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect(root, &path, files)?;
        } else {
            let rel = path.strip_prefix(root)?.to_path_buf();
            let content = fs::read(&path)?;
            files.push((rel, content));
        }
    }
    Ok(())
}
