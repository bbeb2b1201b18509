//! `docpoll check-size` – validate a file against the size limits.

use anyhow::{Context, Result};
use docpoll_core::retry::{format_file_size, RetryPolicy};
use std::fs;
use std::path::Path;

pub fn run_check_size(policy: &RetryPolicy, path: &Path) -> Result<()> {
    let size = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .len();
    policy
        .check_file_size(size)
        .with_context(|| format!("{} is not acceptable", path.display()))?;
    println!("ok: {} ({})", path.display(), format_file_size(size));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_rejected_by_default() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let err = run_check_size(&RetryPolicy::default(), f.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("File size must be between 1 B and 100.00 MB"));
    }

    #[test]
    fn small_file_accepted() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello").unwrap();
        f.flush().unwrap();
        assert!(run_check_size(&RetryPolicy::default(), f.path()).is_ok());
    }
}
