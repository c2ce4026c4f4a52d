use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const COMMENT_MARKER: &str = "//";

/// The batch source file does not exist.
#[derive(Debug)]
pub struct InputFileMissing(pub PathBuf);

impl std::fmt::Display for InputFileMissing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "File not found: {}", self.0.display())
    }
}

impl std::error::Error for InputFileMissing {}

/// Trimmed, whitespace-collapsed form of a line; `None` for blanks and comments.
pub fn normalize_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
        return None;
    }
    Some(trimmed.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Unique queries in first-seen order.
pub fn parse<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for line in lines {
        if let Some(q) = normalize_line(line.as_ref()) {
            if seen.insert(q.clone()) {
                out.push(q);
            }
        }
    }
    out
}

pub fn read_list(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(InputFileMissing(path.to_path_buf()).into());
    }
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(parse(text.lines()))
}
