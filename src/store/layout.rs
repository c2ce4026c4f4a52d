use std::path::PathBuf;

use crate::record::Record;

const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\t'];

/// Directory tree under the output root.
#[derive(Clone, Debug)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn raw_dir(&self) -> PathBuf { self.root.join("raw") }
    pub fn processed_dir(&self) -> PathBuf { self.root.join("processed") }
    pub fn error_dir(&self) -> PathBuf { self.root.join("errors") }
    pub fn batch_dir(&self) -> PathBuf { self.root.join("batch") }

    pub fn all_dirs(&self) -> [PathBuf; 4] {
        [self.raw_dir(), self.processed_dir(), self.error_dir(), self.batch_dir()]
    }
}

pub fn sanitize_filename(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace(INVALID_FILENAME_CHARS, "_")
}

/// `<icon_id>_<name>_<id>.json`; a later record with the same key replaces the file.
pub fn processed_file_name(record: &Record) -> String {
    format!("{}_{}_{}.json", record.icon_id, sanitize_filename(&record.name), record.numeric_id)
}

pub fn stamped_file_name(name: &str, stamp: &str) -> String {
    format!("{}_{}.json", sanitize_filename(name), stamp)
}

pub fn report_file_name(stamp: &str) -> String {
    format!("results_{stamp}.json")
}
