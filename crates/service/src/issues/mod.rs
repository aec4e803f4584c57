//! Daily issue snapshots.
//!
//! An external job drops one `github_issues<YYYYMMDD>.json` per day next to the
//! repository file. They are read-only here; which one is served depends only on
//! the date handed in by the caller.

use std::path::PathBuf;

use chrono::NaiveDate;
use tokio::fs;
use tracing::debug;

use crate::errors::ServiceError;

#[derive(Clone, Debug)]
pub struct IssueSnapshots {
    dir: PathBuf,
    prefix: String,
    suffix: String,
}

impl IssueSnapshots {
    pub fn new<P: Into<PathBuf>>(dir: P, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self { dir: dir.into(), prefix: prefix.into(), suffix: suffix.into() }
    }

    /// `github_issues` / `.json` in the given directory.
    pub fn with_defaults<P: Into<PathBuf>>(dir: P) -> Self {
        Self::new(dir, "github_issues", ".json")
    }

    pub fn file_name_for(&self, date: NaiveDate) -> String {
        format!("{}{}{}", self.prefix, date.format("%Y%m%d"), self.suffix)
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(self.file_name_for(date))
    }

    /// Raw snapshot bytes for `date`, not validated.
    pub async fn read_for(&self, date: NaiveDate) -> Result<Vec<u8>, ServiceError> {
        let path = self.path_for(date);
        debug!(path = %path.display(), "reading issue snapshot");
        fs::read(&path).await.map_err(|e| ServiceError::io("open", &path, e))
    }
}
