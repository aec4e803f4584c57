//! Repository catalog: the list of GitHub repositories the dashboard tracks.

pub mod catalog;
pub mod store;

use serde::{Deserialize, Serialize};

pub use catalog::RepoCatalog;
pub use store::RepoStore;

const GITHUB_BASE: &str = "https://github.com/";

/// One tracked repository. `url` is the only key used for deletion and is not
/// required to be unique.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoRecord {
    pub name: String,
    pub url: String,
}

impl RepoRecord {
    /// `owner/repo` plus its canonical github.com URL.
    pub fn github(owner: &str, repo: &str) -> Self {
        let name = format!("{owner}/{repo}");
        let url = format!("{GITHUB_BASE}{name}");
        Self { name, url }
    }
}
