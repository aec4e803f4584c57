use std::sync::Arc;

use chrono::{Local, NaiveDate};
use service::{issues::IssueSnapshots, repos::RepoCatalog};

/// Shared handler state. Cloned per request; the catalog behind the `Arc` is the
/// single owner of the repository file.
#[derive(Clone)]
pub struct ServerState {
    pub repos: Arc<dyn RepoCatalog>,
    pub issues: IssueSnapshots,
    /// Source of "today" for `/getIssues`.
    pub today: fn() -> NaiveDate,
}

impl ServerState {
    pub fn new(repos: Arc<dyn RepoCatalog>, issues: IssueSnapshots) -> Self {
        Self { repos, issues, today: local_today }
    }

    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }
}

/// Calendar date on the server's local clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
