use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for the repository catalog.
/// Handlers only see this; the file-backed `RepoStore` is the production impl.
#[async_trait]
pub trait RepoCatalog: Send + Sync {
    /// Persisted collection bytes, forwarded as-is.
    async fn list_raw(&self) -> Result<Vec<u8>, ServiceError>;
    /// Append `owner/repo`; duplicates are kept.
    async fn add(&self, owner: &str, repo: &str) -> Result<(), ServiceError>;
    /// Drop every record whose url equals `url`; `None` matches nothing.
    /// Returns how many records were removed.
    async fn remove(&self, url: Option<&str>) -> Result<usize, ServiceError>;
}
