use std::sync::Arc;

use tracing::{debug, info};

use super::{RepoCatalog, RepoRecord};
use crate::errors::ServiceError;
use crate::storage::json_list_store::JsonListStore;

/// File-backed repository catalog (`github_repos.json`).
#[derive(Clone)]
pub struct RepoStore {
    store: Arc<JsonListStore<RepoRecord>>,
}

impl RepoStore {
    pub fn new<P: Into<std::path::PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { store: JsonListStore::new(path) })
    }

    pub async fn list_raw(&self) -> Result<Vec<u8>, ServiceError> {
        self.store.read_raw().await
    }

    /// Decoded view of the collection.
    pub async fn list(&self) -> Result<Vec<RepoRecord>, ServiceError> {
        self.store.load().await
    }

    pub async fn add(&self, owner: &str, repo: &str) -> Result<RepoRecord, ServiceError> {
        if owner.is_empty() || repo.is_empty() {
            return Err(ServiceError::Validation("owner and name parameters are required".into()));
        }
        let rec = RepoRecord::github(owner, repo);
        let total = self
            .store
            .update(|items| {
                items.push(rec.clone());
                items.len()
            })
            .await?;
        info!(name = %rec.name, total, "repository added");
        Ok(rec)
    }

    pub async fn remove(&self, url: Option<&str>) -> Result<usize, ServiceError> {
        let (removed, kept) = self
            .store
            .update(|items| {
                let before = items.len();
                if let Some(url) = url {
                    items.retain(|r| r.url != url);
                }
                (before - items.len(), items.len())
            })
            .await?;
        debug!(url = url.unwrap_or_default(), removed, kept, "repository delete applied");
        Ok(removed)
    }
}

#[async_trait::async_trait]
impl RepoCatalog for RepoStore {
    async fn list_raw(&self) -> Result<Vec<u8>, ServiceError> { self.list_raw().await }
    async fn add(&self, owner: &str, repo: &str) -> Result<(), ServiceError> { self.add(owner, repo).await.map(|_| ()) }
    async fn remove(&self, url: Option<&str>) -> Result<usize, ServiceError> { self.remove(url).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::fs;
    use uuid::Uuid;

    async fn setup(contents: &str) -> anyhow::Result<(Arc<RepoStore>, PathBuf)> {
        let tmp = std::env::temp_dir().join(format!("svc_repos_{}.json", Uuid::new_v4()));
        fs::write(&tmp, contents).await?;
        Ok((RepoStore::new(&tmp), tmp))
    }

    fn rec(name: &str) -> RepoRecord {
        let (owner, repo) = name.split_once('/').unwrap();
        RepoRecord::github(owner, repo)
    }

    #[tokio::test]
    async fn add_to_empty_file_writes_single_record() -> anyhow::Result<()> {
        let (store, tmp) = setup("[]").await?;

        store.add("golang", "go").await?;
        let raw = store.list_raw().await?;
        assert_eq!(
            String::from_utf8(raw)?,
            r#"[{"name":"golang/go","url":"https://github.com/golang/go"}]"#
        );

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn add_appends_last_and_keeps_duplicates() -> anyhow::Result<()> {
        let (store, tmp) = setup(r#"[{"name":"a/b","url":"https://github.com/a/b"}]"#).await?;

        store.add("rust-lang", "rust").await?;
        store.add("rust-lang", "rust").await?;
        let items = store.list().await?;
        assert_eq!(items, vec![rec("a/b"), rec("rust-lang/rust"), rec("rust-lang/rust")]);

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn add_rejects_empty_input_before_touching_file() -> anyhow::Result<()> {
        // no file at all: validation must win over the read failure
        let tmp = std::env::temp_dir().join(format!("svc_repos_absent_{}.json", Uuid::new_v4()));
        let store = RepoStore::new(&tmp);

        assert!(matches!(store.add("", "go").await, Err(ServiceError::Validation(_))));
        assert!(matches!(store.add("golang", "").await, Err(ServiceError::Validation(_))));
        assert!(matches!(store.add("golang", "go").await, Err(ServiceError::Io(_))));
        assert!(fs::metadata(&tmp).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn remove_drops_all_matches_and_preserves_order() -> anyhow::Result<()> {
        let (store, tmp) = setup("[]").await?;
        for name in ["a/b", "c/d", "a/b", "e/f", "a/b"] {
            let (owner, repo) = name.split_once('/').unwrap();
            store.add(owner, repo).await?;
        }

        let removed = store.remove(Some("https://github.com/a/b")).await?;
        assert_eq!(removed, 3);
        assert_eq!(store.list().await?, vec![rec("c/d"), rec("e/f")]);

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn remove_single_entry_leaves_empty_array() -> anyhow::Result<()> {
        let (store, tmp) = setup(r#"[{"name":"a/b","url":"https://github.com/a/b"}]"#).await?;

        assert_eq!(store.remove(Some("https://github.com/a/b")).await?, 1);
        assert_eq!(store.list_raw().await?, b"[]");

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn remove_without_match_is_successful_noop() -> anyhow::Result<()> {
        let (store, tmp) = setup(r#"[{"name":"a/b","url":"https://github.com/a/b"}]"#).await?;

        assert_eq!(store.remove(Some("https://github.com/A/B")).await?, 0);
        assert_eq!(store.remove(Some("")).await?, 0);
        assert_eq!(store.remove(None).await?, 0);
        assert_eq!(store.list().await?, vec![rec("a/b")]);

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_fails_mutations_but_lists_raw() -> anyhow::Result<()> {
        let (store, tmp) = setup("[{\"name\":").await?;

        assert!(matches!(store.add("a", "b").await, Err(ServiceError::Parse(_))));
        assert!(matches!(store.remove(Some("x")).await, Err(ServiceError::Parse(_))));
        assert_eq!(store.list_raw().await?, b"[{\"name\":");

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }
}
