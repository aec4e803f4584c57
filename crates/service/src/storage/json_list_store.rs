use std::{marker::PhantomData, path::{Path, PathBuf}, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic JSON file-backed list store.
///
/// Persists a `Vec<T>` as a JSON array in a single file. Nothing is cached:
/// every call re-reads the file. The lock is the single-writer point for the
/// file, so keep exactly one store per path and share it through `Arc`.
pub struct JsonListStore<T> {
    lock: RwLock<()>,
    file_path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonListStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    /// Bind the store to a path. The file itself is provisioned externally and is
    /// not created here; a missing file surfaces as `ServiceError::Io` per call.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { lock: RwLock::new(()), file_path: path.into(), _records: PhantomData })
    }

    /// Raw file bytes, not validated.
    pub async fn read_raw(&self) -> Result<Vec<u8>, ServiceError> {
        let _guard = self.lock.read().await;
        self.read_bytes().await
    }

    /// Read and deserialize the whole collection.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let _guard = self.lock.read().await;
        let bytes = self.read_bytes().await?;
        self.decode(&bytes)
    }

    /// Read, mutate and persist the collection under the exclusive lock.
    ///
    /// The file is only touched after `f` ran on a fully decoded collection, and
    /// the new contents are written to a sibling temp file that is renamed over
    /// the original, so any failure leaves the previous contents in place.
    /// A symlinked path is resolved first so the link survives, and the target's
    /// permissions are carried over to the replacement.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _guard = self.lock.write().await;
        let bytes = self.read_bytes().await?;
        let mut items = self.decode(&bytes)?;
        let out = f(&mut items);
        let data = serde_json::to_vec(&items)
            .map_err(|e| ServiceError::Io(format!("failed to encode json data: {e}")))?;
        self.replace(&data).await?;
        Ok(out)
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, ServiceError> {
        fs::read(&self.file_path).await.map_err(|e| ServiceError::io("read", &self.file_path, e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<T>, ServiceError> {
        serde_json::from_slice(bytes).map_err(|e| ServiceError::parse(&self.file_path, e))
    }

    async fn replace(&self, data: &[u8]) -> Result<(), ServiceError> {
        let target = fs::canonicalize(&self.file_path)
            .await
            .map_err(|e| ServiceError::io("resolve", &self.file_path, e))?;
        let perms = fs::metadata(&target)
            .await
            .map_err(|e| ServiceError::io("stat", &target, e))?
            .permissions();

        let tmp = temp_path(&target);
        if let Err(e) = fs::write(&tmp, data).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::io("write", &tmp, e));
        }
        if let Err(e) = fs::set_permissions(&tmp, perms).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::io("chmod", &tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, &target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::io("replace", &target, e));
        }
        Ok(())
    }
}

/// Hidden sibling of `target`, unique per write.
fn temp_path(target: &Path) -> PathBuf {
    let name = target.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    target.with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4()))
}
