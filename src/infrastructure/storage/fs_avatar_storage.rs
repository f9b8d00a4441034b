//! Avatar storage in a local directory served under a public base URL.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::policy::AvatarFormat;
use crate::domain::repositories::AvatarStorage;

/// Stores one avatar per account as `{dir}/{account_id}.{ext}`.
///
/// The router serves `dir` under `base_url`, so the returned URL is
/// `{base_url}/{account_id}.{ext}`.
pub struct FsAvatarStorage {
    dir: PathBuf,
    base_url: String,
}

impl FsAvatarStorage {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, account_id: Uuid, format: AvatarFormat) -> PathBuf {
        self.dir.join(format!("{account_id}.{}", format.extension()))
    }

    /// Removes every stored variant except `keep`. Returns false if any removal failed.
    async fn remove_variants(&self, account_id: Uuid, keep: Option<AvatarFormat>) -> bool {
        let mut ok = true;
        for format in AvatarFormat::ALL {
            if Some(format) == keep {
                continue;
            }
            let path = self.path_for(account_id, format);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => tracing::debug!(path = %path.display(), "Removed avatar file"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Failed to remove avatar");
                    ok = false;
                }
            }
        }
        ok
    }
}

#[async_trait]
impl AvatarStorage for FsAvatarStorage {
    async fn upload(
        &self,
        account_id: Uuid,
        format: AvatarFormat,
        bytes: Vec<u8>,
    ) -> Option<String> {
        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            tracing::error!(dir = %self.dir.display(), error = %e, "Cannot create avatar directory");
            return None;
        }

        let path = self.path_for(account_id, format);
        if let Err(e) = tokio::fs::write(&path, &bytes).await {
            tracing::error!(path = %path.display(), error = %e, "Failed to write avatar");
            return None;
        }

        // A previous avatar in another format would otherwise linger.
        self.remove_variants(account_id, Some(format)).await;

        tracing::info!(%account_id, size = bytes.len(), mime = format.mime(), "Stored avatar");
        Some(format!(
            "{}/{account_id}.{}",
            self.base_url,
            format.extension()
        ))
    }

    async fn remove(&self, account_id: Uuid) -> bool {
        self.remove_variants(account_id, None).await
    }
}
