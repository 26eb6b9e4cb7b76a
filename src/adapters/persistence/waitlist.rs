use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::WaitlistRepo,
    domain::entities::waitlist_entry::Waitlist,
};

/// Waitlist persisted as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileWaitlistStore {
    path: PathBuf,
}

impl JsonFileWaitlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file as an empty array if it does not exist yet.
    /// An existing file is left untouched, even if malformed.
    pub async fn init(&self) -> AppResult<()> {
        if fs::try_exists(&self.path).await.map_err(storage_err)? {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(storage_err)?;
        }

        self.save(&Waitlist::default()).await?;
        tracing::info!(path = %self.path.display(), "Initialized empty waitlist file");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "waitlist.json".to_string());
        self.path
            .with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4()))
    }
}

#[async_trait]
impl WaitlistRepo for JsonFileWaitlistStore {
    async fn load(&self) -> AppResult<Waitlist> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Waitlist::default()),
            Err(err) => return Err(storage_err(err)),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Storage(format!(
                "malformed waitlist file {}: {e}",
                self.path.display()
            ))
        })
    }

    /// Writes to a sibling temp file and renames it over the target so readers
    /// never observe a partially written file.
    async fn save(&self, waitlist: &Waitlist) -> AppResult<()> {
        let data = serde_json::to_vec_pretty(waitlist)
            .map_err(|e| AppError::Internal(format!("serialize waitlist: {e}")))?;

        let tmp = self.temp_path();
        if let Err(err) = fs::write(&tmp, &data).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(storage_err(err));
        }

        if let Err(err) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(storage_err(err));
        }

        Ok(())
    }
}

fn storage_err(err: std::io::Error) -> AppError {
    AppError::Storage(err.to_string())
}
