use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};
use utils::types::Organization;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read organization record: {0}")]
    Read(#[source] std::io::Error),
    #[error("Failed to write organization record: {0}")]
    Write(#[source] std::io::Error),
    #[error("Failed to write organization record: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A JSON object is stored but its fields have the wrong types
    #[error("Stored organization record is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Persistence for the one organization record
#[async_trait]
pub trait OrganizationStore: Send + Sync {
    async fn load(&self) -> Result<Option<Organization>, StoreError>;

    async fn save(&self, organization: &Organization) -> Result<(), StoreError>;
}

/// Keeps the record as a pretty-printed JSON object in a single file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "organization.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl OrganizationStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Organization>, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Read(e)),
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        let value = match serde_json::from_str::<serde_json::Value>(&contents) {
            Ok(value) if value.is_object() => value,
            Ok(_) => {
                warn!(
                    path = %self.path.display(),
                    "Stored organization is not a JSON object, treating as absent"
                );
                return Ok(None);
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Stored organization is not valid JSON, treating as absent"
                );
                return Ok(None);
            }
        };

        // Any object counts as an existing record so it is never overwritten
        serde_json::from_value::<Organization>(value)
            .map(Some)
            .map_err(StoreError::Malformed)
    }

    async fn save(&self, organization: &Organization) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(organization)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StoreError::Write)?;
        }

        // Write-then-rename so readers never observe a partial record
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, json)
            .await
            .map_err(StoreError::Write)?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(StoreError::Write)?;

        info!(
            path = %self.path.display(),
            organization_id = %organization.organization_id,
            "Organization record saved"
        );

        Ok(())
    }
}

/// In-process store; the record lives as long as the value
#[derive(Default)]
pub struct MemoryStore {
    record: RwLock<Option<Organization>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(organization: Organization) -> Self {
        Self {
            record: RwLock::new(Some(organization)),
        }
    }
}

#[async_trait]
impl OrganizationStore for MemoryStore {
    async fn load(&self) -> Result<Option<Organization>, StoreError> {
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, organization: &Organization) -> Result<(), StoreError> {
        *self.record.write().await = Some(organization.clone());
        Ok(())
    }
}
