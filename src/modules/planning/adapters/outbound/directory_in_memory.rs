// In memory directory of organizations, projects, tasks, assignments and time off.
//
// Purpose
// - Back the forecast use cases without a database.
//
// Responsibilities
// - Hold the hierarchy loaded from a JSON seed.
// - Hand out snapshots to readers.

use crate::modules::planning::core::hierarchy::Directory;
use crate::modules::planning::core::ports::DirectoryReader;
use anyhow::Context;
use std::path::Path;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryDirectory {
    inner: RwLock<Directory>,
    is_offline: bool,
}

impl InMemoryDirectory {
    pub fn new(directory: Directory) -> Self {
        Self {
            inner: RwLock::new(directory),
            is_offline: false,
        }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let directory: Directory =
            serde_json::from_str(json).context("failed to parse directory seed")?;
        Ok(Self::new(directory))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read directory seed {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

}

#[async_trait::async_trait]
impl DirectoryReader for InMemoryDirectory {
    async fn snapshot(&self) -> anyhow::Result<Directory> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Directory repository offline"));
        }
        Ok(self.inner.read().await.clone())
    }
}
