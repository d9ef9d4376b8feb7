use crate::modules::planning::core::hierarchy::Directory;
use async_trait::async_trait;

/// Source of the organization hierarchy, assignments and time off.
///
/// Forecasts work on a consistent snapshot; adapters hand out a copy per call.
#[async_trait]
pub trait DirectoryReader: Send + Sync {
    async fn snapshot(&self) -> anyhow::Result<Directory>;
}
