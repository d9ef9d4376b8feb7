use crate::modules::work_log::use_cases::list_entries::projection::EntryRow;
use async_trait::async_trait;

#[async_trait]
pub trait EntryProjectionRepository: Send + Sync {
    async fn upsert(&self, row: EntryRow) -> anyhow::Result<()>;
}

#[async_trait]
pub trait WatermarkRepository: Send + Sync {
    async fn get(&self, name: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, name: &str, last: &str) -> anyhow::Result<()>;
}
