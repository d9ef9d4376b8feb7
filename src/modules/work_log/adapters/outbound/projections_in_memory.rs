// In memory entries read model, and watermark repository.
//
// Purpose
// - Serve the entry listings the forecasts consume without a database.
//
// Responsibilities
// - Store entry rows keyed by entry id.
// - Track the last processed event per projector.

use crate::modules::work_log::adapters::outbound::projections::{
    EntryProjectionRepository, WatermarkRepository,
};
use crate::modules::work_log::use_cases::list_entries::projection::{EntryRow, EntryView};
use crate::modules::work_log::use_cases::list_entries::queries_port::EntryQueries;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryEntryProjections {
    rows: RwLock<HashMap<Uuid, EntryRow>>,
    watermark: RwLock<HashMap<String, String>>,
    is_offline: bool,
}

impl InMemoryEntryProjections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    async fn list_where(&self, keep: impl Fn(&EntryRow) -> bool) -> anyhow::Result<Vec<EntryView>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Projections repository offline"));
        }
        let guard = self.rows.read().await;
        let mut items: Vec<EntryRow> = guard.values().filter(|row| keep(row)).cloned().collect();
        items.sort_by_key(|row| (row.date, row.entry_id));
        Ok(items.into_iter().map(EntryView::from).collect())
    }
}

#[async_trait::async_trait]
impl EntryProjectionRepository for InMemoryEntryProjections {
    async fn upsert(&self, row: EntryRow) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Projections repository offline"));
        }

        let mut guard = self.rows.write().await;
        guard.insert(row.entry_id, row);
        Ok(())
    }
}

#[async_trait::async_trait]
impl WatermarkRepository for InMemoryEntryProjections {
    async fn get(&self, name: &str) -> anyhow::Result<Option<String>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Watermark repository offline"));
        }

        Ok(self.watermark.read().await.get(name).cloned())
    }

    async fn set(&self, name: &str, last: &str) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Watermark repository offline"));
        }

        self.watermark
            .write()
            .await
            .insert(name.to_string(), last.to_string());
        Ok(())
    }
}

#[async_trait::async_trait]
impl EntryQueries for InMemoryEntryProjections {
    async fn list_by_task(&self, task_id: Uuid) -> anyhow::Result<Vec<EntryView>> {
        self.list_where(|row| row.task == task_id).await
    }

    async fn list_by_project(&self, project_id: Uuid) -> anyhow::Result<Vec<EntryView>> {
        self.list_where(|row| row.project == project_id).await
    }

    async fn list_by_performer(&self, performer_id: Uuid) -> anyhow::Result<Vec<EntryView>> {
        self.list_where(|row| row.performer == performer_id).await
    }
}
