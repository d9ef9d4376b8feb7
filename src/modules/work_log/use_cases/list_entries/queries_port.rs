use crate::modules::work_log::use_cases::list_entries::projection::EntryView;
use async_trait::async_trait;
use uuid::Uuid;

/// Read side of the work log. Every listing is ordered by entry date, oldest first.
#[async_trait]
pub trait EntryQueries {
    async fn list_by_task(&self, task_id: Uuid) -> anyhow::Result<Vec<EntryView>>;
    async fn list_by_project(&self, project_id: Uuid) -> anyhow::Result<Vec<EntryView>>;
    async fn list_by_performer(&self, performer_id: Uuid) -> anyhow::Result<Vec<EntryView>>;
}
