use async_graphql::{Context, ID, Object, Result as GqlResult};
use chrono::Utc;
use uuid::Uuid;

use crate::modules::planning::core::hierarchy::Hierarchy;
use crate::modules::planning::core::ports::DirectoryReader;
use crate::modules::work_log::use_cases::register_entry::command::RegisterEntry;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shell::graphql::{gql_error, parse_id};
use crate::shell::state::AppState;

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Logs hours against a task. Project and organization are taken from the directory.
    async fn register_entry(
        &self,
        context: &Context<'_>,
        task_id: String,
        performer_id: String,
        name: String,
        date: i64,
        hours: f64,
        description: Option<String>,
    ) -> GqlResult<ID> {
        let entry_id = Uuid::now_v7();
        let state = context.data_unchecked::<AppState>();
        let task_id = parse_id(&task_id)?;

        let directory = state.directory.snapshot().await.map_err(gql_error)?;
        let task = directory
            .task(task_id)
            .ok_or_else(|| async_graphql::Error::new(format!("task not found: {task_id}")))?;
        let project = directory.project(task.project_id).ok_or_else(|| {
            async_graphql::Error::new(format!("project not found: {}", task.project_id))
        })?;

        let command = RegisterEntry {
            entry_id,
            name,
            date,
            description: description.unwrap_or_default(),
            hours,
            performer: parse_id(&performer_id)?,
            organization: project.organization_id,
            project: project.id,
            task: task.id,
            created_at: Utc::now().timestamp_millis(),
            created_by: "user-from-auth".into(),
        };

        let stream_id = format!("Entry-{entry_id}");

        state
            .register_handler
            .handle(&stream_id, command)
            .await
            .map_err(gql_error)?;

        // Inline projection so forecasts see the new entry immediately
        let loaded = state
            .event_store
            .load(&stream_id)
            .await
            .map_err(gql_error)?;
        if let Some(last) = loaded.events.last() {
            state
                .projector
                .apply_one(&stream_id, loaded.version, last)
                .await
                .map_err(gql_error)?;
        }

        Ok(ID(entry_id.to_string()))
    }
}
