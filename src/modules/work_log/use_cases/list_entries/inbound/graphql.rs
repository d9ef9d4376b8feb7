use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::work_log::use_cases::list_entries::projection::EntryView;
use crate::shell::graphql::{gql_error, parse_id};
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlEntry {
    pub entry_id: String,
    pub name: String,
    pub date: i64,
    pub description: String,
    pub hours: f64,
    pub performer_id: String,
    pub organization_id: String,
    pub project_id: String,
    pub task_id: String,
    pub created_at: i64,
    pub created_by: String,
}

impl From<EntryView> for GqlEntry {
    fn from(v: EntryView) -> Self {
        Self {
            entry_id: v.entry_id.to_string(),
            name: v.name,
            date: v.date,
            description: v.description,
            hours: v.hours,
            performer_id: v.performer.to_string(),
            organization_id: v.organization.to_string(),
            project_id: v.project.to_string(),
            task_id: v.task.to_string(),
            created_at: v.created_at,
            created_by: v.created_by,
        }
    }
}

#[derive(Default)]
pub struct EntryQuery;

#[Object]
impl EntryQuery {
    async fn entries_by_task(
        &self,
        context: &Context<'_>,
        task_id: String,
    ) -> GqlResult<Vec<GqlEntry>> {
        let state = context.data_unchecked::<AppState>();
        let list = state
            .queries
            .list_by_task(parse_id(&task_id)?)
            .await
            .map_err(gql_error)?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn entries_by_project(
        &self,
        context: &Context<'_>,
        project_id: String,
    ) -> GqlResult<Vec<GqlEntry>> {
        let state = context.data_unchecked::<AppState>();
        let list = state
            .queries
            .list_by_project(parse_id(&project_id)?)
            .await
            .map_err(gql_error)?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    async fn entries_by_performer(
        &self,
        context: &Context<'_>,
        performer_id: String,
    ) -> GqlResult<Vec<GqlEntry>> {
        let state = context.data_unchecked::<AppState>();
        let list = state
            .queries
            .list_by_performer(parse_id(&performer_id)?)
            .await
            .map_err(gql_error)?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}
