use crate::modules::planning::core::forecast::{ForecastEngine, ScenarioRequest};
use crate::modules::planning::core::hierarchy::Hierarchy;
use crate::modules::planning::core::ports::DirectoryReader;
use crate::modules::planning::core::scenario::Scenario;
use crate::modules::planning::core::schedule_resolver::{ScheduleResolver, ScheduleSubject};
use crate::modules::planning::core::time_off::TimeOffTarget;
use crate::modules::planning::core::time_off_index::TimeOffIndex;
use crate::modules::planning::use_cases::errors::ForecastQueryError;
use crate::modules::planning::use_cases::inputs::{
    entity_not_found, logged_hours, required_estimate, required_start,
};
use crate::modules::work_log::use_cases::list_entries::queries_port::EntryQueries;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub struct ForecastTaskHandler<TDirectory, TEntries>
where
    TDirectory: DirectoryReader + Send + Sync + 'static,
    TEntries: EntryQueries + Send + Sync + 'static,
{
    directory: Arc<TDirectory>,
    entries: Arc<TEntries>,
    engine: ForecastEngine,
    resolver: ScheduleResolver,
}

impl<TDirectory, TEntries> ForecastTaskHandler<TDirectory, TEntries>
where
    TDirectory: DirectoryReader + Send + Sync + 'static,
    TEntries: EntryQueries + Send + Sync + 'static,
{
    pub fn new(directory: Arc<TDirectory>, entries: Arc<TEntries>, engine: ForecastEngine) -> Self {
        Self {
            directory,
            entries,
            engine,
            resolver: ScheduleResolver::new(),
        }
    }

    /// Scenario of a task as of `as_of`. A task without a start date starts with its project.
    pub async fn handle(
        &self,
        task_id: Uuid,
        as_of: DateTime<Utc>,
    ) -> Result<Scenario, ForecastQueryError> {
        let directory = self.directory.snapshot().await?;
        let task = directory
            .task(task_id)
            .ok_or_else(|| entity_not_found("task", task_id))?;
        let project = directory
            .project(task.project_id)
            .ok_or_else(|| entity_not_found("project", task.project_id))?;

        let start = required_start(
            task.scenario.start_date.or(project.scenario.start_date),
            "task",
            task_id,
        )?;
        let estimate = required_estimate(task.scenario.estimate, "task", task_id)?;
        let schedule = self
            .resolver
            .resolve(&directory, ScheduleSubject::Task(task_id))?;
        let time_off = TimeOffIndex::build(&directory, directory.time_offs())?;
        let entries = logged_hours(&self.entries.list_by_task(task_id).await?)?;

        let scenario = self.engine.compute_scenario(ScenarioRequest {
            start,
            estimate,
            schedule: &schedule,
            time_off: &time_off,
            target: TimeOffTarget::Task(task_id),
            entries: &entries,
            as_of,
            end_date: task.scenario.end_date,
        })?;
        tracing::debug!(%task_id, target_date = %scenario.target_date, "task forecast computed");
        Ok(scenario)
    }
}

#[cfg(test)]
mod forecast_task_handler_tests {
    use super::*;
    use crate::modules::planning::adapters::outbound::directory_in_memory::InMemoryDirectory;
    use crate::modules::planning::core::errors::ForecastError;
    use crate::modules::planning::core::hierarchy::Directory;
    use crate::modules::planning::core::time_off::{TimeOff, TimeOffKind};
    use crate::modules::work_log::adapters::outbound::projections::EntryProjectionRepository;
    use crate::modules::work_log::adapters::outbound::projections_in_memory::InMemoryEntryProjections;
    use crate::modules::work_log::core::events::EntryEvent;
    use crate::modules::work_log::core::projections::{Mutation, apply};
    use crate::tests::fixtures::directory::{
        BUILD_TASK_ID, DESIGN_TASK_ID, ORGANIZATION_ID, make_directory,
    };
    use crate::tests::fixtures::events::entry_registered_v1::make_entry_registered_v1_event;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    type Handler = ForecastTaskHandler<InMemoryDirectory, InMemoryEntryProjections>;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap()
    }

    fn handler_for(directory: Directory, entries: InMemoryEntryProjections) -> Handler {
        ForecastTaskHandler::new(
            Arc::new(InMemoryDirectory::new(directory)),
            Arc::new(entries),
            ForecastEngine::default(),
        )
    }

    #[fixture]
    async fn entries() -> InMemoryEntryProjections {
        let entries = InMemoryEntryProjections::new();
        let event = EntryEvent::EntryRegisteredV1(make_entry_registered_v1_event());
        for mutation in apply("Entry-0001", 1, &event) {
            let Mutation::Upsert(row) = mutation;
            entries.upsert(row).await.unwrap();
        }
        entries
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_forecast_a_task_from_its_logged_entries(
        #[future] entries: InMemoryEntryProjections,
    ) {
        let handler = handler_for(make_directory(), entries.await);
        let scenario = handler.handle(DESIGN_TASK_ID, at(7, 11)).await.unwrap();
        assert_eq!(scenario.start_date, at(6, 9));
        assert_eq!(scenario.target_date, at(7, 17));
        assert_eq!(scenario.worked_hours, 2.5);
        assert_eq!(scenario.elapsed_hours, 10.0);
        assert_eq!(scenario.projection, 13.5);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_count_only_the_entries_of_the_task(
        #[future] entries: InMemoryEntryProjections,
    ) {
        let handler = handler_for(make_directory(), entries.await);
        let scenario = handler.handle(BUILD_TASK_ID, at(8, 9)).await.unwrap();
        assert_eq!(scenario.worked_hours, 0.0);
        assert_eq!(scenario.target_date, at(10, 17));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_skip_organization_time_off() {
        let mut directory = make_directory();
        directory.insert_time_off(TimeOff {
            id: Uuid::now_v7(),
            name: "Company offsite".into(),
            start_date: at(7, 0),
            days: 1,
            extended_hours: 0.0,
            target: TimeOffTarget::Organization(ORGANIZATION_ID),
            kind: TimeOffKind::Holiday,
        });
        let handler = handler_for(directory, InMemoryEntryProjections::new());
        let scenario = handler.handle(DESIGN_TASK_ID, at(6, 9)).await.unwrap();
        assert_eq!(scenario.target_date, at(8, 17));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fall_back_to_the_project_start() {
        let mut directory = make_directory();
        let mut task = directory.task(DESIGN_TASK_ID).unwrap().clone();
        let mut project = directory.project(task.project_id).unwrap().clone();
        task.scenario.start_date = None;
        project.scenario.start_date = Some(at(13, 9));
        directory.insert_task(task);
        directory.insert_project(project);
        let handler = handler_for(directory, InMemoryEntryProjections::new());
        let scenario = handler.handle(DESIGN_TASK_ID, at(13, 9)).await.unwrap();
        assert_eq!(scenario.target_date, at(14, 17));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_a_task_without_an_estimate() {
        let mut directory = make_directory();
        let mut task = directory.task(DESIGN_TASK_ID).unwrap().clone();
        task.scenario.estimate = None;
        directory.insert_task(task);
        let handler = handler_for(directory, InMemoryEntryProjections::new());
        let result = handler.handle(DESIGN_TASK_ID, at(6, 9)).await;
        assert!(matches!(
            result,
            Err(ForecastQueryError::Forecast(ForecastError::InvalidArgument(_)))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_an_unknown_task() {
        let handler = handler_for(make_directory(), InMemoryEntryProjections::new());
        let result = handler.handle(Uuid::nil(), at(6, 9)).await;
        assert!(matches!(
            result,
            Err(ForecastQueryError::Forecast(ForecastError::NotFound { entity: "task", .. }))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_entries_are_unavailable() {
        let mut entries = InMemoryEntryProjections::new();
        entries.toggle_offline();
        let handler = handler_for(make_directory(), entries);
        let result = handler.handle(DESIGN_TASK_ID, at(6, 9)).await;
        assert!(matches!(result, Err(ForecastQueryError::Unexpected(message)) if message.contains("offline")));
    }
}
