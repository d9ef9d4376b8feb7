use crate::modules::planning::core::errors::ForecastError;
use crate::modules::planning::core::forecast::{ForecastEngine, ScenarioRequest};
use crate::modules::planning::core::hierarchy::{Directory, Hierarchy, Project};
use crate::modules::planning::core::ports::DirectoryReader;
use crate::modules::planning::core::scenario::Scenario;
use crate::modules::planning::core::schedule_resolver::{ScheduleResolver, ScheduleSubject};
use crate::modules::planning::core::time_off::TimeOffTarget;
use crate::modules::planning::core::time_off_index::TimeOffIndex;
use crate::modules::planning::use_cases::errors::ForecastQueryError;
use crate::modules::planning::use_cases::inputs::{entity_not_found, logged_hours};
use crate::modules::work_log::use_cases::list_entries::queries_port::EntryQueries;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub struct ForecastProjectHandler<TDirectory, TEntries>
where
    TDirectory: DirectoryReader + Send + Sync + 'static,
    TEntries: EntryQueries + Send + Sync + 'static,
{
    directory: Arc<TDirectory>,
    entries: Arc<TEntries>,
    engine: ForecastEngine,
    resolver: ScheduleResolver,
}

impl<TDirectory, TEntries> ForecastProjectHandler<TDirectory, TEntries>
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

    /// Scenario of a project. Unset inputs roll up from its tasks: the estimate is the sum of
    /// the task estimates and the start is the earliest task start.
    pub async fn handle(
        &self,
        project_id: Uuid,
        as_of: DateTime<Utc>,
    ) -> Result<Scenario, ForecastQueryError> {
        let directory = self.directory.snapshot().await?;
        let project = directory
            .project(project_id)
            .ok_or_else(|| entity_not_found("project", project_id))?;

        let (start, estimate) = rolled_up_inputs(&directory, project)?;
        let schedule = self
            .resolver
            .resolve(&directory, ScheduleSubject::Project(project_id))?;
        let time_off = TimeOffIndex::build(&directory, directory.time_offs())?;
        let entries = logged_hours(&self.entries.list_by_project(project_id).await?)?;

        let scenario = self.engine.compute_scenario(ScenarioRequest {
            start,
            estimate,
            schedule: &schedule,
            time_off: &time_off,
            target: TimeOffTarget::Project(project_id),
            entries: &entries,
            as_of,
            end_date: project.scenario.end_date,
        })?;
        tracing::debug!(%project_id, target_date = %scenario.target_date, "project forecast computed");
        Ok(scenario)
    }
}

fn rolled_up_inputs(
    directory: &Directory,
    project: &Project,
) -> Result<(DateTime<Utc>, f64), ForecastError> {
    let tasks = directory.tasks_of_project(project.id);
    let start = project
        .scenario
        .start_date
        .or_else(|| tasks.iter().filter_map(|task| task.scenario.start_date).min())
        .ok_or_else(|| {
            ForecastError::invalid(format!(
                "project {} has no start date and none of its tasks has one",
                project.id
            ))
        })?;
    let estimate = match project.scenario.estimate {
        Some(estimate) => estimate,
        None => {
            let estimates: Vec<f64> = tasks
                .iter()
                .filter_map(|task| task.scenario.estimate)
                .collect();
            if estimates.is_empty() {
                return Err(ForecastError::invalid(format!(
                    "project {} has no estimate and none of its tasks has one",
                    project.id
                )));
            }
            estimates.into_iter().sum()
        }
    };
    Ok((start, estimate))
}
