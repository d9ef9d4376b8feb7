// Forecasts of a user's assignment to a project or to an organization.
//
// Both use the assignment's own scenario inputs, the schedule resolved for the assignment and
// only the entries the user performed within the assignment's scope.

use crate::modules::planning::core::forecast::{ForecastEngine, ScenarioRequest};
use crate::modules::planning::core::hierarchy::{Directory, Hierarchy};
use crate::modules::planning::core::ports::DirectoryReader;
use crate::modules::planning::core::scenario::{Scenario, ScenarioPlan};
use crate::modules::planning::core::schedule_resolver::{ScheduleResolver, ScheduleSubject};
use crate::modules::planning::core::time_off::TimeOffTarget;
use crate::modules::planning::core::time_off_index::TimeOffIndex;
use crate::modules::planning::use_cases::errors::ForecastQueryError;
use crate::modules::planning::use_cases::inputs::{
    entity_not_found, logged_hours, required_estimate, required_start,
};
use crate::modules::work_log::use_cases::list_entries::projection::EntryView;
use crate::modules::work_log::use_cases::list_entries::queries_port::EntryQueries;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub struct ForecastAssignmentHandler<TDirectory, TEntries>
where
    TDirectory: DirectoryReader + Send + Sync + 'static,
    TEntries: EntryQueries + Send + Sync + 'static,
{
    directory: Arc<TDirectory>,
    entries: Arc<TEntries>,
    engine: ForecastEngine,
    resolver: ScheduleResolver,
}

struct AssignmentInputs<'a> {
    subject: ScheduleSubject,
    target: TimeOffTarget,
    plan: &'a ScenarioPlan,
    fallback_start: Option<DateTime<Utc>>,
    label: &'static str,
    in_scope: Box<dyn Fn(&EntryView) -> bool + Send + Sync + 'a>,
}

impl<TDirectory, TEntries> ForecastAssignmentHandler<TDirectory, TEntries>
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

    /// A project user without a start date starts with the project.
    pub async fn handle_project_user(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        as_of: DateTime<Utc>,
    ) -> Result<Scenario, ForecastQueryError> {
        let directory = self.directory.snapshot().await?;
        let assignment = directory
            .project_user(project_id, user_id)
            .ok_or_else(|| entity_not_found("project user", user_id))?;
        let project = directory
            .project(project_id)
            .ok_or_else(|| entity_not_found("project", project_id))?;

        let inputs = AssignmentInputs {
            subject: ScheduleSubject::ProjectUser {
                project_id,
                user_id,
            },
            target: TimeOffTarget::Project(project_id),
            plan: &assignment.scenario,
            fallback_start: project.scenario.start_date,
            label: "project user",
            in_scope: Box::new(move |entry: &EntryView| entry.project == project_id),
        };
        self.forecast(&directory, user_id, inputs, as_of).await
    }

    pub async fn handle_organization_user(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        as_of: DateTime<Utc>,
    ) -> Result<Scenario, ForecastQueryError> {
        let directory = self.directory.snapshot().await?;
        let assignment = directory
            .organization_user(organization_id, user_id)
            .ok_or_else(|| entity_not_found("organization user", user_id))?;

        let inputs = AssignmentInputs {
            subject: ScheduleSubject::OrganizationUser {
                organization_id,
                user_id,
            },
            target: TimeOffTarget::Organization(organization_id),
            plan: &assignment.scenario,
            fallback_start: None,
            label: "organization user",
            in_scope: Box::new(move |entry: &EntryView| entry.organization == organization_id),
        };
        self.forecast(&directory, user_id, inputs, as_of).await
    }

    async fn forecast(
        &self,
        directory: &Directory,
        user_id: Uuid,
        inputs: AssignmentInputs<'_>,
        as_of: DateTime<Utc>,
    ) -> Result<Scenario, ForecastQueryError> {
        let start = required_start(
            inputs.plan.start_date.or(inputs.fallback_start),
            inputs.label,
            user_id,
        )?;
        let estimate = required_estimate(inputs.plan.estimate, inputs.label, user_id)?;
        let schedule = self.resolver.resolve(directory, inputs.subject)?;
        let time_off = TimeOffIndex::build(directory, directory.time_offs())?;
        let performed = self.entries.list_by_performer(user_id).await?;
        let entries = logged_hours(performed.iter().filter(|entry| (inputs.in_scope)(*entry)))?;

        let scenario = self.engine.compute_scenario(ScenarioRequest {
            start,
            estimate,
            schedule: &schedule,
            time_off: &time_off,
            target: inputs.target,
            entries: &entries,
            as_of,
            end_date: inputs.plan.end_date,
        })?;
        tracing::debug!(
            assignment = inputs.label,
            %user_id,
            target_date = %scenario.target_date,
            "assignment forecast computed"
        );
        Ok(scenario)
    }
}
