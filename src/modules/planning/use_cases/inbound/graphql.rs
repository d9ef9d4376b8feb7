use async_graphql::{Context, Enum, Object, Result as GqlResult, SimpleObject};
use chrono::Utc;

use crate::modules::planning::core::scenario::Scenario;
use crate::modules::planning::core::schedule_resolver::ScheduleSubject;
use crate::modules::planning::core::scheduling::Scheduling;
use crate::shared::core::primitives::{from_epoch_millis, to_epoch_millis};
use crate::shell::graphql::{gql_error, parse_id};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlScenario {
    pub start_date: i64,
    pub estimate: f64,
    pub target_date: i64,
    pub end_date: Option<i64>,
    pub worked_hours: f64,
    pub elapsed_hours: f64,
    pub projection: f64,
}

impl From<Scenario> for GqlScenario {
    fn from(s: Scenario) -> Self {
        Self {
            start_date: to_epoch_millis(s.start_date),
            estimate: s.estimate,
            target_date: to_epoch_millis(s.target_date),
            end_date: s.end_date.map(to_epoch_millis),
            worked_hours: s.worked_hours,
            elapsed_hours: s.elapsed_hours,
            projection: s.projection,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlScheduling {
    pub workshift: f64,
    pub weekdays: Vec<String>,
    pub timezone: String,
    pub end_of_day_hour: u32,
    pub end_of_day_min: u32,
}

impl From<Scheduling> for GqlScheduling {
    fn from(s: Scheduling) -> Self {
        Self {
            workshift: s.workshift,
            weekdays: s.weekdays.into(),
            timezone: s.timezone.name().to_string(),
            end_of_day_hour: s.end_of_day_hour,
            end_of_day_min: s.end_of_day_min,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum GqlScheduleSubject {
    Organization,
    Project,
    Task,
    OrganizationUser,
    ProjectUser,
    TaskUser,
}

fn as_of(millis: Option<i64>) -> GqlResult<chrono::DateTime<Utc>> {
    match millis {
        None => Ok(Utc::now()),
        Some(millis) => from_epoch_millis(millis)
            .ok_or_else(|| async_graphql::Error::new(format!("asOf out of range: {millis}"))),
    }
}

fn schedule_subject(
    kind: GqlScheduleSubject,
    id: &str,
    user_id: Option<&str>,
) -> GqlResult<ScheduleSubject> {
    let id = parse_id(id)?;
    let user = || {
        user_id
            .ok_or_else(|| async_graphql::Error::new("userId is required for user assignments"))
            .and_then(parse_id)
    };
    Ok(match kind {
        GqlScheduleSubject::Organization => ScheduleSubject::Organization(id),
        GqlScheduleSubject::Project => ScheduleSubject::Project(id),
        GqlScheduleSubject::Task => ScheduleSubject::Task(id),
        GqlScheduleSubject::OrganizationUser => ScheduleSubject::OrganizationUser {
            organization_id: id,
            user_id: user()?,
        },
        GqlScheduleSubject::ProjectUser => ScheduleSubject::ProjectUser {
            project_id: id,
            user_id: user()?,
        },
        GqlScheduleSubject::TaskUser => ScheduleSubject::TaskUser {
            task_id: id,
            user_id: user()?,
        },
    })
}

#[derive(Default)]
pub struct ForecastQuery;

#[Object]
impl ForecastQuery {
    async fn task_forecast(
        &self,
        context: &Context<'_>,
        task_id: String,
        as_of_ms: Option<i64>,
    ) -> GqlResult<GqlScenario> {
        let state = context.data_unchecked::<AppState>();
        let scenario = state
            .forecast_task
            .handle(parse_id(&task_id)?, as_of(as_of_ms)?)
            .await
            .map_err(gql_error)?;
        Ok(scenario.into())
    }

    async fn project_forecast(
        &self,
        context: &Context<'_>,
        project_id: String,
        as_of_ms: Option<i64>,
    ) -> GqlResult<GqlScenario> {
        let state = context.data_unchecked::<AppState>();
        let scenario = state
            .forecast_project
            .handle(parse_id(&project_id)?, as_of(as_of_ms)?)
            .await
            .map_err(gql_error)?;
        Ok(scenario.into())
    }

    async fn project_user_forecast(
        &self,
        context: &Context<'_>,
        project_id: String,
        user_id: String,
        as_of_ms: Option<i64>,
    ) -> GqlResult<GqlScenario> {
        let state = context.data_unchecked::<AppState>();
        let scenario = state
            .forecast_assignment
            .handle_project_user(parse_id(&project_id)?, parse_id(&user_id)?, as_of(as_of_ms)?)
            .await
            .map_err(gql_error)?;
        Ok(scenario.into())
    }

    async fn organization_user_forecast(
        &self,
        context: &Context<'_>,
        organization_id: String,
        user_id: String,
        as_of_ms: Option<i64>,
    ) -> GqlResult<GqlScenario> {
        let state = context.data_unchecked::<AppState>();
        let scenario = state
            .forecast_assignment
            .handle_organization_user(
                parse_id(&organization_id)?,
                parse_id(&user_id)?,
                as_of(as_of_ms)?,
            )
            .await
            .map_err(gql_error)?;
        Ok(scenario.into())
    }

    async fn resolved_schedule(
        &self,
        context: &Context<'_>,
        subject: GqlScheduleSubject,
        id: String,
        user_id: Option<String>,
    ) -> GqlResult<GqlScheduling> {
        let state = context.data_unchecked::<AppState>();
        let subject = schedule_subject(subject, &id, user_id.as_deref())?;
        let scheduling = state
            .resolve_schedule
            .handle(subject)
            .await
            .map_err(gql_error)?;
        Ok(scheduling.into())
    }
}
