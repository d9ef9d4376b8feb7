// Effective schedule of an entity: field-wise fallback through its ancestors.
//
// Chains (nearest first)
// - Task → Project → Organization
// - ProjectUser → Project → Organization
// - OrganizationUser → Organization
// - TaskUser → Task → Project → Organization (task users carry no schedule of their own)
//
// The organization closes every chain and must be fully specified.

use crate::modules::planning::core::errors::ForecastError;
use crate::modules::planning::core::hierarchy::{Hierarchy, Organization, Project, Task};
use crate::modules::planning::core::scheduling::{Scheduling, SchedulingOverrides};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleSubject {
    Organization(Uuid),
    Project(Uuid),
    Task(Uuid),
    OrganizationUser { organization_id: Uuid, user_id: Uuid },
    ProjectUser { project_id: Uuid, user_id: Uuid },
    TaskUser { task_id: Uuid, user_id: Uuid },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleResolver;

impl ScheduleResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve<H>(&self, hierarchy: &H, subject: ScheduleSubject) -> Result<Scheduling, ForecastError>
    where
        H: Hierarchy + ?Sized,
    {
        let (organization, overrides) = self.chain(hierarchy, subject)?;
        let base = &organization.scheduling;
        if !base.missing_fields().is_empty() {
            return Err(ForecastError::invalid(format!(
                "organization {} has an incomplete schedule, missing: {}",
                organization.id,
                base.missing_fields().join(", ")
            )));
        }
        let effective = overrides
            .iter()
            .rev()
            .fold(base.clone(), |inherited, own| own.or(&inherited));
        Scheduling::try_from(&effective)
    }

    /// The organization and the overrides beneath it, nearest first.
    fn chain<'h, H>(
        &self,
        hierarchy: &'h H,
        subject: ScheduleSubject,
    ) -> Result<(&'h Organization, Vec<&'h SchedulingOverrides>), ForecastError>
    where
        H: Hierarchy + ?Sized,
    {
        match subject {
            ScheduleSubject::Organization(id) => Ok((organization(hierarchy, id)?, Vec::new())),
            ScheduleSubject::Project(id) => {
                let project = project(hierarchy, id)?;
                let organization = organization(hierarchy, project.organization_id)?;
                Ok((organization, vec![&project.scheduling]))
            }
            ScheduleSubject::Task(id) => {
                let task = task(hierarchy, id)?;
                let project = project(hierarchy, task.project_id)?;
                let organization = organization(hierarchy, project.organization_id)?;
                Ok((organization, vec![&task.scheduling, &project.scheduling]))
            }
            ScheduleSubject::OrganizationUser {
                organization_id,
                user_id,
            } => {
                let assignment = hierarchy
                    .organization_user(organization_id, user_id)
                    .ok_or_else(|| {
                        ForecastError::not_found(
                            "organization user",
                            format!("{organization_id}/{user_id}"),
                        )
                    })?;
                let organization = organization(hierarchy, organization_id)?;
                Ok((organization, vec![&assignment.scheduling]))
            }
            ScheduleSubject::ProjectUser {
                project_id,
                user_id,
            } => {
                let assignment = hierarchy
                    .project_user(project_id, user_id)
                    .ok_or_else(|| {
                        ForecastError::not_found("project user", format!("{project_id}/{user_id}"))
                    })?;
                let project = project(hierarchy, project_id)?;
                let organization = organization(hierarchy, project.organization_id)?;
                Ok((organization, vec![&assignment.scheduling, &project.scheduling]))
            }
            ScheduleSubject::TaskUser { task_id, user_id } => {
                hierarchy.task_user(task_id, user_id).ok_or_else(|| {
                    ForecastError::not_found("task user", format!("{task_id}/{user_id}"))
                })?;
                self.chain(hierarchy, ScheduleSubject::Task(task_id))
            }
        }
    }
}

fn organization<H: Hierarchy + ?Sized>(hierarchy: &H, id: Uuid) -> Result<&Organization, ForecastError> {
    hierarchy
        .organization(id)
        .ok_or_else(|| ForecastError::not_found("organization", id))
}

fn project<H: Hierarchy + ?Sized>(hierarchy: &H, id: Uuid) -> Result<&Project, ForecastError> {
    hierarchy
        .project(id)
        .ok_or_else(|| ForecastError::not_found("project", id))
}

fn task<H: Hierarchy + ?Sized>(hierarchy: &H, id: Uuid) -> Result<&Task, ForecastError> {
    hierarchy
        .task(id)
        .ok_or_else(|| ForecastError::not_found("task", id))
}

#[cfg(test)]
mod schedule_resolver_tests {
    use super::*;
    use crate::modules::planning::core::hierarchy::Directory;
    use crate::modules::planning::core::scheduling::Weekdays;
    use crate::tests::fixtures::directory::{
        DESIGN_TASK_ID, ORGANIZATION_ID, OTHER_PROJECT_ID, PROJECT_ID, USER_ID, make_directory,
    };
    use chrono::Weekday;
    use rstest::{fixture, rstest};

    #[fixture]
    fn directory() -> Directory {
        make_directory()
    }

    #[rstest]
    fn it_should_inherit_everything_from_the_organization(directory: Directory) {
        let resolver = ScheduleResolver::new();
        let scheduling = resolver
            .resolve(&directory, ScheduleSubject::Task(DESIGN_TASK_ID))
            .unwrap();
        assert_eq!(
            scheduling,
            Scheduling::new(8.0, Weekdays::monday_to_friday(), "UTC", 17, 0).unwrap()
        );
    }

    #[rstest]
    fn it_should_take_the_nearest_explicit_value_per_field(directory: Directory) {
        let resolver = ScheduleResolver::new();
        let scheduling = resolver
            .resolve(
                &directory,
                ScheduleSubject::ProjectUser {
                    project_id: PROJECT_ID,
                    user_id: USER_ID,
                },
            )
            .unwrap();
        let expected: Weekdays = [Weekday::Mon, Weekday::Tue, Weekday::Wed].into_iter().collect();
        assert_eq!(scheduling.weekdays, expected);
        assert_eq!(scheduling.workshift, 8.0);
        assert_eq!(scheduling.timezone, chrono_tz::UTC);

        let berlin = resolver
            .resolve(&directory, ScheduleSubject::Project(OTHER_PROJECT_ID))
            .unwrap();
        assert_eq!(berlin.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(berlin.end_of_day_hour, 17);
    }

    #[rstest]
    fn it_should_resolve_user_assignments(directory: Directory) {
        let resolver = ScheduleResolver::new();
        let organization_user = resolver
            .resolve(
                &directory,
                ScheduleSubject::OrganizationUser {
                    organization_id: ORGANIZATION_ID,
                    user_id: USER_ID,
                },
            )
            .unwrap();
        assert_eq!(organization_user.workshift, 6.0);

        let task_user = resolver
            .resolve(
                &directory,
                ScheduleSubject::TaskUser {
                    task_id: DESIGN_TASK_ID,
                    user_id: USER_ID,
                },
            )
            .unwrap();
        assert_eq!(
            task_user,
            resolver
                .resolve(&directory, ScheduleSubject::Task(DESIGN_TASK_ID))
                .unwrap()
        );
    }

    #[rstest]
    fn it_should_resolve_the_same_schedule_twice(directory: Directory) {
        let resolver = ScheduleResolver::new();
        let subject = ScheduleSubject::Project(OTHER_PROJECT_ID);
        assert_eq!(
            resolver.resolve(&directory, subject),
            resolver.resolve(&directory, subject)
        );
    }

    #[rstest]
    fn it_should_report_missing_entities(directory: Directory) {
        let resolver = ScheduleResolver::new();
        let missing = Uuid::nil();
        assert_eq!(
            resolver.resolve(&directory, ScheduleSubject::Task(missing)),
            Err(ForecastError::not_found("task", missing))
        );
        assert!(matches!(
            resolver.resolve(
                &directory,
                ScheduleSubject::ProjectUser {
                    project_id: OTHER_PROJECT_ID,
                    user_id: USER_ID
                }
            ),
            Err(ForecastError::NotFound { entity: "project user", .. })
        ));
    }

    #[rstest]
    fn it_should_reject_an_incomplete_organization_schedule() {
        let mut directory = make_directory();
        let mut organization = directory.organization(ORGANIZATION_ID).unwrap().clone();
        organization.scheduling.timezone = None;
        directory.insert_organization(organization);
        let result = ScheduleResolver::new().resolve(&directory, ScheduleSubject::Task(DESIGN_TASK_ID));
        assert!(matches!(result, Err(ForecastError::InvalidArgument(message)) if message.contains("timezone")));
    }

    #[rstest]
    fn it_should_reject_an_invalid_override(directory: Directory) {
        let mut directory = directory;
        let mut task = directory.task(DESIGN_TASK_ID).unwrap().clone();
        task.scheduling = SchedulingOverrides {
            weekdays: Some(Weekdays::empty()),
            ..SchedulingOverrides::default()
        };
        directory.insert_task(task);
        assert!(matches!(
            ScheduleResolver::new().resolve(&directory, ScheduleSubject::Task(DESIGN_TASK_ID)),
            Err(ForecastError::InvalidArgument(_))
        ));
    }
}
