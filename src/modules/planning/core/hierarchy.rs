// Organization → Project → Task containment tree, user assignments and the read-only
// lookups the resolver and the time-off index walk.
//
// Scheduling and scenario inputs are embedded as sub-records on each entity. An entity that
// does not carry one of them simply has no such field (TaskUser has neither).

use crate::modules::planning::core::scenario::ScenarioPlan;
use crate::modules::planning::core::scheduling::SchedulingOverrides;
use crate::modules::planning::core::time_off::{TimeOff, TimeOffTarget};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub scheduling: SchedulingOverrides,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub scheduling: SchedulingOverrides,
    #[serde(default)]
    pub scenario: ScenarioPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub scheduling: SchedulingOverrides,
    #[serde(default)]
    pub scenario: ScenarioPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationUser {
    pub organization_id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub scheduling: SchedulingOverrides,
    #[serde(default)]
    pub scenario: ScenarioPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUser {
    pub project_id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub scheduling: SchedulingOverrides,
    #[serde(default)]
    pub scenario: ScenarioPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUser {
    pub task_id: Uuid,
    pub user_id: Uuid,
}

/// Read-only access to an already loaded hierarchy.
pub trait Hierarchy {
    fn organization(&self, id: Uuid) -> Option<&Organization>;
    fn project(&self, id: Uuid) -> Option<&Project>;
    fn task(&self, id: Uuid) -> Option<&Task>;
    fn organization_user(&self, organization_id: Uuid, user_id: Uuid)
    -> Option<&OrganizationUser>;
    fn project_user(&self, project_id: Uuid, user_id: Uuid) -> Option<&ProjectUser>;
    fn task_user(&self, task_id: Uuid, user_id: Uuid) -> Option<&TaskUser>;
    /// Every (child, parent) containment link: tasks to projects, projects to organizations.
    fn parent_links(&self) -> Vec<(TimeOffTarget, TimeOffTarget)>;
}

/// In-memory snapshot of the hierarchy together with its time-off records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DirectorySeed", into = "DirectorySeed")]
pub struct Directory {
    organizations: HashMap<Uuid, Organization>,
    projects: HashMap<Uuid, Project>,
    tasks: HashMap<Uuid, Task>,
    organization_users: HashMap<(Uuid, Uuid), OrganizationUser>,
    project_users: HashMap<(Uuid, Uuid), ProjectUser>,
    task_users: HashMap<(Uuid, Uuid), TaskUser>,
    time_offs: Vec<TimeOff>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_organization(&mut self, organization: Organization) {
        self.organizations.insert(organization.id, organization);
    }

    pub fn insert_project(&mut self, project: Project) {
        self.projects.insert(project.id, project);
    }

    pub fn insert_task(&mut self, task: Task) {
        self.tasks.insert(task.id, task);
    }

    pub fn insert_organization_user(&mut self, assignment: OrganizationUser) {
        self.organization_users
            .insert((assignment.organization_id, assignment.user_id), assignment);
    }

    pub fn insert_project_user(&mut self, assignment: ProjectUser) {
        self.project_users
            .insert((assignment.project_id, assignment.user_id), assignment);
    }

    pub fn insert_task_user(&mut self, assignment: TaskUser) {
        self.task_users
            .insert((assignment.task_id, assignment.user_id), assignment);
    }

    pub fn insert_time_off(&mut self, time_off: TimeOff) {
        self.time_offs.push(time_off);
    }

    pub fn time_offs(&self) -> &[TimeOff] {
        &self.time_offs
    }

    /// Tasks of a project ordered by id.
    pub fn tasks_of_project(&self, project_id: Uuid) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .values()
            .filter(|task| task.project_id == project_id)
            .collect();
        tasks.sort_by_key(|task| task.id);
        tasks
    }
}

impl Hierarchy for Directory {
    fn organization(&self, id: Uuid) -> Option<&Organization> {
        self.organizations.get(&id)
    }

    fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.get(&id)
    }

    fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.get(&id)
    }

    fn organization_user(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Option<&OrganizationUser> {
        self.organization_users.get(&(organization_id, user_id))
    }

    fn project_user(&self, project_id: Uuid, user_id: Uuid) -> Option<&ProjectUser> {
        self.project_users.get(&(project_id, user_id))
    }

    fn task_user(&self, task_id: Uuid, user_id: Uuid) -> Option<&TaskUser> {
        self.task_users.get(&(task_id, user_id))
    }

    fn parent_links(&self) -> Vec<(TimeOffTarget, TimeOffTarget)> {
        let task_links = self.tasks.values().map(|task| {
            (
                TimeOffTarget::Task(task.id),
                TimeOffTarget::Project(task.project_id),
            )
        });
        let project_links = self.projects.values().map(|project| {
            (
                TimeOffTarget::Project(project.id),
                TimeOffTarget::Organization(project.organization_id),
            )
        });
        task_links.chain(project_links).collect()
    }
}

/// Serialized shape of a directory: flat lists, as found in seed files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySeed {
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub organization_users: Vec<OrganizationUser>,
    #[serde(default)]
    pub project_users: Vec<ProjectUser>,
    #[serde(default)]
    pub task_users: Vec<TaskUser>,
    #[serde(default)]
    pub time_offs: Vec<TimeOff>,
}

impl From<DirectorySeed> for Directory {
    fn from(seed: DirectorySeed) -> Self {
        let mut directory = Directory::new();
        seed.organizations
            .into_iter()
            .for_each(|organization| directory.insert_organization(organization));
        seed.projects
            .into_iter()
            .for_each(|project| directory.insert_project(project));
        seed.tasks
            .into_iter()
            .for_each(|task| directory.insert_task(task));
        seed.organization_users
            .into_iter()
            .for_each(|assignment| directory.insert_organization_user(assignment));
        seed.project_users
            .into_iter()
            .for_each(|assignment| directory.insert_project_user(assignment));
        seed.task_users
            .into_iter()
            .for_each(|assignment| directory.insert_task_user(assignment));
        directory.time_offs = seed.time_offs;
        directory
    }
}

impl From<Directory> for DirectorySeed {
    fn from(directory: Directory) -> Self {
        let mut seed = DirectorySeed {
            organizations: directory.organizations.into_values().collect(),
            projects: directory.projects.into_values().collect(),
            tasks: directory.tasks.into_values().collect(),
            organization_users: directory.organization_users.into_values().collect(),
            project_users: directory.project_users.into_values().collect(),
            task_users: directory.task_users.into_values().collect(),
            time_offs: directory.time_offs,
        };
        seed.organizations.sort_by_key(|organization| organization.id);
        seed.projects.sort_by_key(|project| project.id);
        seed.tasks.sort_by_key(|task| task.id);
        seed.organization_users
            .sort_by_key(|assignment| (assignment.organization_id, assignment.user_id));
        seed.project_users
            .sort_by_key(|assignment| (assignment.project_id, assignment.user_id));
        seed.task_users
            .sort_by_key(|assignment| (assignment.task_id, assignment.user_id));
        seed
    }
}
