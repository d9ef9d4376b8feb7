// Shared test fixtures, compiled only with `cfg(test)`.
//
// JSON seeds live next to this file and are read relative to the crate root, which is the
// working directory of `cargo test`.

pub mod directory {
    use crate::modules::planning::core::hierarchy::Directory;
    use std::fs;
    use uuid::Uuid;

    pub const ORGANIZATION_ID: Uuid = Uuid::from_u128(0x0190a000_0000_7000_8000_000000000001);
    pub const PROJECT_ID: Uuid = Uuid::from_u128(0x0190a000_0000_7000_8000_000000000002);
    pub const DESIGN_TASK_ID: Uuid = Uuid::from_u128(0x0190a000_0000_7000_8000_000000000003);
    pub const BUILD_TASK_ID: Uuid = Uuid::from_u128(0x0190a000_0000_7000_8000_000000000004);
    /// Second project of the organization, running on Berlin time.
    pub const OTHER_PROJECT_ID: Uuid = Uuid::from_u128(0x0190a000_0000_7000_8000_000000000005);
    pub const USER_ID: Uuid = Uuid::from_u128(0x0190a000_0000_7000_8000_000000000010);

    pub const DIRECTORY_JSON_PATH: &str = "./src/tests/fixtures/json/directory.json";

    pub fn make_directory() -> Directory {
        let json_str = fs::read_to_string(DIRECTORY_JSON_PATH).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }
}

pub mod commands {
    pub mod register_entry {
        use crate::modules::work_log::use_cases::register_entry::command::RegisterEntry;
        use serde::Deserialize;
        use std::fs;
        use uuid::Uuid;

        // JSON -> DTO (transport shape)
        #[derive(Debug, Clone, Deserialize)]
        pub struct RegisterEntryDto {
            pub entry_id: Uuid,
            pub name: String,
            pub date: i64,
            pub description: String,
            pub hours: f64,
            pub performer: Uuid,
            pub organization: Uuid,
            pub project: Uuid,
            pub task: Uuid,
        }

        pub struct RegisterEntryBuilder {
            inner: RegisterEntry,
        }

        impl Default for RegisterEntryBuilder {
            fn default() -> Self {
                Self::new()
            }
        }

        #[allow(dead_code)]
        impl RegisterEntryBuilder {
            pub fn new() -> Self {
                let json_str =
                    fs::read_to_string("./src/tests/fixtures/commands/json/register_entry.json")
                        .unwrap();
                let dto: RegisterEntryDto = serde_json::from_str(&json_str).unwrap();

                Self {
                    inner: RegisterEntry {
                        entry_id: dto.entry_id,
                        name: dto.name,
                        date: dto.date,
                        description: dto.description,
                        hours: dto.hours,
                        performer: dto.performer,
                        organization: dto.organization,
                        project: dto.project,
                        task: dto.task,
                        created_at: 1_736_164_800_000,
                        created_by: "user-from-auth".to_string(),
                    },
                }
            }

            pub fn entry_id(mut self, v: Uuid) -> Self {
                self.inner.entry_id = v;
                self
            }

            pub fn date(mut self, v: i64) -> Self {
                self.inner.date = v;
                self
            }

            pub fn hours(mut self, v: f64) -> Self {
                self.inner.hours = v;
                self
            }

            pub fn performer(mut self, v: Uuid) -> Self {
                self.inner.performer = v;
                self
            }

            pub fn task(mut self, project: Uuid, task: Uuid) -> Self {
                self.inner.project = project;
                self.inner.task = task;
                self
            }

            pub fn build(self) -> RegisterEntry {
                self.inner
            }
        }
    }
}

pub mod events {
    pub mod entry_registered_v1 {
        use crate::modules::work_log::core::events::v1::entry_registered::EntryRegisteredV1;
        use crate::tests::fixtures::commands::register_entry::RegisterEntryBuilder;

        /// Canonical event instance for tests.
        pub fn make_entry_registered_v1_event() -> EntryRegisteredV1 {
            let command = RegisterEntryBuilder::new().build();
            EntryRegisteredV1 {
                entry_id: command.entry_id,
                name: command.name,
                date: command.date,
                description: command.description,
                hours: command.hours,
                performer: command.performer,
                organization: command.organization,
                project: command.project,
                task: command.task,
                created_at: command.created_at,
                created_by: command.created_by,
            }
        }
    }

    pub mod domain_event {
        /// Minimal event type for exercising the generic event store.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct DomainEvent {
            pub event_type: &'static str,
        }
    }
}

#[cfg(test)]
mod fixtures_tests {
    use super::commands::register_entry::RegisterEntryBuilder;
    use super::directory::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn it_should_load_the_directory_seed() {
        let directory = make_directory();
        assert_eq!(directory.tasks_of_project(PROJECT_ID).len(), 2);
        assert!(directory.tasks_of_project(OTHER_PROJECT_ID).is_empty());
    }

    #[rstest]
    fn it_should_override_builder_fields() {
        let entry_id = Uuid::now_v7();
        let command = RegisterEntryBuilder::default()
            .entry_id(entry_id)
            .date(1)
            .hours(8.0)
            .performer(Uuid::nil())
            .task(PROJECT_ID, BUILD_TASK_ID)
            .build();
        assert_eq!(command.entry_id, entry_id);
        assert_eq!(command.date, 1);
        assert_eq!(command.hours, 8.0);
        assert_eq!(command.performer, Uuid::nil());
        assert_eq!(command.task, BUILD_TASK_ID);
        assert_eq!(command.organization, ORGANIZATION_ID);
    }
}
