use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterEntry {
    pub entry_id: Uuid,
    pub name: String,
    pub date: i64,
    pub description: String,
    pub hours: f64,
    pub performer: Uuid,
    pub organization: Uuid,
    pub project: Uuid,
    pub task: Uuid,
    pub created_at: i64,
    pub created_by: String,
}

#[cfg(test)]
mod register_entry_command_tests {
    use super::*;
    use crate::tests::fixtures::commands::register_entry::RegisterEntryBuilder;
    use crate::tests::fixtures::directory::{DESIGN_TASK_ID, USER_ID};
    use rstest::{fixture, rstest};

    #[fixture]
    fn register_command() -> RegisterEntry {
        RegisterEntryBuilder::new().build()
    }

    #[rstest]
    fn it_should_create_the_command(register_command: RegisterEntry) {
        assert_eq!(register_command.performer, USER_ID);
        assert_eq!(register_command.task, DESIGN_TASK_ID);
        assert_eq!(register_command.hours, 2.5);
    }
}
