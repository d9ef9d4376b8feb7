use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum EntryState {
    None,
    Registered {
        entry_id: Uuid,
        name: String,
        date: i64,
        description: String,
        hours: f64,
        performer: Uuid,
        organization: Uuid,
        project: Uuid,
        task: Uuid,
        created_at: i64,
        created_by: String,
        last_event_id: Option<String>,
    },
}
