use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntryRow {
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
    pub last_event_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntryView {
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

impl From<EntryRow> for EntryView {
    fn from(row: EntryRow) -> Self {
        Self {
            entry_id: row.entry_id,
            name: row.name,
            date: row.date,
            description: row.description,
            hours: row.hours,
            performer: row.performer,
            organization: row.organization,
            project: row.project,
            task: row.task,
            created_at: row.created_at,
            created_by: row.created_by,
        }
    }
}
