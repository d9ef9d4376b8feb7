use uuid::Uuid;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct EntryRegisteredV1 {
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
