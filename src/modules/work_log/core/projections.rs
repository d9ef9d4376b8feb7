use crate::modules::work_log::core::events::EntryEvent;
use crate::modules::work_log::use_cases::list_entries::projection::EntryRow;

pub enum Mutation {
    Upsert(EntryRow),
}

pub fn apply(stream_id: &str, version: i64, event: &EntryEvent) -> Vec<Mutation> {
    let stream_key = format!("{stream_id}:{version}");
    match event {
        EntryEvent::EntryRegisteredV1(details) => vec![Mutation::Upsert(EntryRow {
            entry_id: details.entry_id,
            name: details.name.clone(),
            date: details.date,
            description: details.description.clone(),
            hours: details.hours,
            performer: details.performer,
            organization: details.organization,
            project: details.project,
            task: details.task,
            created_at: details.created_at,
            created_by: details.created_by.clone(),
            last_event_id: Some(stream_key),
        })],
    }
}
