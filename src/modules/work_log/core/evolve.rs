use crate::modules::work_log::core::events::EntryEvent;
use crate::modules::work_log::core::state::EntryState;

pub fn evolve(state: EntryState, event: EntryEvent) -> EntryState {
    match (state, event) {
        (EntryState::None, EntryEvent::EntryRegisteredV1(e)) => EntryState::Registered {
            entry_id: e.entry_id,
            name: e.name,
            date: e.date,
            description: e.description,
            hours: e.hours,
            performer: e.performer,
            organization: e.organization,
            project: e.project,
            task: e.task,
            created_at: e.created_at,
            created_by: e.created_by,
            last_event_id: None,
        },
        (state, _) => state,
    }
}
