use crate::modules::work_log::core::{
    events::{EntryEvent, v1::entry_registered::EntryRegisteredV1},
    state::EntryState,
};
use crate::modules::work_log::use_cases::register_entry::{
    command::RegisterEntry,
    decision::{DecideError, Decision},
};
use crate::shared::core::primitives::from_epoch_millis;

pub fn decide_register(state: &EntryState, command: RegisterEntry) -> Decision {
    match state {
        EntryState::None => {
            if !(command.hours > 0.0 && command.hours <= 24.0) {
                return Decision::Rejected {
                    reason: DecideError::InvalidHours,
                };
            }
            if from_epoch_millis(command.date).is_none() {
                return Decision::Rejected {
                    reason: DecideError::InvalidDate,
                };
            }
            let payload = EntryRegisteredV1 {
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
            };
            Decision::Accepted {
                events: vec![EntryEvent::EntryRegisteredV1(payload)],
            }
        }
        _ => Decision::Rejected {
            reason: DecideError::AlreadyExists,
        },
    }
}
