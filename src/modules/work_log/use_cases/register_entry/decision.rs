use crate::modules::work_log::core::events::EntryEvent;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("entry already exists")]
    AlreadyExists,

    #[error("hours must be greater than 0 and at most 24")]
    InvalidHours,

    #[error("date must fall between year 1 and year 9999")]
    InvalidDate,
}

pub enum Decision {
    Accepted { events: Vec<EntryEvent> },
    Rejected { reason: DecideError },
}
