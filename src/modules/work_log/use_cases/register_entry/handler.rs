use crate::modules::work_log::core::events::EntryEvent;
use crate::modules::work_log::core::evolve::evolve;
use crate::modules::work_log::core::state::EntryState;
use crate::modules::work_log::use_cases::register_entry::command::RegisterEntry;
use crate::modules::work_log::use_cases::register_entry::decide::decide_register;
use crate::modules::work_log::use_cases::register_entry::decision::Decision;
use crate::shared::infrastructure::event_store::{EventStore, EventStoreError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    VersionConflict(#[from] EventStoreError),

    #[error("domain rejected: {0}")]
    Domain(String),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

pub struct RegisterEntryHandler<TEventStore>
where
    TEventStore: EventStore<EntryEvent> + Send + Sync + 'static,
{
    event_store: Arc<TEventStore>,
}

impl<TEventStore> RegisterEntryHandler<TEventStore>
where
    TEventStore: EventStore<EntryEvent> + Send + Sync + 'static,
{
    pub fn new(event_store: Arc<TEventStore>) -> Self {
        Self { event_store }
    }

    pub async fn handle(
        &self,
        stream_id: &str,
        command: RegisterEntry,
    ) -> Result<(), ApplicationError> {
        let stream = self
            .event_store
            .load(stream_id)
            .await
            .map_err(ApplicationError::VersionConflict)?;

        let state = stream
            .events
            .iter()
            .cloned()
            .fold(EntryState::None, evolve);

        match decide_register(&state, command) {
            Decision::Accepted { events } => {
                self.event_store
                    .append(stream_id, stream.version, &events)
                    .await
                    .map_err(ApplicationError::VersionConflict)?;
                tracing::info!(stream_id, version = stream.version + 1, "entry registered");
                Ok(())
            }
            Decision::Rejected { reason } => {
                tracing::debug!(stream_id, %reason, "entry registration rejected");
                Err(ApplicationError::Domain(reason.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod entry_register_handler_tests {
    use crate::modules::work_log::core::events::EntryEvent;
    use crate::modules::work_log::use_cases::register_entry::command::RegisterEntry;
    use crate::modules::work_log::use_cases::register_entry::decision::DecideError;
    use crate::modules::work_log::use_cases::register_entry::handler::{
        ApplicationError, RegisterEntryHandler,
    };
    use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
    use crate::shared::infrastructure::event_store::{EventStore, EventStoreError};
    use crate::tests::fixtures::commands::register_entry::RegisterEntryBuilder;
    use rstest::{fixture, rstest};
    use std::sync::Arc;
    use tokio::join;

    type BeforeEachReturn = (&'static str, RegisterEntry, InMemoryEventStore<EntryEvent>);

    #[fixture]
    fn before_each() -> BeforeEachReturn {
        let stream_id = "Entry-0001";
        let event_store = InMemoryEventStore::<EntryEvent>::new();
        let command = RegisterEntryBuilder::new().build();
        (stream_id, command, event_store)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_append_the_registered_event(before_each: BeforeEachReturn) {
        let (stream_id, command, event_store) = before_each;
        let es = Arc::new(event_store);
        let handler = RegisterEntryHandler::new(es.clone());
        handler
            .handle(stream_id, command)
            .await
            .expect("handle failed");
        let stream = es.load(stream_id).await.expect("load failed");
        assert_eq!(stream.events.len(), 1);
        assert_eq!(stream.version, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_entry_exists(before_each: BeforeEachReturn) {
        let (stream_id, command, event_store) = before_each;
        let handler = RegisterEntryHandler::new(Arc::new(event_store));
        handler
            .handle(stream_id, command.clone())
            .await
            .expect("first handle failed");
        let result = handler.handle(stream_id, command).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            ApplicationError::Domain(DecideError::AlreadyExists.to_string()).to_string()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_on_invalid_hours(before_each: BeforeEachReturn) {
        let (stream_id, command, event_store) = before_each;
        let es = Arc::new(event_store);
        let handler = RegisterEntryHandler::new(es.clone());
        let result = handler
            .handle(stream_id, RegisterEntry { hours: 0.0, ..command })
            .await;
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
        assert_eq!(es.load(stream_id).await.unwrap().version, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_event_store_is_offline(before_each: BeforeEachReturn) {
        let (stream_id, command, mut event_store) = before_each;
        event_store.toggle_offline();
        let handler = RegisterEntryHandler::new(Arc::new(event_store));
        let result = handler.handle(stream_id, command).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            ApplicationError::VersionConflict(EventStoreError::Backend(
                "Event store offline".into()
            ))
            .to_string()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_event_store_has_a_mismatching_version(
        before_each: BeforeEachReturn,
    ) {
        let (stream_id, command, event_store) = before_each;
        event_store.set_delay_append_ms(10);
        let es = Arc::new(event_store);
        let handler1 = RegisterEntryHandler::new(es.clone());
        let handler2 = RegisterEntryHandler::new(es);
        let (result1, result2) = join!(
            handler1.handle(stream_id, command.clone()),
            handler2.handle(stream_id, command)
        );
        assert!(
            result1.is_ok() ^ result2.is_ok(),
            "exactly one should fail with conflict"
        );
        let err = result1.err().or(result2.err()).unwrap();
        match err {
            ApplicationError::VersionConflict(EventStoreError::VersionMismatch {
                expected,
                actual,
            }) => {
                assert_eq!(expected, 0);
                assert_eq!(actual, 1);
            }
            e => panic!("unexpected error: {e:?}"),
        }
    }
}
