use crate::modules::planning::adapters::outbound::directory_in_memory::InMemoryDirectory;
use crate::modules::planning::core::forecast::ForecastEngine;
use crate::modules::planning::use_cases::forecast_assignment::handler::ForecastAssignmentHandler;
use crate::modules::planning::use_cases::forecast_project::handler::ForecastProjectHandler;
use crate::modules::planning::use_cases::forecast_task::handler::ForecastTaskHandler;
use crate::modules::planning::use_cases::resolve_schedule::handler::ResolveScheduleHandler;
use crate::modules::work_log::adapters::outbound::projections_in_memory::InMemoryEntryProjections;
use crate::modules::work_log::core::events::EntryEvent;
use crate::modules::work_log::use_cases::list_entries::handler::Projector;
use crate::modules::work_log::use_cases::list_entries::queries_port::EntryQueries;
use crate::modules::work_log::use_cases::register_entry::handler::RegisterEntryHandler;
use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use std::sync::Arc;

type Entries = InMemoryEntryProjections;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<InMemoryDirectory>,
    pub queries: Arc<dyn EntryQueries + Send + Sync>,
    pub register_handler: Arc<RegisterEntryHandler<InMemoryEventStore<EntryEvent>>>,
    pub event_store: Arc<InMemoryEventStore<EntryEvent>>,
    pub projector: Arc<Projector<Entries, Entries>>,
    pub forecast_task: Arc<ForecastTaskHandler<InMemoryDirectory, Entries>>,
    pub forecast_project: Arc<ForecastProjectHandler<InMemoryDirectory, Entries>>,
    pub forecast_assignment: Arc<ForecastAssignmentHandler<InMemoryDirectory, Entries>>,
    pub resolve_schedule: Arc<ResolveScheduleHandler<InMemoryDirectory>>,
}

impl AppState {
    pub fn in_memory(directory: InMemoryDirectory, engine: ForecastEngine) -> Self {
        let directory = Arc::new(directory);
        let event_store = Arc::new(InMemoryEventStore::<EntryEvent>::new());
        let projections = Arc::new(InMemoryEntryProjections::new());

        Self {
            queries: projections.clone(),
            register_handler: Arc::new(RegisterEntryHandler::new(event_store.clone())),
            event_store,
            projector: Arc::new(Projector::new(
                "entries",
                projections.clone(),
                projections.clone(),
            )),
            forecast_task: Arc::new(ForecastTaskHandler::new(
                directory.clone(),
                projections.clone(),
                engine,
            )),
            forecast_project: Arc::new(ForecastProjectHandler::new(
                directory.clone(),
                projections.clone(),
                engine,
            )),
            forecast_assignment: Arc::new(ForecastAssignmentHandler::new(
                directory.clone(),
                projections,
                engine,
            )),
            resolve_schedule: Arc::new(ResolveScheduleHandler::new(directory.clone())),
            directory,
        }
    }
}
