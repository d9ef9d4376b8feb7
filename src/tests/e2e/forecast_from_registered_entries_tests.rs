use crate::modules::planning::adapters::outbound::directory_in_memory::InMemoryDirectory;
use crate::modules::planning::core::forecast::ForecastEngine;
use crate::modules::planning::use_cases::forecast_assignment::handler::ForecastAssignmentHandler;
use crate::modules::planning::use_cases::forecast_project::handler::ForecastProjectHandler;
use crate::modules::planning::use_cases::forecast_task::handler::ForecastTaskHandler;
use crate::modules::work_log::adapters::outbound::projections_in_memory::InMemoryEntryProjections;
use crate::modules::work_log::core::events::EntryEvent;
use crate::modules::work_log::use_cases::list_entries::handler::Projector;
use crate::modules::work_log::use_cases::list_entries::queries_port::EntryQueries;
use crate::modules::work_log::use_cases::register_entry::handler::RegisterEntryHandler;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use crate::tests::fixtures::commands::register_entry::RegisterEntryBuilder;
use crate::tests::fixtures::directory::{
    BUILD_TASK_ID, DESIGN_TASK_ID, PROJECT_ID, USER_ID, make_directory,
};
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

const HOUR_MS: i64 = 3_600_000;

#[tokio::test]
async fn forecasts_follow_the_registered_entries() {
    let store = Arc::new(InMemoryEventStore::<EntryEvent>::new());
    let projections = Arc::new(InMemoryEntryProjections::new());
    let directory = Arc::new(InMemoryDirectory::new(make_directory()));
    let projector = Projector {
        name: "entries".into(),
        repository: projections.clone(),
        watermark_repository: projections.clone(),
    };
    let handler = RegisterEntryHandler::new(store.clone());

    let monday_noon = Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap().timestamp_millis();
    let commands: Vec<_> = [
        (DESIGN_TASK_ID, monday_noon, 4.0),
        (DESIGN_TASK_ID, monday_noon + 24 * HOUR_MS, 6.0),
        (BUILD_TASK_ID, monday_noon + 48 * HOUR_MS, 3.0),
    ]
    .into_iter()
    .map(|(task, date, hours)| {
        RegisterEntryBuilder::new()
            .entry_id(Uuid::now_v7())
            .task(PROJECT_ID, task)
            .date(date)
            .hours(hours)
            .build()
    })
    .collect();

    for command in commands.iter().cloned() {
        let stream_id = format!("Entry-{}", command.entry_id);
        handler.handle(&stream_id, command).await.unwrap();

        let loaded = store.load(&stream_id).await.unwrap();
        projector
            .apply_one(&stream_id, loaded.version, loaded.events.last().unwrap())
            .await
            .unwrap();
    }

    let listed = projections.list_by_task(DESIGN_TASK_ID).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].date < listed[1].date);

    let as_of = Utc.with_ymd_and_hms(2025, 1, 8, 9, 0, 0).unwrap();
    let engine = ForecastEngine::default();

    let task = ForecastTaskHandler::new(directory.clone(), projections.clone(), engine)
        .handle(DESIGN_TASK_ID, as_of)
        .await
        .unwrap();
    assert_eq!(task.worked_hours, 10.0);
    assert_eq!(task.projection, 6.0);
    assert_eq!(task.elapsed_hours, 16.0);
    assert_eq!(task.target_date, Utc.with_ymd_and_hms(2025, 1, 7, 17, 0, 0).unwrap());

    let project = ForecastProjectHandler::new(directory.clone(), projections.clone(), engine)
        .handle(PROJECT_ID, as_of)
        .await
        .unwrap();
    assert_eq!(project.worked_hours, 13.0);
    assert_eq!(project.projection, 27.0);

    let assignment = ForecastAssignmentHandler::new(directory, projections, engine)
        .handle_project_user(PROJECT_ID, USER_ID, as_of)
        .await
        .unwrap();
    assert_eq!(assignment.worked_hours, 13.0);
    assert_eq!(assignment.projection, 0.0);
}
