use async_graphql::{EmptySubscription, MergedObject, Schema};
use uuid::Uuid;

use crate::modules::planning::use_cases::inbound::graphql::ForecastQuery;
use crate::modules::work_log::use_cases::list_entries::inbound::graphql::EntryQuery;
pub use crate::modules::work_log::use_cases::register_entry::inbound::graphql::MutationRoot;
pub use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(ForecastQuery, EntryQuery);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

pub fn parse_id(value: &str) -> async_graphql::Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| async_graphql::Error::new(format!("invalid id `{value}`: {e}")))
}

pub fn gql_error(error: impl std::fmt::Display) -> async_graphql::Error {
    async_graphql::Error::new(error.to_string())
}
