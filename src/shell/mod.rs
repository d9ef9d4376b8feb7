// Composition root.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the in-memory adapters, seeded from the directory file when one is configured.
// - Wire adapters into the use case handlers and expose them through one GraphQL schema.

pub mod config;
pub mod graphql;
pub mod state;
