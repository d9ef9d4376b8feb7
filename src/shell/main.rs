use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use work_forecast::modules::planning::adapters::outbound::directory_in_memory::InMemoryDirectory;
use work_forecast::modules::planning::core::forecast::ForecastEngine;
use work_forecast::shell::config::AppConfig;
use work_forecast::shell::graphql::{AppSchema, AppState, build_schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;

    let directory = match &config.directory_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading directory seed");
            InMemoryDirectory::from_json_file(path)?
        }
        None => {
            tracing::warn!("no directory seed configured, starting with an empty directory");
            InMemoryDirectory::default()
        }
    };

    let state = AppState::in_memory(directory, ForecastEngine::new(config.max_walk_days));
    let schema = build_schema(state);

    let app = Router::new()
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http());

    tracing::info!("GraphQL endpoint: http://{}/gql", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> axum::response::Html<String> {
    use async_graphql::http::GraphiQLSource;
    axum::response::Html(GraphiQLSource::build().endpoint("/gql").finish())
}
