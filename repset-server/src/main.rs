//! Repset server binary: config bootstrap, resource wiring, serve loop.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repset_core::PostgresDatabase;
use repset_core::database::ports::{ExerciseRepository, RoutineRepository};
use repset_core::database::postgres::repositories::{
    PostgresExerciseRepository, PostgresRoutineRepository,
};
use repset_core::enrichment::EnrichmentService;
use repset_core::providers::{GoogleImageProvider, ImageSearchPort};

use repset_server::create_app;
use repset_server::fallback::FallbackRoutines;
use repset_server::infra::app_state::AppState;
use repset_server::infra::config::{Config, ConfigLoader};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "repset-server")]
#[command(about = "Exercise and routine catalog service with image enrichment")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Db(DbCommand::Migrate)) = cli.command {
        return run_db_migrate(&cli.serve).await;
    }

    run_server(cli.serve).await
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Arc<Config>> {
    let mut config = ConfigLoader::new()
        .load()
        .context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.env_file_loaded {
        info!("loaded .env file");
    }

    if config.search.api_key.is_empty() || config.search.cx.is_empty() {
        warn!(
            "GOOGLE_API_KEY / GOOGLE_CX not set - image search will return empty results"
        );
    }

    Ok(Arc::new(config))
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let database_url = config
        .database
        .url
        .clone()
        .context("DATABASE_URL must be provided for PostgreSQL connections")?;

    let db = PostgresDatabase::connect(&database_url)
        .await
        .context("failed to connect to PostgreSQL for migration")?;
    db.initialize_schema()
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn wire_app_resources(config: Arc<Config>) -> anyhow::Result<AppState> {
    let database_url = config
        .database
        .url
        .clone()
        .context("DATABASE_URL must be provided for PostgreSQL connections")?;

    if !(database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")) {
        error!("Only PostgreSQL database URLs are supported");
        anyhow::bail!("Invalid database URL: must start with postgres:// or postgresql://");
    }

    let db = Arc::new(
        PostgresDatabase::connect_lazy(&database_url)
            .map_err(|err| anyhow::anyhow!("failed to build connection pool: {err}"))?,
    );

    // The migration run doubles as the startup connectivity probe; a store
    // that is down here arms the read-only routines fallback for the life of
    // the process.
    let fallback = match db.initialize_schema().await {
        Ok(()) => {
            info!("Database schema initialized successfully");
            Arc::new(FallbackRoutines::disabled())
        }
        Err(err) => {
            warn!(
                error = %err,
                "store unreachable at startup - GET /routines degrades to the fallback dataset"
            );
            Arc::new(FallbackRoutines::load(&config.fallback.routines_path))
        }
    };

    let pool = db.pool().clone();
    let exercises: Arc<dyn ExerciseRepository> =
        Arc::new(PostgresExerciseRepository::new(pool.clone()));
    let routines: Arc<dyn RoutineRepository> = Arc::new(PostgresRoutineRepository::new(pool));

    let search: Arc<dyn ImageSearchPort> = Arc::new(GoogleImageProvider::with_endpoint(
        config.search.api_key.clone(),
        config.search.cx.clone(),
        config.search.endpoint.clone(),
    ));
    let enrichment = Arc::new(EnrichmentService::new(Arc::clone(&exercises), search));

    Ok(AppState::new(
        exercises, routines, enrichment, db, config, fallback,
    ))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(&args)?;
    let state = wire_app_resources(Arc::clone(&config)).await?;

    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid server address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    info!(
        "Starting Repset server on {}:{}",
        config.server.host, config.server.port
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
