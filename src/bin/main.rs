//! Schemer CLI - crawl database schemas and synthesize runtime models
//!
//! Usage:
//!   schemer serve [--port <port>]
//!   schemer crawl [<connection>] [--schema <pattern>]
//!   schemer generate [<connection>] [--schema <pattern>]
//!
//! When no connection name is given, the default connection from
//! schemer.toml is used, falling back to the SCHEMER_DB_* environment
//! variables.
//!
//! Examples:
//!   schemer serve --port 7878
//!   schemer crawl dev
//!   schemer generate dev --schema "app_%"

use clap::{Parser, Subcommand};
use schemer::config::{ConnectionConfig, ConnectionSettings, Settings};
use schemer::metadata::{SchemaIntrospector, TableSchema, WorkerMetadataProvider};
use schemer::model::{ModelRegistry, ModelSynthesizer};
use schemer::worker::WorkerClient;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "schemer")]
#[command(about = "Schemer - database schema crawler and runtime model synthesizer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 7878)]
        port: u16,
    },

    /// Crawl a schema and print the table snapshots as JSON
    Crawl {
        /// Connection name from schemer.toml
        connection: Option<String>,

        /// LIKE-style schema pattern
        #[arg(short, long, default_value = "%")]
        schema: String,
    },

    /// Crawl a schema, synthesize models, and print their names
    Generate {
        /// Connection name from schemer.toml
        connection: Option<String>,

        /// LIKE-style schema pattern
        #[arg(short, long, default_value = "%")]
        schema: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,
        Commands::Crawl { connection, schema } => {
            cmd_crawl(connection.as_deref(), &schema).await
        }
        Commands::Generate { connection, schema } => {
            cmd_generate(connection.as_deref(), &schema).await
        }
    }
}

async fn cmd_serve(port: u16) -> ExitCode {
    let settings = Settings::load().unwrap_or_default();

    match schemer::web::serve(settings, port).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_crawl(connection: Option<&str>, schema: &str) -> ExitCode {
    let schemas = match crawl(connection, schema).await {
        Ok(schemas) => schemas,
        Err(code) => return code,
    };

    match serde_json::to_string_pretty(&schemas) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing schemas: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_generate(connection: Option<&str>, schema: &str) -> ExitCode {
    let schemas = match crawl(connection, schema).await {
        Ok(schemas) => schemas,
        Err(code) => return code,
    };

    let registry = Arc::new(ModelRegistry::new());
    let synthesizer = ModelSynthesizer::new(registry.clone());
    synthesizer.synthesize(&schemas);

    println!("Models generated: {}", registry.len());
    for name in registry.names() {
        println!("  {}", name);
    }
    ExitCode::SUCCESS
}

/// Resolve the target connection, spawn the worker, and crawl.
async fn crawl(connection: Option<&str>, schema: &str) -> Result<Vec<TableSchema>, ExitCode> {
    let settings = Settings::load().unwrap_or_default();
    let (driver, connection_string) = resolve_target(&settings, connection)?;

    let client = match WorkerClient::spawn_with_settings(&settings).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error starting worker: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    let provider = WorkerMetadataProvider::with_client(client, driver, connection_string);
    let introspector = SchemaIntrospector::new(&provider);

    introspector.introspect(schema).await.map_err(|e| {
        eprintln!("Crawl failed: {}", e);
        ExitCode::FAILURE
    })
}

/// Resolve driver and connection string: a named connection from
/// schemer.toml, the default connection, or the SCHEMER_DB_* environment
/// variables.
fn resolve_target(
    settings: &Settings,
    name: Option<&str>,
) -> Result<(String, String), ExitCode> {
    if let Some(name) = name {
        let conn = settings.get_connection(name).map_err(|e| {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        })?;
        return resolve_settings_connection(conn);
    }

    if let Some((_, conn)) = settings.default_connection() {
        return resolve_settings_connection(conn);
    }

    match ConnectionConfig::from_env() {
        Ok(config) => Ok((
            config.driver_name().to_string(),
            config.to_connection_string(),
        )),
        Err(e) => {
            eprintln!("Error: no connection configured ({})", e);
            Err(ExitCode::FAILURE)
        }
    }
}

fn resolve_settings_connection(conn: &ConnectionSettings) -> Result<(String, String), ExitCode> {
    // Validate the driver name before spawning anything
    if let Err(e) = conn.driver_type() {
        eprintln!("Error: {}", e);
        return Err(ExitCode::FAILURE);
    }

    let connection_string = conn.resolved_connection_string().map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    })?;

    Ok((conn.driver.clone(), connection_string))
}
