//! Operator console for the amlscope analytics core.
//!
//! Provides the `amlscope` binary with subcommands for working against a
//! running monitoring backend:
//! - `watch`: run the live dashboard session (REST seed + WebSocket feed)
//!   until Ctrl-C;
//! - `graph`: fetch and build the entity graph, print a summary;
//! - `search`: resolve a query against the graph and show the focused
//!   entity with its highlight sets.
//!
//! Backend locations come from flags or the `AMLSCOPE_API_URL` /
//! `AMLSCOPE_WS_URL` environment variables.

use std::process;

use clap::{Parser, Subcommand};

use amlscope_client::{stream, ApiClient, ClientError, DashboardSession};
use amlscope_core::{search, EntityGraph, Selection};

/// AML network analytics console.
#[derive(Parser)]
#[command(name = "amlscope", about = "AML network analytics console")]
struct Cli {
    /// Backend REST base URL.
    #[arg(
        long,
        env = "AMLSCOPE_API_URL",
        default_value = "http://localhost:8000/api"
    )]
    api_url: String,

    /// Backend live WebSocket URL.
    #[arg(
        long,
        env = "AMLSCOPE_WS_URL",
        default_value = "ws://localhost:8000/ws/live"
    )]
    ws_url: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the live dashboard session until Ctrl-C.
    Watch,

    /// Fetch the entity graph and print a summary.
    Graph {
        /// Maximum number of transactions the backend derives the graph from.
        #[arg(short, long, default_value_t = 1000)]
        limit: usize,
    },

    /// Resolve a query against the entity graph and focus the match.
    Search {
        /// Case-insensitive substring of an entity id.
        query: String,

        /// Graph fetch limit.
        #[arg(short, long, default_value_t = 1000)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let api = ApiClient::new(cli.api_url);

    let exit_code = match cli.command {
        Commands::Watch => run_watch(api, &cli.ws_url).await,
        Commands::Graph { limit } => run_graph(api, limit).await,
        Commands::Search { query, limit } => run_search(api, &query, limit).await,
    };
    process::exit(exit_code);
}

/// Execute the watch subcommand. Returns exit code: 0 = clean shutdown,
/// 1 = initial load failed.
async fn run_watch(api: ApiClient, ws_url: &str) -> i32 {
    let mut session = DashboardSession::new(api);

    if let Err(err) = session.load_initial().await {
        eprintln!("Error: initial load failed: {}", err);
        return 1;
    }
    print_session_summary(&session);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    tracing::info!(ws_url, "entering live session, Ctrl-C to stop");
    if let Err(err) = stream::supervise(ws_url, &mut session, shutdown_rx).await {
        eprintln!("Error: live session failed: {}", err);
        return 1;
    }

    print_session_summary(&session);
    0
}

/// Execute the graph subcommand. Returns exit code: 0 = success,
/// 1 = fetch failed.
async fn run_graph(api: ApiClient, limit: usize) -> i32 {
    let graph = match fetch_graph(&api, limit).await {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("Error: graph fetch failed: {}", err);
            return 1;
        }
    };

    println!(
        "entities: {}  edges: {}  dropped edges: {}",
        graph.entity_count(),
        graph.edge_count(),
        graph.dropped_edges()
    );
    for entity in graph.entities().filter(|e| e.status.is_elevated()) {
        println!(
            "  {:?} {}  risk {:.0}  degree {}",
            entity.status,
            entity.id,
            entity.risk,
            entity.degree()
        );
    }
    0
}

/// Execute the search subcommand. Returns exit code: 0 = match found,
/// 1 = fetch failed, 2 = no match.
async fn run_search(api: ApiClient, query: &str, limit: usize) -> i32 {
    let graph = match fetch_graph(&api, limit).await {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("Error: graph fetch failed: {}", err);
            return 1;
        }
    };

    let id = match search::resolve(&graph, query) {
        Ok(id) => id,
        Err(err) => {
            eprintln!("{}", err);
            return 2;
        }
    };

    let mut selection = Selection::idle();
    if let Err(err) = selection.select(&graph, &id) {
        eprintln!("Error: {}", err);
        return 2;
    }

    println!("focused: {}", id);
    println!(
        "highlighted entities: {}  highlighted edges: {}",
        selection.highlighted_entities().len(),
        selection.highlighted_edges().len()
    );
    if let Some(neighbors) = graph.neighbors(&id) {
        for neighbor in neighbors {
            println!("  -> {}", neighbor);
        }
    }
    0
}

async fn fetch_graph(api: &ApiClient, limit: usize) -> Result<EntityGraph, ClientError> {
    let payload = api.fetch_graph(limit).await?;
    Ok(EntityGraph::build(payload.nodes, payload.links))
}

fn print_session_summary(session: &DashboardSession) {
    let (entities, edges) = session
        .graph()
        .map(|g| (g.entity_count(), g.edge_count()))
        .unwrap_or((0, 0));
    println!(
        "graph: {} entities / {} edges | live buffer: {} | alerts: {} | {}",
        entities,
        edges,
        session.live_buffer().len(),
        session.alerts().len(),
        if session.is_connected() {
            "ONLINE"
        } else {
            "OFFLINE"
        }
    );
    if let Some(stats) = session.stats() {
        println!(
            "stats: {} transactions, {} alerts, detection rate {:.2}%",
            stats.total_transactions, stats.total_alerts, stats.detection_rate
        );
    }
}
