use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod routing;
mod server;

use routing::RouteTable;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load_from("config")?;

    logger::init(&cfg)?;

    // Build the Tokio runtime, worker thread count from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    // The route table is resolved once here and never changes afterwards
    let routes = RouteTable::from_config(&cfg.routes)?;

    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg, routes.len());
    logger::log_routes(&routes.paths());

    let state = Arc::new(config::AppState::new(cfg, routes));
    let active_connections = Arc::new(AtomicUsize::new(0));

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(
            listener,
            state,
            active_connections,
            Arc::clone(&signals.shutdown),
        ))
        .await
}
