use std::sync::Arc;

use kuraweb::config::{AppState, Config};
use kuraweb::logger;
use kuraweb::server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Secrets such as the CMS API key may live in a local .env.local file
    if dotenvy::from_filename(".env.local").is_ok() {
        println!("[CONFIG] Loaded environment from .env.local");
    }

    let cfg = Config::load_from("config")?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        println!("[CONFIG] Using {workers} worker threads");
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;
    let state = Arc::new(AppState::new(cfg)?);

    logger::log_server_start(&addr, &state.config);

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local.run_until(server::run(listener, state)).await
}
