#![warn(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use actix_web::{App, HttpServer, middleware::Logger, web};
use clap::Parser;
use tracing::info;

use demo_server::monitoring::MonitorService;
use demo_server::{AppError, AppState, Config, routes};

/// Demo CRUD service with URL monitors
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML config file, created with defaults if missing
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overrides config and BIND
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on, overrides config and PORT
    #[arg(short, long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logger::init_tracing(config.log.level_filter(), config.log.log_format());
    info!("{config}");

    let monitors = MonitorService::from_settings(&config.monitor)?;
    let state = web::Data::new(AppState::new(monitors).with_static_dir(config.server.static_dir.clone()));

    let result = run_server(&config, state.clone()).await;
    state.monitors.shutdown();
    result
}

async fn run_server(config: &Config, state: web::Data<AppState>) -> Result<(), AppError> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(routes::cors())
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::serve_static))
    })
    .bind((config.server.bind.as_str(), config.server.port))?;

    info!("Listening on http://{}:{}", config.server.bind, config.server.port);
    server.run().await?;

    Ok(())
}
