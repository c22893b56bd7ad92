//! # heathubd — heathub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`heathub.toml` + environment overrides)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the profile repository, driver factory, and hold scheduler
//! - Construct application services, injecting adapters via port traits
//! - Spawn the reprocessing task that drains deferred setpoint writes
//! - Build the axum router, bind to a TCP port, and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use tokio::sync::broadcast;

use heathub_adapter_http_axum::state::AppState;
use heathub_adapter_storage_sqlite_sqlx::{Config as DatabaseConfig, SqliteProfileRepository};
use heathub_adapter_thermostats::ThermostatFactory;
use heathub_adapter_timer_http::HttpTimerClient;
use heathub_app::command_bus::InProcessCommandBus;
use heathub_app::dispatch::ImmediateSetTemperature;
use heathub_app::hold::{DurableHoldScheduler, NoopHoldScheduler};
use heathub_app::ports::HoldScheduler;
use heathub_app::services::{DefaultsService, ServiceCore, ThermostatService, WaterService};

use crate::config::Config;

type Repository = SqliteProfileRepository;
type State<H> = AppState<ThermostatFactory, Repository, H>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let repository =
        SqliteProfileRepository::new(db.pool().clone(), &config.storage.direct_id_prefix);
    let factory = ThermostatFactory;

    match config.timer.base_url.as_deref() {
        Some(base_url) => {
            let timer = HttpTimerClient::new(base_url)?;
            let scheduler = DurableHoldScheduler::new(timer, repository.clone());
            serve(&config, build_state(factory, repository, scheduler)).await
        }
        None => {
            tracing::info!("no timer service configured, timed holds disabled");
            serve(&config, build_state(factory, repository, NoopHoldScheduler)).await
        }
    }
}

fn build_state<H>(factory: ThermostatFactory, repository: Repository, scheduler: H) -> State<H>
where
    H: HoldScheduler + 'static,
{
    let thermostat = ThermostatService::new(
        ServiceCore::new(factory, repository.clone()),
        scheduler,
    );
    let defaults = DefaultsService::new(ServiceCore::new(factory, repository.clone()));
    let water = WaterService::new(ServiceCore::new(factory, repository));
    AppState::new(thermostat, defaults, water, InProcessCommandBus::new(64))
}

async fn serve<H>(config: &Config, state: State<H>) -> Result<(), Box<dyn std::error::Error>>
where
    H: HoldScheduler + 'static,
{
    spawn_reprocessing(state.clone());
    let app = heathub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "heathubd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Drain the command bus, completing setpoint writes that were deferred out
/// of the interactive request path. Republished commands carry a cleared
/// defer flag, so these always write for real.
fn spawn_reprocessing<H>(state: State<H>)
where
    H: HoldScheduler + 'static,
{
    let mut receiver = state.command_bus().subscribe();
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(published) => {
                    let command = published.command;
                    tracing::info!(
                        topic = %published.topic,
                        user_id = %command.context.user_id,
                        "reprocessing deferred command",
                    );
                    let result = state
                        .thermostat()
                        .set_temperature(
                            &command.context,
                            &ImmediateSetTemperature,
                            command.target_temperature,
                            command.duration,
                            command.mode,
                        )
                        .await;
                    if let Err(error) = result {
                        tracing::error!(%error, "deferred command failed");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "reprocessing task lagged behind the command bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}
