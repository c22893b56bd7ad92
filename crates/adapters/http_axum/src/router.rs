//! Route table for the REST API.

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use heathub_app::ports::{DriverFactory, HoldScheduler, ProfileRepository};

use crate::handlers;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build<F, R, H>(state: AppState<F, R, H>) -> Router
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/launch", post(handlers::launch::<F, R, H>))
        .route("/api/status/{user_id}", get(handlers::status::<F, R, H>))
        .route(
            "/api/temperature",
            post(handlers::set_temperature::<F, R, H>),
        )
        .route("/api/turn", post(handlers::turn::<F, R, H>))
        .route("/api/turn-up", post(handlers::turn_up::<F, R, H>))
        .route("/api/turn-down", post(handlers::turn_down::<F, R, H>))
        .route(
            "/api/thermostat/{user_id}",
            get(handlers::thermostat_details::<F, R, H>),
        )
        .route("/api/defaults", put(handlers::set_default::<F, R, H>))
        .route("/api/defaults/{user_id}", get(handlers::defaults::<F, R, H>))
        .route("/api/water/on", post(handlers::turn_water_on::<F, R, H>))
        .route("/api/water/off", post(handlers::turn_water_off::<F, R, H>))
        .route(
            "/api/callbacks/turn-off",
            post(handlers::turn_off_callback::<F, R, H>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
