//! Request handlers — thin translation between HTTP and the services.

use axum::Json;
use axum::extract::{Path, State};

use heathub_app::dispatch::{DeferredSetTemperature, ImmediateSetTemperature};
use heathub_app::ports::{DriverFactory, HoldScheduler, ProfileRepository};
use heathub_app::response::ServiceResponse;
use heathub_app::services::defaults_service::DefaultSetting;
use heathub_app::services::thermostat_service::ThermostatDetails;
use heathub_domain::command::{CommandContext, OnOff, TemperatureCommand};
use heathub_domain::duration::HoldDuration;
use heathub_domain::hold::TurnOffCallback;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Body for commands that only need to identify the caller.
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub user_id: String,
}

/// Body for an explicit setpoint write.
#[derive(Debug, Deserialize)]
pub struct TemperatureRequest {
    pub user_id: String,
    pub target_temperature: f64,
    pub duration: Option<HoldDuration>,
    pub mode: OnOff,
    /// Whether a slow write may be handed to the command bus.
    #[serde(default)]
    pub defer: bool,
}

/// Body for turning the heating on or off at the profile defaults.
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub user_id: String,
    pub mode: OnOff,
    pub duration: Option<HoldDuration>,
}

/// Body for boosting the hot water.
#[derive(Debug, Deserialize)]
pub struct WaterRequest {
    pub user_id: String,
    pub duration: Option<HoldDuration>,
}

/// Which default field to update, e.g. `{"name": "on_temp", "value": 21.5}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case", tag = "name", content = "value")]
pub enum DefaultSettingBody {
    OnTemp(f64),
    OffTemp(f64),
    Duration(HoldDuration),
    WaterDuration(HoldDuration),
}

impl From<DefaultSettingBody> for DefaultSetting {
    fn from(body: DefaultSettingBody) -> Self {
        match body {
            DefaultSettingBody::OnTemp(value) => Self::OnTemp(value),
            DefaultSettingBody::OffTemp(value) => Self::OffTemp(value),
            DefaultSettingBody::Duration(value) => Self::Duration(value),
            DefaultSettingBody::WaterDuration(value) => Self::WaterDuration(value),
        }
    }
}

/// Body for updating one default field.
#[derive(Debug, Deserialize)]
pub struct DefaultRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub setting: DefaultSettingBody,
}

pub async fn launch<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Json(body): Json<CommandRequest>,
) -> Result<Json<ServiceResponse>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    let ctx = CommandContext::user(body.user_id);
    Ok(Json(state.thermostat().launch(&ctx).await?))
}

pub async fn status<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Path(user_id): Path<String>,
) -> Result<Json<ServiceResponse>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    let ctx = CommandContext::user(user_id);
    Ok(Json(state.thermostat().status(&ctx).await?))
}

pub async fn set_temperature<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Json(body): Json<TemperatureRequest>,
) -> Result<Json<ServiceResponse>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    let command = TemperatureCommand {
        context: CommandContext::user(body.user_id),
        target_temperature: body.target_temperature,
        duration: body.duration,
        mode: body.mode,
        defer: body.defer,
    };
    let strategy = DeferredSetTemperature::new(state.command_bus(), &command);
    let response = state
        .thermostat()
        .set_temperature(
            &command.context,
            &strategy,
            command.target_temperature,
            command.duration,
            command.mode,
        )
        .await?;
    Ok(Json(response))
}

pub async fn turn<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Json(body): Json<TurnRequest>,
) -> Result<Json<ServiceResponse>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    let ctx = CommandContext::user(body.user_id);
    let response = state
        .thermostat()
        .turn(&ctx, &ImmediateSetTemperature, body.mode, body.duration)
        .await?;
    Ok(Json(response))
}

pub async fn turn_up<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Json(body): Json<CommandRequest>,
) -> Result<Json<ServiceResponse>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    let ctx = CommandContext::user(body.user_id);
    Ok(Json(
        state
            .thermostat()
            .turn_up(&ctx, &ImmediateSetTemperature)
            .await?,
    ))
}

pub async fn turn_down<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Json(body): Json<CommandRequest>,
) -> Result<Json<ServiceResponse>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    let ctx = CommandContext::user(body.user_id);
    Ok(Json(
        state
            .thermostat()
            .turn_down(&ctx, &ImmediateSetTemperature)
            .await?,
    ))
}

pub async fn thermostat_details<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Path(user_id): Path<String>,
) -> Result<Json<ThermostatDetails>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    let ctx = CommandContext::user(user_id);
    Ok(Json(state.thermostat().thermostat_details(&ctx).await?))
}

pub async fn set_default<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Json(body): Json<DefaultRequest>,
) -> Result<Json<ServiceResponse>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    let ctx = CommandContext::user(body.user_id);
    Ok(Json(
        state.defaults().set_default(&ctx, body.setting.into()).await?,
    ))
}

pub async fn defaults<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Path(user_id): Path<String>,
) -> Result<Json<ServiceResponse>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    let ctx = CommandContext::user(user_id);
    Ok(Json(state.defaults().defaults(&ctx).await?))
}

pub async fn turn_water_on<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Json(body): Json<WaterRequest>,
) -> Result<Json<ServiceResponse>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    let ctx = CommandContext::user(body.user_id);
    Ok(Json(state.water().turn_water_on(&ctx, body.duration).await?))
}

pub async fn turn_water_off<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Json(body): Json<CommandRequest>,
) -> Result<Json<ServiceResponse>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    let ctx = CommandContext::user(body.user_id);
    Ok(Json(state.water().turn_water_off(&ctx).await?))
}

/// The durable-timer service posting back an armed hold's payload.
///
/// Routed as a turn-off with [`Source::Callback`] provenance, so the
/// services never re-arm a hold from here.
///
/// [`Source::Callback`]: heathub_domain::command::Source::Callback
pub async fn turn_off_callback<F, R, H>(
    State(state): State<AppState<F, R, H>>,
    Json(callback): Json<TurnOffCallback>,
) -> Result<Json<ServiceResponse>, ApiError>
where
    F: DriverFactory + 'static,
    R: ProfileRepository + Send + Sync + 'static,
    H: HoldScheduler + 'static,
{
    tracing::info!(user_id = %callback.user_id, "turn-off callback received");
    let ctx = callback.context();
    let response = state
        .thermostat()
        .turn(&ctx, &ImmediateSetTemperature, OnOff::Off, None)
        .await?;
    Ok(Json(response))
}
