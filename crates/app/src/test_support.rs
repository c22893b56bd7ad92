//! In-memory fakes for the port traits, shared by unit tests.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

use heathub_domain::command::TemperatureCommand;
use heathub_domain::device::{Card, CardImage, DeviceStatus, Snapshot};
use heathub_domain::duration::HoldDuration;
use heathub_domain::error::HeatHubError;
use heathub_domain::hold::{HoldIntent, HoldState, TurnOffCallback};
use heathub_domain::profile::Profile;

use crate::ports::{
    CommandPublisher, DriverFactory, ExecutionRecord, HoldScheduler, ProfileRepository,
    ThermostatDriver, TimerClient,
};

/// Minimal error for making fakes fail on demand.
#[derive(Debug)]
pub struct FakeError(pub &'static str);

impl fmt::Display for FakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for FakeError {}

/// Profile store backed by a hash map. Performs primary-key lookups only —
/// linked-id resolution is exercised in the storage adapter's own tests.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    store: Mutex<HashMap<String, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let repo = Self::default();
        {
            let mut store = repo.store.lock().unwrap();
            for profile in profiles {
                store.insert(profile.user_id.clone(), profile);
            }
        }
        repo
    }

    pub fn get(&self, user_id: &str) -> Option<Profile> {
        self.store.lock().unwrap().get(user_id).cloned()
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn find(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Profile>, HeatHubError>> + Send {
        let result = self.store.lock().unwrap().get(id).cloned();
        async { Ok(result) }
    }

    fn add(&self, profile: &Profile) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(profile.user_id.clone(), profile.clone());
        async { Ok(()) }
    }

    fn save(&self, profile: &Profile) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(profile.user_id.clone(), profile.clone());
        async { Ok(()) }
    }
}

/// Call log shared between a [`FakeFactory`] and the drivers it hands out.
#[derive(Debug, Default)]
pub struct DriverLog {
    pub created_types: Mutex<Vec<String>>,
    pub set_calls: Mutex<Vec<f64>>,
    pub water_calls: Mutex<Vec<u64>>,
    pub logins: Mutex<u32>,
    pub logouts: Mutex<u32>,
}

impl DriverLog {
    pub fn set_call_count(&self) -> usize {
        self.set_calls.lock().unwrap().len()
    }
}

/// Scriptable driver double in the spirit of a bench-test controller.
pub struct FakeDriver {
    online: bool,
    should_defer: bool,
    snapshot: Arc<Mutex<Snapshot>>,
    log: Arc<DriverLog>,
}

impl ThermostatDriver for FakeDriver {
    fn login(&mut self) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        *self.log.logins.lock().unwrap() += 1;
        async { Ok(()) }
    }

    fn logout(&mut self) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        *self.log.logouts.lock().unwrap() += 1;
        async { Ok(()) }
    }

    fn online(&self) -> impl Future<Output = Result<bool, HeatHubError>> + Send {
        let online = self.online;
        async move { Ok(online) }
    }

    fn device(&self) -> impl Future<Output = Result<Snapshot, HeatHubError>> + Send {
        let snapshot = *self.snapshot.lock().unwrap();
        async move { Ok(snapshot) }
    }

    fn set_temperature(
        &self,
        target: f64,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        self.log.set_calls.lock().unwrap().push(target);
        let mut snapshot = self.snapshot.lock().unwrap();
        snapshot.target_temperature = target;
        snapshot.status = if target > snapshot.current_temperature {
            DeviceStatus::On
        } else {
            DeviceStatus::Off
        };
        async { Ok(()) }
    }

    fn turn_water_on_for(
        &self,
        hours: u64,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        self.log.water_calls.lock().unwrap().push(hours);
        async { Ok(()) }
    }

    fn friendly_name(&self) -> &str {
        "Fake Thermostat"
    }

    fn manufacturer_name(&self) -> &str {
        "Acme Ltd"
    }

    fn description(&self) -> &str {
        "Fake thermostat used for testing"
    }

    fn card(&self) -> Card {
        Card {
            title: "Fake Thermostat".to_string(),
            image: CardImage {
                small_image_url: "http://smallimage.url".to_string(),
                large_image_url: "http://largeimage.url".to_string(),
            },
        }
    }

    fn should_defer(&self) -> bool {
        self.should_defer
    }
}

/// Factory handing out [`FakeDriver`]s that share one snapshot and call log.
pub struct FakeFactory {
    pub online: bool,
    pub should_defer: bool,
    pub snapshot: Arc<Mutex<Snapshot>>,
    pub log: Arc<DriverLog>,
}

impl FakeFactory {
    /// Online device reading 19°C with a 15°C setpoint (off).
    pub fn idle() -> Self {
        Self {
            online: true,
            should_defer: false,
            snapshot: Arc::new(Mutex::new(Snapshot {
                contactable: true,
                current_temperature: 19.0,
                target_temperature: 15.0,
                status: DeviceStatus::Off,
            })),
            log: Arc::new(DriverLog::default()),
        }
    }

    /// Online device currently calling for heat.
    pub fn heating() -> Self {
        let factory = Self::idle();
        {
            let mut snapshot = factory.snapshot.lock().unwrap();
            snapshot.target_temperature = 21.0;
            snapshot.status = DeviceStatus::On;
        }
        factory
    }

    pub fn offline() -> Self {
        Self {
            online: false,
            ..Self::idle()
        }
    }

    pub fn uncontactable() -> Self {
        let factory = Self::idle();
        factory.snapshot.lock().unwrap().contactable = false;
        factory
    }

    pub fn current_snapshot(&self) -> Snapshot {
        *self.snapshot.lock().unwrap()
    }
}

impl DriverFactory for FakeFactory {
    type Driver = FakeDriver;

    fn create(
        &self,
        device_type: &str,
        _options: &serde_json::Value,
    ) -> Result<Self::Driver, HeatHubError> {
        self.log
            .created_types
            .lock()
            .unwrap()
            .push(device_type.to_string());
        Ok(FakeDriver {
            online: self.online,
            should_defer: self.should_defer,
            snapshot: Arc::clone(&self.snapshot),
            log: Arc::clone(&self.log),
        })
    }
}

/// Timer-service double with a scriptable execution table.
#[derive(Default)]
pub struct FakeTimerClient {
    pub records: Mutex<HashMap<String, ExecutionRecord>>,
    pub starts: Mutex<Vec<TurnOffCallback>>,
    pub stops: Mutex<Vec<String>>,
    pub describes: Mutex<Vec<String>>,
    pub fail_start: bool,
    pub fail_describe: bool,
    pub fail_stop: bool,
    pub next_execution_id: String,
}

impl FakeTimerClient {
    pub fn new(next_execution_id: impl Into<String>) -> Self {
        Self {
            next_execution_id: next_execution_id.into(),
            ..Self::default()
        }
    }

    pub fn with_execution(self, execution_id: impl Into<String>, record: ExecutionRecord) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(execution_id.into(), record);
        self
    }

    pub fn call_count(&self) -> usize {
        self.starts.lock().unwrap().len()
            + self.stops.lock().unwrap().len()
            + self.describes.lock().unwrap().len()
    }
}

impl TimerClient for FakeTimerClient {
    fn start(
        &self,
        payload: &TurnOffCallback,
        _delay: HoldDuration,
    ) -> impl Future<Output = Result<String, HeatHubError>> + Send {
        let result = if self.fail_start {
            Err(HeatHubError::scheduler(FakeError("start failed")))
        } else {
            self.starts.lock().unwrap().push(payload.clone());
            Ok(self.next_execution_id.clone())
        };
        async { result }
    }

    fn describe(
        &self,
        execution_id: &str,
    ) -> impl Future<Output = Result<ExecutionRecord, HeatHubError>> + Send {
        let result = if self.fail_describe {
            Err(HeatHubError::scheduler(FakeError("describe failed")))
        } else {
            self.describes
                .lock()
                .unwrap()
                .push(execution_id.to_string());
            self.records
                .lock()
                .unwrap()
                .get(execution_id)
                .cloned()
                .ok_or_else(|| HeatHubError::scheduler(FakeError("no such execution")))
        };
        async { result }
    }

    fn stop(
        &self,
        execution_id: &str,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        let result = if self.fail_stop {
            Err(HeatHubError::scheduler(FakeError("stop failed")))
        } else {
            self.stops.lock().unwrap().push(execution_id.to_string());
            Ok(())
        };
        async { result }
    }
}

/// Hold-scheduler double recording every arm/cancel request.
pub struct FakeHoldScheduler {
    /// When false, behaves like the no-op variant and never holds.
    pub supports_holding: bool,
    pub state: Mutex<HoldState>,
    pub holds: Mutex<Vec<(String, Option<HoldDuration>)>>,
    pub stops: Mutex<Vec<Option<String>>>,
}

impl Default for FakeHoldScheduler {
    fn default() -> Self {
        Self {
            supports_holding: true,
            state: Mutex::new(HoldState::not_applicable()),
            holds: Mutex::new(Vec::new()),
            stops: Mutex::new(Vec::new()),
        }
    }
}

impl FakeHoldScheduler {
    pub fn unsupported() -> Self {
        Self {
            supports_holding: false,
            ..Self::default()
        }
    }

    pub fn with_state(state: HoldState) -> Self {
        Self {
            state: Mutex::new(state),
            ..Self::default()
        }
    }

    pub fn hold_count(&self) -> usize {
        self.holds.lock().unwrap().len()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.lock().unwrap().len()
    }
}

impl HoldScheduler for FakeHoldScheduler {
    fn hold_if_required_for(
        &self,
        user_id: &str,
        duration: Option<HoldDuration>,
    ) -> impl Future<Output = Result<HoldIntent, HeatHubError>> + Send {
        self.holds
            .lock()
            .unwrap()
            .push((user_id.to_string(), duration));
        let intent = match duration.filter(|d| !d.is_zero()) {
            Some(duration) if self.supports_holding => HoldIntent::armed(duration, "exec-fake"),
            _ => HoldIntent::none(),
        };
        async { Ok(intent) }
    }

    fn stop_hold_if_required(
        &self,
        execution_id: Option<&str>,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        self.stops
            .lock()
            .unwrap()
            .push(execution_id.map(ToString::to_string));
        async { Ok(()) }
    }

    fn status(
        &self,
        _user_id: &str,
    ) -> impl Future<Output = Result<HoldState, HeatHubError>> + Send {
        let state = self.state.lock().unwrap().clone();
        async { Ok(state) }
    }
}

/// Publisher double capturing every republished command.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<(String, TemperatureCommand)>>,
}

impl RecordingPublisher {
    pub fn publish_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

impl CommandPublisher for RecordingPublisher {
    fn publish(
        &self,
        topic: &str,
        command: &TemperatureCommand,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), command.clone()));
        async { Ok(()) }
    }
}
