//! Hold scheduler backed by the external durable-timer service.

use std::future::Future;

use heathub_domain::duration::HoldDuration;
use heathub_domain::error::{HeatHubError, NotFoundError};
use heathub_domain::hold::{HoldIntent, HoldState, TurnOffCallback};

use crate::ports::{HoldScheduler, ProfileRepository, TimerClient};

/// Arms holds as delayed executions on the timer service and remembers the
/// outstanding execution id on the user's profile.
///
/// Only one hold is outstanding per user: arming a new one first cancels the
/// previous execution, but only while it is still running, so a fired or
/// already-stopped execution is never touched.
pub struct DurableHoldScheduler<T, R> {
    timer: T,
    repository: R,
}

impl<T, R> DurableHoldScheduler<T, R>
where
    T: TimerClient,
    R: ProfileRepository,
{
    pub fn new(timer: T, repository: R) -> Self {
        Self { timer, repository }
    }

    /// Cancel `execution_id` if the timer service still reports it running.
    /// Failures are logged and swallowed.
    async fn cancel_if_running(&self, execution_id: &str) {
        let record = match self.timer.describe(execution_id).await {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(execution_id, %error, "could not describe execution");
                return;
            }
        };
        if !record.status.is_running() {
            tracing::debug!(execution_id, status = ?record.status, "execution not running, nothing to cancel");
            return;
        }
        if let Err(error) = self.timer.stop(execution_id).await {
            tracing::warn!(execution_id, %error, "could not stop execution");
        }
    }
}

impl<T, R> HoldScheduler for DurableHoldScheduler<T, R>
where
    T: TimerClient,
    R: ProfileRepository + Send + Sync,
{
    #[tracing::instrument(skip(self))]
    fn hold_if_required_for(
        &self,
        user_id: &str,
        duration: Option<HoldDuration>,
    ) -> impl Future<Output = Result<HoldIntent, HeatHubError>> + Send {
        async move {
            let Some(duration) = duration.filter(|duration| !duration.is_zero()) else {
                return Ok(HoldIntent::none());
            };

            let mut profile = self
                .repository
                .find(user_id)
                .await?
                .ok_or_else(|| NotFoundError {
                    entity: "profile",
                    id: user_id.to_string(),
                })?;

            if let Some(previous) = profile.execution_id.as_deref() {
                self.cancel_if_running(previous).await;
            }

            let payload = TurnOffCallback::new(user_id, duration);
            let execution_id = self.timer.start(&payload, duration).await?;
            tracing::info!(user_id, %duration, execution_id, "hold armed");

            profile.execution_id = Some(execution_id.clone());
            self.repository.save(&profile).await?;

            Ok(HoldIntent::armed(duration, execution_id))
        }
    }

    #[tracing::instrument(skip(self))]
    fn stop_hold_if_required(
        &self,
        execution_id: Option<&str>,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        async move {
            if let Some(execution_id) = execution_id {
                self.cancel_if_running(execution_id).await;
            }
            Ok(())
        }
    }

    #[tracing::instrument(skip(self))]
    fn status(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<HoldState, HeatHubError>> + Send {
        async move {
            let Some(profile) = self.repository.find(user_id).await? else {
                return Ok(HoldState::not_applicable());
            };
            let Some(execution_id) = profile.execution_id.as_deref() else {
                return Ok(HoldState::not_applicable());
            };
            match self.timer.describe(execution_id).await {
                Ok(record) => Ok(HoldState {
                    status: record.status,
                    duration: Some(record.payload.armed_duration()),
                    started_at: record.started_at,
                }),
                Err(error) => {
                    tracing::warn!(execution_id, %error, "could not describe execution");
                    Ok(HoldState::not_applicable())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heathub_domain::hold::ExecutionStatus;
    use heathub_domain::profile::Profile;
    use heathub_domain::time::now;

    use crate::ports::ExecutionRecord;
    use crate::test_support::{FakeTimerClient, InMemoryProfileRepository};

    fn profile_with_execution(execution_id: Option<&str>) -> Profile {
        let mut profile = Profile::stub("user-1");
        profile.execution_id = execution_id.map(ToString::to_string);
        profile
    }

    fn record(status: ExecutionStatus) -> ExecutionRecord {
        ExecutionRecord {
            status,
            started_at: Some(now()),
            payload: TurnOffCallback::new("user-1", HoldDuration::from_hours(1)),
        }
    }

    #[tokio::test]
    async fn should_not_contact_timer_without_a_duration() {
        let timer = FakeTimerClient::new("exec-1");
        let repository =
            InMemoryProfileRepository::with_profiles([profile_with_execution(None)]);
        let scheduler = DurableHoldScheduler::new(timer, repository);

        let intent = scheduler.hold_if_required_for("user-1", None).await.unwrap();

        assert_eq!(intent, HoldIntent::none());
        assert_eq!(scheduler.timer.call_count(), 0);
    }

    #[tokio::test]
    async fn should_not_contact_timer_for_a_zero_duration() {
        let timer = FakeTimerClient::new("exec-1");
        let repository =
            InMemoryProfileRepository::with_profiles([profile_with_execution(None)]);
        let scheduler = DurableHoldScheduler::new(timer, repository);

        let intent = scheduler
            .hold_if_required_for("user-1", Some(HoldDuration::from_seconds(0)))
            .await
            .unwrap();

        assert_eq!(intent, HoldIntent::none());
        assert_eq!(scheduler.timer.call_count(), 0);
    }

    #[tokio::test]
    async fn should_arm_hold_and_persist_execution_id() {
        let timer = FakeTimerClient::new("exec-new");
        let repository =
            InMemoryProfileRepository::with_profiles([profile_with_execution(None)]);
        let scheduler = DurableHoldScheduler::new(timer, repository);

        let intent = scheduler
            .hold_if_required_for("user-1", Some(HoldDuration::from_hours(2)))
            .await
            .unwrap();

        assert_eq!(
            intent,
            HoldIntent::armed(HoldDuration::from_hours(2), "exec-new")
        );
        let starts = scheduler.timer.starts.lock().unwrap();
        assert_eq!(starts.len(), 1);
        assert_eq!(starts[0].user_id, "user-1");
        assert_eq!(starts[0].armed_duration(), HoldDuration::from_hours(2));
        let saved = scheduler.repository.get("user-1").unwrap();
        assert_eq!(saved.execution_id.as_deref(), Some("exec-new"));
    }

    #[tokio::test]
    async fn should_cancel_running_predecessor_before_arming() {
        let timer = FakeTimerClient::new("exec-new")
            .with_execution("exec-old", record(ExecutionStatus::Running));
        let repository =
            InMemoryProfileRepository::with_profiles([profile_with_execution(Some("exec-old"))]);
        let scheduler = DurableHoldScheduler::new(timer, repository);

        scheduler
            .hold_if_required_for("user-1", Some(HoldDuration::from_hours(1)))
            .await
            .unwrap();

        assert_eq!(
            scheduler.timer.stops.lock().unwrap().as_slice(),
            &["exec-old".to_string()]
        );
    }

    #[tokio::test]
    async fn should_leave_finished_predecessor_alone() {
        let timer = FakeTimerClient::new("exec-new")
            .with_execution("exec-old", record(ExecutionStatus::Succeeded));
        let repository =
            InMemoryProfileRepository::with_profiles([profile_with_execution(Some("exec-old"))]);
        let scheduler = DurableHoldScheduler::new(timer, repository);

        scheduler
            .hold_if_required_for("user-1", Some(HoldDuration::from_hours(1)))
            .await
            .unwrap();

        assert!(scheduler.timer.stops.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_surface_start_failure_as_scheduler_error() {
        let mut timer = FakeTimerClient::new("exec-new");
        timer.fail_start = true;
        let repository =
            InMemoryProfileRepository::with_profiles([profile_with_execution(None)]);
        let scheduler = DurableHoldScheduler::new(timer, repository);

        let error = scheduler
            .hold_if_required_for("user-1", Some(HoldDuration::from_hours(1)))
            .await
            .unwrap_err();

        assert!(matches!(error, HeatHubError::Scheduler(_)));
        assert!(
            scheduler
                .repository
                .get("user-1")
                .unwrap()
                .execution_id
                .is_none(),
            "no execution id is persisted when arming fails"
        );
    }

    #[tokio::test]
    async fn should_swallow_stop_failures() {
        let mut timer =
            FakeTimerClient::new("exec-new").with_execution("exec-old", record(ExecutionStatus::Running));
        timer.fail_stop = true;
        let repository =
            InMemoryProfileRepository::with_profiles([profile_with_execution(Some("exec-old"))]);
        let scheduler = DurableHoldScheduler::new(timer, repository);

        let result = scheduler.stop_hold_if_required(Some("exec-old")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_do_nothing_when_no_execution_to_stop() {
        let timer = FakeTimerClient::new("exec-new");
        let repository = InMemoryProfileRepository::default();
        let scheduler = DurableHoldScheduler::new(timer, repository);

        scheduler.stop_hold_if_required(None).await.unwrap();
        assert_eq!(scheduler.timer.call_count(), 0);
    }

    #[tokio::test]
    async fn should_report_running_hold_state() {
        let started = now();
        let mut running = record(ExecutionStatus::Running);
        running.started_at = Some(started);
        let timer = FakeTimerClient::new("exec-new").with_execution("exec-old", running);
        let repository =
            InMemoryProfileRepository::with_profiles([profile_with_execution(Some("exec-old"))]);
        let scheduler = DurableHoldScheduler::new(timer, repository);

        let state = scheduler.status("user-1").await.unwrap();

        assert_eq!(state.status, ExecutionStatus::Running);
        assert_eq!(state.duration, Some(HoldDuration::from_hours(1)));
        assert_eq!(state.started_at, Some(started));
    }

    #[tokio::test]
    async fn should_degrade_status_when_describe_fails() {
        let mut timer = FakeTimerClient::new("exec-new");
        timer.fail_describe = true;
        let repository =
            InMemoryProfileRepository::with_profiles([profile_with_execution(Some("exec-old"))]);
        let scheduler = DurableHoldScheduler::new(timer, repository);

        let state = scheduler.status("user-1").await.unwrap();
        assert_eq!(state, HoldState::not_applicable());
    }

    #[tokio::test]
    async fn should_report_not_applicable_without_an_execution() {
        let timer = FakeTimerClient::new("exec-new");
        let repository =
            InMemoryProfileRepository::with_profiles([profile_with_execution(None)]);
        let scheduler = DurableHoldScheduler::new(timer, repository);

        let state = scheduler.status("user-1").await.unwrap();
        assert_eq!(state, HoldState::not_applicable());
    }
}
