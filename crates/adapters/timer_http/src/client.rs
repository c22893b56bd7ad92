//! REST client for the durable-timer service.
//!
//! The service stores an opaque callback payload with each timer and posts
//! it back to us when the delay elapses; `describe` returns the stored
//! payload so the armed duration can be recovered without local state.

use std::future::Future;

use serde::{Deserialize, Serialize};

use heathub_app::ports::{ExecutionRecord, TimerClient};
use heathub_domain::duration::HoldDuration;
use heathub_domain::error::HeatHubError;
use heathub_domain::hold::{ExecutionStatus, TurnOffCallback};
use heathub_domain::time::Timestamp;

use crate::error::TimerError;

#[derive(Debug, Serialize)]
struct StartRequest<'a> {
    delay_seconds: u64,
    callback_payload: &'a TurnOffCallback,
}

#[derive(Debug, Deserialize)]
struct StartResponse {
    timer_id: String,
}

#[derive(Debug, Deserialize)]
struct DescribeResponse {
    status: ExecutionStatus,
    started_at: Option<Timestamp>,
    callback_payload: TurnOffCallback,
}

/// Timer-service client over its REST API.
pub struct HttpTimerClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTimerClient {
    /// Build a client against the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TimerError> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url: base_url.into(),
        })
    }
}

impl TimerClient for HttpTimerClient {
    fn start(
        &self,
        payload: &TurnOffCallback,
        delay: HoldDuration,
    ) -> impl Future<Output = Result<String, HeatHubError>> + Send {
        async move {
            tracing::debug!(user_id = %payload.user_id, %delay, "starting timer");
            let response: StartResponse = self
                .http
                .post(format!("{}/v1/timers", self.base_url))
                .json(&StartRequest {
                    delay_seconds: delay.in_seconds(),
                    callback_payload: payload,
                })
                .send()
                .await
                .map_err(TimerError::from)?
                .error_for_status()
                .map_err(TimerError::from)?
                .json()
                .await
                .map_err(TimerError::from)?;
            Ok(response.timer_id)
        }
    }

    fn describe(
        &self,
        execution_id: &str,
    ) -> impl Future<Output = Result<ExecutionRecord, HeatHubError>> + Send {
        async move {
            let response: DescribeResponse = self
                .http
                .get(format!("{}/v1/timers/{execution_id}", self.base_url))
                .send()
                .await
                .map_err(TimerError::from)?
                .error_for_status()
                .map_err(TimerError::from)?
                .json()
                .await
                .map_err(TimerError::from)?;
            Ok(ExecutionRecord {
                status: response.status,
                started_at: response.started_at,
                payload: response.callback_payload,
            })
        }
    }

    fn stop(
        &self,
        execution_id: &str,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        async move {
            tracing::debug!(execution_id, "stopping timer");
            self.http
                .post(format!("{}/v1/timers/{execution_id}/stop", self.base_url))
                .send()
                .await
                .map_err(TimerError::from)?
                .error_for_status()
                .map_err(TimerError::from)?;
            Ok(())
        }
    }
}
