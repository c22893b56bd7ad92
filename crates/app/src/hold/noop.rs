//! Hold scheduler for deployments without a timer service.

use std::future::Future;

use heathub_domain::duration::HoldDuration;
use heathub_domain::error::HeatHubError;
use heathub_domain::hold::{HoldIntent, HoldState};

use crate::ports::HoldScheduler;

/// Never arms anything. The orchestration services read the unarmed
/// [`HoldIntent`] back and tell the user that hold times are unsupported.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHoldScheduler;

impl HoldScheduler for NoopHoldScheduler {
    fn hold_if_required_for(
        &self,
        _user_id: &str,
        _duration: Option<HoldDuration>,
    ) -> impl Future<Output = Result<HoldIntent, HeatHubError>> + Send {
        async { Ok(HoldIntent::none()) }
    }

    fn stop_hold_if_required(
        &self,
        _execution_id: Option<&str>,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        async { Ok(()) }
    }

    fn status(
        &self,
        _user_id: &str,
    ) -> impl Future<Output = Result<HoldState, HeatHubError>> + Send {
        async { Ok(HoldState::not_applicable()) }
    }
}
