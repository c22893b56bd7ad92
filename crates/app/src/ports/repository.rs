//! Profile repository port — persistence for per-user profiles.

use std::future::Future;

use heathub_domain::error::HeatHubError;
use heathub_domain::profile::Profile;

/// Repository for persisting and resolving [`Profile`]s.
pub trait ProfileRepository {
    /// Resolve a profile by id.
    ///
    /// The literal `"template"` and ids carrying the deployment's direct-id
    /// namespace prefix resolve by primary key. Anything else is treated as a
    /// linked external identity and resolved through the secondary
    /// `linked_user_id` index, which must match **exactly one** record —
    /// zero or ambiguous matches yield `None`.
    fn find(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Profile>, HeatHubError>> + Send;

    /// Persist a newly provisioned profile.
    fn add(&self, profile: &Profile) -> impl Future<Output = Result<(), HeatHubError>> + Send;

    /// Persist the first field of `profile` that differs from the stored
    /// record, checked in fixed priority order: execution id, default
    /// duration, default on temperature, default off temperature, default
    /// water duration. Only that single field is written; callers changing
    /// two fields must save twice.
    fn save(&self, profile: &Profile) -> impl Future<Output = Result<(), HeatHubError>> + Send;
}
