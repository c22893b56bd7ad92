//! `SQLite` implementation of [`ProfileRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use heathub_app::ports::ProfileRepository;
use heathub_domain::duration::HoldDuration;
use heathub_domain::error::{HeatHubError, NotFoundError};
use heathub_domain::profile::{Profile, TEMPLATE_USER_ID};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Profile`].
struct Wrapper(Profile);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Profile> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let device_options: String = row.try_get("device_options")?;
        let default_duration: String = row.try_get("default_duration")?;
        let default_water_duration: String = row.try_get("default_water_duration")?;

        let device_options = serde_json::from_str(&device_options)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let default_duration = HoldDuration::from_str(&default_duration)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let default_water_duration = HoldDuration::from_str(&default_water_duration)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Profile {
            user_id: row.try_get("user_id")?,
            linked_user_id: row.try_get("linked_user_id")?,
            device_type: row.try_get("device_type")?,
            device_options,
            default_on_temp: row.try_get("default_on_temp")?,
            default_off_temp: row.try_get("default_off_temp")?,
            default_duration,
            default_water_duration,
            execution_id: row.try_get("execution_id")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO profiles (user_id, linked_user_id, device_type, device_options, default_on_temp, default_off_temp, default_duration, default_water_duration, execution_id) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM profiles WHERE user_id = ?";
const SELECT_BY_LINKED_ID: &str = "SELECT * FROM profiles WHERE linked_user_id = ?";

/// `SQLite`-backed profile repository.
///
/// `find` treats an id as a primary key only when it is the template id or
/// carries the configured direct-id prefix; anything else is assumed to come
/// from a linked external identity and goes through the `linked_user_id`
/// index, where exactly one match is required.
#[derive(Clone)]
pub struct SqliteProfileRepository {
    pool: SqlitePool,
    direct_id_prefix: String,
}

impl SqliteProfileRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool, direct_id_prefix: impl Into<String>) -> Self {
        Self {
            pool,
            direct_id_prefix: direct_id_prefix.into(),
        }
    }

    fn is_direct_id(&self, id: &str) -> bool {
        id == TEMPLATE_USER_ID || id.starts_with(&self.direct_id_prefix)
    }

    async fn find_profile(&self, id: &str) -> Result<Option<Profile>, HeatHubError> {
        if self.is_direct_id(id) {
            tracing::debug!(id, "searching profile by user id");
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::from)?;
            return Ok(Wrapper::maybe(row));
        }

        tracing::debug!(id, "searching profile by linked user id");
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_LINKED_ID)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        if rows.len() == 1 {
            let mut rows = rows;
            return Ok(rows.pop().map(|w| w.0));
        }
        tracing::debug!(id, matches = rows.len(), "no unambiguous linked profile");
        Ok(None)
    }

    // Exact-value change detection against the stored row.
    #[allow(clippy::float_cmp)]
    async fn save_profile(&self, profile: &Profile) -> Result<(), HeatHubError> {
        let stored = self
            .find_profile(&profile.user_id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "profile",
                id: profile.user_id.clone(),
            })?;

        // Persist the single highest-priority field that changed; multi-field
        // updates take one save per field. No change still rewrites the
        // execution id.
        let query = if stored.execution_id != profile.execution_id {
            sqlx::query("UPDATE profiles SET execution_id = ? WHERE user_id = ?")
                .bind(profile.execution_id.as_deref())
        } else if stored.default_duration != profile.default_duration {
            sqlx::query("UPDATE profiles SET default_duration = ? WHERE user_id = ?")
                .bind(profile.default_duration.to_string())
        } else if stored.default_on_temp != profile.default_on_temp {
            sqlx::query("UPDATE profiles SET default_on_temp = ? WHERE user_id = ?")
                .bind(profile.default_on_temp)
        } else if stored.default_off_temp != profile.default_off_temp {
            sqlx::query("UPDATE profiles SET default_off_temp = ? WHERE user_id = ?")
                .bind(profile.default_off_temp)
        } else if stored.default_water_duration != profile.default_water_duration {
            sqlx::query("UPDATE profiles SET default_water_duration = ? WHERE user_id = ?")
                .bind(profile.default_water_duration.to_string())
        } else {
            sqlx::query("UPDATE profiles SET execution_id = ? WHERE user_id = ?")
                .bind(profile.execution_id.as_deref())
        };

        query
            .bind(&profile.user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

impl ProfileRepository for SqliteProfileRepository {
    fn find(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Profile>, HeatHubError>> + Send {
        self.find_profile(id)
    }

    fn add(&self, profile: &Profile) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        async move {
            let options =
                serde_json::to_string(&profile.device_options).map_err(StorageError::from)?;
            sqlx::query(INSERT)
                .bind(&profile.user_id)
                .bind(profile.linked_user_id.as_deref())
                .bind(&profile.device_type)
                .bind(options)
                .bind(profile.default_on_temp)
                .bind(profile.default_off_temp)
                .bind(profile.default_duration.to_string())
                .bind(profile.default_water_duration.to_string())
                .bind(profile.execution_id.as_deref())
                .execute(&self.pool)
                .await
                .map_err(StorageError::from)?;
            Ok(())
        }
    }

    fn save(&self, profile: &Profile) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        self.save_profile(profile)
    }
}
