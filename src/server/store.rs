use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};

use crate::config::CredentialsConfig;
use crate::errors::{ProbeError, ProbeResult};

type Records = HashMap<(String, String), DateTime<Utc>>;

/// One row of the license table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseRecord {
    pub client_id: String,
    pub license_key: String,
    pub valid_until: DateTime<Utc>,
}

/// In-memory license table.
///
/// Key: `(client_id, license_key)`
/// Value: the instant the subscription stops being valid.
#[derive(Debug, Default)]
pub struct LicenseStore {
    records: RwLock<Records>,
}

impl LicenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the configured valid credential pair, valid for one year.
    pub fn seeded(credentials: &CredentialsConfig) -> ProbeResult<Self> {
        let store = Self::new();
        store.insert(
            &credentials.valid_client_id,
            &credentials.valid_license_key,
            Utc::now() + Duration::days(365),
        )?;
        Ok(store)
    }

    fn read(&self) -> ProbeResult<RwLockReadGuard<'_, Records>> {
        self.records
            .read()
            .map_err(|_| ProbeError::ServerError("failed to acquire license store lock".into()))
    }

    fn write(&self) -> ProbeResult<RwLockWriteGuard<'_, Records>> {
        self.records
            .write()
            .map_err(|_| ProbeError::ServerError("failed to acquire license store lock".into()))
    }

    /// Insert or replace the record for a client/key pair.
    pub fn insert(
        &self,
        client_id: &str,
        license_key: &str,
        valid_until: DateTime<Utc>,
    ) -> ProbeResult<()> {
        self.write()?
            .insert((client_id.to_string(), license_key.to_string()), valid_until);
        Ok(())
    }

    /// Add a new record.
    ///
    /// Fails with `InvalidInput` on an empty client id or key, and with
    /// `AlreadyExists` if the pair is already present.
    pub fn create(
        &self,
        client_id: &str,
        license_key: &str,
        valid_until: DateTime<Utc>,
    ) -> ProbeResult<LicenseRecord> {
        if client_id.is_empty() || license_key.is_empty() {
            return Err(ProbeError::InvalidInput(
                "client_id and license_key are required".to_string(),
            ));
        }

        let mut records = self.write()?;
        let key = (client_id.to_string(), license_key.to_string());
        if records.contains_key(&key) {
            return Err(ProbeError::AlreadyExists(format!(
                "license for client_id={client_id} with this key"
            )));
        }
        records.insert(key, valid_until);

        Ok(LicenseRecord {
            client_id: client_id.to_string(),
            license_key: license_key.to_string(),
            valid_until,
        })
    }

    /// All records, latest `valid_until` first.
    pub fn list(&self) -> ProbeResult<Vec<LicenseRecord>> {
        let mut list: Vec<LicenseRecord> = self
            .read()?
            .iter()
            .map(|((client_id, license_key), valid_until)| LicenseRecord {
                client_id: client_id.clone(),
                license_key: license_key.clone(),
                valid_until: *valid_until,
            })
            .collect();

        list.sort_by(|a, b| b.valid_until.cmp(&a.valid_until));
        Ok(list)
    }

    /// Set `valid_until` on every record of `client_id`. Returns how many changed.
    pub fn update_validity(&self, client_id: &str, valid_until: DateTime<Utc>) -> ProbeResult<usize> {
        let mut records = self.write()?;

        let mut updated = 0;
        for ((owner, _), until) in records.iter_mut() {
            if owner == client_id {
                *until = valid_until;
                updated += 1;
            }
        }
        Ok(updated)
    }

    /// Look up `valid_until` for an exact client/key match.
    pub fn valid_until(
        &self,
        client_id: &str,
        license_key: &str,
    ) -> ProbeResult<Option<DateTime<Utc>>> {
        Ok(self
            .read()?
            .get(&(client_id.to_string(), license_key.to_string()))
            .copied())
    }
}
