use std::{collections::HashMap, sync::Mutex};

use uuid::Uuid;

/// Agency id to display name, shared for the life of the service. Entries
/// are never invalidated: agency names do not change after registration, so
/// a stale value cannot occur in practice. Concurrent first-time lookups of
/// the same agency may both fetch; last write wins with an identical value.
#[derive(Debug, Default)]
pub struct AgencyNameCache {
	inner: Mutex<HashMap<Uuid, String>>,
}
impl AgencyNameCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, agency_id: Uuid) -> Option<String> {
		self.inner.lock().unwrap_or_else(|err| err.into_inner()).get(&agency_id).cloned()
	}

	pub fn insert(&self, agency_id: Uuid, name: String) {
		self.inner.lock().unwrap_or_else(|err| err.into_inner()).insert(agency_id, name);
	}
}
