use std::sync::Arc;

use uuid::Uuid;

use watchlist_config::{Blobs, Config, Identity, Records, Search, Security, Service, Storage};
use watchlist_domain::AgencyStatus;
use watchlist_service::{
	AgencyNameCache, CreateEntryRequest, RegisterAgencyRequest, SetAgencyStatusRequest, Stores,
	WatchlistService,
};
use watchlist_testkit::{MemoryBlobStore, MemoryIdentityProvider, MemoryRecordStore};

/// Handles onto the in-memory platform, kept alongside the service so tests
/// can inspect and fault-inject the stores directly.
pub struct TestPlatform {
	pub records: Arc<MemoryRecordStore>,
	pub blobs: Arc<MemoryBlobStore>,
	pub identity: Arc<MemoryIdentityProvider>,
}

pub fn test_config(strategy: &str) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage {
			records: Records {
				api_base: "http://records.test".to_string(),
				api_key: "records-key".to_string(),
				timeout_ms: 1_000,
			},
			blobs: Blobs {
				api_base: "http://blobs.test".to_string(),
				api_key: "blobs-key".to_string(),
				bucket: "uploads".to_string(),
				timeout_ms: 1_000,
			},
		},
		identity: Identity {
			api_base: "http://identity.test".to_string(),
			api_key: "identity-key".to_string(),
			timeout_ms: 1_000,
		},
		search: Search { strategy: strategy.to_string() },
		security: Security { bind_localhost_only: true },
	}
}

pub fn build_service(strategy: &str) -> (WatchlistService, TestPlatform) {
	let records = Arc::new(MemoryRecordStore::new());
	let blobs = Arc::new(MemoryBlobStore::new());
	let identity = Arc::new(MemoryIdentityProvider::new());
	let stores = Stores {
		records: records.clone(),
		blobs: blobs.clone(),
		identity: identity.clone(),
	};
	let service = WatchlistService::new(test_config(strategy), stores, AgencyNameCache::new());

	(service, TestPlatform { records, blobs, identity })
}

/// Registers an agency and approves it, returning (agency id, user id).
pub async fn approved_agency(
	service: &WatchlistService,
	name: &str,
	email: &str,
) -> (Uuid, String) {
	let response = service
		.register_agency(RegisterAgencyRequest {
			name: name.to_string(),
			email: email.to_string(),
			password: "secret-1".to_string(),
			phone: None,
			address: None,
			registration_number: None,
			contact_person: None,
			registration_document: None,
		})
		.await
		.expect("Failed to register agency.");

	service
		.set_agency_status(SetAgencyStatusRequest {
			agency_id: response.agency_id,
			status: AgencyStatus::Approved,
			acting_admin_id: "admin-1".to_string(),
		})
		.await
		.expect("Failed to approve agency.");

	(response.agency_id, response.user_id)
}

pub fn entry_request(
	added_by: &str,
	full_name: &str,
	id_number: &str,
	passport_number: &str,
) -> CreateEntryRequest {
	CreateEntryRequest {
		added_by: added_by.to_string(),
		full_name: full_name.to_string(),
		passport_number: passport_number.to_string(),
		id_number: id_number.to_string(),
		address: "12 Main Street".to_string(),
		description: "Absconded mid-contract.".to_string(),
		files: Vec::new(),
	}
}
