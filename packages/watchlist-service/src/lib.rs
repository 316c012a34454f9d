pub mod account;
pub mod admin;
pub mod agency;
pub mod cache;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod search;

mod codec;

use std::sync::Arc;

pub use account::{ChangeEmailRequest, ChangePasswordRequest, ChangePhoneRequest};
pub use admin::{PendingAgenciesResponse, SetAgencyStatusRequest};
pub use agency::{REGISTRATION_DOCUMENT_NAME, RegisterAgencyRequest, RegisterAgencyResponse};
pub use cache::AgencyNameCache;
pub use create::{CreateEntryRequest, CreateEntryResponse, FileUpload};
pub use list::ListResponse;
pub use search::{SearchRequest, SearchResponse, SearchStrategy};

use watchlist_config::Config;
use watchlist_domain::AgencyStatus;
use watchlist_store::{blobs::BlobStore, identity::IdentityProvider, records::RecordStore};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub const AGENCIES_COLLECTION: &str = "agencies";
pub const BLACKLIST_COLLECTION: &str = "blacklist";
pub const USERS_COLLECTION: &str = "users";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{message}")]
	InvalidQuery { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Search failed.")]
	SearchFailed { source: watchlist_store::Error },
	#[error("Upload failed for {path}.")]
	UploadFailed { path: String, source: watchlist_store::Error },
	#[error("Record write failed after uploads completed.")]
	WriteFailed { source: watchlist_store::Error },
	#[error("Storage error.")]
	Storage {
		#[from]
		source: watchlist_store::Error,
	},
	#[error("Identity provider rejected the request.")]
	Identity { source: watchlist_store::Error },
	#[error("Malformed record {collection}/{id}.")]
	Malformed { collection: &'static str, id: String },
	#[error("Agency status is {status:?}; only pending agencies can be decided.")]
	NotPending { status: AgencyStatus },
	#[error("No agency is registered for this user.")]
	UnknownAgency,
}

/// The external platform, as trait objects so tests can run against the
/// in-memory testkit implementations.
#[derive(Clone)]
pub struct Stores {
	pub records: Arc<dyn RecordStore>,
	pub blobs: Arc<dyn BlobStore>,
	pub identity: Arc<dyn IdentityProvider>,
}

pub struct WatchlistService {
	pub cfg: Config,
	pub stores: Stores,
	agency_names: AgencyNameCache,
}
impl WatchlistService {
	/// The cache is injected rather than created here so callers control
	/// its lifetime and tests can start from a known state.
	pub fn new(cfg: Config, stores: Stores, agency_names: AgencyNameCache) -> Self {
		Self { cfg, stores, agency_names }
	}
}
