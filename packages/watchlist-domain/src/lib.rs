pub mod query;
pub mod stamp;

mod types;

pub use types::{
	Agency, AgencyStatus, BlacklistEntry, UNKNOWN_AGENCY_NAME, UserRecord, UserRole,
};
