use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Display name written into entries whose owning agency record is missing.
pub const UNKNOWN_AGENCY_NAME: &str = "Unknown Agency";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgencyStatus {
	Pending,
	Approved,
	Rejected,
}
impl AgencyStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Rejected => "rejected",
		}
	}
}

/// A registered recruitment agency. Status moves pending->approved or
/// pending->rejected exactly once, through the admin approval operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agency {
	pub id: Uuid,
	pub name: String,
	pub email: String,
	#[serde(default)]
	pub phone: Option<String>,
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub registration_number: Option<String>,
	#[serde(default)]
	pub contact_person: Option<String>,
	#[serde(default)]
	pub registration_document_url: Option<String>,
	pub status: AgencyStatus,
	pub user_id: String,
	#[serde(with = "crate::stamp")]
	pub created_at: OffsetDateTime,
	#[serde(default, with = "crate::stamp::option")]
	pub approved_at: Option<OffsetDateTime>,
	#[serde(default)]
	pub approved_by: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
	Admin,
	Agency,
}

/// Per-account record keyed by the identity provider's user id; holds the
/// agency link so the caller's agency can be resolved without a scan.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
	pub user_id: String,
	pub email: String,
	pub role: UserRole,
	#[serde(default)]
	pub agency_id: Option<Uuid>,
	#[serde(with = "crate::stamp")]
	pub created_at: OffsetDateTime,
}

/// One blacklisted individual. The owning agency id is immutable after
/// creation; full name, ID number, and passport number are the only fields
/// eligible for search matching.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlacklistEntry {
	pub id: Uuid,
	pub full_name: String,
	pub passport_number: String,
	pub id_number: String,
	pub address: String,
	pub description: String,
	#[serde(default)]
	pub document_urls: Vec<String>,
	pub agency_id: Uuid,
	pub agency_name: String,
	pub added_by: String,
	#[serde(with = "crate::stamp")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::stamp")]
	pub updated_at: OffsetDateTime,
}
impl BlacklistEntry {
	/// Case-insensitive substring containment against any of the three
	/// search keys. `needle_lower` must already be lowercased.
	pub fn matches_substring(&self, needle_lower: &str) -> bool {
		self.full_name.to_lowercase().contains(needle_lower)
			|| self.id_number.to_lowercase().contains(needle_lower)
			|| self.passport_number.to_lowercase().contains(needle_lower)
	}

	/// Case-insensitive whole-value comparison against the passport number.
	pub fn passport_equals(&self, needle_lower: &str) -> bool {
		self.passport_number.to_lowercase() == needle_lower
	}
}
