use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub identity: Identity,
	pub search: Search,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub records: Records,
	pub blobs: Blobs,
}

/// The hosted document database. Its query surface is equality and single
/// lexicographic range filters plus single-field ordering; nothing more.
#[derive(Debug, Deserialize)]
pub struct Records {
	pub api_base: String,
	pub api_key: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Blobs {
	pub api_base: String,
	pub api_key: String,
	pub bucket: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Identity {
	pub api_base: String,
	pub api_key: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Either `targeted` (range lookup for ID-shaped queries, scan-and-filter
	/// otherwise) or `full-scan` (one unconditional fetch-and-filter for
	/// every query shape).
	#[serde(default = "default_search_strategy")]
	pub strategy: String,
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}

fn default_search_strategy() -> String {
	"targeted".to_string()
}
