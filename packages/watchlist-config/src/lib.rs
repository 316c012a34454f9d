mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Blobs, Config, Identity, Records, Search, Security, Service, Storage};

use std::{fs, path::Path};

pub const SEARCH_STRATEGIES: [&str; 2] = ["targeted", "full-scan"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if !SEARCH_STRATEGIES.contains(&cfg.search.strategy.as_str()) {
		return Err(Error::Validation {
			message: "search.strategy must be one of targeted or full-scan.".to_string(),
		});
	}
	if cfg.storage.blobs.bucket.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.blobs.bucket must be non-empty.".to_string(),
		});
	}

	for (label, api_base, api_key, timeout_ms) in [
		(
			"storage.records",
			&cfg.storage.records.api_base,
			&cfg.storage.records.api_key,
			cfg.storage.records.timeout_ms,
		),
		(
			"storage.blobs",
			&cfg.storage.blobs.api_base,
			&cfg.storage.blobs.api_key,
			cfg.storage.blobs.timeout_ms,
		),
		("identity", &cfg.identity.api_base, &cfg.identity.api_key, cfg.identity.timeout_ms),
	] {
		if api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("{label}.api_base must be non-empty."),
			});
		}
		if api_key.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label}.api_key must be non-empty.") });
		}
		if timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("{label}.timeout_ms must be greater than zero."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for api_base in [
		&mut cfg.storage.records.api_base,
		&mut cfg.storage.blobs.api_base,
		&mut cfg.identity.api_base,
	] {
		while api_base.ends_with('/') {
			api_base.pop();
		}
	}
}
