use std::{env, fs, path::PathBuf, time::{SystemTime, UNIX_EPOCH}};

use toml::Value;

use watchlist_config::Error;

const SAMPLE_CONFIG_TOML: &str = r#"
[service]
http_bind = "127.0.0.1:8080"
admin_bind = "127.0.0.1:8081"
log_level = "info"

[storage.records]
api_base = "https://records.example.test/"
api_key = "records-key"
timeout_ms = 5000

[storage.blobs]
api_base = "https://blobs.example.test"
api_key = "blobs-key"
bucket = "watchlist-uploads"
timeout_ms = 10000

[identity]
api_base = "https://identity.example.test"
api_key = "identity-key"
timeout_ms = 5000

[search]
strategy = "targeted"

[security]
bind_localhost_only = true
"#;

fn sample_with<F>(mutate: F) -> String
where
	F: FnOnce(&mut toml::Table),
{
	let mut value: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let root = value.as_table_mut().expect("Sample config must be a table.");

	mutate(root);

	toml::to_string(&value).expect("Failed to render sample config.")
}

fn write_temp_config(contents: &str) -> PathBuf {
	let nanos =
		SystemTime::now().duration_since(UNIX_EPOCH).expect("Clock before epoch.").as_nanos();
	let path = env::temp_dir().join(format!("watchlist_config_{nanos}.toml"));

	fs::write(&path, contents).expect("Failed to write temp config.");

	path
}

fn load(contents: &str) -> watchlist_config::Result<watchlist_config::Config> {
	let path = write_temp_config(contents);
	let result = watchlist_config::load(&path);

	let _ = fs::remove_file(&path);

	result
}

#[test]
fn accepts_sample_config_and_strips_trailing_slash() {
	let cfg = load(SAMPLE_CONFIG_TOML).expect("Sample config must load.");

	assert_eq!(cfg.storage.records.api_base, "https://records.example.test");
	assert_eq!(cfg.search.strategy, "targeted");
}

#[test]
fn defaults_search_strategy_to_targeted() {
	let contents = sample_with(|root| {
		root.remove("search");
		root.insert("search".to_string(), Value::Table(toml::Table::new()));
	});
	let cfg = load(&contents).expect("Config without a strategy must load.");

	assert_eq!(cfg.search.strategy, "targeted");
}

#[test]
fn rejects_unknown_search_strategy() {
	let contents = sample_with(|root| {
		let search = root.get_mut("search").and_then(Value::as_table_mut).expect("[search]");

		search.insert("strategy".to_string(), Value::String("fuzzy".to_string()));
	});

	match load(&contents) {
		Err(Error::Validation { message }) => assert!(message.contains("search.strategy")),
		other => panic!("Expected a validation error, got {other:?}."),
	}
}

#[test]
fn rejects_zero_timeout() {
	let contents = sample_with(|root| {
		let records = root
			.get_mut("storage")
			.and_then(Value::as_table_mut)
			.and_then(|storage| storage.get_mut("records"))
			.and_then(Value::as_table_mut)
			.expect("[storage.records]");

		records.insert("timeout_ms".to_string(), Value::Integer(0));
	});

	match load(&contents) {
		Err(Error::Validation { message }) => assert!(message.contains("timeout_ms")),
		other => panic!("Expected a validation error, got {other:?}."),
	}
}

#[test]
fn rejects_empty_bucket() {
	let contents = sample_with(|root| {
		let blobs = root
			.get_mut("storage")
			.and_then(Value::as_table_mut)
			.and_then(|storage| storage.get_mut("blobs"))
			.and_then(Value::as_table_mut)
			.expect("[storage.blobs]");

		blobs.insert("bucket".to_string(), Value::String("  ".to_string()));
	});

	match load(&contents) {
		Err(Error::Validation { message }) => assert!(message.contains("bucket")),
		other => panic!("Expected a validation error, got {other:?}."),
	}
}
