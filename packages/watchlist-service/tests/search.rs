mod common;

use common::{approved_agency, build_service, entry_request};
use watchlist_service::{Error, SearchRequest};

fn search_req(query: &str) -> SearchRequest {
	SearchRequest { query: query.to_string() }
}

#[tokio::test]
async fn finds_one_entry_by_name_id_and_passport() {
	// The same entry must be reachable through each of the three keys,
	// under both strategies.
	for strategy in ["targeted", "full-scan"] {
		let (service, _platform) = build_service(strategy);
		let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;
		let created = service
			.create_entry(entry_request(&user_id, "John Doe", "199012345678V", "N1234567"))
			.await
			.expect("Failed to create entry.");

		for query in ["john", "199012345678V", "N1234567"] {
			let response = service.search(search_req(query)).await.expect("Search failed.");

			assert_eq!(response.items.len(), 1, "query {query:?} under {strategy}");
			assert_eq!(response.items[0].id, created.entry_id);
		}
	}
}

#[tokio::test]
async fn rejects_empty_and_short_queries() {
	let (service, _platform) = build_service("targeted");

	for query in ["", "   ", "ab"] {
		match service.search(search_req(query)).await {
			Err(Error::InvalidQuery { .. }) => {},
			other => panic!("Expected InvalidQuery for {query:?}, got {other:?}."),
		}
	}

	// Shape-matching input shorter than three characters cannot occur; the
	// boundary only applies to name-like queries.
	assert!(service.search(search_req("abc")).await.is_ok());
}

#[tokio::test]
async fn id_range_lookup_returns_only_prefix_matches() {
	let (service, _platform) = build_service("targeted");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;

	let hit = service
		.create_entry(entry_request(&user_id, "John Doe", "199012345678V", "N1111111"))
		.await
		.expect("Failed to create entry.");

	service
		.create_entry(entry_request(&user_id, "Jane Roe", "199099999999", "N2222222"))
		.await
		.expect("Failed to create entry.");

	let response = service.search(search_req("199012345678")).await.expect("Search failed.");

	assert_eq!(response.items.len(), 1);
	assert_eq!(response.items[0].id, hit.entry_id);
}

#[tokio::test]
async fn id_lookup_tolerates_lowercase_check_letter() {
	// IDs are uppercased on entry; the range bounds are uppercased to
	// match.
	let (service, _platform) = build_service("targeted");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;

	service
		.create_entry(entry_request(&user_id, "John Doe", "199012345678v", "N1111111"))
		.await
		.expect("Failed to create entry.");

	let response = service.search(search_req("199012345678v")).await.expect("Search failed.");

	assert_eq!(response.items.len(), 1);
	assert_eq!(response.items[0].id_number, "199012345678V");
}

#[tokio::test]
async fn targeted_passport_lookup_requires_the_whole_number() {
	let (service, _platform) = build_service("targeted");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;

	service
		.create_entry(entry_request(&user_id, "John Doe", "199012345678V", "N1234567"))
		.await
		.expect("Failed to create entry.");

	let full = service.search(search_req("n1234567")).await.expect("Search failed.");

	assert_eq!(full.items.len(), 1);

	// Passport-shaped but truncated: the targeted strategy checks equality,
	// not containment.
	let partial = service.search(search_req("N123456")).await.expect("Search failed.");

	assert!(partial.items.is_empty());
}

#[tokio::test]
async fn full_scan_matches_partial_passport_as_substring() {
	let (service, _platform) = build_service("full-scan");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;

	service
		.create_entry(entry_request(&user_id, "John Doe", "199012345678V", "N1234567"))
		.await
		.expect("Failed to create entry.");

	let response = service.search(search_req("N123456")).await.expect("Search failed.");

	assert_eq!(response.items.len(), 1);
}

#[tokio::test]
async fn overlapping_field_matches_deduplicate() {
	let (service, _platform) = build_service("full-scan");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;

	// Query hits both the full name and the passport number of one entry.
	service
		.create_entry(entry_request(&user_id, "Holder of N1234567", "199012345678V", "N1234567"))
		.await
		.expect("Failed to create entry.");

	let response = service.search(search_req("N1234567")).await.expect("Search failed.");

	assert_eq!(response.items.len(), 1);
}

#[tokio::test]
async fn results_come_back_newest_first() {
	let (service, _platform) = build_service("full-scan");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;
	let first = service
		.create_entry(entry_request(&user_id, "Doe One", "199012345678V", "N1111111"))
		.await
		.expect("Failed to create entry.");
	let second = service
		.create_entry(entry_request(&user_id, "Doe Two", "199112345678V", "N2222222"))
		.await
		.expect("Failed to create entry.");
	let third = service
		.create_entry(entry_request(&user_id, "Doe Three", "199212345678V", "N3333333"))
		.await
		.expect("Failed to create entry.");

	let response = service.search(search_req("doe")).await.expect("Search failed.");
	let ids: Vec<_> = response.items.iter().map(|item| item.id).collect();

	assert_eq!(ids, vec![third.entry_id, second.entry_id, first.entry_id]);
}

#[tokio::test]
async fn store_failures_surface_as_search_failed() {
	for strategy in ["targeted", "full-scan"] {
		let (service, platform) = build_service(strategy);
		let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;

		service
			.create_entry(entry_request(&user_id, "John Doe", "199012345678V", "N1234567"))
			.await
			.expect("Failed to create entry.");

		platform.records.fail_queries(true);

		match service.search(search_req("john")).await {
			Err(Error::SearchFailed { .. }) => {},
			other => panic!("Expected SearchFailed under {strategy}, got {other:?}."),
		}
	}
}
