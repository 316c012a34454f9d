mod common;

use common::{approved_agency, build_service, entry_request};
use serde_json::json;
use uuid::Uuid;
use watchlist_service::{Error, FileUpload};
use watchlist_store::records::RecordStore;

fn file(name: &str, bytes: &[u8]) -> FileUpload {
	FileUpload {
		file_name: name.to_string(),
		content_type: "application/pdf".to_string(),
		bytes: bytes.to_vec(),
	}
}

#[tokio::test]
async fn locator_list_keeps_input_order_despite_completion_order() {
	let (service, platform) = build_service("targeted");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;

	// Earlier uploads are delayed longer, so the first file completes last.
	platform.blobs.stagger_completions();

	let mut request = entry_request(&user_id, "John Doe", "199012345678V", "N1234567");

	request.files = vec![file("passport.pdf", b"passport"), file("contract.pdf", b"contract")];

	let created = service.create_entry(request).await.expect("Failed to create entry.");
	let entry = service
		.get_entry(created.entry_id)
		.await
		.expect("Lookup failed.")
		.expect("Entry must exist.");

	assert_eq!(
		entry.document_urls,
		vec![
			format!("https://blobs.test/blacklist/{}/passport.pdf", created.entry_id),
			format!("https://blobs.test/blacklist/{}/contract.pdf", created.entry_id),
		],
	);
	assert_eq!(platform.blobs.object_count(), 2);

	let stored = platform
		.blobs
		.object(&format!("blacklist/{}/contract.pdf", created.entry_id))
		.expect("Object must exist.");

	assert_eq!(stored.bytes, b"contract");
}

#[tokio::test]
async fn id_numbers_are_uppercased_on_entry() {
	let (service, _platform) = build_service("targeted");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;
	let created = service
		.create_entry(entry_request(&user_id, "John Doe", "199012345678v", "N1234567"))
		.await
		.expect("Failed to create entry.");
	let entry = service
		.get_entry(created.entry_id)
		.await
		.expect("Lookup failed.")
		.expect("Entry must exist.");

	assert_eq!(entry.id_number, "199012345678V");
	assert_eq!(entry.created_at, entry.updated_at);
}

#[tokio::test]
async fn delete_then_get_is_absent_not_an_error() {
	let (service, _platform) = build_service("targeted");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;
	let created = service
		.create_entry(entry_request(&user_id, "John Doe", "199012345678V", "N1234567"))
		.await
		.expect("Failed to create entry.");

	service.delete_entry(created.entry_id).await.expect("Delete failed.");

	assert!(service.get_entry(created.entry_id).await.expect("Lookup failed.").is_none());

	// Deleting an id that never existed is a no-op as well.
	service.delete_entry(Uuid::new_v4()).await.expect("Delete of absent entry failed.");
}

#[tokio::test]
async fn delete_does_not_cascade_to_blobs() {
	let (service, platform) = build_service("targeted");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;
	let mut request = entry_request(&user_id, "John Doe", "199012345678V", "N1234567");

	request.files = vec![file("passport.pdf", b"passport")];

	let created = service.create_entry(request).await.expect("Failed to create entry.");

	service.delete_entry(created.entry_id).await.expect("Delete failed.");

	// The orphaned attachment stays behind; cleanup is manual.
	assert_eq!(platform.blobs.object_count(), 1);
}

#[tokio::test]
async fn upload_failure_aborts_before_the_record_write() {
	let (service, platform) = build_service("targeted");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;

	platform.blobs.fail_puts(true);

	let mut request = entry_request(&user_id, "John Doe", "199012345678V", "N1234567");

	request.files = vec![file("passport.pdf", b"passport")];

	match service.create_entry(request).await {
		Err(Error::UploadFailed { .. }) => {},
		other => panic!("Expected UploadFailed, got {other:?}."),
	}

	assert_eq!(platform.records.document_count("blacklist"), 0);
}

#[tokio::test]
async fn write_failure_after_uploads_leaves_orphaned_blobs() {
	let (service, platform) = build_service("targeted");
	let (_, user_id) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;
	let mut request = entry_request(&user_id, "John Doe", "199012345678V", "N1234567");

	request.files = vec![file("passport.pdf", b"passport")];

	platform.records.fail_writes(true);

	match service.create_entry(request).await {
		Err(Error::WriteFailed { .. }) => {},
		other => panic!("Expected WriteFailed, got {other:?}."),
	}

	// The upload already happened and is not rolled back.
	assert_eq!(platform.blobs.object_count(), 1);
	assert_eq!(platform.records.document_count("blacklist"), 0);
}

#[tokio::test]
async fn list_by_agency_returns_only_that_agency_newest_first() {
	let (service, _platform) = build_service("targeted");
	let (agency_a, user_a) = approved_agency(&service, "Acme Recruitment", "acme@example.test").await;
	let (_, user_b) = approved_agency(&service, "Beta Placements", "beta@example.test").await;

	let first = service
		.create_entry(entry_request(&user_a, "Doe One", "199012345678V", "N1111111"))
		.await
		.expect("Failed to create entry.");
	let second = service
		.create_entry(entry_request(&user_a, "Doe Two", "199112345678V", "N2222222"))
		.await
		.expect("Failed to create entry.");
	let third = service
		.create_entry(entry_request(&user_a, "Doe Three", "199212345678V", "N3333333"))
		.await
		.expect("Failed to create entry.");

	service
		.create_entry(entry_request(&user_b, "Other Agency Entry", "200012345678", "N4444444"))
		.await
		.expect("Failed to create entry.");

	let response = service.list_by_agency(agency_a).await.expect("List failed.");
	let ids: Vec<_> = response.items.iter().map(|item| item.id).collect();

	assert_eq!(ids, vec![third.entry_id, second.entry_id, first.entry_id]);
	assert!(response.items.iter().all(|item| item.agency_id == agency_a));
}

#[tokio::test]
async fn agency_name_is_cached_after_the_first_lookup() {
	let (service, platform) = build_service("targeted");
	let (agency_id, user_id) =
		approved_agency(&service, "Acme Recruitment", "acme@example.test").await;

	let first = service
		.create_entry(entry_request(&user_id, "Doe One", "199012345678V", "N1111111"))
		.await
		.expect("Failed to create entry.");

	// Remove the agency record; the cached name must keep serving.
	platform
		.records
		.delete("agencies", &agency_id.to_string())
		.await
		.expect("Delete failed.");

	let second = service
		.create_entry(entry_request(&user_id, "Doe Two", "199112345678V", "N2222222"))
		.await
		.expect("Failed to create entry.");

	for created in [first, second] {
		let entry = service
			.get_entry(created.entry_id)
			.await
			.expect("Lookup failed.")
			.expect("Entry must exist.");

		assert_eq!(entry.agency_name, "Acme Recruitment");
	}
}

#[tokio::test]
async fn missing_agency_record_falls_back_to_placeholder_name() {
	let (service, platform) = build_service("targeted");
	let dangling_agency = Uuid::new_v4();

	platform
		.records
		.put(
			"users",
			"user-x",
			json!({
				"email": "ghost@example.test",
				"role": "agency",
				"agency_id": dangling_agency,
				"created_at": "2024-01-01T00:00:00Z",
			}),
		)
		.await
		.expect("Seed failed.");

	let created = service
		.create_entry(entry_request("user-x", "John Doe", "199012345678V", "N1234567"))
		.await
		.expect("Failed to create entry.");
	let entry = service
		.get_entry(created.entry_id)
		.await
		.expect("Lookup failed.")
		.expect("Entry must exist.");

	assert_eq!(entry.agency_name, "Unknown Agency");
}

#[tokio::test]
async fn accounts_without_an_agency_cannot_create_entries() {
	let (service, platform) = build_service("targeted");

	platform
		.records
		.put(
			"users",
			"user-y",
			json!({
				"email": "admin@example.test",
				"role": "admin",
				"created_at": "2024-01-01T00:00:00Z",
			}),
		)
		.await
		.expect("Seed failed.");

	match service.create_entry(entry_request("user-y", "John Doe", "199012345678V", "N1234567")).await
	{
		Err(Error::UnknownAgency) => {},
		other => panic!("Expected UnknownAgency, got {other:?}."),
	}
}
