use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use watchlist_domain::{BlacklistEntry, UNKNOWN_AGENCY_NAME};
use watchlist_store::{
	blobs::{BlobStore, object_path},
	records::RecordStore,
};

use crate::{BLACKLIST_COLLECTION, Error, Result, WatchlistService, codec};

/// One attachment as handed over by the transport layer.
#[derive(Clone, Debug)]
pub struct FileUpload {
	pub file_name: String,
	pub content_type: String,
	pub bytes: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct CreateEntryRequest {
	pub added_by: String,
	pub full_name: String,
	pub passport_number: String,
	pub id_number: String,
	pub address: String,
	pub description: String,
	pub files: Vec<FileUpload>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateEntryResponse {
	pub entry_id: Uuid,
}

impl WatchlistService {
	/// Uploads the attachments, then writes the record once. The two steps
	/// are not transactional: a record-write failure after the uploads
	/// leaves orphaned blobs behind, which is accepted rather than rolled
	/// back. A reader can never observe a locator without its record,
	/// because the record (locators included) is written last.
	pub async fn create_entry(&self, req: CreateEntryRequest) -> Result<CreateEntryResponse> {
		for (label, value) in [
			("full_name", &req.full_name),
			("id_number", &req.id_number),
			("passport_number", &req.passport_number),
		] {
			if value.trim().is_empty() {
				return Err(Error::InvalidRequest { message: format!("{label} is required.") });
			}
		}

		// The caller is identified by account; the owning agency comes from
		// their user record, never from the request.
		let user = self.require_user(&req.added_by).await?;
		let agency_id = user.agency_id.ok_or(Error::UnknownAgency)?;
		let agency_name = self.agency_display_name(agency_id).await?;
		// Generated before any write so upload paths can be namespaced
		// under the entry.
		let entry_id = Uuid::new_v4();
		let document_urls = self.upload_attachments(entry_id, req.files).await?;
		let now = OffsetDateTime::now_utc();
		let entry = BlacklistEntry {
			id: entry_id,
			full_name: req.full_name.trim().to_string(),
			passport_number: req.passport_number.trim().to_string(),
			// Uppercased so the targeted ID range lookup stays consistent.
			id_number: req.id_number.trim().to_uppercase(),
			address: req.address.trim().to_string(),
			description: req.description,
			document_urls,
			agency_id,
			agency_name,
			added_by: req.added_by,
			created_at: now,
			updated_at: now,
		};

		self.stores
			.records
			.put(BLACKLIST_COLLECTION, &entry_id.to_string(), codec::encode(&entry, "id")?)
			.await
			.map_err(|source| Error::WriteFailed { source })?;

		tracing::info!(%entry_id, %agency_id, "Created blacklist entry.");

		Ok(CreateEntryResponse { entry_id })
	}

	/// Fires all uploads at once and awaits them in input order, so the
	/// locator list matches the file list regardless of completion order.
	async fn upload_attachments(
		&self,
		entry_id: Uuid,
		files: Vec<FileUpload>,
	) -> Result<Vec<String>> {
		let mut handles = Vec::with_capacity(files.len());

		for file in files {
			let blobs = Arc::clone(&self.stores.blobs);
			let path = object_path(BLACKLIST_COLLECTION, &entry_id.to_string(), &file.file_name);

			handles.push((
				path.clone(),
				tokio::spawn(
					async move { blobs.put(&path, file.bytes, &file.content_type).await },
				),
			));
		}

		let mut urls = Vec::with_capacity(handles.len());

		for (path, handle) in handles {
			let url = handle
				.await
				.map_err(|err| Error::UploadFailed {
					path: path.clone(),
					source: watchlist_store::Error::Unexpected(format!(
						"Upload task failed: {err}."
					)),
				})?
				.map_err(|source| Error::UploadFailed { path, source })?;

			urls.push(url);
		}

		Ok(urls)
	}

	async fn agency_display_name(&self, agency_id: Uuid) -> Result<String> {
		if let Some(name) = self.agency_names.get(agency_id) {
			return Ok(name);
		}

		let name = self
			.get_agency(agency_id)
			.await?
			.map(|agency| agency.name)
			.unwrap_or_else(|| UNKNOWN_AGENCY_NAME.to_string());

		self.agency_names.insert(agency_id, name.clone());

		Ok(name)
	}
}
