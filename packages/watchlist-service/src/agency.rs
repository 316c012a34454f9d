use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use watchlist_domain::{Agency, AgencyStatus, UserRecord, UserRole};
use watchlist_store::{
	blobs::{BlobStore, object_path},
	document::QuerySpec,
	identity::IdentityProvider,
	records::RecordStore,
};

use crate::{AGENCIES_COLLECTION, Error, Result, USERS_COLLECTION, WatchlistService, codec};

/// Fixed object name for the uploaded registration document; one per
/// agency, addressed by the agency id.
pub const REGISTRATION_DOCUMENT_NAME: &str = "registration-document";

#[derive(Clone, Debug)]
pub struct RegisterAgencyRequest {
	pub name: String,
	pub email: String,
	pub password: String,
	pub phone: Option<String>,
	pub address: Option<String>,
	pub registration_number: Option<String>,
	pub contact_person: Option<String>,
	pub registration_document: Option<crate::FileUpload>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterAgencyResponse {
	pub agency_id: Uuid,
	pub user_id: String,
}

impl WatchlistService {
	/// Signup: credential account first, then the agency record (status
	/// `pending`), then the user record linking account to agency.
	pub async fn register_agency(
		&self,
		req: RegisterAgencyRequest,
	) -> Result<RegisterAgencyResponse> {
		for (label, value) in
			[("name", &req.name), ("email", &req.email), ("password", &req.password)]
		{
			if value.trim().is_empty() {
				return Err(Error::InvalidRequest { message: format!("{label} is required.") });
			}
		}

		let auth = self
			.stores
			.identity
			.sign_up(req.email.trim(), &req.password)
			.await
			.map_err(|source| Error::Identity { source })?;
		let agency_id = Uuid::new_v4();
		let registration_document_url = match req.registration_document {
			Some(file) => {
				let path = object_path(
					AGENCIES_COLLECTION,
					&agency_id.to_string(),
					REGISTRATION_DOCUMENT_NAME,
				);

				match self.stores.blobs.put(&path, file.bytes, &file.content_type).await {
					Ok(url) => Some(url),
					Err(source) => return Err(Error::UploadFailed { path, source }),
				}
			},
			None => None,
		};
		let now = OffsetDateTime::now_utc();
		let agency = Agency {
			id: agency_id,
			name: req.name.trim().to_string(),
			email: auth.email.clone(),
			phone: req.phone,
			address: req.address,
			registration_number: req.registration_number,
			contact_person: req.contact_person,
			registration_document_url,
			status: AgencyStatus::Pending,
			user_id: auth.user_id.clone(),
			created_at: now,
			approved_at: None,
			approved_by: None,
		};

		self.stores
			.records
			.put(AGENCIES_COLLECTION, &agency_id.to_string(), codec::encode(&agency, "id")?)
			.await
			.map_err(|source| Error::WriteFailed { source })?;

		let user = UserRecord {
			user_id: auth.user_id.clone(),
			email: auth.email,
			role: UserRole::Agency,
			agency_id: Some(agency_id),
			created_at: now,
		};

		self.stores
			.records
			.put(USERS_COLLECTION, &auth.user_id, codec::encode(&user, "user_id")?)
			.await?;

		tracing::info!(%agency_id, "Registered agency; approval pending.");

		Ok(RegisterAgencyResponse { agency_id, user_id: auth.user_id })
	}

	pub async fn get_agency(&self, agency_id: Uuid) -> Result<Option<Agency>> {
		let doc = self.stores.records.get(AGENCIES_COLLECTION, &agency_id.to_string()).await?;

		doc.map(codec::agency_from_document).transpose()
	}

	/// The agency owned by one account. At most one exists per user.
	pub async fn get_agency_by_user(&self, user_id: &str) -> Result<Option<Agency>> {
		let docs = self
			.stores
			.records
			.query(AGENCIES_COLLECTION, QuerySpec::field_eq("user_id", user_id))
			.await?;

		docs.into_iter().next().map(codec::agency_from_document).transpose()
	}
}
