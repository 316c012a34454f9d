//! Credential-adjacent flows. Every change re-verifies the current password
//! with the identity provider first, then keeps the record store in sync
//! with what the provider holds.

use serde::{Deserialize, Serialize};
use serde_json::json;

use watchlist_domain::UserRecord;
use watchlist_store::{identity::IdentityProvider, records::RecordStore};

use crate::{AGENCIES_COLLECTION, Error, Result, USERS_COLLECTION, WatchlistService, codec};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChangeEmailRequest {
	pub user_id: String,
	pub new_email: String,
	pub current_password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
	pub user_id: String,
	pub current_password: String,
	pub new_password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChangePhoneRequest {
	pub user_id: String,
	pub new_phone: String,
	pub current_password: String,
}

impl WatchlistService {
	/// Updates the credential email, the user record, and the public agency
	/// contact when the account owns one.
	pub async fn change_email(&self, req: ChangeEmailRequest) -> Result<()> {
		let new_email = req.new_email.trim();

		if new_email.is_empty() {
			return Err(Error::InvalidRequest { message: "new_email is required.".to_string() });
		}

		let user = self.require_user(&req.user_id).await?;

		self.reauth(&user.email, &req.current_password).await?;
		self.stores
			.identity
			.update_email(&req.user_id, new_email)
			.await
			.map_err(|source| Error::Identity { source })?;
		self.stores
			.records
			.update(USERS_COLLECTION, &req.user_id, json!({ "email": new_email }))
			.await?;

		if let Some(agency_id) = user.agency_id {
			self.stores
				.records
				.update(AGENCIES_COLLECTION, &agency_id.to_string(), json!({ "email": new_email }))
				.await?;
		}

		Ok(())
	}

	pub async fn change_password(&self, req: ChangePasswordRequest) -> Result<()> {
		let user = self.require_user(&req.user_id).await?;

		self.reauth(&user.email, &req.current_password).await?;
		self.stores
			.identity
			.update_password(&req.user_id, &req.new_password)
			.await
			.map_err(|source| Error::Identity { source })
	}

	/// Phone lives only on the agency record; accounts without an agency
	/// have nothing to update.
	pub async fn change_phone(&self, req: ChangePhoneRequest) -> Result<()> {
		let user = self.require_user(&req.user_id).await?;

		self.reauth(&user.email, &req.current_password).await?;

		if let Some(agency_id) = user.agency_id {
			self.stores
				.records
				.update(
					AGENCIES_COLLECTION,
					&agency_id.to_string(),
					json!({ "phone": req.new_phone }),
				)
				.await?;
		}

		Ok(())
	}

	pub async fn forgot_password(&self, email: &str) -> Result<()> {
		self.stores
			.identity
			.send_reset_code(email)
			.await
			.map_err(|source| Error::Identity { source })
	}

	/// Returns the email the code was issued for.
	pub async fn verify_reset_code(&self, code: &str) -> Result<String> {
		self.stores
			.identity
			.verify_reset_code(code)
			.await
			.map_err(|source| Error::Identity { source })
	}

	pub async fn reset_password(&self, code: &str, new_password: &str) -> Result<()> {
		self.stores
			.identity
			.consume_reset_code(code, new_password)
			.await
			.map_err(|source| Error::Identity { source })
	}

	pub(crate) async fn require_user(&self, user_id: &str) -> Result<UserRecord> {
		let doc = self.stores.records.get(USERS_COLLECTION, user_id).await?;

		doc.map(codec::user_from_document)
			.transpose()?
			.ok_or_else(|| Error::InvalidRequest { message: "User not found.".to_string() })
	}

	async fn reauth(&self, email: &str, current_password: &str) -> Result<()> {
		self.stores
			.identity
			.reauthenticate(email, current_password)
			.await
			.map_err(|source| Error::Identity { source })
	}
}
