use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use watchlist_domain::{Agency, AgencyStatus};
use watchlist_store::{document::QuerySpec, records::RecordStore};

use crate::{AGENCIES_COLLECTION, Error, Result, WatchlistService, codec};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PendingAgenciesResponse {
	pub items: Vec<Agency>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetAgencyStatusRequest {
	pub agency_id: Uuid,
	pub status: AgencyStatus,
	pub acting_admin_id: String,
}

impl WatchlistService {
	/// Agencies awaiting a decision, newest first.
	pub async fn list_pending_agencies(&self) -> Result<PendingAgenciesResponse> {
		let spec = QuerySpec::field_eq("status", "pending").order_desc("created_at");
		let docs = self.stores.records.query(AGENCIES_COLLECTION, spec).await?;
		let items = docs.into_iter().map(codec::agency_from_document).collect::<Result<_>>()?;

		Ok(PendingAgenciesResponse { items })
	}

	/// One-way transition out of `pending`, recording who decided and when.
	/// There is no undo path; re-deciding an already-decided agency fails.
	pub async fn set_agency_status(&self, req: SetAgencyStatusRequest) -> Result<()> {
		if req.status == AgencyStatus::Pending {
			return Err(Error::InvalidRequest {
				message: "Target status must be approved or rejected.".to_string(),
			});
		}
		if req.acting_admin_id.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "acting_admin_id is required.".to_string(),
			});
		}

		let agency = self
			.get_agency(req.agency_id)
			.await?
			.ok_or_else(|| Error::InvalidRequest { message: "Agency not found.".to_string() })?;

		if agency.status != AgencyStatus::Pending {
			return Err(Error::NotPending { status: agency.status });
		}

		let now = OffsetDateTime::now_utc();
		let fields = serde_json::json!({
			"status": req.status.as_str(),
			"approved_by": req.acting_admin_id,
			"approved_at": codec::format_timestamp(now)?,
		});

		self.stores.records.update(AGENCIES_COLLECTION, &req.agency_id.to_string(), fields).await?;

		tracing::info!(
			agency_id = %req.agency_id,
			status = req.status.as_str(),
			"Decided agency registration.",
		);

		Ok(())
	}
}
