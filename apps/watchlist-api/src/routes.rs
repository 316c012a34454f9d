use axum::{
	Json, Router,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use watchlist_domain::{AgencyStatus, BlacklistEntry};
use watchlist_service::{
	ChangeEmailRequest, ChangePasswordRequest, ChangePhoneRequest, CreateEntryRequest,
	CreateEntryResponse, Error as ServiceError, FileUpload, ListResponse, PendingAgenciesResponse,
	RegisterAgencyRequest, RegisterAgencyResponse, SearchRequest, SearchResponse,
	SetAgencyStatusRequest,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/entries/search", post(search))
		.route("/v1/entries", post(create_entry))
		.route("/v1/entries/{id}", get(get_entry).delete(delete_entry))
		.route("/v1/agencies", post(register_agency))
		.route("/v1/agencies/{id}/entries", get(agency_entries))
		.route("/v1/account/email", post(change_email))
		.route("/v1/account/password", post(change_password))
		.route("/v1/account/phone", post(change_phone))
		.route("/v1/account/forgot_password", post(forgot_password))
		.route("/v1/account/reset_codes/{code}", get(verify_reset_code))
		.route("/v1/account/reset_password", post(reset_password))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/agencies/pending", get(pending_agencies))
		.route("/v1/admin/agencies/{id}/status", post(decide_agency))
		.route("/v1/admin/entries", get(all_entries))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

/// File payloads arrive base64-encoded in JSON; decoded before they reach
/// the service.
#[derive(Debug, Deserialize)]
struct ApiFile {
	file_name: String,
	content_type: String,
	data: String,
}

fn decode_file(file: ApiFile) -> Result<FileUpload, ApiError> {
	let bytes = BASE64.decode(file.data.as_bytes()).map_err(|_| {
		json_error(
			StatusCode::BAD_REQUEST,
			"invalid_file",
			format!("File {} is not valid base64.", file.file_name),
		)
	})?;

	Ok(FileUpload { file_name: file.file_name, content_type: file.content_type, bytes })
}

#[derive(Debug, Deserialize)]
struct CreateEntryBody {
	added_by: String,
	full_name: String,
	passport_number: String,
	id_number: String,
	address: String,
	description: String,
	#[serde(default)]
	files: Vec<ApiFile>,
}

async fn create_entry(
	State(state): State<AppState>,
	Json(body): Json<CreateEntryBody>,
) -> Result<Json<CreateEntryResponse>, ApiError> {
	let files = body.files.into_iter().map(decode_file).collect::<Result<Vec<_>, _>>()?;
	let response = state
		.service
		.create_entry(CreateEntryRequest {
			added_by: body.added_by,
			full_name: body.full_name,
			passport_number: body.passport_number,
			id_number: body.id_number,
			address: body.address,
			description: body.description,
			files,
		})
		.await?;

	Ok(Json(response))
}

async fn get_entry(
	State(state): State<AppState>,
	Path(id): Path<Uuid>,
) -> Result<Json<BlacklistEntry>, ApiError> {
	match state.service.get_entry(id).await? {
		Some(entry) => Ok(Json(entry)),
		None => Err(json_error(StatusCode::NOT_FOUND, "not_found", "No such entry.")),
	}
}

async fn delete_entry(
	State(state): State<AppState>,
	Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
	state.service.delete_entry(id).await?;

	Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct RegisterAgencyBody {
	name: String,
	email: String,
	password: String,
	#[serde(default)]
	phone: Option<String>,
	#[serde(default)]
	address: Option<String>,
	#[serde(default)]
	registration_number: Option<String>,
	#[serde(default)]
	contact_person: Option<String>,
	#[serde(default)]
	registration_document: Option<ApiFile>,
}

async fn register_agency(
	State(state): State<AppState>,
	Json(body): Json<RegisterAgencyBody>,
) -> Result<Json<RegisterAgencyResponse>, ApiError> {
	let registration_document = body.registration_document.map(decode_file).transpose()?;
	let response = state
		.service
		.register_agency(RegisterAgencyRequest {
			name: body.name,
			email: body.email,
			password: body.password,
			phone: body.phone,
			address: body.address,
			registration_number: body.registration_number,
			contact_person: body.contact_person,
			registration_document,
		})
		.await?;

	Ok(Json(response))
}

async fn agency_entries(
	State(state): State<AppState>,
	Path(id): Path<Uuid>,
) -> Result<Json<ListResponse>, ApiError> {
	let response = state.service.list_by_agency(id).await?;

	Ok(Json(response))
}

async fn change_email(
	State(state): State<AppState>,
	Json(payload): Json<ChangeEmailRequest>,
) -> Result<StatusCode, ApiError> {
	state.service.change_email(payload).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn change_password(
	State(state): State<AppState>,
	Json(payload): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
	state.service.change_password(payload).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn change_phone(
	State(state): State<AppState>,
	Json(payload): Json<ChangePhoneRequest>,
) -> Result<StatusCode, ApiError> {
	state.service.change_phone(payload).await?;

	Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct ForgotPasswordBody {
	email: String,
}

async fn forgot_password(
	State(state): State<AppState>,
	Json(body): Json<ForgotPasswordBody>,
) -> Result<StatusCode, ApiError> {
	state.service.forgot_password(&body.email).await?;

	Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
struct VerifyResetCodeResponse {
	email: String,
}

async fn verify_reset_code(
	State(state): State<AppState>,
	Path(code): Path<String>,
) -> Result<Json<VerifyResetCodeResponse>, ApiError> {
	let email = state.service.verify_reset_code(&code).await?;

	Ok(Json(VerifyResetCodeResponse { email }))
}

#[derive(Debug, Deserialize)]
struct ResetPasswordBody {
	code: String,
	new_password: String,
}

async fn reset_password(
	State(state): State<AppState>,
	Json(body): Json<ResetPasswordBody>,
) -> Result<StatusCode, ApiError> {
	state.service.reset_password(&body.code, &body.new_password).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn pending_agencies(
	State(state): State<AppState>,
) -> Result<Json<PendingAgenciesResponse>, ApiError> {
	let response = state.service.list_pending_agencies().await?;

	Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct DecideAgencyBody {
	status: AgencyStatus,
	acting_admin_id: String,
}

async fn decide_agency(
	State(state): State<AppState>,
	Path(id): Path<Uuid>,
	Json(body): Json<DecideAgencyBody>,
) -> Result<StatusCode, ApiError> {
	state
		.service
		.set_agency_status(SetAgencyStatusRequest {
			agency_id: id,
			status: body.status,
			acting_admin_id: body.acting_admin_id,
		})
		.await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn all_entries(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
	let response = state.service.list_all().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError { status, error_code: code.to_string(), message: message.into() }
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let message = err.to_string();
		let (status, code) = match err {
			ServiceError::InvalidQuery { .. } => (StatusCode::BAD_REQUEST, "invalid_query"),
			ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			ServiceError::UnknownAgency => (StatusCode::FORBIDDEN, "unknown_agency"),
			ServiceError::NotPending { .. } => (StatusCode::CONFLICT, "not_pending"),
			ServiceError::Identity { .. } => (StatusCode::UNAUTHORIZED, "identity_rejected"),
			ServiceError::SearchFailed { .. } => (StatusCode::BAD_GATEWAY, "search_failed"),
			ServiceError::UploadFailed { .. } => (StatusCode::BAD_GATEWAY, "upload_failed"),
			ServiceError::WriteFailed { .. } => (StatusCode::BAD_GATEWAY, "write_failed"),
			ServiceError::Storage { .. } => (StatusCode::BAD_GATEWAY, "storage_error"),
			ServiceError::Malformed { .. } =>
				(StatusCode::INTERNAL_SERVER_ERROR, "malformed_record"),
		};

		json_error(status, code, message)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
