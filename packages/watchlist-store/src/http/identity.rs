use reqwest::{Client, header::HeaderMap};
use serde_json::{Value, json};

use crate::{
	BoxFuture, Error, Result,
	identity::{AuthUser, IdentityProvider},
};

pub struct HttpIdentityProvider {
	client: Client,
	api_base: String,
	headers: HeaderMap,
}
impl HttpIdentityProvider {
	pub fn new(cfg: &watchlist_config::Identity) -> Result<Self> {
		Ok(Self {
			client: super::client(cfg.timeout_ms)?,
			api_base: cfg.api_base.clone(),
			headers: super::auth_headers(&cfg.api_key)?,
		})
	}

	async fn post(&self, path: &str, body: Value) -> Result<Value> {
		let json = self
			.client
			.post(format!("{}{path}", self.api_base))
			.headers(self.headers.clone())
			.json(&body)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		Ok(json)
	}
}
impl IdentityProvider for HttpIdentityProvider {
	fn sign_up<'a>(&'a self, email: &'a str, password: &'a str) -> BoxFuture<'a, Result<AuthUser>> {
		Box::pin(async move {
			let json =
				self.post("/v1/accounts/sign_up", json!({ "email": email, "password": password }))
					.await?;

			parse_auth_user(json)
		})
	}

	fn sign_in<'a>(&'a self, email: &'a str, password: &'a str) -> BoxFuture<'a, Result<AuthUser>> {
		Box::pin(async move {
			let json =
				self.post("/v1/accounts/sign_in", json!({ "email": email, "password": password }))
					.await?;

			parse_auth_user(json)
		})
	}

	fn reauthenticate<'a>(
		&'a self,
		email: &'a str,
		current_password: &'a str,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.post(
				"/v1/accounts/verify_password",
				json!({ "email": email, "password": current_password }),
			)
			.await?;

			Ok(())
		})
	}

	fn update_email<'a>(
		&'a self,
		user_id: &'a str,
		new_email: &'a str,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.client
				.patch(format!("{}/v1/accounts/{user_id}", self.api_base))
				.headers(self.headers.clone())
				.json(&json!({ "email": new_email }))
				.send()
				.await?
				.error_for_status()?;

			Ok(())
		})
	}

	fn update_password<'a>(
		&'a self,
		user_id: &'a str,
		new_password: &'a str,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.client
				.patch(format!("{}/v1/accounts/{user_id}", self.api_base))
				.headers(self.headers.clone())
				.json(&json!({ "password": new_password }))
				.send()
				.await?
				.error_for_status()?;

			Ok(())
		})
	}

	fn send_reset_code<'a>(&'a self, email: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.post("/v1/reset_codes", json!({ "email": email })).await?;

			Ok(())
		})
	}

	fn verify_reset_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			let json: Value = self
				.client
				.get(format!("{}/v1/reset_codes/{code}", self.api_base))
				.headers(self.headers.clone())
				.send()
				.await?
				.error_for_status()?
				.json()
				.await?;

			json.get("email").and_then(Value::as_str).map(str::to_string).ok_or_else(|| {
				Error::Unexpected("Reset-code response is missing email.".to_string())
			})
		})
	}

	fn consume_reset_code<'a>(
		&'a self,
		code: &'a str,
		new_password: &'a str,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.post(
				&format!("/v1/reset_codes/{code}/consume"),
				json!({ "password": new_password }),
			)
			.await?;

			Ok(())
		})
	}
}

fn parse_auth_user(json: Value) -> Result<AuthUser> {
	let user_id = json
		.get("user_id")
		.and_then(Value::as_str)
		.ok_or_else(|| Error::Unexpected("Account response is missing user_id.".to_string()))?;
	let email = json
		.get("email")
		.and_then(Value::as_str)
		.ok_or_else(|| Error::Unexpected("Account response is missing email.".to_string()))?;

	Ok(AuthUser { user_id: user_id.to_string(), email: email.to_string() })
}
