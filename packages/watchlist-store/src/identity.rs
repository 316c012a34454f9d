use crate::{BoxFuture, Result};

#[derive(Clone, Debug)]
pub struct AuthUser {
	pub user_id: String,
	pub email: String,
}

/// The external credential service. Treated as an opaque passthrough: this
/// crate defines the calls the account flows need and nothing else.
pub trait IdentityProvider
where
	Self: Send + Sync,
{
	fn sign_up<'a>(&'a self, email: &'a str, password: &'a str) -> BoxFuture<'a, Result<AuthUser>>;

	fn sign_in<'a>(&'a self, email: &'a str, password: &'a str) -> BoxFuture<'a, Result<AuthUser>>;

	/// Re-verifies the current password. Required before any sensitive
	/// change.
	fn reauthenticate<'a>(
		&'a self,
		email: &'a str,
		current_password: &'a str,
	) -> BoxFuture<'a, Result<()>>;

	fn update_email<'a>(&'a self, user_id: &'a str, new_email: &'a str)
	-> BoxFuture<'a, Result<()>>;

	fn update_password<'a>(
		&'a self,
		user_id: &'a str,
		new_password: &'a str,
	) -> BoxFuture<'a, Result<()>>;

	fn send_reset_code<'a>(&'a self, email: &'a str) -> BoxFuture<'a, Result<()>>;

	/// Returns the email the code was issued for.
	fn verify_reset_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<String>>;

	fn consume_reset_code<'a>(
		&'a self,
		code: &'a str,
		new_password: &'a str,
	) -> BoxFuture<'a, Result<()>>;
}
