use std::sync::{
	Mutex,
	atomic::{AtomicUsize, Ordering},
};

use watchlist_store::{
	BoxFuture, Error, Result,
	identity::{AuthUser, IdentityProvider},
};

#[derive(Clone, Debug)]
struct Account {
	user_id: String,
	email: String,
	password: String,
}

#[derive(Debug, Default)]
pub struct MemoryIdentityProvider {
	accounts: Mutex<Vec<Account>>,
	reset_codes: Mutex<Vec<(String, String)>>,
	sequence: AtomicUsize,
}
impl MemoryIdentityProvider {
	pub fn new() -> Self {
		Self::default()
	}

	/// The most recently issued reset code for an email, mirroring what the
	/// real provider would deliver out of band.
	pub fn last_reset_code(&self, email: &str) -> Option<String> {
		self.reset_codes
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.iter()
			.rev()
			.find(|(_, code_email)| code_email == email)
			.map(|(code, _)| code.clone())
	}

	fn find_by_email(&self, email: &str) -> Option<Account> {
		self.accounts
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.iter()
			.find(|account| account.email == email)
			.cloned()
	}
}
impl IdentityProvider for MemoryIdentityProvider {
	fn sign_up<'a>(&'a self, email: &'a str, password: &'a str) -> BoxFuture<'a, Result<AuthUser>> {
		Box::pin(async move {
			if self.find_by_email(email).is_some() {
				return Err(Error::Unexpected("Email already registered.".to_string()));
			}

			let user_id = format!("user-{}", self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
			let account = Account {
				user_id: user_id.clone(),
				email: email.to_string(),
				password: password.to_string(),
			};

			self.accounts.lock().unwrap_or_else(|err| err.into_inner()).push(account);

			Ok(AuthUser { user_id, email: email.to_string() })
		})
	}

	fn sign_in<'a>(&'a self, email: &'a str, password: &'a str) -> BoxFuture<'a, Result<AuthUser>> {
		Box::pin(async move {
			match self.find_by_email(email) {
				Some(account) if account.password == password =>
					Ok(AuthUser { user_id: account.user_id, email: account.email }),
				_ => Err(Error::Unexpected("Invalid credentials.".to_string())),
			}
		})
	}

	fn reauthenticate<'a>(
		&'a self,
		email: &'a str,
		current_password: &'a str,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			match self.find_by_email(email) {
				Some(account) if account.password == current_password => Ok(()),
				_ => Err(Error::Unexpected("Invalid credentials.".to_string())),
			}
		})
	}

	fn update_email<'a>(
		&'a self,
		user_id: &'a str,
		new_email: &'a str,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut accounts = self.accounts.lock().unwrap_or_else(|err| err.into_inner());
			let Some(account) = accounts.iter_mut().find(|account| account.user_id == user_id)
			else {
				return Err(Error::Unexpected("Unknown account.".to_string()));
			};

			account.email = new_email.to_string();

			Ok(())
		})
	}

	fn update_password<'a>(
		&'a self,
		user_id: &'a str,
		new_password: &'a str,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut accounts = self.accounts.lock().unwrap_or_else(|err| err.into_inner());
			let Some(account) = accounts.iter_mut().find(|account| account.user_id == user_id)
			else {
				return Err(Error::Unexpected("Unknown account.".to_string()));
			};

			account.password = new_password.to_string();

			Ok(())
		})
	}

	fn send_reset_code<'a>(&'a self, email: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			if self.find_by_email(email).is_none() {
				return Err(Error::Unexpected("Unknown account.".to_string()));
			}

			let code = format!("reset-{}", self.sequence.fetch_add(1, Ordering::SeqCst) + 1);

			self.reset_codes
				.lock()
				.unwrap_or_else(|err| err.into_inner())
				.push((code, email.to_string()));

			Ok(())
		})
	}

	fn verify_reset_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			self.reset_codes
				.lock()
				.unwrap_or_else(|err| err.into_inner())
				.iter()
				.find(|(stored, _)| stored == code)
				.map(|(_, email)| email.clone())
				.ok_or_else(|| Error::Unexpected("Unknown reset code.".to_string()))
		})
	}

	fn consume_reset_code<'a>(
		&'a self,
		code: &'a str,
		new_password: &'a str,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let email = {
				let mut codes = self.reset_codes.lock().unwrap_or_else(|err| err.into_inner());
				let Some(index) = codes.iter().position(|(stored, _)| stored == code) else {
					return Err(Error::Unexpected("Unknown reset code.".to_string()));
				};

				codes.remove(index).1
			};
			let mut accounts = self.accounts.lock().unwrap_or_else(|err| err.into_inner());
			let Some(account) = accounts.iter_mut().find(|account| account.email == email) else {
				return Err(Error::Unexpected("Unknown account.".to_string()));
			};

			account.password = new_password.to_string();

			Ok(())
		})
	}
}
