use std::{
	collections::HashMap,
	sync::{
		Mutex,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
	time::Duration,
};

use watchlist_store::{BoxFuture, Error, Result, blobs::BlobStore};

#[derive(Clone, Debug)]
pub struct StoredObject {
	pub bytes: Vec<u8>,
	pub content_type: String,
}

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
	objects: Mutex<HashMap<String, StoredObject>>,
	fail_puts: AtomicBool,
	stagger: AtomicBool,
	sequence: AtomicUsize,
}
impl MemoryBlobStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes every subsequent upload fail, for upload-error tests.
	pub fn fail_puts(&self, fail: bool) {
		self.fail_puts.store(fail, Ordering::SeqCst);
	}

	/// Delays earlier uploads longer than later ones, so concurrent puts
	/// complete in roughly reverse arrival order. Used to prove locator
	/// lists keep input order regardless of completion order.
	pub fn stagger_completions(&self) {
		self.stagger.store(true, Ordering::SeqCst);
	}

	pub fn object(&self, path: &str) -> Option<StoredObject> {
		self.objects.lock().unwrap_or_else(|err| err.into_inner()).get(path).cloned()
	}

	pub fn object_count(&self) -> usize {
		self.objects.lock().unwrap_or_else(|err| err.into_inner()).len()
	}
}
impl BlobStore for MemoryBlobStore {
	fn put<'a>(
		&'a self,
		path: &'a str,
		bytes: Vec<u8>,
		content_type: &'a str,
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			if self.stagger.load(Ordering::SeqCst) {
				let arrival = self.sequence.fetch_add(1, Ordering::SeqCst);
				let delay = 80_u64.saturating_sub(arrival as u64 * 20);

				tokio::time::sleep(Duration::from_millis(delay)).await;
			}
			if self.fail_puts.load(Ordering::SeqCst) {
				return Err(Error::Unexpected("Injected upload failure.".to_string()));
			}

			self.objects.lock().unwrap_or_else(|err| err.into_inner()).insert(
				path.to_string(),
				StoredObject { bytes, content_type: content_type.to_string() },
			);

			Ok(format!("https://blobs.test/{path}"))
		})
	}
}
