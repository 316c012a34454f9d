//! In-memory implementations of the platform traits. Tests run the service
//! against these instead of the hosted document database, object storage,
//! and identity endpoints; each fake mimics the same limited surface,
//! including the record store's equality/range/order-only query support.

mod blobs;
mod identity;
mod records;

pub use blobs::{MemoryBlobStore, StoredObject};
pub use identity::MemoryIdentityProvider;
pub use records::MemoryRecordStore;
