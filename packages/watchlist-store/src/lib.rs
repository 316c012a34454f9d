pub mod blobs;
pub mod document;
pub mod http;
pub mod identity;
pub mod records;

mod error;

pub use error::Error;

use std::{future::Future, pin::Pin};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
