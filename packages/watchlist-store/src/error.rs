#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Unexpected platform response: {0}")]
	Unexpected(String),
}
