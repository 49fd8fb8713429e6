pub type TcResult<T> = anyhow::Result<T>;

pub mod args;
pub mod error;
pub mod ops;
pub mod preset;
pub mod request;
pub mod submit;
pub mod util;

/// Name of the binary.
pub const TC_BIN_NAME: &str = "tc";
