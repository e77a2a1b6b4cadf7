mod client;
pub use client::KrakenClient;

pub mod data;

mod error;
pub use error::Error;

mod serde;

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
