//! Fund source adapters
//!
//! - [`StaticFundSource`]: serves a fixed record set (the bundled dataset by default)
//! - [`UpstreamFundSource`]: relays to the external fund service over HTTP

pub mod static_source;
pub mod upstream;

pub use static_source::StaticFundSource;
pub use upstream::{UpstreamFundSource, UpstreamConfig};
