//! Test helper utilities
//!
//! - `builders`: Builders for test instances of models
//! - `http`: HTTP clients for tests

pub mod builders {
	pub mod network;
	pub mod subscription;
}


pub use builders::{network::*, subscription::*};
pub use http::*;
