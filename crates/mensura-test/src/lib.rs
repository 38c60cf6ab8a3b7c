//! # Mensura Test
//!
//! Drives a Mensura [`App`](mensura_server::App) in memory: requests go
//! through routing, both pipelines and the handlers without binding a port.
//!
//! ## Example
//!
//! ```
//! use mensura_test::TestClient;
//!
//! # tokio_test::block_on(async {
//! let client = TestClient::with_defaults().unwrap();
//!
//! client
//!     .get("/suggestions?from_unit=nautical")
//!     .marker()
//!     .send()
//!     .await
//!     .assert_status_code(200)
//!     .assert_body_contains("nautical mile");
//!
//! client
//!     .get("/suggestions?from_unit=nautical")
//!     .send()
//!     .await
//!     .assert_status_code(403)
//!     .assert_body_eq("Cannot process this request");
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/mensura-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::{TestRequest, TestRequestBuilder};
pub use response::TestResponse;
