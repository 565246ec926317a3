//! # nodion-dns-client
//!
//! A typed async client for the [Nodion](https://www.nodion.com/) DNS API,
//! covering zone and record management.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation and static builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nodion_dns_client::{DnsZoneApi, NodionClient, Record, RecordType, RecordsFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a client (or `NodionClient::from_env()` to read NODION_API_KEY)
//!     let client = NodionClient::new("your-api-key")?;
//!
//!     // 2. Find the zone
//!     let zone = client.find_zone("example.com").await?;
//!
//!     // 3. Add a record
//!     let record = Record::new(RecordType::A, "www", "1.2.3.4", 3600);
//!     let created = client.create_record(&zone.id, &record).await?;
//!
//!     // 4. List the A records named "www"
//!     let filter = RecordsFilter::default().name("www").record_type(RecordType::A);
//!     for r in client.get_records(&zone.id, Some(&filter)).await? {
//!         println!("{} {} -> {}", r.name, r.record_type, r.content);
//!     }
//!
//!     // 5. Remove it again
//!     if let Some(id) = &created.id {
//!         client.delete_record(&zone.id, id).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ClientError>`](ClientError):
//!
//! - [`ClientError::Api`] — non-2xx response, with status, message and
//!   field-level details ([`ApiError`])
//! - [`ClientError::NetworkError`] / [`ClientError::Timeout`] — transport failures
//! - [`ClientError::ParseError`] — the response body could not be decoded
//!
//! Nothing is retried. Every failure is returned to the caller as soon as it
//! happens.
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: requests and
//! responses at `debug`, failures at `warn`/`error`. API keys are masked.

mod client;
mod config;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ApiError, ApiErrorKind, ClientError, Result};

// Re-export client and configuration
pub use client::{NodionClient, NodionClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, ENV_API_KEY, ENV_BASE_URL, ENV_HTTP_TIMEOUT};

// Re-export core trait
pub use traits::DnsZoneApi;

// Re-export types
pub use types::{Record, RecordType, RecordsFilter, Zone, ZonesFilter};

// Re-export utils module
pub use utils::datetime;
