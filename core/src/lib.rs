//! Typed client for the CaseStack supply chain management API.
//!
//! # Overview
//! `CaseStackApi` authenticates with HTTP Basic auth, fetches carriers,
//! customers, shipments, addresses and custom field definitions, and writes
//! entities back with `save()`. Every HTTP exchange goes through an injected
//! [`Transport`], so the client is testable without a network.
//!
//! ```rust,no_run
//! use casestack_core::{CaseStackApi, Endpoint, Resource, ShipmentStatus};
//!
//! fn main() -> Result<(), casestack_core::ApiError> {
//!     let mut api = CaseStackApi::new(Endpoint::Staging);
//!     api.authenticate("api-key", "company-id")?;
//!
//!     let mut carrier = api.get_carrier("5a1f")?;
//!     carrier.comments = Some("Prefers morning pickups".to_string());
//!     carrier.save()?;
//!
//!     api.set_shipment_status(1042, ShipmentStatus::InTransit)?;
//!     Ok(())
//! }
//! ```
//!
//! # Design
//! - `CaseStackApi` validates arguments before building a `Channel`.
//! - `Channel` carries base URL, auth headers and transport; entities keep a
//!   clone of it for `save()`.
//! - Failures are `ConfigurationError` (caught before any I/O) or
//!   `HttpError` carrying the HTTP status.

pub mod channel;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod status;
pub mod transport;
pub mod types;

pub use channel::{Channel, StatusPolicy};
pub use client::CaseStackApi;
pub use config::{ClientConfig, Credentials, Endpoint, API_VERSION};
pub use error::{ApiError, ApiResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use status::{ShipmentStatus, UnknownStatusLabel};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use transport::{Transport, TransportError};
pub use types::{
    Address, Carrier, CustomFields, Customer, Customizable, EntityKind, Field, Resource, Shipment,
};
