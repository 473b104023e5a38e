//! `CaseStackApi`, the entry point to the CaseStack API.
//!
//! # Design
//! The facade owns the endpoint choice, the credentials and the injected
//! `Transport`. Each operation validates its arguments, builds a fresh
//! `Channel` and lets the channel run the exchange. Carriers, customers and
//! shipments come back holding that channel so they can be saved later.

use std::sync::Arc;

use tracing::instrument;

use crate::channel::{Channel, StatusPolicy};
use crate::config::{Credentials, Endpoint};
use crate::error::{ApiError, ApiResult};
use crate::status::ShipmentStatus;
use crate::transport::Transport;
use crate::types::{Address, Carrier, CustomFields, Customer, Customizable, EntityKind, Resource, Shipment};

/// API access to the CaseStack supply chain management suite.
///
/// Not meant to be shared across threads while `authenticate` may still be
/// called; all other operations take `&self`.
#[derive(Clone)]
pub struct CaseStackApi {
    endpoint: Endpoint,
    credentials: Option<Credentials>,
    transport: Arc<dyn Transport>,
}

impl CaseStackApi {
    /// Client for `endpoint` using the stock blocking transport.
    #[cfg(feature = "ureq")]
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_transport(endpoint, Arc::new(crate::transport::UreqTransport::default()))
    }

    /// Build a client from configuration, authenticating when credentials
    /// are configured.
    #[cfg(feature = "ureq")]
    pub fn from_config(config: crate::config::ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let transport = crate::transport::UreqTransport::new(config.timeout);
        let mut api = Self::with_transport(config.endpoint, Arc::new(transport));
        api.credentials = config.credentials;
        Ok(api)
    }

    /// Client whose requests all go through `transport`.
    pub fn with_transport(endpoint: Endpoint, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint,
            credentials: None,
            transport,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Base URL requests are sent to.
    pub fn api_endpoint(&self) -> &'static str {
        self.endpoint.url()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Set the API key and company id used for every later call.
    pub fn authenticate(
        &mut self,
        api_key: impl Into<String>,
        company_id: impl Into<String>,
    ) -> ApiResult<()> {
        self.credentials = Some(Credentials::new(api_key, company_id)?);
        Ok(())
    }

    /// Channel bound to this client's endpoint, credentials and transport.
    pub fn build_channel(&self) -> ApiResult<Channel> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            ApiError::configuration(
                "API client is not properly initialized. Please set credentials and environment",
            )
        })?;
        Ok(Channel::new(self.endpoint.url(), credentials, Arc::clone(&self.transport)))
    }

    #[instrument(skip(self))]
    pub fn get_carrier(&self, carrier_id: &str) -> ApiResult<Carrier> {
        self.get_resource(carrier_id)
    }

    #[instrument(skip(self))]
    pub fn get_customer(&self, customer_id: &str) -> ApiResult<Customer> {
        self.get_resource(customer_id)
    }

    /// The id is put in the path as given; the server rejects ids it does
    /// not know, negative ones included.
    #[instrument(skip(self))]
    pub fn get_shipment(&self, shipment_id: i64) -> ApiResult<Shipment> {
        self.get_resource(&shipment_id.to_string())
    }

    /// Fetch an address. Unlike the other fetches, only an exact 200 counts
    /// as success.
    #[instrument(skip(self))]
    pub fn get_address(&self, address_id: &str) -> ApiResult<Address> {
        if address_id.is_empty() {
            return Err(ApiError::configuration("Address ID cannot be empty."));
        }
        let channel = self.build_channel()?;
        channel.fetch(
            &format!("api/address/{address_id}"),
            StatusPolicy::ExactOk,
            "Error retrieving Address",
        )
    }

    /// Custom field definitions for entity type `T`.
    pub fn get_custom_fields<T: Customizable>(&self) -> ApiResult<CustomFields> {
        self.get_custom_fields_for(T::KIND)
    }

    #[instrument(skip(self))]
    pub fn get_custom_fields_for(&self, kind: EntityKind) -> ApiResult<CustomFields> {
        let channel = self.build_channel()?;
        channel.fetch(
            &format!("api/customfield/{}", kind.tag()),
            StatusPolicy::Success,
            "Error retrieving custom fields",
        )
    }

    /// Lock a shipment, making it read-only in the TMS. Locked shipments can
    /// still be updated through the API.
    #[instrument(skip(self))]
    pub fn lock_shipment(&self, shipment_id: i64, locked: bool) -> ApiResult<()> {
        let channel = self.build_channel()?;
        let readonly = if locked { "true" } else { "false" };
        channel.put_form(
            &format!("api/shipment/readonly/{shipment_id}"),
            &[("readonly", readonly)],
            StatusPolicy::Success,
            "Error locking/unlocking Shipment",
        )
    }

    #[instrument(skip(self))]
    pub fn set_shipment_status(&self, shipment_id: i64, status: ShipmentStatus) -> ApiResult<()> {
        let channel = self.build_channel()?;
        channel.put_form(
            &format!("api/shipment/status/{shipment_id}"),
            &[("status", status.label())],
            StatusPolicy::Success,
            "Error updating status of Shipment",
        )
    }

    fn get_resource<R: Resource>(&self, id: &str) -> ApiResult<R> {
        let kind = R::KIND;
        if id.is_empty() {
            return Err(ApiError::configuration(format!("{kind} ID cannot be empty.")));
        }
        let channel = self.build_channel()?;
        let mut resource: R = channel.fetch(
            &format!("api/{}/{id}", kind.tag()),
            StatusPolicy::Success,
            &format!("Error retrieving {kind}"),
        )?;
        resource.attach(channel);
        Ok(resource)
    }
}

impl std::fmt::Debug for CaseStackApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseStackApi")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
