//! Domain records exchanged with the CaseStack API.
//!
//! # Design
//! Every wire attribute is optional and skipped when unset, so an entity
//! written back contains exactly what was read plus the caller's edits.
//! Attributes the client does not model are kept in `extra` for the same
//! reason. Carriers, customers and shipments carry the `Channel` they were
//! fetched through; it is never serialized.

mod address;
mod carrier;
mod custom_fields;
mod customer;
mod shipment;
mod wire;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::channel::{Channel, StatusPolicy};
use crate::error::{ApiError, ApiResult};

pub use address::Address;
pub use carrier::{
    Carrier, CarrierBilling, CarrierContact, CarrierFlags, CarrierIdentifiers, CarrierModes, Fmcsa,
    Insurance, Terminal,
};
pub use custom_fields::{CustomFields, Field};
pub use customer::{Customer, CustomerBilling, CustomerContact, CustomerIdentifiers};
pub use shipment::{
    Charge, ComputedValues, Distance, Document, Item, LogLocation, Note, RouteLog, Shipment, Space,
    Stop, ThirdParty, Truckload, Uom,
};

/// Entity types that define custom fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Carrier,
    Customer,
    Shipment,
}

impl EntityKind {
    /// Lower-case tag used in resource paths and request envelopes.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Carrier => "carrier",
            Self::Customer => "customer",
            Self::Shipment => "shipment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Carrier => "Carrier",
            Self::Customer => "Customer",
            Self::Shipment => "Shipment",
        };
        f.write_str(name)
    }
}

/// An entity that can be written back with `save`.
pub trait Resource: Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Channel this entity was fetched through.
    fn channel(&self) -> Option<&Channel>;

    fn attach(&mut self, channel: Channel);

    /// PUT the whole entity to `api/{type}/{id}` through its own channel.
    ///
    /// Only an exact 200 counts as success.
    fn save(&self) -> ApiResult<()> {
        let kind = Self::KIND;
        if self.id().is_empty() {
            return Err(ApiError::configuration(format!("{kind} ID cannot be empty.")));
        }
        let channel = self.channel().ok_or_else(|| {
            ApiError::configuration(format!("{kind} was not retrieved through the API"))
        })?;
        let resource = format!("api/{}/{}", kind.tag(), self.id());
        debug!(resource = %resource, "Saving {kind}");
        channel.mutate(
            &resource,
            kind.tag(),
            self,
            StatusPolicy::ExactOk,
            &format!("Error updating {kind}"),
        )
    }
}

/// An entity with a user-defined `custom_fields` map.
pub trait Customizable: Resource {
    fn custom_fields(&self) -> Option<&BTreeMap<String, String>>;

    fn custom_fields_mut(&mut self) -> &mut Option<BTreeMap<String, String>>;

    fn custom_field(&self, name: &str) -> Option<&str> {
        self.custom_fields()
            .and_then(|fields| fields.get(name))
            .map(String::as_str)
    }

    /// Set a custom field, returning the previous value.
    fn set_custom_field(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.custom_fields_mut()
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_are_lowercase() {
        assert_eq!(EntityKind::Carrier.tag(), "carrier");
        assert_eq!(EntityKind::Customer.tag(), "customer");
        assert_eq!(EntityKind::Shipment.tag(), "shipment");
        assert_eq!(EntityKind::Shipment.to_string(), "Shipment");
    }

    #[test]
    fn save_without_channel_is_a_configuration_error() {
        let carrier = Carrier {
            carrier_id: "foo".to_string(),
            ..Carrier::default()
        };
        let err = carrier.save().unwrap_err();
        assert!(matches!(err, ApiError::ConfigurationError(_)));
    }

    #[test]
    fn save_with_empty_id_is_a_configuration_error() {
        let err = Customer::default().save().unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: Customer ID cannot be empty."
        );
    }

    #[test]
    fn custom_field_accessors() {
        let mut shipment = Shipment::default();
        assert_eq!(shipment.custom_field("po"), None);
        assert_eq!(shipment.set_custom_field("po", "A-1"), None);
        assert_eq!(shipment.set_custom_field("po", "A-2").as_deref(), Some("A-1"));
        assert_eq!(shipment.custom_field("po"), Some("A-2"));
        assert_eq!(shipment.custom_fields().map(BTreeMap::len), Some(1));
    }
}
