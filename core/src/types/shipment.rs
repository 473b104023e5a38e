use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{wire, Customizable, EntityKind, Resource};
use crate::channel::Channel;
use crate::status::{ShipmentStatus, UnknownStatusLabel};

/// A shipment and everything attached to it: stops, items, charges,
/// documents and the route log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shipment {
    #[serde(default, deserialize_with = "wire::id", skip_serializing_if = "String::is_empty")]
    pub shipment_id: String,
    /// User who created the shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Customer billed for the shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Carrier transporting the shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_id: Option<String>,
    /// Status label as reported by the server. See [`Shipment::status_kind`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    /// Locked against edits from the web interface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_rep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_rep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_comments: Option<String>,
    /// Value declared by the customer. The API spells this `shpment_value`.
    #[serde(
        rename = "shpment_value",
        alias = "shipment_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub shipment_value: Option<f64>,
    /// Insurance required, USD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_required: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_order_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_mileage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// "thirdparty", "collect" or "prepaid".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_matrix: Option<String>,
    /// Printed on the load tender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uom: Option<Uom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truckload: Option<Truckload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thirdparty: Option<ThirdParty>,
    /// Values derived and cached by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_values: Option<ComputedValues>,
    /// What the carrier bills you.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_charges: Option<Vec<Charge>>,
    /// What you bill the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_charges: Option<Vec<Charge>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
    /// Pickup and delivery stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<Vec<Stop>>,
    /// Truck location log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_log: Option<Vec<RouteLog>>,
    #[serde(
        default,
        deserialize_with = "wire::custom_fields",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_fields: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    pub(crate) channel: Option<Channel>,
}

impl Shipment {
    /// Resolve the status label reported by the server.
    ///
    /// `None` when the shipment carries no status.
    pub fn status_kind(&self) -> Option<Result<ShipmentStatus, UnknownStatusLabel>> {
        self.status.as_deref().map(ShipmentStatus::from_label)
    }
}

impl Resource for Shipment {
    const KIND: EntityKind = EntityKind::Shipment;

    fn id(&self) -> &str {
        &self.shipment_id
    }

    fn channel(&self) -> Option<&Channel> {
        self.channel.as_ref()
    }

    fn attach(&mut self, channel: Channel) {
        self.channel = Some(channel);
    }
}

impl Customizable for Shipment {
    fn custom_fields(&self) -> Option<&BTreeMap<String, String>> {
        self.custom_fields.as_ref()
    }

    fn custom_fields_mut(&mut self) -> &mut Option<BTreeMap<String, String>> {
        &mut self.custom_fields
    }
}

/// Units of measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Uom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Truckload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<Space>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full or partial truck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Space {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Third party billing details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThirdParty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputedValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stops: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_carrier_charges: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_customer_charges: Option<f64>,
    /// Margin in USD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_dollars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_percent: Option<f64>,
    /// Miles completed so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_miles: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_percent: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    /// e.g. "Fuel Surcharge", "Detention Charge", "Lumper Charge".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    /// `qty * rate`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Posting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A line item being transported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Packaging type such as "Pallet", "Crate" or "Drum".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cube: Option<f64>,
    /// Freight class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nmfc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nmfc_sub: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hazmat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miles: Option<f64>,
    /// Drive time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A pickup or delivery stop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// "pickup" or "delivery".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    /// `[lon, lat]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Earliest pickup/delivery, unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest: Option<i64>,
    /// Latest pickup/delivery, unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<i64>,
    /// Distance from the previous stop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_distance: Option<Distance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apt_required: Option<bool>,
    /// Indexes into the shipment's items handled at this stop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_reached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_arrival: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_depart: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Bill of lading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bol: Option<String>,
    /// Carrier reference number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pro: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Last seen truck location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<Vec<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteLog {
    /// User who logged the location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LogLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Distance and duration left to the final destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Distance>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_value_keeps_its_wire_spelling() {
        let shipment = Shipment {
            shipment_id: "7".to_string(),
            shipment_value: Some(1200.0),
            ..Shipment::default()
        };
        let json = serde_json::to_value(&shipment).unwrap();
        assert_eq!(json["shpment_value"], 1200.0);
        assert!(json.get("shipment_value").is_none());

        let back: Shipment = serde_json::from_str(r#"{"shipment_value": 5}"#).unwrap();
        assert_eq!(back.shipment_value, Some(5.0));
    }

    #[test]
    fn stops_and_items_deserialize() {
        let raw = r#"{
            "shipment_id": "7",
            "items": [{"packaging": "Pallet", "qty": 2, "class": "70"}],
            "stops": [
                {"type": "pickup", "city": "Reno", "items": [0], "leg_distance": {"miles": 0}},
                {"type": "delivery", "city": "Boise", "items": [0]}
            ]
        }"#;
        let shipment: Shipment = serde_json::from_str(raw).unwrap();
        let items = shipment.items.unwrap();
        assert_eq!(items[0].class.as_deref(), Some("70"));
        assert_eq!(items[0].qty, Some(2.0));
        let stops = shipment.stops.unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].kind.as_deref(), Some("pickup"));
        assert_eq!(stops[1].items, Some(vec![0]));
    }

    #[test]
    fn status_kind_resolves_labels() {
        let mut shipment = Shipment::default();
        assert!(shipment.status_kind().is_none());

        shipment.status = Some("In Transit".to_string());
        assert_eq!(shipment.status_kind(), Some(Ok(ShipmentStatus::InTransit)));

        shipment.status = Some("Lost".to_string());
        assert!(matches!(shipment.status_kind(), Some(Err(_))));
    }
}
