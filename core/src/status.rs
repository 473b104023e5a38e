//! Shipment status values and their display labels.
//!
//! The server owns shipment status and its transitions; the client only
//! renders a status to the label the API expects, and reads one back.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Available shipment statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipmentStatus {
    BrokerApprovalPending,
    QuotePending,
    CustomerApprovalPending,
    CustomerRejected,
    ReadyToTender,
    Tendered,
    TenderAcceptedByCarrier,
    TenderRejectedByCarrier,
    PickupAppointmentScheduled,
    PickedUp,
    InTransit,
    DeliveryAppointmentScheduled,
    OutForDelivery,
    Delivered,
    DeliveryException,
    Cancelled,
    Archived,
    Invoiced,
    Billable,
}

const LABELS: [(ShipmentStatus, &str); 19] = [
    (ShipmentStatus::BrokerApprovalPending, "Broker Approval Pending"),
    (ShipmentStatus::QuotePending, "Quote Pending"),
    (ShipmentStatus::CustomerApprovalPending, "Customer Approval Pending"),
    (ShipmentStatus::CustomerRejected, "Customer Rejected"),
    (ShipmentStatus::ReadyToTender, "Ready to Tender"),
    (ShipmentStatus::Tendered, "Tendered"),
    (ShipmentStatus::TenderAcceptedByCarrier, "Tender Accepted by Carrier"),
    (ShipmentStatus::TenderRejectedByCarrier, "Tender Rejected by Carrier"),
    (ShipmentStatus::PickupAppointmentScheduled, "Pickup Appointment Scheduled"),
    (ShipmentStatus::PickedUp, "Picked Up"),
    (ShipmentStatus::InTransit, "In Transit"),
    (ShipmentStatus::DeliveryAppointmentScheduled, "Delivery Appointment Scheduled"),
    (ShipmentStatus::OutForDelivery, "Out for Delivery"),
    (ShipmentStatus::Delivered, "Delivered"),
    (ShipmentStatus::DeliveryException, "Delivery Exception"),
    (ShipmentStatus::Cancelled, "Cancelled"),
    (ShipmentStatus::Archived, "Archived"),
    (ShipmentStatus::Invoiced, "Invoiced"),
    (ShipmentStatus::Billable, "Billable"),
];

/// No shipment status carries the given label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shipment status label: {0:?}")]
pub struct UnknownStatusLabel(pub String);

impl ShipmentStatus {
    /// Every status, in the order the API documents them.
    pub fn all() -> impl Iterator<Item = ShipmentStatus> {
        LABELS.iter().map(|(status, _)| *status)
    }

    /// Label sent on the wire, e.g. `"Ready to Tender"`.
    pub fn label(self) -> &'static str {
        LABELS
            .iter()
            .find(|(status, _)| *status == self)
            .map(|(_, label)| *label)
            .unwrap_or_default()
    }

    pub fn from_label(label: &str) -> Result<Self, UnknownStatusLabel> {
        LABELS
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(status, _)| *status)
            .ok_or_else(|| UnknownStatusLabel(label.to_string()))
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShipmentStatus {
    type Err = UnknownStatusLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(ShipmentStatus::Archived.label(), "Archived");
        assert_eq!(ShipmentStatus::ReadyToTender.label(), "Ready to Tender");
        assert_eq!(
            ShipmentStatus::TenderAcceptedByCarrier.to_string(),
            "Tender Accepted by Carrier"
        );
        assert_eq!(ShipmentStatus::OutForDelivery.label(), "Out for Delivery");
    }

    #[test]
    fn every_status_has_a_distinct_label() {
        let labels: HashSet<&str> = ShipmentStatus::all().map(ShipmentStatus::label).collect();
        assert_eq!(labels.len(), 19);
        assert!(!labels.contains(""));
    }

    #[test]
    fn reverse_lookup_matches_forward_lookup() {
        for status in ShipmentStatus::all() {
            assert_eq!(ShipmentStatus::from_label(status.label()), Ok(status));
        }
    }

    #[test]
    fn reverse_lookup_rejects_variant_names() {
        let err = "ReadyToTender".parse::<ShipmentStatus>().unwrap_err();
        assert_eq!(err, UnknownStatusLabel("ReadyToTender".to_string()));
        assert!("in transit".parse::<ShipmentStatus>().is_err());
    }
}
