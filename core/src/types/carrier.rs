use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{wire, Address, Customizable, EntityKind, Resource};
use crate::channel::Channel;

/// A carrier moving freight on your behalf.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Carrier {
    #[serde(default, deserialize_with = "wire::id", skip_serializing_if = "String::is_empty")]
    pub carrier_id: String,
    /// Creation time, unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// URL of the carrier's logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rep: Option<String>,
    /// Comments or special instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<CarrierBilling>,
    /// Transport modes the carrier services.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub modes: Option<CarrierModes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<CarrierFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<CarrierIdentifiers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurances: Option<Vec<Insurance>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<CarrierContact>>,
    /// Cities the carrier has terminals in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminals: Option<Vec<Terminal>>,
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

impl Resource for Carrier {
    const KIND: EntityKind = EntityKind::Carrier;

    fn id(&self) -> &str {
        &self.carrier_id
    }

    fn channel(&self) -> Option<&Channel> {
        self.channel.as_ref()
    }

    fn attach(&mut self, channel: Channel) {
        self.channel = Some(channel);
    }
}

impl Customizable for Carrier {
    fn custom_fields(&self) -> Option<&BTreeMap<String, String>> {
        self.custom_fields.as_ref()
    }

    fn custom_fields_mut(&mut self) -> &mut Option<BTreeMap<String, String>> {
        &mut self.custom_fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierBilling {
    /// Ties the carrier to your ERP or accounting software.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting_code: Option<String>,
    /// Numeric terms code: "00" no terms, "99" prepaid, "89" due on receipt,
    /// "02" 2% net 15, otherwise "NN" meaning net NN days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An insurance certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insurance {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_naic: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// Your company is named on the certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_on_insurance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    /// Coverage in USD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
    /// Expiry, unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierContact {
    /// One of "dispatcher", "shipping", "receiving", "planner",
    /// "appointment_scheduler", "general", "manager", "accounting", "sales",
    /// "claims", "safety", "after_hour_dispatch".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number with extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Terminal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// `[lon, lat]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<Vec<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Freight modes and services a carrier offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierModes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ltl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truckload: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air: Option<bool>,
    /// Broker or 3PL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermodal: Option<bool>,
    /// Non-vessel operating common carrier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvocc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expedited: Option<bool>,
    /// Has team drivers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whiteglove: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Certifications and association memberships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierFlags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smartway: Option<bool>,
    /// Owner-Operator Independent Drivers Association.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ooida: Option<bool>,
    /// Transportation Intermediaries Association.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tia: Option<bool>,
    /// Truckload Carriers Association.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tca: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walmart_drop_trailer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hazmat: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// FMCSA registration numbers and operating authorities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fmcsa {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mc: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ff: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_authority: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_authority: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_authority: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierIdentifiers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fmcsa: Option<Fmcsa>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
