use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{wire, Address, Customizable, EntityKind, Resource};
use crate::channel::Channel;

/// A customer billed for shipments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, deserialize_with = "wire::id", skip_serializing_if = "String::is_empty")]
    pub customer_id: String,
    /// Creation time, unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<CustomerBilling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<CustomerIdentifiers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<CustomerContact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
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

impl Resource for Customer {
    const KIND: EntityKind = EntityKind::Customer;

    fn id(&self) -> &str {
        &self.customer_id
    }

    fn channel(&self) -> Option<&Channel> {
        self.channel.as_ref()
    }

    fn attach(&mut self, channel: Channel) {
        self.channel = Some(channel);
    }
}

impl Customizable for Customer {
    fn custom_fields(&self) -> Option<&BTreeMap<String, String>> {
        self.custom_fields.as_ref()
    }

    fn custom_fields_mut(&mut self) -> &mut Option<BTreeMap<String, String>> {
        &mut self.custom_fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerBilling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerContact {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Company identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerIdentifiers {
    /// Employer identification number (tax id).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ein: Option<i64>,
    /// Dun & Bradstreet number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duns: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
