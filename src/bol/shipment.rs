use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Client;

pub const DEFAULT_CARRIER: &str = "World Wide Express 3rd Party";
pub const DEFAULT_FREIGHT_CHARGES: &str = "Collect";
pub const DEFAULT_PLACARDS_SUPPLIED: &str = "NO";
pub const DEFAULT_SHIPPER_PHONE: &str = "215-295-5006";

/// Postal block printed for the consignee, shipper and third-party payer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    pub fn new(name: &str, street: &str, city: &str, state: &str, zip: &str) -> Self {
        Self {
            name: name.to_string(),
            street: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip: zip.to_string(),
        }
    }

    pub fn default_consignee() -> Self {
        Self::new(
            "AquaPhoenix Scientific",
            "860 Gitts Run Road",
            "Hanover",
            "PA",
            "17331",
        )
    }

    pub fn default_shipper() -> Self {
        Self::new(
            "Corco Chemical Corporation",
            "299 Cedar Lane",
            "Fairless Hills",
            "PA",
            "19030",
        )
    }

    pub fn default_third_party() -> Self {
        Self::new(
            "Worldwide Express",
            "2323 Victory Avenue Ste 1600",
            "Dallas",
            "TX",
            "75219",
        )
    }

    /// Field by field, blank values fall back to `fallback`.
    fn or_fallback(&self, fallback: Address) -> Address {
        Address {
            name: or_default(&self.name, fallback.name),
            street: or_default(&self.street, fallback.street),
            city: or_default(&self.city, fallback.city),
            state: or_default(&self.state, fallback.state),
            zip: or_default(&self.zip, fallback.zip),
        }
    }

    /// `City State ZIP` line.
    pub fn locality(&self) -> String {
        format!("{} {} {}", self.city, self.state, self.zip)
    }
}

impl From<&Client> for Address {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            street: client.address.clone(),
            city: client.city.clone(),
            state: client.state.clone(),
            zip: client.zip.clone(),
        }
    }
}

/// Shipment header as entered. Blank fields are filled with fixed defaults
/// when the document is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentDetails {
    pub ship_date: Option<NaiveDate>,
    pub carrier: String,
    pub consignee: Address,
    pub shipper: Address,
    pub shipper_phone: String,
    pub third_party: Address,
    pub freight_charges: String,
    pub placards_supplied: String,
    pub signatory: String,
}

/// Shipment header with every fallback applied and the date formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedShipment {
    pub ship_date: String,
    pub carrier: String,
    pub consignee: Address,
    pub shipper: Address,
    pub shipper_phone: String,
    pub third_party: Address,
    pub freight_charges: String,
    pub placards_supplied: String,
    pub signatory: String,
}

impl ShipmentDetails {
    pub fn with_consignee(mut self, client: &Client) -> Self {
        self.consignee = Address::from(client);
        self
    }

    pub fn resolve(&self, today: NaiveDate) -> ResolvedShipment {
        let ship_date = self.ship_date.unwrap_or(today);
        ResolvedShipment {
            ship_date: ship_date.format("%m-%d-%Y").to_string(),
            carrier: or_default(&self.carrier, DEFAULT_CARRIER.to_string()),
            consignee: self.consignee.or_fallback(Address::default_consignee()),
            shipper: self.shipper.or_fallback(Address::default_shipper()),
            shipper_phone: or_default(&self.shipper_phone, DEFAULT_SHIPPER_PHONE.to_string()),
            third_party: self.third_party.or_fallback(Address::default_third_party()),
            freight_charges: or_default(
                &self.freight_charges,
                DEFAULT_FREIGHT_CHARGES.to_string(),
            ),
            placards_supplied: or_default(
                &self.placards_supplied,
                DEFAULT_PLACARDS_SUPPLIED.to_string(),
            ),
            signatory: self.signatory.trim().to_string(),
        }
    }
}

fn or_default(value: &str, fallback: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed.to_string()
    }
}
