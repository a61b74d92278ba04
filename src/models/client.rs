use super::wire::{lenient_text, not_blank, text};
use super::ACTIVE_STATUS;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Wire keys in export column order.
pub const CLIENT_COLUMNS: [&str; 10] = [
    "Client Name",
    "Client Code",
    "Address",
    "City",
    "State",
    "ZIP",
    "Phone",
    "Email",
    "Contact Person",
    "Status",
];

/// A customer the distributor ships to, keyed by `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(from = "ClientRecord", into = "ClientRecord")]
pub struct Client {
    #[validate(custom = "not_blank")]
    pub name: String,
    #[validate(custom = "not_blank")]
    pub code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
    pub contact_person: String,
    pub status: String,
}

impl Client {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ClientRecord {
    #[serde(rename = "Client Name", default, deserialize_with = "lenient_text")]
    pub client_name: Option<String>,
    #[serde(rename = "Client Code", default, deserialize_with = "lenient_text")]
    pub client_code: Option<String>,
    #[serde(rename = "Address", default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(rename = "City", default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(rename = "State", default, deserialize_with = "lenient_text")]
    pub state: Option<String>,
    #[serde(rename = "ZIP", default, deserialize_with = "lenient_text")]
    pub zip: Option<String>,
    #[serde(rename = "Phone", default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(rename = "Contact Person", default, deserialize_with = "lenient_text")]
    pub contact_person: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

impl From<ClientRecord> for Client {
    fn from(record: ClientRecord) -> Self {
        Self {
            name: text(record.client_name),
            code: text(record.client_code),
            address: text(record.address),
            city: text(record.city),
            state: text(record.state),
            zip: text(record.zip),
            phone: text(record.phone),
            email: text(record.email),
            contact_person: text(record.contact_person),
            status: text(record.status),
        }
    }
}

impl From<Client> for ClientRecord {
    fn from(client: Client) -> Self {
        Self {
            client_name: Some(client.name),
            client_code: Some(client.code),
            address: Some(client.address),
            city: Some(client.city),
            state: Some(client.state),
            zip: Some(client.zip),
            phone: Some(client.phone),
            email: Some(client.email),
            contact_person: Some(client.contact_person),
            status: Some(client.status),
        }
    }
}
