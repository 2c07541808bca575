use serde::Serialize;

use super::{Client, Gender};

/// Read-only projection of a client, without the internal timestamps
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub phone: String,
    pub enabled: bool,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            email: client.email.clone(),
            gender: client.gender,
            phone: client.phone.clone(),
            enabled: client.enabled,
        }
    }
}

/// Body returned by create, update and enable/disable
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct IdResponse {
    pub id: i32,
}
