use crate::db::Database;
use crate::error::ApiError;
use crate::models::{Client, ClientResponse, Gender};

/// Optional name and gender predicates for a search
///
/// An empty name counts as no name filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFilter {
    name: Option<String>,
    gender: Option<Gender>,
}

impl ClientFilter {
    pub fn new(name: Option<String>, gender: Option<Gender>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()),
            gender,
        }
    }

    /// True when neither predicate is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.gender.is_none()
    }

    /// Case-sensitive substring match on the name AND exact match on gender,
    /// each applied only when set
    pub fn matches(&self, client: &Client) -> bool {
        let name_ok = match &self.name {
            Some(part) => client.name.contains(part.as_str()),
            None => true,
        };
        let gender_ok = match self.gender {
            Some(gender) => client.gender == gender,
            None => true,
        };
        name_ok && gender_ok
    }
}

/// Result of listing every client
#[derive(Debug, Clone, PartialEq)]
pub enum ClientList {
    /// The store holds no records at all
    Empty,
    Clients(Vec<ClientResponse>),
}

/// Look up one client by id
pub async fn find_by_id(db: &Database, id: i32) -> Result<ClientResponse, ApiError> {
    if id <= 0 {
        return Err(ApiError::InvalidInput(format!("id must be positive, got {}", id)));
    }

    db.get_client(id)
        .await
        .map(|client| ClientResponse::from(&client))
        .ok_or(ApiError::NotFound(id))
}

/// Search with at least one predicate set
///
/// No match is an empty list, not an error
pub async fn search(db: &Database, filter: &ClientFilter) -> Result<Vec<ClientResponse>, ApiError> {
    if filter.is_empty() {
        return Err(ApiError::InvalidInput(
            "a name or gender filter is required".to_string(),
        ));
    }

    let clients = db.find_clients(|c| filter.matches(c)).await;
    Ok(project(&clients))
}

/// Every client, or [`ClientList::Empty`] when the store holds none
pub async fn list_all(db: &Database) -> ClientList {
    let clients = db.get_clients().await;
    if clients.is_empty() {
        ClientList::Empty
    } else {
        ClientList::Clients(project(&clients))
    }
}

fn project(clients: &[Client]) -> Vec<ClientResponse> {
    clients.iter().map(ClientResponse::from).collect()
}
