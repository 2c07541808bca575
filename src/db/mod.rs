use std::collections::BTreeMap;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::mock;
use crate::models::{Client, ClientFields};

/// In-memory client store
///
/// Records are keyed by id, so iteration is always in ascending id order
/// Every mutation goes through the single write lock
#[derive(Debug, Default)]
pub struct Database {
    clients: RwLock<BTreeMap<i32, Client>>,
}

impl Database {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record, ordered by id
    pub async fn get_clients(&self) -> Vec<Client> {
        self.clients.read().await.values().cloned().collect()
    }

    /// Snapshot of the records accepted by `predicate`, ordered by id
    pub async fn find_clients<F>(&self, predicate: F) -> Vec<Client>
    where
        F: Fn(&Client) -> bool,
    {
        self.clients
            .read()
            .await
            .values()
            .filter(|c| predicate(c))
            .cloned()
            .collect()
    }

    pub async fn get_client(&self, id: i32) -> Option<Client> {
        self.clients.read().await.get(&id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Highest id currently present, or 0 when the store is empty
    pub async fn max_id(&self) -> i32 {
        self.clients.read().await.keys().next_back().copied().unwrap_or(0)
    }

    /// Add a record under its own id
    ///
    /// The caller is responsible for the id being unused. An existing record
    /// with the same id is overwritten and a warning is logged
    pub async fn insert_client(&self, client: Client) {
        let id = client.id;
        if self.clients.write().await.insert(id, client).is_some() {
            warn!(id, "insert overwrote an existing client");
        } else {
            debug!(id, "client inserted");
        }
    }

    /// Add a new record with id = current maximum id + 1 and return that id
    ///
    /// The id is assigned and the record stored under one write lock
    /// Returns None when the maximum id is already `i32::MAX`
    pub async fn create_client(&self, fields: ClientFields) -> Option<i32> {
        let mut clients = self.clients.write().await;

        let id = clients.keys().next_back().copied().unwrap_or(0).checked_add(1)?;
        let client = Client::new(id, fields.name, fields.email, fields.gender, fields.phone);
        clients.insert(id, client);

        debug!(id, "client created");
        Some(id)
    }

    /// Replace the record with the same id as `client`
    ///
    /// Returns false and leaves the store unchanged if no such record exists
    #[allow(dead_code)]
    pub async fn replace_client(&self, client: Client) -> bool {
        let mut clients = self.clients.write().await;
        replace_in(&mut clients, client)
    }

    /// Overwrite name, email, gender and phone, keeping timestamps and `enabled`
    ///
    /// Read and replace happen under one write lock. Returns false if no record has this id
    pub async fn update_client_fields(&self, id: i32, fields: ClientFields) -> bool {
        let mut clients = self.clients.write().await;

        let Some(mut client) = clients.get(&id).cloned() else {
            return false;
        };
        client.name = fields.name;
        client.email = fields.email;
        client.gender = fields.gender;
        client.phone = fields.phone;

        replace_in(&mut clients, client)
    }

    /// Set the `enabled` flag of a record; returns false if no record has this id
    pub async fn set_client_enabled(&self, id: i32, enabled: bool) -> bool {
        let mut clients = self.clients.write().await;

        match clients.get_mut(&id) {
            Some(client) => {
                client.enabled = enabled;
                debug!(id, enabled, "client enabled flag set");
                true
            }
            None => false,
        }
    }

    /// Remove a record; returns it if it was present
    pub async fn delete_client(&self, id: i32) -> Option<Client> {
        let removed = self.clients.write().await.remove(&id);
        if removed.is_some() {
            debug!(id, "client deleted");
        }
        removed
    }
}

fn replace_in(clients: &mut BTreeMap<i32, Client>, client: Client) -> bool {
    let id = client.id;
    match clients.get_mut(&id) {
        Some(existing) => {
            *existing = client;
            debug!(id, "client replaced");
            true
        }
        None => false,
    }
}

/// Create the store and seed it with synthetic clients
pub async fn init(config: &Config) -> Result<Database> {
    // Seeded runs are reproducible
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let count = i32::try_from(config.seed_count)
        .with_context(|| format!("seed count {} exceeds the id range", config.seed_count))?;

    let db = Database::new();
    for client in mock::generate_clients(count, &mut rng, &config.email_domain) {
        db.insert_client(client).await;
    }

    info!(
        count = db.count().await,
        max_id = db.max_id().await,
        "client store seeded"
    );

    Ok(db)
}
