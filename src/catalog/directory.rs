use std::collections::BTreeMap;

use super::state::sort_clients;
use crate::models::Client;

pub const UNKNOWN_STATE: &str = "Other";

/// Active clients keyed by state, states in order, clients by name.
/// Clients with a blank state land under `Other`.
pub fn group_by_state(clients: &[Client]) -> BTreeMap<String, Vec<Client>> {
    let mut groups: BTreeMap<String, Vec<Client>> = BTreeMap::new();
    for client in clients.iter().filter(|c| c.is_active()) {
        let state = client.state.trim();
        let key = if state.is_empty() {
            UNKNOWN_STATE.to_string()
        } else {
            state.to_string()
        };
        groups.entry(key).or_default().push(client.clone());
    }
    for members in groups.values_mut() {
        sort_clients(members);
    }
    groups
}
