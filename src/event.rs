use crate::types::{ContractId, Identifier};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A contract as seen through a companion: its id and its decoded payload.
/// For interface companions `D` is the interface view type.
#[derive(Debug, Clone, PartialEq)]
pub struct Contract<C, D = C> {
    pub id: ContractId<C>,
    pub data: D,
    pub signatories: Vec<String>,
    pub observers: Vec<String>,
}

/// Contract creation as reported by the ledger's JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    pub template_id: Identifier,
    pub contract_id: String,
    pub create_arguments: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interface_views: Vec<InterfaceView>,
    #[serde(default)]
    pub signatories: Vec<String>,
    #[serde(default)]
    pub observers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceView {
    pub interface_id: Identifier,
    pub view_value: Value,
}

impl CreatedEvent {
    #[must_use]
    pub fn interface_view(&self, interface_id: &Identifier) -> Option<&InterfaceView> {
        self.interface_views
            .iter()
            .find(|view| view.interface_id == *interface_id)
    }
}
