use crate::types::Identifier;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to exercise a choice on an existing contract, in the ledger's
/// JSON API shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCommand {
    pub template_id: Identifier,
    pub contract_id: String,
    pub choice: String,
    pub argument: Value,
}
