mod identifiers;

pub use identifiers::{ContractId, Identifier};
