use super::{Companion, ContractTypeCompanion};
use crate::choice::AnyChoice;
use crate::error::{BindingError, Result};
use crate::event::{Contract, CreatedEvent};
use crate::types::{ContractId, Identifier};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Companion of a template. Generated code creates one per template.
#[derive(Debug)]
pub struct ContractCompanion<C> {
    base: ContractTypeCompanion<C>,
}

impl<C> ContractCompanion<C> {
    /// # Errors
    ///
    /// Returns `BindingError::InvalidIdentifier` for a malformed id, or
    /// `BindingError::DuplicateChoice` if two choices share a name.
    pub fn new(
        template_id: Identifier,
        choices: impl IntoIterator<Item = AnyChoice<C>>,
    ) -> Result<Self> {
        ContractTypeCompanion::new(template_id, choices).map(|base| Self { base })
    }

    /// Decodes the payload of a created event of this template.
    ///
    /// # Errors
    ///
    /// Returns `BindingError::TemplateMismatch` if the event belongs to a
    /// different template, or `BindingError::SerializationError` if the
    /// create arguments do not decode as `C`.
    pub fn from_created_event(&self, event: &CreatedEvent) -> Result<Contract<C>>
    where
        C: DeserializeOwned,
    {
        if event.template_id != *self.base.template_id() {
            return Err(BindingError::TemplateMismatch {
                expected: self.base.template_id().clone(),
                found: event.template_id.clone(),
            });
        }

        let data: C = serde_json::from_value(event.create_arguments.clone())?;
        debug!(
            template_id = %event.template_id,
            contract_id = %event.contract_id,
            "Decoded created event"
        );
        Ok(Contract {
            id: ContractId::new(event.contract_id.clone()),
            data,
            signatories: event.signatories.clone(),
            observers: event.observers.clone(),
        })
    }
}

impl<C> Companion for ContractCompanion<C> {
    type ContractType = C;

    fn contract_type(&self) -> &ContractTypeCompanion<C> {
        &self.base
    }
}
