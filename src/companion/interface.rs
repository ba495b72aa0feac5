use super::{Companion, ContractTypeCompanion};
use crate::choice::AnyChoice;
use crate::error::{BindingError, Result};
use crate::event::{Contract, CreatedEvent};
use crate::types::{ContractId, Identifier};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// Companion of an interface `I` whose view type is `V`.
pub struct InterfaceCompanion<I, V> {
    base: ContractTypeCompanion<I>,
    view: PhantomData<fn() -> V>,
}

impl<I, V> InterfaceCompanion<I, V> {
    /// # Errors
    ///
    /// Returns `BindingError::InvalidIdentifier` for a malformed id, or
    /// `BindingError::DuplicateChoice` if two choices share a name.
    pub fn new(
        interface_id: Identifier,
        choices: impl IntoIterator<Item = AnyChoice<I>>,
    ) -> Result<Self> {
        ContractTypeCompanion::new(interface_id, choices).map(|base| Self {
            base,
            view: PhantomData,
        })
    }

    /// Decodes this interface's view out of a created event of any template
    /// implementing it.
    ///
    /// # Errors
    ///
    /// Returns `BindingError::MissingInterfaceView` if the event carries no
    /// view for this interface, or `BindingError::SerializationError` if the
    /// view does not decode as `V`.
    pub fn from_created_event(&self, event: &CreatedEvent) -> Result<Contract<I, V>>
    where
        V: DeserializeOwned,
    {
        let interface_id = self.base.template_id();
        let view = event
            .interface_view(interface_id)
            .ok_or_else(|| BindingError::MissingInterfaceView {
                interface_id: interface_id.clone(),
                contract_id: event.contract_id.clone(),
            })?;

        let data: V = serde_json::from_value(view.view_value.clone())?;
        debug!(
            %interface_id,
            template_id = %event.template_id,
            contract_id = %event.contract_id,
            "Decoded interface view"
        );
        Ok(Contract {
            id: ContractId::new(event.contract_id.clone()),
            data,
            signatories: event.signatories.clone(),
            observers: event.observers.clone(),
        })
    }
}

impl<I, V> Companion for InterfaceCompanion<I, V> {
    type ContractType = I;

    fn contract_type(&self) -> &ContractTypeCompanion<I> {
        &self.base
    }
}

impl<I, V> fmt::Debug for InterfaceCompanion<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceCompanion")
            .field("base", &self.base)
            .field("view", &std::any::type_name::<V>())
            .finish()
    }
}
