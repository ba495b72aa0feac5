#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod contract;
mod interface;

pub use contract::ContractCompanion;
pub use interface::InterfaceCompanion;

use crate::choice::{AnyChoice, ChoiceMetadata};
use crate::command::ExerciseCommand;
use crate::error::{BindingError, Result};
use crate::types::{ContractId, Identifier};
use itertools::Itertools;
use rpds::RedBlackTreeMapSync;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tap::Tap;
use tracing::{debug, warn};

const SUGGESTION_THRESHOLD: f64 = 0.8;

/// The part shared by [`ContractCompanion`] and [`InterfaceCompanion`]: the
/// id of the template or interface, and its choices by name.
///
/// ```ignore
/// // if you statically know the name of a choice
/// let c1 = IOU.choice_by_name("Transfer");
/// // it is better to use the generated constant directly
/// let c2 = Iou::CHOICE_TRANSFER;
/// ```
pub struct ContractTypeCompanion<C> {
    template_id: Identifier,
    choices: RedBlackTreeMapSync<String, AnyChoice<C>>,
}

impl<C> ContractTypeCompanion<C> {
    /// Builds the choice table. Only the companion families call this;
    /// generated code goes through [`ContractCompanion::new`] or
    /// [`InterfaceCompanion::new`].
    ///
    /// # Errors
    ///
    /// Returns `BindingError::InvalidIdentifier` if the id has an empty or
    /// `:`-bearing segment, and `BindingError::DuplicateChoice` naming every
    /// choice name that occurs more than once.
    pub(crate) fn new(
        template_id: Identifier,
        choices: impl IntoIterator<Item = AnyChoice<C>>,
    ) -> Result<Self> {
        let template_id = template_id.well_formed()?;
        let choices: Vec<AnyChoice<C>> = choices.into_iter().collect();

        let duplicates: Vec<String> = choices
            .iter()
            .map(AnyChoice::name)
            .duplicates()
            .sorted()
            .map(str::to_string)
            .collect();
        if !duplicates.is_empty() {
            warn!(%template_id, ?duplicates, "Rejecting companion with clashing choice names");
            return Err(BindingError::DuplicateChoice {
                template_id,
                names: duplicates,
            });
        }

        let mut table = RedBlackTreeMapSync::new_sync();
        for choice in choices {
            table.insert_mut(choice.name().to_string(), choice);
        }

        Ok(Self {
            template_id,
            choices: table,
        }
        .tap(|companion| {
            debug!(
                template_id = %companion.template_id,
                choices = companion.choices.size(),
                "Built companion"
            );
        }))
    }

    #[must_use]
    pub const fn template_id(&self) -> &Identifier {
        &self.template_id
    }

    #[must_use]
    pub const fn choices(&self) -> &RedBlackTreeMapSync<String, AnyChoice<C>> {
        &self.choices
    }

    #[must_use]
    pub fn choice(&self, name: &str) -> Option<&AnyChoice<C>> {
        self.choices.get(name)
    }

    /// # Errors
    ///
    /// Returns `BindingError::UnknownChoice` with the closest known name, if
    /// any is close enough, as a suggestion.
    pub fn require_choice(&self, name: &str) -> Result<&AnyChoice<C>> {
        self.choice(name)
            .ok_or_else(|| BindingError::UnknownChoice {
                template_id: self.template_id.clone(),
                name: name.to_string(),
                suggestion: self.closest_choice_name(name),
            })
    }

    /// # Errors
    ///
    /// Returns `BindingError::UnknownChoice` or `BindingError::ChoiceTypeMismatch`.
    pub fn typed_choice<A: 'static, R: 'static>(
        &self,
        name: &str,
    ) -> Result<ChoiceMetadata<C, A, R>> {
        self.require_choice(name)?.downcast()
    }

    pub fn choice_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.choices.keys().map(String::as_str)
    }

    /// SHA-256 over the id and the choice table. Type names come from
    /// `std::any::type_name`, so fingerprints are only comparable between
    /// builds of the same toolchain.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.template_id.to_string().as_bytes());
        for (name, choice) in self.choices.iter() {
            hasher.update(b"\n");
            hasher.update(name.as_bytes());
            hasher.update(b"\0");
            hasher.update(choice.argument_type().as_bytes());
            hasher.update(b"\0");
            hasher.update(choice.result_type().as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    /// # Errors
    ///
    /// Fails if `choice` is not one of this companion's choices with the same
    /// types, or if the argument cannot be encoded.
    pub fn exercise<A, R>(
        &self,
        contract_id: &ContractId<C>,
        choice: &ChoiceMetadata<C, A, R>,
        argument: &A,
    ) -> Result<ExerciseCommand>
    where
        A: Serialize + 'static,
        R: 'static,
    {
        let choice = self.typed_choice::<A, R>(choice.name())?;
        Ok(ExerciseCommand {
            template_id: self.template_id.clone(),
            contract_id: contract_id.value().to_string(),
            choice: choice.name().to_string(),
            argument: choice.encode_argument(argument)?,
        })
    }

    /// Builds an exercise command for a choice only known by name at runtime.
    ///
    /// # Errors
    ///
    /// Returns `BindingError::UnknownChoice` if no such choice exists.
    pub fn exercise_by_name(
        &self,
        contract_id: &str,
        name: &str,
        argument: Value,
    ) -> Result<ExerciseCommand> {
        let choice = self.require_choice(name)?;
        Ok(ExerciseCommand {
            template_id: self.template_id.clone(),
            contract_id: contract_id.to_string(),
            choice: choice.name().to_string(),
            argument,
        })
    }

    fn closest_choice_name(&self, name: &str) -> Option<String> {
        self.choice_names()
            .map(|candidate| (strsim::jaro_winkler(name, candidate), candidate))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, candidate)| candidate.to_string())
    }
}

impl<C> std::fmt::Debug for ContractTypeCompanion<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractTypeCompanion")
            .field("template_id", &self.template_id)
            .field("choices", &self.choice_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Uniform view over both companion families, for code that handles "some
/// template or interface" without knowing which.
pub trait Companion {
    type ContractType;

    fn contract_type(&self) -> &ContractTypeCompanion<Self::ContractType>;

    fn template_id(&self) -> &Identifier {
        self.contract_type().template_id()
    }

    fn choice_by_name(&self, name: &str) -> Option<&AnyChoice<Self::ContractType>> {
        self.contract_type().choice(name)
    }

    fn choice_names(&self) -> impl Iterator<Item = &str> {
        self.contract_type().choice_names()
    }
}

impl<C> Companion for ContractTypeCompanion<C> {
    type ContractType = C;

    fn contract_type(&self) -> &Self {
        self
    }
}
