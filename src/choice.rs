#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::error::{BindingError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::{type_name, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// A choice of contract type `C`, taking an argument of type `A` and
/// returning `R` when exercised.
///
/// Generated code declares one per choice, usually as a `const`:
///
/// ```
/// use ledger_bindings::ChoiceMetadata;
///
/// struct Iou;
/// struct Transfer { new_owner: String }
///
/// const CHOICE_TRANSFER: ChoiceMetadata<Iou, Transfer, String> = ChoiceMetadata::new("Transfer");
/// assert_eq!(CHOICE_TRANSFER.name(), "Transfer");
/// ```
pub struct ChoiceMetadata<C, A, R> {
    name: Cow<'static, str>,
    marker: PhantomData<fn(C, A) -> R>,
}

/// Choice whose argument and result are handled as raw JSON values.
pub type DynamicChoice<C> = ChoiceMetadata<C, Value, Value>;

impl<C, A, R> ChoiceMetadata<C, A, R> {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            marker: PhantomData,
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            marker: PhantomData,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encodes a choice argument into the JSON value carried by an exercise command.
    ///
    /// # Errors
    ///
    /// Returns `BindingError::SerializationError` if `A` cannot be represented as JSON.
    pub fn encode_argument(&self, argument: &A) -> Result<Value>
    where
        A: Serialize,
    {
        serde_json::to_value(argument).map_err(BindingError::from)
    }

    /// Decodes the exercise result of this choice.
    ///
    /// # Errors
    ///
    /// Returns `BindingError::SerializationError` if `value` does not match `R`.
    pub fn decode_result(&self, value: Value) -> Result<R>
    where
        R: DeserializeOwned,
    {
        serde_json::from_value(value).map_err(BindingError::from)
    }

    #[must_use]
    pub fn erase(&self) -> AnyChoice<C>
    where
        A: 'static,
        R: 'static,
    {
        AnyChoice {
            name: self.name.clone(),
            argument: TypeTag::of::<A>(),
            result: TypeTag::of::<R>(),
            marker: PhantomData,
        }
    }
}

impl<C, A, R> Clone for ChoiceMetadata<C, A, R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            marker: PhantomData,
        }
    }
}

impl<C, A, R> PartialEq for ChoiceMetadata<C, A, R> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<C, A, R> Eq for ChoiceMetadata<C, A, R> {}

impl<C, A, R> fmt::Debug for ChoiceMetadata<C, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChoiceMetadata")
            .field("name", &self.name)
            .field("argument", &type_name::<A>())
            .field("result", &type_name::<R>())
            .finish()
    }
}

impl<C, A: 'static, R: 'static> From<ChoiceMetadata<C, A, R>> for AnyChoice<C> {
    fn from(choice: ChoiceMetadata<C, A, R>) -> Self {
        choice.erase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }
}

/// A choice of `C` with its argument and result types erased, as stored in
/// a companion's choice table.
pub struct AnyChoice<C> {
    name: Cow<'static, str>,
    argument: TypeTag,
    result: TypeTag,
    marker: PhantomData<fn() -> C>,
}

impl<C> AnyChoice<C> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn argument_type(&self) -> &'static str {
        self.argument.name
    }

    #[must_use]
    pub const fn result_type(&self) -> &'static str {
        self.result.name
    }

    #[must_use]
    pub fn is<A: 'static, R: 'static>(&self) -> bool {
        self.argument.id == TypeId::of::<A>() && self.result.id == TypeId::of::<R>()
    }

    /// Recovers the typed choice.
    ///
    /// # Errors
    ///
    /// Returns `BindingError::ChoiceTypeMismatch` if the choice was not
    /// declared with argument `A` and result `R`.
    pub fn downcast<A: 'static, R: 'static>(&self) -> Result<ChoiceMetadata<C, A, R>> {
        if self.is::<A, R>() {
            Ok(ChoiceMetadata {
                name: self.name.clone(),
                marker: PhantomData,
            })
        } else {
            Err(BindingError::ChoiceTypeMismatch {
                name: self.name.to_string(),
                expected: format!("{} -> {}", type_name::<A>(), type_name::<R>()),
                found: self.signature(),
            })
        }
    }

    #[must_use]
    pub fn signature(&self) -> String {
        format!("{} -> {}", self.argument.name, self.result.name)
    }
}

impl<C> Clone for AnyChoice<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            argument: self.argument,
            result: self.result,
            marker: PhantomData,
        }
    }
}

impl<C> PartialEq for AnyChoice<C> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.argument == other.argument && self.result == other.result
    }
}

impl<C> Eq for AnyChoice<C> {}

impl<C> fmt::Debug for AnyChoice<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyChoice")
            .field("name", &self.name)
            .field("argument", &self.argument.name)
            .field("result", &self.result.name)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::{AnyChoice, ChoiceMetadata};
    use crate::error::BindingError;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    struct Iou;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Transfer {
        new_owner: String,
    }

    const CHOICE_TRANSFER: ChoiceMetadata<Iou, Transfer, String> = ChoiceMetadata::new("Transfer");

    #[test]
    fn encodes_argument_and_decodes_result() {
        let argument = CHOICE_TRANSFER
            .encode_argument(&Transfer {
                new_owner: "Bob".to_string(),
            })
            .unwrap();
        assert_eq!(argument, json!({"newOwner": "Bob"}));

        let result = CHOICE_TRANSFER.decode_result(json!("#1:0")).unwrap();
        assert_eq!(result, "#1:0");
    }

    #[test]
    fn decode_result_rejects_wrong_shape() {
        let result = CHOICE_TRANSFER.decode_result(json!({"not": "a string"}));
        assert!(matches!(result, Err(BindingError::SerializationError(_))));
    }

    #[test]
    fn erased_choice_downcasts_to_declared_types_only() {
        let erased: AnyChoice<Iou> = CHOICE_TRANSFER.erase();
        assert_eq!(erased.name(), "Transfer");
        assert!(erased.is::<Transfer, String>());

        let typed = erased.downcast::<Transfer, String>().unwrap();
        assert_eq!(typed, CHOICE_TRANSFER);

        let wrong = erased.downcast::<Transfer, u64>();
        assert!(matches!(
            wrong,
            Err(BindingError::ChoiceTypeMismatch { ref name, .. }) if name == "Transfer"
        ));
    }

    #[test]
    fn erased_equality_includes_types() {
        let a: AnyChoice<Iou> = ChoiceMetadata::<Iou, Transfer, String>::new("Transfer").into();
        let b: AnyChoice<Iou> = ChoiceMetadata::<Iou, Transfer, String>::named("Transfer").into();
        let c: AnyChoice<Iou> = ChoiceMetadata::<Iou, (), String>::new("Transfer").into();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
