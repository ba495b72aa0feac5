use crate::error::{BindingError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

/// Full id of a template or interface: package, module path and entity name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    package_id: String,
    module_name: String,
    entity_name: String,
}

impl Identifier {
    /// Unchecked. Code outside this crate builds ids with
    /// [`Identifier::try_new`] or by parsing the text form.
    #[must_use]
    pub(crate) fn new(
        package_id: impl Into<String>,
        module_name: impl Into<String>,
        entity_name: impl Into<String>,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            module_name: module_name.into(),
            entity_name: entity_name.into(),
        }
    }

    /// Rejects empty segments and segments containing `:`, so every id can
    /// be written as `pkg:Mod:Entity` and read back.
    ///
    /// # Errors
    ///
    /// Returns `BindingError::InvalidIdentifier` if any segment is malformed.
    pub fn try_new(
        package_id: impl Into<String>,
        module_name: impl Into<String>,
        entity_name: impl Into<String>,
    ) -> Result<Self> {
        Self::new(package_id, module_name, entity_name).well_formed()
    }

    /// # Errors
    ///
    /// Returns `BindingError::InvalidIdentifier` if any segment is empty or
    /// contains `:`.
    pub(crate) fn well_formed(self) -> Result<Self> {
        let well_formed = [&self.package_id, &self.module_name, &self.entity_name]
            .iter()
            .all(|segment| !segment.is_empty() && !segment.contains(':'));
        if well_formed {
            Ok(self)
        } else {
            Err(BindingError::InvalidIdentifier(self.to_string()))
        }
    }

    #[must_use]
    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// `Module.Path:Entity`, the package-independent part of the id.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.module_name, self.entity_name)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.package_id, self.module_name, self.entity_name
        )
    }
}

impl FromStr for Identifier {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(package_id), Some(module_name), Some(entity_name), None) => {
                Self::try_new(package_id, module_name, entity_name)
                    .map_err(|_| BindingError::InvalidIdentifier(s.to_string()))
            }
            _ => Err(BindingError::InvalidIdentifier(s.to_string())),
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = BindingError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

/// Contract id tagged with the template or interface it refers to.
pub struct ContractId<C> {
    value: String,
    marker: PhantomData<fn() -> C>,
}

impl<C> ContractId<C> {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            marker: PhantomData,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Reinterprets the id, e.g. as an id of an interface the template implements.
    #[must_use]
    pub fn cast<D>(self) -> ContractId<D> {
        ContractId::new(self.value)
    }
}

impl<C> Clone for ContractId<C> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<C> PartialEq for ContractId<C> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<C> Eq for ContractId<C> {}

impl<C> Hash for ContractId<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<C> fmt::Debug for ContractId<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContractId").field(&self.value).finish()
    }
}

impl<C> fmt::Display for ContractId<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<C> Serialize for ContractId<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, C> Deserialize<'de> for ContractId<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
