pub mod choice;
pub mod command;
pub mod companion;
pub mod error;
pub mod event;
pub mod manifest;
pub mod types;

pub use choice::{AnyChoice, ChoiceMetadata, DynamicChoice};
pub use command::ExerciseCommand;
pub use companion::{Companion, ContractCompanion, ContractTypeCompanion, InterfaceCompanion};
pub use error::{BindingError, Result};
pub use event::{Contract, CreatedEvent, InterfaceView};
pub use manifest::{CompanionKind, CompanionManifest, ValidationReport};
pub use types::*;
