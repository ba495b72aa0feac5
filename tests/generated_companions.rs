//! Companions the way generated bindings declare them: choice constants plus a
//! lazily built process-wide companion per template and interface.

use ledger_bindings::{
    BindingError, ChoiceMetadata, Companion, ContractCompanion, ContractId, CreatedEvent,
    Identifier, InterfaceCompanion, InterfaceView,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Iou {
    issuer: String,
    owner: String,
    amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IouTransfer {
    new_owner: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct AssetView {
    holder: String,
}

struct Asset;

impl Iou {
    const CHOICE_TRANSFER: ChoiceMetadata<Self, IouTransfer, ContractId<Self>> =
        ChoiceMetadata::new("Iou_Transfer");
    const CHOICE_ARCHIVE: ChoiceMetadata<Self, (), ()> = ChoiceMetadata::new("Archive");
}

static IOU: LazyLock<Result<ContractCompanion<Iou>, BindingError>> = LazyLock::new(|| {
    ContractCompanion::new(
        Identifier::try_new("d14e08", "Iou", "Iou")?,
        [Iou::CHOICE_TRANSFER.erase(), Iou::CHOICE_ARCHIVE.erase()],
    )
});

static ASSET: LazyLock<Result<InterfaceCompanion<Asset, AssetView>, BindingError>> =
    LazyLock::new(|| {
        InterfaceCompanion::new(
            Identifier::try_new("d14e08", "Asset", "Asset")?,
            [ChoiceMetadata::<Asset, (), ()>::new("Archive").erase()],
        )
    });

fn iou() -> Result<&'static ContractCompanion<Iou>, String> {
    IOU.as_ref().map_err(ToString::to_string)
}

fn asset() -> Result<&'static InterfaceCompanion<Asset, AssetView>, String> {
    ASSET.as_ref().map_err(ToString::to_string)
}

fn created_iou() -> Result<CreatedEvent, String> {
    let id = |raw: &str| raw.parse::<Identifier>().map_err(|err| err.to_string());
    Ok(CreatedEvent {
        template_id: id("d14e08:Iou:Iou")?,
        contract_id: "00c0ffee".to_string(),
        create_arguments: json!({"issuer": "Bank", "owner": "Alice", "amount": "100.0"}),
        interface_views: vec![InterfaceView {
            interface_id: id("d14e08:Asset:Asset")?,
            view_value: json!({"holder": "Alice"}),
        }],
        signatories: vec!["Bank".to_string()],
        observers: vec!["Alice".to_string()],
    })
}

fn has_archive<T: Companion>(companion: &T) -> bool {
    companion.choice_by_name("Archive").is_some()
}

#[test]
fn both_families_expose_choices_through_the_shared_trait() -> Result<(), String> {
    if !has_archive(iou()?) || !has_archive(asset()?) {
        return Err("Archive should be reachable on the template and the interface".to_string());
    }
    let names: Vec<&str> = iou()?.choice_names().collect();
    if names != ["Archive", "Iou_Transfer"] {
        return Err(format!("unexpected choice names: {names:?}"));
    }
    Ok(())
}

#[test]
fn created_event_decodes_as_template_and_as_interface() -> Result<(), String> {
    let event = created_iou()?;

    let contract = iou()?
        .from_created_event(&event)
        .map_err(|err| err.to_string())?;
    if contract.data.owner != "Alice" || contract.id.value() != "00c0ffee" {
        return Err(format!("unexpected template contract: {contract:?}"));
    }

    let viewed = asset()?
        .from_created_event(&event)
        .map_err(|err| err.to_string())?;
    if viewed.data.holder != "Alice" || viewed.id != contract.id.clone().cast::<Asset>() {
        return Err("interface view should describe the same contract".to_string());
    }
    Ok(())
}

#[test]
fn dynamic_exercise_matches_typed_exercise() -> Result<(), String> {
    let companion = iou()?.contract_type();
    let typed = companion
        .exercise(
            &ContractId::new("00c0ffee"),
            &Iou::CHOICE_TRANSFER,
            &IouTransfer {
                new_owner: "Bob".to_string(),
            },
        )
        .map_err(|err| err.to_string())?;
    let dynamic = companion
        .exercise_by_name("00c0ffee", "Iou_Transfer", json!({"newOwner": "Bob"}))
        .map_err(|err| err.to_string())?;

    if typed != dynamic {
        return Err(format!("typed {typed:?} != dynamic {dynamic:?}"));
    }
    Ok(())
}

#[test]
fn static_companion_is_shared_read_only_across_threads() -> Result<(), String> {
    let expected = iou()?.contract_type().fingerprint();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                IOU.as_ref().ok().map(|companion| {
                    (
                        companion.contract_type().fingerprint(),
                        companion.choice_by_name("Iou_Transfer").is_some(),
                    )
                })
            })
        })
        .collect();

    for handle in handles {
        let seen = handle
            .join()
            .map_err(|_| "reader thread panicked".to_string())?;
        if seen != Some((expected.clone(), true)) {
            return Err(format!("reader saw {seen:?}"));
        }
    }
    Ok(())
}
