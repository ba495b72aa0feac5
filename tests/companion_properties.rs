use ledger_bindings::{AnyChoice, BindingError, ContractCompanion, DynamicChoice, Identifier};
use ledger_bindings::Companion;
use proptest::collection::{hash_set, vec};
use proptest::prelude::*;
use proptest::test_runner::Config;

struct Asset;

fn choice(name: &str) -> AnyChoice<Asset> {
    DynamicChoice::<Asset>::named(name).erase()
}

fn asset_id() -> Identifier {
    "pkg:Mod:Asset"
        .parse()
        .unwrap_or_else(|err| panic!("fixture id should parse: {err}"))
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn distinct_names_build_one_entry_per_choice(
        names in hash_set("[A-Z][A-Za-z0-9_]{0,15}", 0..24)
    ) {
        let records: Vec<AnyChoice<Asset>> = names.iter().map(|name| choice(name)).collect();
        let built = ContractCompanion::new(asset_id(), records.clone());
        prop_assert!(built.is_ok());
        let companion = built.map_err(|err| TestCaseError::fail(err.to_string()))?;
        let table = companion.contract_type().choices();

        prop_assert_eq!(table.size(), records.len());
        for record in &records {
            prop_assert_eq!(table.get(record.name()), Some(record));
        }
        prop_assert_eq!(companion.template_id(), &asset_id());
    }

    #[test]
    fn any_repeated_name_rejects_the_table(
        names in vec("[A-Z][a-z]{0,8}", 1..16),
        repeat in any::<prop::sample::Index>()
    ) {
        let repeated = names[repeat.index(names.len())].clone();
        let mut records: Vec<AnyChoice<Asset>> = names.iter().map(|name| choice(name)).collect();
        records.push(choice(&repeated));

        let built = ContractCompanion::new(asset_id(), records);
        match built {
            Err(BindingError::DuplicateChoice { names: duplicates, .. }) => {
                prop_assert!(duplicates.contains(&repeated));
            }
            other => prop_assert!(false, "expected duplicate error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn ids_with_a_colon_in_any_segment_are_refused_everywhere(
        segment in "[A-Z][a-z]{0,6}:[A-Z][a-z]{0,6}",
        position in 0usize..3
    ) {
        let mut segments = ["pkg".to_string(), "Mod".to_string(), "Asset".to_string()];
        segments[position] = segment;
        let [package, module, entity] = segments;

        let built = Identifier::try_new(package.clone(), module.clone(), entity.clone());
        prop_assert!(matches!(built, Err(BindingError::InvalidIdentifier(_))));
        let text = format!("\"{package}:{module}:{entity}\"");
        prop_assert!(serde_json::from_str::<Identifier>(&text).is_err());
    }

    #[test]
    fn identifier_text_form_parses_back(
        package in "[a-f0-9]{1,64}",
        module in "[A-Z][A-Za-z0-9]{0,10}(\\.[A-Z][A-Za-z0-9]{0,10}){0,3}",
        entity in "[A-Z][A-Za-z0-9_]{0,20}"
    ) {
        let id = Identifier::try_new(package, module, entity)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let parsed = id.to_string().parse::<Identifier>();
        prop_assert_eq!(parsed.ok(), Some(id));
    }
}
