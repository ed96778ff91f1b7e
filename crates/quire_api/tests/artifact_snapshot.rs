//! Snapshot tests for the persisted artifact and its Markdown companion.
//!
//! These pin the exact output shape: the generated `api.ts` module is
//! consumed verbatim by documentation sites, so shape drift is a breaking
//! change.

use quire_api::{
    AnatomyItem, ComponentDocumentation, KeyEntry, ParsedProp, PublicTypeGroup, SubComponent,
    SubComponentEntry,
};

fn switch_doc() -> ComponentDocumentation {
    ComponentDocumentation {
        name: "switch".into(),
        parts: vec![SubComponentEntry {
            name: "Switch Root".into(),
            api: SubComponent {
                types: vec![PublicTypeGroup {
                    name: "PublicRootProps".into(),
                    props: vec![ParsedProp {
                        comment: "Disabled state.".into(),
                        prop: "disabled".into(),
                        prop_type: "boolean".into(),
                        default_value: Some("false".into()),
                    }],
                }],
                inherits_from: Some("button".into()),
                data_attributes: vec![],
            },
        }],
        anatomy: vec![AnatomyItem {
            name: "Switch.Root".into(),
            description: Some("The toggle container.".into()),
        }],
        keyboard_interactions: vec![KeyEntry {
            key: "Space".into(),
            comment: "Toggles.".into(),
        }],
        features: vec!["ARIA switch".into()],
    }
}

#[test]
fn artifact_module() {
    insta::assert_snapshot!(switch_doc().to_module().unwrap());
}

#[test]
fn markdown_summary() {
    insta::assert_snapshot!(quire_api::generate_markdown(&switch_doc()));
}
