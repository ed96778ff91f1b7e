//! Markdown rendering of the documentation model.
//!
//! A human-readable companion to the generated `api.ts` artifact: prop
//! tables per part, the anatomy listing, and keyboard interactions.

use crate::model::ComponentDocumentation;

/// Render the documentation model as a Markdown page.
pub fn generate_markdown(doc: &ComponentDocumentation) -> String {
    let mut md = String::with_capacity(4096);

    md.push_str("# ");
    md.push_str(&capitalize(&doc.name));
    md.push_str("\n\n");

    if !doc.features.is_empty() {
        md.push_str("## Features\n\n");
        for feature in &doc.features {
            md.push_str("- ");
            md.push_str(feature);
            md.push('\n');
        }
        md.push('\n');
    }

    if !doc.anatomy.is_empty() {
        md.push_str("## Anatomy\n\n");
        for item in &doc.anatomy {
            md.push_str("- `");
            md.push_str(&item.name);
            md.push('`');
            if let Some(description) = &item.description {
                md.push_str(" - ");
                md.push_str(&flatten(description));
            }
            md.push('\n');
        }
        md.push('\n');
    }

    for part in &doc.parts {
        md.push_str("## ");
        md.push_str(&part.name);
        md.push_str("\n\n");

        if let Some(element) = &part.api.inherits_from {
            md.push_str(&format!("Renders a `<{element}>` element.\n\n"));
        }

        for group in &part.api.types {
            if group.props.is_empty() {
                continue;
            }
            md.push_str("| Prop | Type | Default | Description |\n");
            md.push_str("|------|------|---------|-------------|\n");
            for prop in &group.props {
                md.push_str(&format!(
                    "| `{}` | `{}` | {} | {} |\n",
                    prop.prop,
                    if prop.prop_type.is_empty() {
                        "-"
                    } else {
                        prop.prop_type.as_str()
                    },
                    prop.default_value
                        .as_deref()
                        .map(|v| format!("`{v}`"))
                        .unwrap_or_else(|| "-".to_string()),
                    flatten(&prop.comment),
                ));
            }
            md.push('\n');
        }

        if !part.api.data_attributes.is_empty() {
            md.push_str("| Data attribute | Type |\n");
            md.push_str("|----------------|------|\n");
            for attr in &part.api.data_attributes {
                md.push_str(&format!("| `{}` | `{}` |\n", attr.name, attr.attr_type));
            }
            md.push('\n');
        }
    }

    if !doc.keyboard_interactions.is_empty() {
        md.push_str("## Keyboard interactions\n\n");
        md.push_str("| Key | Behavior |\n");
        md.push_str("|-----|----------|\n");
        for entry in &doc.keyboard_interactions {
            md.push_str(&format!(
                "| `{}` | {} |\n",
                entry.key,
                flatten(&entry.comment)
            ));
        }
        md.push('\n');
    }

    md
}

/// Multi-line comments collapse to one table-cell line.
fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
