//! Anatomy resolution.
//!
//! A component's public surface is defined by its barrel file: every renamed
//! re-export (`export { CheckboxRoot as Root }`) is one anatomy part, in
//! declaration order. Descriptions are mined from the sibling file the
//! original identifier points at: its first top-level exported variable
//! statement that carries a leading comment.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{Declaration, ModuleExportName, Statement};
use oxc_span::GetSpan;

use quire_syntax::{leading_comment, parse_tsx, FileSystem};

use crate::model::AnatomyItem;

/// Implementation extension of sibling part files.
const IMPL_EXTENSION: &str = ".tsx";

/// Resolve the anatomy of a component from its barrel file.
///
/// Missing sibling files and unparsable files are not errors: the affected
/// item simply carries no description. An unparsable barrel yields an empty
/// anatomy (logged).
pub fn resolve_anatomy(
    fs: &dyn FileSystem,
    barrel_path: &Path,
    component_name: &str,
) -> Vec<AnatomyItem> {
    let source = match fs.read_file(barrel_path) {
        Ok(source) => source,
        Err(err) => {
            tracing::warn!(path = %barrel_path.display(), error = %err, "cannot read barrel file");
            return Vec::new();
        }
    };

    let allocator = Allocator::default();
    let parsed = match parse_tsx(&allocator, &source, barrel_path) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(path = %barrel_path.display(), error = %err, "cannot parse barrel file");
            return Vec::new();
        }
    };

    let component = capitalize(component_name);
    let mut items = Vec::new();

    for stmt in parsed.program.body.iter() {
        let Statement::ExportNamedDeclaration(export) = stmt else {
            continue;
        };
        if export.declaration.is_some() {
            continue;
        }
        for specifier in export.specifiers.iter() {
            // A plain `export { Root }` re-uses one identifier node for both
            // sides; a rename (`export { CheckboxRoot as Root }`) has two
            // distinct nodes. `export { Root as Root }` therefore counts.
            if specifier.local.span() == specifier.exported.span() {
                continue;
            }
            let exported = export_name(&specifier.exported);
            let original = export_name(&specifier.local);

            items.push(AnatomyItem {
                name: format!("{component}.{exported}"),
                description: mine_description(fs, barrel_path, original),
            });
        }
    }

    items
}

/// Look for the part's implementation file next to the barrel and mine its
/// description comment.
fn mine_description(fs: &dyn FileSystem, barrel_path: &Path, original: &str) -> Option<String> {
    let dir = barrel_path.parent()?;
    let sibling = dir.join(format!("{}{IMPL_EXTENSION}", kebab_case(original)));
    if !fs.exists(&sibling) {
        return None;
    }

    let source = fs.read_file(&sibling).ok()?;
    let allocator = Allocator::default();
    let parsed = match parse_tsx(&allocator, &source, &sibling) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(path = %sibling.display(), error = %err, "cannot parse sibling file");
            return None;
        }
    };

    // First top-level exported variable statement with a leading comment.
    for stmt in parsed.program.body.iter() {
        let Statement::ExportNamedDeclaration(export) = stmt else {
            continue;
        };
        let Some(Declaration::VariableDeclaration(_)) = &export.declaration else {
            continue;
        };
        if let Some(comment) = leading_comment(&parsed.program.comments, &source, stmt.span().start)
        {
            return Some(comment);
        }
    }

    None
}

fn export_name<'a>(name: &'a ModuleExportName<'_>) -> &'a str {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.as_str(),
        ModuleExportName::IdentifierReference(ident) => ident.name.as_str(),
        ModuleExportName::StringLiteral(s) => s.value.as_str(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Derive the sibling file name from an exported identifier: a hyphen goes
/// between a lowercase letter or digit and an uppercase letter, then the
/// whole string is lowercased (`"CheckboxHiddenInput"` → `"checkbox-hidden-input"`).
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower_or_digit = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev_lower_or_digit {
            out.push('-');
        }
        prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        out.push(c.to_ascii_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_syntax::MemoryFileSystem;

    #[test]
    fn kebab_case_splits_camel_humps() {
        assert_eq!(kebab_case("CheckboxRoot"), "checkbox-root");
        assert_eq!(kebab_case("CheckboxHiddenInput"), "checkbox-hidden-input");
        assert_eq!(kebab_case("Item2Label"), "item2-label");
        assert_eq!(kebab_case("root"), "root");
    }

    #[test]
    fn anatomy_preserves_declaration_order() {
        let fs = MemoryFileSystem::new();
        fs.insert(
            "/kit/checkbox/index.ts",
            r#"
export { CheckboxRoot as Root } from './checkbox-root';
export { CheckboxItem as Item } from './checkbox-item';
export { CheckboxTrigger as Trigger } from './checkbox-trigger';
"#,
        );
        let items = resolve_anatomy(&fs, Path::new("/kit/checkbox/index.ts"), "checkbox");
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Checkbox.Root", "Checkbox.Item", "Checkbox.Trigger"]
        );
    }

    #[test]
    fn same_name_rename_counts() {
        let fs = MemoryFileSystem::new();
        fs.insert("/kit/tabs/index.ts", "export { Root as Root } from './root';");
        let items = resolve_anatomy(&fs, Path::new("/kit/tabs/index.ts"), "tabs");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Tabs.Root");
    }

    #[test]
    fn plain_reexport_is_not_an_anatomy_part() {
        let fs = MemoryFileSystem::new();
        fs.insert("/kit/tabs/index.ts", "export { useTabs } from './use-tabs';");
        let items = resolve_anatomy(&fs, Path::new("/kit/tabs/index.ts"), "tabs");
        assert!(items.is_empty());
    }

    #[test]
    fn description_mined_from_sibling() {
        let fs = MemoryFileSystem::new();
        fs.insert(
            "/kit/checkbox/index.ts",
            "export { CheckboxRoot as Root } from './checkbox-root';",
        );
        fs.insert(
            "/kit/checkbox/checkbox-root.tsx",
            "const helper = 1;\n/** The clickable container of the checkbox. */\nexport const CheckboxRoot = component$(() => <div />);\n",
        );
        let items = resolve_anatomy(&fs, Path::new("/kit/checkbox/index.ts"), "checkbox");
        assert_eq!(
            items[0].description.as_deref(),
            Some("The clickable container of the checkbox.")
        );
    }

    #[test]
    fn missing_sibling_is_not_an_error() {
        let fs = MemoryFileSystem::new();
        fs.insert(
            "/kit/checkbox/index.ts",
            "export { CheckboxRoot as Root } from './checkbox-root';",
        );
        let items = resolve_anatomy(&fs, Path::new("/kit/checkbox/index.ts"), "checkbox");
        assert_eq!(items.len(), 1);
        assert!(items[0].description.is_none());
    }
}
