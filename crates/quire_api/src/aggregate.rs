//! Documentation aggregation.
//!
//! Folds one component directory into one [`ComponentDocumentation`]:
//! every implementation file through the extractor, the barrel through the
//! anatomy resolver, keyboard/features through `metadata.json`, and the
//! result persisted wholesale as `auto-api/api.ts`.

use std::path::{Path, PathBuf};

use quire_syntax::FileSystem;

use crate::anatomy::resolve_anatomy;
use crate::error::ApiError;
use crate::extract::{extract, ExtractOptions};
use crate::model::{ComponentDocumentation, ComponentMetadata};

/// The barrel file defining the component's public surface.
pub const BARREL_FILE: &str = "index.ts";
/// Hand-maintained metadata, passed through verbatim.
pub const METADATA_FILE: &str = "metadata.json";
/// Output directory and file of the persisted artifact.
pub const ARTIFACT_DIR: &str = "auto-api";
pub const ARTIFACT_FILE: &str = "api.ts";

const IMPL_EXTENSION: &str = ".tsx";

/// Aggregation options.
#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    pub extract: ExtractOptions,
}

/// Produce the documentation model for one component directory.
///
/// Files are processed in lexicographic order so the output is stable across
/// file systems. Parse failures skip the affected file only; a malformed
/// `metadata.json` fails this directory (the caller logs it and moves on to
/// other components).
pub fn aggregate_component(
    fs: &dyn FileSystem,
    dir: &Path,
    options: &AggregateOptions,
) -> Result<ComponentDocumentation, ApiError> {
    let component_name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ApiError::InvalidDirectory {
            path: dir.display().to_string(),
        })?;

    let mut names = fs.list_dir(dir)?;
    names.sort();

    let mut parts = Vec::new();
    for name in &names {
        if name == BARREL_FILE || !name.ends_with(IMPL_EXTENSION) {
            continue;
        }
        if let Some(entry) = extract(fs, &dir.join(name), &options.extract)? {
            parts.push(entry);
        }
    }

    let metadata = read_metadata(fs, &dir.join(METADATA_FILE))?;

    let barrel = dir.join(BARREL_FILE);
    let anatomy = if fs.exists(&barrel) {
        resolve_anatomy(fs, &barrel, &component_name)
    } else {
        Vec::new()
    };

    Ok(ComponentDocumentation {
        name: component_name,
        parts,
        anatomy,
        keyboard_interactions: metadata.keyboard,
        features: metadata.features,
    })
}

fn read_metadata(fs: &dyn FileSystem, path: &Path) -> Result<ComponentMetadata, ApiError> {
    if !fs.exists(path) {
        return Ok(ComponentMetadata::default());
    }
    let text = fs.read_file(path)?;
    serde_json::from_str(&text).map_err(|source| ApiError::Metadata {
        path: path.display().to_string(),
        source,
    })
}

/// Persist the documentation artifact, overwriting any previous one in full.
///
/// Returns the artifact path.
pub fn write_artifact(
    fs: &dyn FileSystem,
    dir: &Path,
    doc: &ComponentDocumentation,
) -> Result<PathBuf, ApiError> {
    let out_dir = dir.join(ARTIFACT_DIR);
    fs.mkdir(&out_dir)?;
    let path = out_dir.join(ARTIFACT_FILE);
    fs.write_file(&path, &doc.to_module()?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_syntax::MemoryFileSystem;

    fn component_fixture() -> MemoryFileSystem {
        let fs = MemoryFileSystem::new();
        fs.insert(
            "/kit/checkbox/index.ts",
            r#"
export { CheckboxRoot as Root } from './checkbox-root';
export { CheckboxTrigger as Trigger } from './checkbox-trigger';
"#,
        );
        fs.insert(
            "/kit/checkbox/checkbox-root.tsx",
            r#"
/** The container of the checkbox. */
export const CheckboxRoot = component$(({ disabled = false }: PublicRootProps) => {
  return <div data-checked={checked ? '' : undefined} />;
});

export type PublicRootProps = {
  /** Disables the whole checkbox. */
  disabled?: boolean;
};
"#,
        );
        fs.insert(
            "/kit/checkbox/checkbox-trigger.tsx",
            r#"
export type PublicTriggerProps = PropsOf<'button'> & {};
export const CheckboxTrigger = component$(() => <button data-qds-checkbox-trigger />);
"#,
        );
        fs.insert(
            "/kit/checkbox/checkbox-context.tsx",
            "export const checkboxContextId = createContextId('checkbox');",
        );
        fs.insert(
            "/kit/checkbox/metadata.json",
            r#"{ "keyboard": [{ "key": "Space", "comment": "Toggles" }], "features": ["Tri-state"] }"#,
        );
        fs
    }

    #[test]
    fn aggregates_a_component_directory() {
        let fs = component_fixture();
        let doc = aggregate_component(
            &fs,
            Path::new("/kit/checkbox"),
            &AggregateOptions::default(),
        )
        .unwrap();

        assert_eq!(doc.name, "checkbox");
        // context module skipped, files in lexicographic order
        let part_names: Vec<&str> = doc.parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(part_names, vec!["Checkbox Root", "Checkbox Trigger"]);

        let root = &doc.parts[0].api;
        assert_eq!(root.types[0].props[0].prop, "disabled");
        assert_eq!(root.types[0].props[0].default_value.as_deref(), Some("false"));
        assert_eq!(root.data_attributes[0].name, "data-checked");

        let trigger = &doc.parts[1].api;
        assert_eq!(trigger.inherits_from.as_deref(), Some("button"));
        // internal namespace attribute is not documented
        assert!(trigger.data_attributes.is_empty());

        assert_eq!(doc.anatomy[0].name, "Checkbox.Root");
        assert_eq!(
            doc.anatomy[0].description.as_deref(),
            Some("The container of the checkbox.")
        );
        assert_eq!(doc.keyboard_interactions[0].key, "Space");
        assert_eq!(doc.features, vec!["Tri-state"]);
    }

    #[test]
    fn writes_artifact_to_auto_api() {
        let fs = component_fixture();
        let doc = aggregate_component(
            &fs,
            Path::new("/kit/checkbox"),
            &AggregateOptions::default(),
        )
        .unwrap();
        let path = write_artifact(&fs, Path::new("/kit/checkbox"), &doc).unwrap();
        assert_eq!(path, PathBuf::from("/kit/checkbox/auto-api/api.ts"));

        let written = fs.get(&path).unwrap();
        assert!(written.starts_with("export const api = {"));
        assert!(written.contains("\"checkbox\": ["));
        assert!(written.contains("\"keyboardInteractions\""));
    }

    #[test]
    fn malformed_metadata_fails_this_directory_only() {
        let fs = component_fixture();
        fs.insert("/kit/checkbox/metadata.json", "{ not json");
        let err = aggregate_component(
            &fs,
            Path::new("/kit/checkbox"),
            &AggregateOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Metadata { .. }));
    }

    #[test]
    fn missing_metadata_defaults_to_empty_lists() {
        let fs = MemoryFileSystem::new();
        fs.insert("/kit/empty/part-root.tsx", "export const a = 1;");
        let doc =
            aggregate_component(&fs, Path::new("/kit/empty"), &AggregateOptions::default())
                .unwrap();
        assert!(doc.keyboard_interactions.is_empty());
        assert!(doc.features.is_empty());
        assert!(doc.anatomy.is_empty());
    }
}
