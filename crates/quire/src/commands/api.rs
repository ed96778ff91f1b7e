//! Api command - generate component documentation artifacts.

use std::path::PathBuf;

use clap::Args;

use quire_api::{
    aggregate_component, generate_markdown, write_artifact, AggregateOptions, ARTIFACT_DIR,
};
use quire_syntax::{FileSystem, OsFileSystem};

#[derive(Args, Debug, Default)]
pub struct ApiArgs {
    /// Components root directory (one subdirectory per component)
    #[arg(default_value = "./src/components")]
    pub root: PathBuf,

    /// Also emit a Markdown summary next to each generated api.ts
    #[arg(long)]
    pub markdown: bool,
}

pub fn run(args: ApiArgs) {
    let fs = OsFileSystem;
    let summary = generate(&fs, &args);

    println!(
        "Generated {} component API{}, {} failed",
        summary.success,
        if summary.success == 1 { "" } else { "s" },
        summary.failed
    );
    if summary.failed > 0 {
        std::process::exit(1);
    }
}

#[derive(Debug, Default)]
struct GenerateSummary {
    success: usize,
    failed: usize,
}

/// One pass over the component directories, in lexicographic order.
/// A failing component is reported and the run keeps going.
fn generate(fs: &dyn FileSystem, args: &ApiArgs) -> GenerateSummary {
    let mut summary = GenerateSummary::default();

    let mut names = match fs.list_dir(&args.root) {
        Ok(names) => names,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", args.root.display());
            summary.failed += 1;
            return summary;
        }
    };
    names.sort();

    let options = AggregateOptions::default();

    for name in &names {
        let dir = args.root.join(name);
        // Plain files at the root are not component directories.
        if fs.list_dir(&dir).is_err() {
            continue;
        }

        let doc = match aggregate_component(fs, &dir, &options) {
            Ok(doc) => doc,
            Err(err) => {
                eprintln!("error: {name}: {err}");
                summary.failed += 1;
                continue;
            }
        };

        match write_artifact(fs, &dir, &doc) {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "wrote documentation artifact");
                if args.markdown {
                    let md_path = dir.join(ARTIFACT_DIR).join("api.md");
                    if let Err(err) = fs.write_file(&md_path, &generate_markdown(&doc)) {
                        eprintln!("error: {name}: {err}");
                        summary.failed += 1;
                        continue;
                    }
                }
                summary.success += 1;
            }
            Err(err) => {
                eprintln!("error: {name}: {err}");
                summary.failed += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &std::path::Path, name: &str, text: &str) {
        fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn generates_artifacts_for_each_component() {
        let root = tempfile::tempdir().unwrap();
        let checkbox = root.path().join("checkbox");
        fs::create_dir(&checkbox).unwrap();
        write(
            &checkbox,
            "checkbox-root.tsx",
            "export type PublicRootProps = { checked?: boolean };\nexport const CheckboxRoot = component$(() => <div data-checked />);\n",
        );
        write(
            &checkbox,
            "index.ts",
            "export { CheckboxRoot as Root } from './checkbox-root';\n",
        );

        let args = ApiArgs {
            root: root.path().to_path_buf(),
            markdown: true,
        };
        let summary = generate(&OsFileSystem, &args);
        assert_eq!(summary.success, 1);
        assert_eq!(summary.failed, 0);

        let api = fs::read_to_string(checkbox.join("auto-api/api.ts")).unwrap();
        assert!(api.starts_with("export const api = {"));
        assert!(api.contains("\"checkbox\": ["));
        assert!(api.contains("PublicRootProps"));

        let md = fs::read_to_string(checkbox.join("auto-api/api.md")).unwrap();
        assert!(md.starts_with("# Checkbox"));
    }

    #[test]
    fn broken_metadata_fails_one_component_not_the_run() {
        let root = tempfile::tempdir().unwrap();
        for name in ["alpha", "beta"] {
            let dir = root.path().join(name);
            fs::create_dir(&dir).unwrap();
            write(&dir, "part-root.tsx", "export const a = 1;\n");
        }
        write(&root.path().join("alpha"), "metadata.json", "{ broken");

        let args = ApiArgs {
            root: root.path().to_path_buf(),
            markdown: false,
        };
        let summary = generate(&OsFileSystem, &args);
        assert_eq!(summary.success, 1);
        assert_eq!(summary.failed, 1);
        assert!(root.path().join("beta/auto-api/api.ts").exists());
        assert!(!root.path().join("alpha/auto-api/api.ts").exists());
    }
}
