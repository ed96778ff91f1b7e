//! Promote command - apply a type-promotion request file.

use std::path::PathBuf;

use clap::Args;

use quire_promote::{apply_request, PromotionRequest};
use quire_syntax::{FileSystem, OsFileSystem};

#[derive(Args, Debug)]
pub struct PromoteArgs {
    /// Promotion request file: a JSON array of { filename, comments } records
    pub request: PathBuf,

    /// Directory the request's filenames are relative to
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

pub fn run(args: PromoteArgs) {
    let fs = OsFileSystem;
    match apply(&fs, &args) {
        Ok(summary) => {
            println!(
                "Promoted {} file{}, {} unchanged, {} failed",
                summary.changed,
                if summary.changed == 1 { "" } else { "s" },
                summary.unchanged,
                summary.failed
            );
            if summary.failed > 0 {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Default)]
struct PromoteSummary {
    changed: usize,
    unchanged: usize,
    failed: usize,
}

/// An unreadable or malformed request file is fatal; a failing target file
/// is reported and the rest of the request still applies.
fn apply(fs: &dyn FileSystem, args: &PromoteArgs) -> Result<PromoteSummary, Box<dyn std::error::Error>> {
    let text = fs.read_file(&args.request)?;
    let requests: Vec<PromotionRequest> = serde_json::from_str(&text)?;

    let mut summary = PromoteSummary::default();
    for request in &requests {
        match apply_request(fs, &args.root, request) {
            Ok(true) => summary.changed += 1,
            Ok(false) => summary.unchanged += 1,
            Err(err) => {
                eprintln!("error: {}: {err}", request.filename);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn applies_a_request_file() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("switch-root.tsx");
        fs::write(&file, "type RootProps = { checked?: boolean };\n").unwrap();

        let request = root.path().join("promotions.json");
        fs::write(
            &request,
            r#"[{ "filename": "switch-root.tsx", "comments": [{ "targetLine": "type RootProps" }] }]"#,
        )
        .unwrap();

        let args = PromoteArgs {
            request,
            root: root.path().to_path_buf(),
        };
        let summary = apply(&OsFileSystem, &args).unwrap();
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.failed, 0);

        let rewritten = fs::read_to_string(&file).unwrap();
        assert!(rewritten.contains("PublicRootProps"));

        // Re-applying converges.
        let args = PromoteArgs {
            request: root.path().join("promotions.json"),
            root: root.path().to_path_buf(),
        };
        let summary = apply(&OsFileSystem, &args).unwrap();
        assert_eq!(summary.changed, 0);
        assert_eq!(summary.unchanged, 1);
    }

    #[test]
    fn missing_target_file_fails_that_entry_only() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("a.tsx"), "type AProps = {};\n").unwrap();
        let request = root.path().join("promotions.json");
        fs::write(
            &request,
            r#"[
  { "filename": "missing.tsx", "comments": [{ "targetLine": "type XProps" }] },
  { "filename": "a.tsx", "comments": [{ "targetLine": "type AProps" }] }
]"#,
        )
        .unwrap();

        let args = PromoteArgs {
            request,
            root: root.path().to_path_buf(),
        };
        let summary = apply(&OsFileSystem, &args).unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.changed, 1);
    }
}
