use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    manifest_path: PathBuf,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    #[serde(default)]
    kind: Option<String>,
}

/// Internal crates each workspace crate may depend on.
fn allowed_internal_deps() -> BTreeMap<&'static str, BTreeSet<&'static str>> {
    BTreeMap::from([
        ("easynpc-domain", BTreeSet::new()),
        ("easynpc-shared", BTreeSet::from(["easynpc-domain"])),
        (
            "easynpc-engine",
            BTreeSet::from(["easynpc-domain", "easynpc-shared"]),
        ),
        (
            "easynpc-player",
            BTreeSet::from(["easynpc-domain", "easynpc-shared"]),
        ),
    ])
}

/// Crates that must stay out of the pure domain crate.
const DOMAIN_FORBIDDEN_CRATES: &[&str] = &["tokio", "axum", "tower-http", "dashmap"];

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let rules = allowed_internal_deps();
    let mut violations = Vec::new();

    for package in &metadata.packages {
        let Some(allowed) = rules.get(package.name.as_str()) else {
            continue;
        };

        for dep in &package.dependencies {
            if dep.kind.as_deref() == Some("dev") {
                continue;
            }
            if dep.name.starts_with("easynpc-") && !allowed.contains(dep.name.as_str()) {
                violations.push(format!("{} must not depend on {}", package.name, dep.name));
            }
            if package.name == "easynpc-domain" && DOMAIN_FORBIDDEN_CRATES.contains(&dep.name.as_str())
            {
                violations.push(format!("easynpc-domain must not depend on {}", dep.name));
            }
        }

        if package.name == "easynpc-domain" {
            let src = package
                .manifest_path
                .parent()
                .map(|dir| dir.join("src"))
                .context("domain manifest has no parent directory")?;
            violations.extend(scan_domain_sources(&src)?);
        }
    }

    if violations.is_empty() {
        println!("arch-check: ok ({} packages)", metadata.packages.len());
        Ok(())
    } else {
        for violation in &violations {
            eprintln!("arch-check: {violation}");
        }
        anyhow::bail!("{} architecture violation(s)", violations.len())
    }
}

/// The domain crate must not do I/O.
fn scan_domain_sources(dir: &Path) -> anyhow::Result<Vec<String>> {
    let io_use = regex_lite::Regex::new(r"(?m)^\s*use\s+(std::(fs|net|process)|tokio)\b")
        .context("compiling import pattern")?;

    let mut violations = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let source = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                if let Some(found) = io_use.find(&source) {
                    violations.push(format!(
                        "{} performs I/O: `{}`",
                        path.display(),
                        found.as_str().trim()
                    ));
                }
            }
        }
    }
    Ok(violations)
}
