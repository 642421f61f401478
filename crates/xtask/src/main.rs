use std::path::Path;

use anyhow::Context;
use sceneforge_engine::infrastructure::catalog_loader::{load_catalog, CatalogLoadError};

/// Crates that must stay free of runtime and storage dependencies.
const PURE_CRATES: &[&str] = &["sceneforge-domain", "sceneforge-shared"];
const FORBIDDEN_DEPS: &[&str] = &["tokio", "sqlx", "tracing-subscriber", "dotenvy"];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some("validate-catalog") => {
            let path = args
                .next()
                .unwrap_or_else(|| "content/scenes.json".to_string());
            validate_catalog(Path::new(&path))
        }
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!(
            "Usage: cargo xtask <command>\n\nCommands:\n  arch-check\n  validate-catalog [path]"
        ),
    }
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: serde_json::Value =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let packages = metadata["packages"]
        .as_array()
        .context("cargo metadata has no packages")?;

    let mut violations = Vec::new();
    for package in packages {
        let Some(name) = package["name"].as_str() else {
            continue;
        };
        if !PURE_CRATES.contains(&name) {
            continue;
        }
        let deps = package["dependencies"].as_array().into_iter().flatten();
        for dep in deps {
            let dep_name = dep["name"].as_str().unwrap_or_default();
            let is_dev = dep["kind"].as_str() == Some("dev");
            if !is_dev && FORBIDDEN_DEPS.contains(&dep_name) {
                violations.push(format!("{name} depends on {dep_name}"));
            }
        }
    }

    if violations.is_empty() {
        println!("arch-check: ok");
        return Ok(());
    }
    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("{} architecture violation(s)", violations.len())
}

fn validate_catalog(path: &Path) -> anyhow::Result<()> {
    match load_catalog(path) {
        Ok(catalog) => {
            println!(
                "{}: ok ({} scenes, initial route '{}')",
                path.display(),
                catalog.scenes().len(),
                catalog.initial_route()
            );
            Ok(())
        }
        Err(CatalogLoadError::Invalid(err)) => {
            for issue in &err.issues {
                eprintln!("{}: {issue}", path.display());
            }
            anyhow::bail!("{} issue(s) in {}", err.issues.len(), path.display())
        }
        Err(err) => Err(err).with_context(|| format!("loading {}", path.display())),
    }
}
