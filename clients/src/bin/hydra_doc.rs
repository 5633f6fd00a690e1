//! `hydra-doc` — Builds a compact Hydra API Documentation into its canonical
//! form.
//!
//! **Outputs** (with `--out <dir>`):
//! - `<dir>/<doc-name>.jsonld` — the canonical API Documentation
//! - `<dir>/EntryPoint.jsonld` — the live EntryPoint object
//! - `<dir>/contexts/EntryPoint.jsonld` — the EntryPoint context
//! - `<dir>/contexts/<path>.jsonld` — one context per class and collection
//!
//! Without `--out` the canonical document (or, with `--live`, the live
//! EntryPoint) is printed on stdout.
//!
//! **Usage:**
//! ```
//! hydra-doc <input> [--config <file>] [--server-url <url>] [--api-name <name>] [--out <dir>] [--live]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use hydra_doc::{build, ApiDoc, BuildOptions};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Build a Hydra API Documentation.
#[derive(Parser)]
#[command(name = "hydra-doc", about = "Build a Hydra API Documentation")]
struct Args {
    /// Compact JSON-LD API Documentation to build.
    input: PathBuf,

    /// TOML file holding `server_url` and `api_name`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL the API is served under; overrides the config file.
    #[arg(long)]
    server_url: Option<String>,

    /// API name; overrides the config file.
    #[arg(long)]
    api_name: Option<String>,

    /// Output directory for the generated artifacts.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the live EntryPoint instead of the canonical document.
    #[arg(long)]
    live: bool,
}

impl Args {
    /// Build options from the config file, with command-line flags on top.
    fn options(&self) -> Result<BuildOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?
            }
            None => BuildOptions::default(),
        };
        if let Some(server_url) = &self.server_url {
            options.server_url = Some(server_url.clone());
        }
        if let Some(api_name) = &self.api_name {
            options.api_name = Some(api_name.clone());
        }
        Ok(options)
    }
}

/// Every artifact written by `--out`, relative to the output directory.
fn artifacts(doc: &ApiDoc) -> Result<Vec<(PathBuf, Value)>> {
    let contexts = Path::new("contexts");
    let mut artifacts = vec![
        (artifact_name(&doc.doc_name)?, doc.generate()),
        (PathBuf::from("EntryPoint.jsonld"), doc.entrypoint().get()),
        (
            contexts.join("EntryPoint.jsonld"),
            wrap_context(doc.entrypoint().context().generate()),
        ),
    ];
    for entry in doc.classes() {
        artifacts.push((
            contexts.join(artifact_name(&entry.path)?),
            wrap_context(entry.context().generate()),
        ));
    }
    for entry in doc.collections() {
        artifacts.push((
            contexts.join(artifact_name(&entry.path)?),
            wrap_context(entry.context().generate()),
        ));
    }
    Ok(artifacts)
}

/// `<name>.jsonld`, provided `name` is a single plain path segment. Serving
/// paths come from the input document and must not leave the output
/// directory.
fn artifact_name(name: &str) -> Result<PathBuf> {
    let file = PathBuf::from(format!("{name}.jsonld"));
    let mut components = file.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(file),
        _ => anyhow::bail!("Refusing to write artifact outside the output directory: {name}"),
    }
}

fn wrap_context(context: Value) -> Value {
    serde_json::json!({ "@context": context })
}

fn write_artifacts(out: &Path, doc: &ApiDoc) -> Result<()> {
    for (relative, value) in artifacts(doc)? {
        let path = out.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(&value)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  Written: {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = args.options()?;

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let document: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {} as JSON", args.input.display()))?;
    let doc = build(&document, &options)
        .with_context(|| format!("Failed to build {}", args.input.display()))?;
    info!(namespace = doc.namespace().base(), "document built");

    match &args.out {
        Some(out) => {
            write_artifacts(out, &doc)?;
            println!("Build complete.");
        }
        None => {
            let value = if args.live {
                doc.entrypoint().get()
            } else {
                doc.generate()
            };
            let text =
                serde_json::to_string_pretty(&value).context("Failed to serialize output")?;
            println!("{text}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn drone_doc() -> ApiDoc {
        build(&drone_document("drones"), &BuildOptions::default()).expect("fixture builds")
    }

    fn drone_document(path: &str) -> Value {
        json!({
            "@context": {
                "hydra": "http://www.w3.org/ns/hydra/core#",
                "rdfs": "http://www.w3.org/2000/01/rdf-schema#",
                "vocab": { "@id": "http://localhost:8080/api/vocab?resource=", "@prefix": true },
                "entrypoint": { "@id": "hydra:entrypoint", "@type": "@id" },
                "supportedClass": "hydra:supportedClass",
                "supportedProperty": "hydra:supportedProperty",
                "property": { "@id": "hydra:property", "@type": "@id" },
                "title": "hydra:title",
                "readable": "hydra:readable",
                "writeable": "hydra:writeable",
                "required": "hydra:required",
                "domain": { "@id": "rdfs:domain", "@type": "@id" },
                "range": { "@id": "rdfs:range", "@type": "@id" }
            },
            "@id": "http://localhost:8080/api/vocab",
            "@type": "hydra:ApiDocumentation",
            "entrypoint": "http://localhost:8080/api",
            "supportedClass": [
                { "@id": "vocab:Drone", "title": "Drone" },
                {
                    "@id": "vocab:EntryPoint",
                    "supportedProperty": [{
                        "property": {
                            "@id": format!("vocab:EntryPoint/{path}"),
                            "@type": "hydra:Link",
                            "title": "Drone",
                            "domain": "vocab:EntryPoint",
                            "range": "vocab:Drone"
                        },
                        "title": "drone",
                        "readable": "true",
                        "writeable": "false",
                        "required": "null"
                    }]
                }
            ]
        })
    }

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from(["hydra-doc", "api.jsonld", "--api-name", "fleet"]);
        let options = args.options().expect("no config to read");
        assert_eq!(options.api_name.as_deref(), Some("fleet"));
        assert_eq!(options.server_url, None);
    }

    #[test]
    fn config_file_shape() {
        let options: BuildOptions =
            toml::from_str("server_url = \"http://hydrus.com/\"").expect("valid TOML");
        assert_eq!(options.server_url.as_deref(), Some("http://hydrus.com/"));
        assert_eq!(options.api_name, None);
    }

    #[test]
    fn artifact_layout() {
        let doc = drone_doc();
        let paths: Vec<_> = artifacts(&doc)
            .expect("plain paths")
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("vocab.jsonld"),
                PathBuf::from("EntryPoint.jsonld"),
                Path::new("contexts").join("EntryPoint.jsonld"),
                Path::new("contexts").join("drones.jsonld"),
            ]
        );
    }

    #[test]
    fn contexts_are_wrapped() {
        let doc = drone_doc();
        let (_, context) = artifacts(&doc)
            .expect("plain paths")
            .into_iter()
            .find(|(path, _)| path.ends_with("drones.jsonld"))
            .expect("class context");
        assert_eq!(
            context["@context"]["Drone"],
            "http://localhost:8080/api/vocab?resource=Drone"
        );
    }

    #[test]
    fn serving_paths_stay_inside_the_output_directory() {
        for path in ["%2Ftmp%2Fpwned", "..%2F..%2Fetc%2Fcron", "a%2Fb"] {
            let doc = build(&drone_document(path), &BuildOptions::default()).expect("builds");
            let err = artifacts(&doc).expect_err("escaping path is rejected");
            assert!(err.to_string().contains("outside the output directory"));
        }
    }

    #[test]
    fn artifact_names_are_single_segments() {
        assert_eq!(
            artifact_name("drone logs").expect("plain"),
            PathBuf::from("drone logs.jsonld")
        );
        assert!(artifact_name("/tmp/pwned").is_err());
        assert!(artifact_name("../x").is_err());
    }
}
