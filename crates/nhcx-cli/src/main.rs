//! nhcx - command-line front end for the policy-to-bundle pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use nhcx_domain::fhir::Bundle;
use nhcx_domain::traits::LlmProvider;
use nhcx_llm::OllamaProvider;
use nhcx_mapper::BundleMapper;
use nhcx_pruner::{PolicyPruner, PrunerConfig};
use nhcx_schema::{parse_llm_response, PromptBuilder, SchemaTemplate};
use nhcx_terminology::TerminologyDict;
use nhcx_validator::{validate, Severity};

/// Convert insurance policy documents into NHCX-compliant FHIR bundles
#[derive(Parser)]
#[command(name = "nhcx", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove boilerplate sections from extracted policy text
    Prune {
        /// Policy text file (markdown-ish, UTF-8)
        file: PathBuf,

        /// TOML file overriding the discard-pattern set
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Map an extracted JSON document to a FHIR bundle
    Map {
        /// Extracted document (JSON matching the schema template)
        file: PathBuf,

        /// Terminology dictionary JSON overriding the built-in one
        #[arg(long)]
        dictionary: Option<PathBuf>,

        /// Pretty-print the bundle
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a FHIR bundle and report issues
    Validate {
        /// Bundle JSON file
        file: PathBuf,
    },

    /// Full pipeline: prune, extract via Ollama, map, validate
    Extract {
        /// Policy text file
        file: PathBuf,

        /// Ollama model name
        #[arg(long, default_value = "llama3")]
        model: String,

        /// Ollama endpoint
        #[arg(long, default_value = nhcx_llm::ollama::DEFAULT_ENDPOINT, env = "NHCX_OLLAMA_ENDPOINT")]
        endpoint: String,

        /// Terminology dictionary JSON overriding the built-in one
        #[arg(long)]
        dictionary: Option<PathBuf>,

        /// Pretty-print the bundle
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Prune { file, config } => prune(&file, config.as_deref()),
        Command::Map {
            file,
            dictionary,
            pretty,
        } => map(&file, dictionary.as_deref(), pretty),
        Command::Validate { file } => validate_file(&file),
        Command::Extract {
            file,
            model,
            endpoint,
            dictionary,
            pretty,
        } => extract(&file, &model, &endpoint, dictionary.as_deref(), pretty),
    }
}

fn prune(file: &Path, config: Option<&Path>) -> Result<()> {
    let text = read(file)?;
    let pruner = match config {
        Some(path) => {
            let toml_str = read(path)?;
            let config = PrunerConfig::from_toml(&toml_str)
                .map_err(|e| anyhow::anyhow!(e))
                .with_context(|| format!("loading {}", path.display()))?;
            PolicyPruner::new(config)
        }
        None => PolicyPruner::default(),
    };
    print!("{}", pruner.prune(&text));
    Ok(())
}

fn map(file: &Path, dictionary: Option<&Path>, pretty: bool) -> Result<()> {
    let raw: serde_json::Value =
        serde_json::from_str(&read(file)?).with_context(|| format!("parsing {}", file.display()))?;
    let dict = load_dictionary(dictionary)?;

    let bundle = BundleMapper::new(&dict)
        .map_value(&raw)
        .context("mapping extracted document")?;

    print_bundle(&bundle, pretty)
}

fn validate_file(file: &Path) -> Result<()> {
    let bundle: Bundle = serde_json::from_str(&read(file)?)
        .with_context(|| format!("parsing bundle {}", file.display()))?;

    let issues = validate(&bundle);
    println!("{}", serde_json::to_string_pretty(&issues)?);

    let error_count = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    if error_count > 0 {
        bail!("bundle has {error_count} error(s)");
    }
    Ok(())
}

fn extract(
    file: &Path,
    model: &str,
    endpoint: &str,
    dictionary: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let text = read(file)?;
    let pruned = PolicyPruner::default().prune(&text);
    info!(
        original = text.len(),
        pruned = pruned.len(),
        "pruned policy text"
    );

    let template = SchemaTemplate::v1();
    let builder = PromptBuilder::new(pruned);
    let prompt = builder.build(&template);
    let schema = builder.schema_document(&template);

    let provider = OllamaProvider::new(endpoint, model)?;
    let response = provider
        .generate_structured(&prompt, &schema)
        .context("LLM extraction")?;

    let data = parse_llm_response(&template, &response).context("parsing LLM response")?;

    let dict = load_dictionary(dictionary)?;
    let bundle = BundleMapper::new(&dict)
        .map(&data)
        .context("mapping extracted document")?;

    let issues = validate(&bundle);
    for issue in &issues {
        info!("{}", issue);
    }

    print_bundle(&bundle, pretty)
}

fn load_dictionary(path: Option<&Path>) -> Result<TerminologyDict> {
    match path {
        Some(path) => TerminologyDict::from_json(&read(path)?)
            .with_context(|| format!("loading dictionary {}", path.display())),
        None => Ok(TerminologyDict::builtin()),
    }
}

fn print_bundle(bundle: &Bundle, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(bundle)?
    } else {
        serde_json::to_string(bundle)?
    };
    println!("{rendered}");
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_map_then_validate_round_trip() {
        let raw = write_temp(
            r#"{"insurer": {"name": "Acme Health"}, "tpa": null,
                "plan": {"name": "Acme Care", "coverages": [
                    {"name": "Inpatient", "benefits": [{"category": "Cardiac Surgery"}]}
                ]}}"#,
        );
        assert!(map(raw.path(), None, false).is_ok());
    }

    #[test]
    fn test_map_missing_required_key_fails() {
        let raw = write_temp(r#"{"tpa": null, "plan": null}"#);
        let result = map(raw.path(), None, false);
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("insurer"));
    }

    #[test]
    fn test_prune_with_default_patterns() {
        let doc = write_temp("# Benefits\ncovered\n# Glossary\nnoise\n");
        assert!(prune(doc.path(), None).is_ok());
    }

    #[test]
    fn test_validate_rejects_bundle_with_errors() {
        let bundle = write_temp(
            r#"{"resourceType": "Bundle", "id": "b-1", "type": "collection", "entry": []}"#,
        );
        assert!(validate_file(bundle.path()).is_err());
    }

    #[test]
    fn test_load_dictionary_from_file() {
        let dict_file = write_temp(
            r#"{"system": "http://snomed.info/sct",
                "concepts": {"Cardiac Surgery": {"code": "P1", "display": "Cardiac surgery"}}}"#,
        );
        let dict = load_dictionary(Some(dict_file.path())).unwrap();
        assert_eq!(dict.resolve("cardiac surgery").unwrap().code, "P1");
    }
}
