//! Minimal CLI: universe → (list | generate)
use std::path::PathBuf;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, Args};

use openapi_gen::{GeneratorConfig, TypeRef, Universe};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate OpenAPI schema definitions from a resolved type universe
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the entry types that would be generated
    List(ListOut),
    /// generate schema definitions as JSON
    Generate(GenerateOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more universe files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// explicit entry types (`namespace.Name`); overrides doc-marker selection
    #[arg(long = "entry")]
    entries: Vec<String>,

    /// doc marker selecting entry types (`+<tag-name>=true`)
    #[arg(long, default_value = "openapi-gen")]
    tag_name: String,
}

#[derive(clap::Parser, Debug)]
struct ListOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// namespace of the schema library, always imported
    #[arg(long, default_value = openapi_gen::DEFAULT_SCHEMA_NAMESPACE)]
    schema_namespace: String,

    /// stop at the first type that fails instead of reporting it
    #[arg(long)]
    fail_fast: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_universe(&self) -> Result<Universe> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let universe = openapi_gen::path_de::load_universe(&source_paths)?;
        tracing::info!(files = source_paths.len(), types = universe.len(), "universe loaded");
        Ok(universe)
    }

    fn config(&self) -> Result<GeneratorConfig> {
        let entries = self
            .entries
            .iter()
            .map(|raw| raw.parse::<TypeRef>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GeneratorConfig {
            tag_name: self.tag_name.clone(),
            entries,
            ..GeneratorConfig::default()
        })
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::List(target) => {
                let universe = target.input_settings.load_universe()?;
                let config = target.input_settings.config()?;
                for decl in openapi_gen::select_entries(&universe, &config)? {
                    println!("{}", decl.name);
                }
                Ok(())
            }
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }

                let universe = target.input_settings.load_universe()?;
                let config = GeneratorConfig {
                    schema_namespace: target.schema_namespace.clone(),
                    fail_fast: target.fail_fast,
                    ..target.input_settings.config()?
                };

                let packages = openapi_gen::generate_all(&universe, &config)?;
                let output = openapi_gen::emit::render_all(&packages);
                let output_src = serde_json::to_string_pretty(&output)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &output_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{output_src}");
                }

                let failed: usize = packages.iter().map(|p| p.failures.len()).sum();
                if failed > 0 {
                    bail!("{failed} type(s) could not be generated");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
