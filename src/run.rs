//! Generation runs: entry selection and one import tracker per output
//! namespace.

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::GenError;
use crate::imports::{ImportRecord, ImportTracker};
use crate::ir::{TypeDecl, TypeRef, Universe};
use crate::schema::GeneratedSchema;
use crate::tags;
use crate::writer::{DEFAULT_SCHEMA_NAMESPACE, SchemaWriter};

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// namespace of the schema library, always imported
    pub schema_namespace: String,
    /// doc marker selecting entry types (`+<tag_name>=true`)
    pub tag_name: String,
    /// explicit entry types; overrides marker selection when non-empty
    pub entries: Vec<TypeRef>,
    /// stop at the first failing type instead of reporting and continuing
    pub fail_fast: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema_namespace: DEFAULT_SCHEMA_NAMESPACE.to_string(),
            tag_name: "openapi-gen".to_string(),
            entries: Vec::new(),
            fail_fast: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub name: TypeRef,
    pub error: GenError,
}

/// Everything generated for one namespace.
#[derive(Debug, Clone)]
pub struct PackageOutput {
    pub namespace: String,
    pub schemas: Vec<GeneratedSchema>,
    pub failures: Vec<Failure>,
    pub imports: Vec<ImportRecord>,
}

impl PackageOutput {
    pub fn import_lines(&self) -> Vec<String> {
        self.imports.iter().map(ImportRecord::line).collect()
    }
}

/// Entry types in universe order. Explicit entries must exist.
pub fn select_entries<'u>(
    universe: &'u Universe,
    config: &GeneratorConfig,
) -> Result<Vec<&'u TypeDecl>, GenError> {
    if !config.entries.is_empty() {
        return config
            .entries
            .iter()
            .map(|name| {
                universe
                    .get(name)
                    .ok_or_else(|| GenError::UnknownEntry(name.clone()))
            })
            .collect();
    }
    Ok(universe
        .iter()
        .filter(|decl| tags::is_enabled(&decl.doc, &config.tag_name))
        .collect())
}

pub struct GenerationRun<'u> {
    namespace: String,
    writer: SchemaWriter<'u>,
    imports: ImportTracker,
    fail_fast: bool,
    schemas: Vec<GeneratedSchema>,
    failures: Vec<Failure>,
}

impl<'u> GenerationRun<'u> {
    pub fn new(universe: &'u Universe, config: &GeneratorConfig, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            writer: SchemaWriter::new(universe).with_schema_namespace(config.schema_namespace.clone()),
            imports: ImportTracker::new(namespace.clone()),
            namespace,
            fail_fast: config.fail_fast,
            schemas: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// A failing type is recorded and skipped unless the run is fail-fast.
    pub fn generate(&mut self, decl: &TypeDecl) -> Result<(), GenError> {
        match self.writer.generate(decl, &mut self.imports) {
            Ok(schema) => self.schemas.push(schema),
            Err(error) if self.fail_fast => return Err(error),
            Err(error) => {
                warn!(name = %decl.name, %error, "type skipped");
                self.failures.push(Failure { name: decl.name.clone(), error });
            }
        }
        Ok(())
    }

    pub fn finish(self) -> PackageOutput {
        PackageOutput {
            imports: self.imports.records(),
            namespace: self.namespace,
            schemas: self.schemas,
            failures: self.failures,
        }
    }
}

/// Select entries, group them by namespace (first-seen order) and run each
/// group with its own tracker.
pub fn generate_all(universe: &Universe, config: &GeneratorConfig) -> Result<Vec<PackageOutput>, GenError> {
    let mut groups: IndexMap<&str, Vec<&TypeDecl>> = IndexMap::new();
    for decl in select_entries(universe, config)? {
        groups.entry(decl.name.namespace.as_str()).or_default().push(decl);
    }

    let mut packages = Vec::with_capacity(groups.len());
    for (namespace, decls) in groups {
        let mut run = GenerationRun::new(universe, config, namespace);
        for decl in decls {
            run.generate(decl)?;
        }
        let package = run.finish();
        info!(
            namespace,
            schemas = package.schemas.len(),
            failures = package.failures.len(),
            "package generated"
        );
        packages.push(package);
    }
    Ok(packages)
}
