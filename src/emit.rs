//! JSON emission of generation output. Key order follows insertion order
//! (`serde_json/preserve_order`), so output is stable across runs.

use serde_json::{Map, Value, json};

use crate::run::PackageOutput;
use crate::schema::GeneratedSchema;

/// `{ "schema": …, "dependencies": [...] }`, dependencies omitted when empty.
pub fn render_definition(generated: &GeneratedSchema) -> Value {
    let mut o = json!({ "schema": generated.schema });
    if !generated.dependencies.is_empty() {
        o["dependencies"] = json!(generated.dependencies);
    }
    o
}

pub fn render_package(package: &PackageOutput) -> Value {
    let mut definitions = Map::new();
    for generated in &package.schemas {
        definitions.insert(generated.name.to_string(), render_definition(generated));
    }
    let mut o = json!({
        "package": package.namespace,
        "imports": package.import_lines(),
        "definitions": definitions,
    });
    if !package.failures.is_empty() {
        let mut errors = Map::new();
        for failure in &package.failures {
            errors.insert(failure.name.to_string(), Value::from(failure.error.to_string()));
        }
        o["errors"] = Value::Object(errors);
    }
    o
}

pub fn render_all(packages: &[PackageOutput]) -> Value {
    json!({ "packages": packages.iter().map(render_package).collect::<Vec<_>>() })
}
