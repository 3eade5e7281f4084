//! Schema writer: one resolved declaration in, one schema tree out.
//!
//! Records below the entry point are never expanded; they become `$ref`
//! nodes and land in the entry's dependency set. That alone guarantees
//! termination on cyclic graphs. Aliases are expanded in place, with an
//! in-progress stack that turns a cyclic alias chain into a reference too.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::classify::classify;
use crate::error::GenError;
use crate::imports::ImportTracker;
use crate::ir::{Body, Field, Kind, Primitive, TypeDecl, TypeRef, Universe};
use crate::schema::{DependencySet, GeneratedSchema, SchemaNode};
use crate::tags;

/// Namespace of the schema library the emitted code builds on.
pub const DEFAULT_SCHEMA_NAMESPACE: &str = "github.com/go-openapi/spec";

pub struct SchemaWriter<'u> {
    universe: &'u Universe,
    schema_namespace: String,
}

impl<'u> SchemaWriter<'u> {
    pub fn new(universe: &'u Universe) -> Self {
        Self { universe, schema_namespace: DEFAULT_SCHEMA_NAMESPACE.to_string() }
    }

    pub fn with_schema_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.schema_namespace = namespace.into();
        self
    }

    /// Build the schema for `decl`. Namespace usages are committed to
    /// `imports` only when the whole walk succeeds.
    pub fn generate(
        &self,
        decl: &TypeDecl,
        imports: &mut ImportTracker,
    ) -> Result<GeneratedSchema, GenError> {
        let mut walk = Walk {
            universe: self.universe,
            entry: &decl.name,
            field: String::new(),
            dependencies: DependencySet::new(),
            namespaces: IndexSet::new(),
            expanding: Vec::new(),
        };

        let schema = match &decl.body {
            Body::Record(fields) => walk.record(fields)?,
            Body::Alias(kind) => {
                walk.expanding.push(decl.name.clone());
                walk.node(kind)?
            }
        }
        .with_description(tags::description(&decl.doc));

        let namespaces = std::iter::once(self.schema_namespace.as_str())
            .chain(walk.namespaces.iter().map(String::as_str));
        imports.add_all(namespaces)?;

        debug!(
            name = %decl.name,
            dependencies = walk.dependencies.len(),
            "schema generated"
        );
        Ok(GeneratedSchema {
            name: decl.name.clone(),
            schema,
            dependencies: walk.dependencies,
        })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// WALK
// ————————————————————————————————————————————————————————————————————————————

struct Walk<'a> {
    universe: &'a Universe,
    entry: &'a TypeRef,
    /// field currently being resolved, for error context
    field: String,
    dependencies: DependencySet,
    namespaces: IndexSet<String>,
    expanding: Vec<TypeRef>,
}

impl Walk<'_> {
    fn record(&mut self, fields: &[Field]) -> Result<SchemaNode, GenError> {
        let mut properties = IndexMap::new();
        let mut required = Vec::new();

        for field in fields {
            // Any directive drops the field from properties and required alike.
            if !field.directives.is_empty() {
                trace!(field = %field.name, directives = ?field.directives, "field skipped");
                continue;
            }
            self.field.clone_from(&field.name);
            let node = self.node(&field.ty)?.with_description(tags::description(&field.doc));
            properties.insert(field.name.clone(), node);
            required.push(field.name.clone());
        }

        Ok(SchemaNode::record(properties, required))
    }

    fn node(&mut self, kind: &Kind) -> Result<SchemaNode, GenError> {
        match kind {
            Kind::Primitive(p) => {
                let (schema_type, format) = classify(p)?;
                Ok(SchemaNode::primitive(schema_type, format))
            }
            // nullability is not represented
            Kind::Pointer(inner) => self.node(inner),
            Kind::Array(item) => match item.as_ref() {
                Kind::Primitive(p) if p.is_byte() => {
                    let (schema_type, format) = classify(&Primitive::bytes())?;
                    Ok(SchemaNode::primitive(schema_type, format))
                }
                _ => Ok(SchemaNode::array(self.node(item)?)),
            },
            Kind::Map(value) => Ok(SchemaNode::map(self.node(value)?)),
            Kind::Named(target) => self.named(target),
        }
    }

    fn named(&mut self, target: &TypeRef) -> Result<SchemaNode, GenError> {
        let universe = self.universe;
        let decl = universe.get(target).ok_or_else(|| GenError::UnresolvedReference {
            field: self.field.clone(),
            reference: target.clone(),
        })?;

        match &decl.body {
            Body::Alias(kind) if !self.expanding.contains(target) => {
                self.expanding.push(target.clone());
                let node = self.node(kind);
                self.expanding.pop();
                node
            }
            _ => Ok(self.reference(target)),
        }
    }

    fn reference(&mut self, target: &TypeRef) -> SchemaNode {
        trace!(entry = %self.entry, target = %target, "reference");
        self.dependencies.insert(target.clone());
        if target.namespace != self.entry.namespace {
            self.namespaces.insert(target.namespace.clone());
        }
        SchemaNode::reference(target.clone())
    }
}
