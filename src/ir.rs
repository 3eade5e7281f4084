// Strongly-typed input model: the resolved type universe handed to the writer.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, LoadError};

// ————————————————————————————————————————————————————————————————————————————
// NAMES
// ————————————————————————————————————————————————————————————————————————————

/// Qualified type identity. Textual form is `namespace.Name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    pub namespace: String,
    pub name: String,
}

impl TypeRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), name: name.into() }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

impl FromStr for TypeRef {
    type Err = GenError;

    /// Splits at the last `.` after the last `/`, so dotted hosts such as
    /// `github.com/x/y.Foo` keep their namespace intact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tail_start = s.rfind('/').map_or(0, |i| i + 1);
        let dot = s[tail_start..]
            .rfind('.')
            .map(|i| tail_start + i)
            .ok_or_else(|| GenError::InvalidTypeRef(s.to_string()))?;
        let (namespace, name) = (&s[..dot], &s[dot + 1..]);
        if namespace.is_empty() || name.is_empty() {
            return Err(GenError::InvalidTypeRef(s.to_string()));
        }
        Ok(Self::new(namespace, name))
    }
}

impl TryFrom<String> for TypeRef {
    type Error = GenError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// KINDS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarClass {
    Bool,
    String,
    Integer,
    Float,
    Byte,
    /// byte sequence (base64 on the wire)
    Bytes,
    Complex,
}

/// Primitive descriptor: class + bit width + signedness.
/// `bits: None` on an integer means platform width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Primitive {
    pub class: ScalarClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
    #[serde(default)]
    pub signed: bool,
}

impl Primitive {
    pub const fn new(class: ScalarClass, bits: Option<u32>, signed: bool) -> Self {
        Self { class, bits, signed }
    }
    pub const fn bool() -> Self { Self::new(ScalarClass::Bool, None, false) }
    pub const fn string() -> Self { Self::new(ScalarClass::String, None, false) }
    pub const fn byte() -> Self { Self::new(ScalarClass::Byte, Some(8), false) }
    pub const fn bytes() -> Self { Self::new(ScalarClass::Bytes, None, false) }
    pub const fn int(bits: u32) -> Self { Self::new(ScalarClass::Integer, Some(bits), true) }
    pub const fn uint(bits: u32) -> Self { Self::new(ScalarClass::Integer, Some(bits), false) }
    pub const fn platform_int() -> Self { Self::new(ScalarClass::Integer, None, true) }
    pub const fn platform_uint() -> Self { Self::new(ScalarClass::Integer, None, false) }
    pub const fn float(bits: u32) -> Self { Self::new(ScalarClass::Float, Some(bits), true) }

    /// `byte` and unsigned 8-bit integers are the same thing on the wire.
    pub fn is_byte(&self) -> bool {
        match self.class {
            ScalarClass::Byte => true,
            ScalarClass::Integer => self.bits == Some(8) && !self.signed,
            _ => false,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.bits.map(|b| b.to_string()).unwrap_or_default();
        match self.class {
            ScalarClass::Bool => f.write_str("bool"),
            ScalarClass::String => f.write_str("string"),
            ScalarClass::Byte => f.write_str("byte"),
            ScalarClass::Bytes => f.write_str("[]byte"),
            ScalarClass::Integer if self.signed => write!(f, "int{width}"),
            ScalarClass::Integer => write!(f, "uint{width}"),
            ScalarClass::Float => write!(f, "float{width}"),
            ScalarClass::Complex => write!(f, "complex{width}"),
        }
    }
}

/// Shape of a field or alias. `Named` points into the universe: a record
/// target is always emitted as a reference, an alias target is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Primitive(Primitive),
    Pointer(Box<Kind>),
    Array(Box<Kind>),
    /// keys are string-like; only the value shape is carried
    Map(Box<Kind>),
    Named(TypeRef),
}

impl Kind {
    pub fn pointer(inner: Kind) -> Self { Kind::Pointer(Box::new(inner)) }
    pub fn array(item: Kind) -> Self { Kind::Array(Box::new(item)) }
    pub fn map(value: Kind) -> Self { Kind::Map(Box::new(value)) }
}

impl From<Primitive> for Kind {
    fn from(value: Primitive) -> Self {
        Kind::Primitive(value)
    }
}

impl From<TypeRef> for Kind {
    fn from(value: TypeRef) -> Self {
        Kind::Named(value)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARATIONS
// ————————————————————————————————————————————————————————————————————————————

/// Per-field serialization directive (`omitempty`, `string`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    OmitEmpty,
    String,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    pub ty: Kind,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<Kind>) -> Self {
        Self { name: name.into(), doc: String::new(), ty: ty.into(), directives: Vec::new() }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Record(Vec<Field>),
    Alias(Kind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: TypeRef,
    #[serde(default)]
    pub doc: String,
    pub body: Body,
}

impl TypeDecl {
    pub fn record(name: TypeRef, doc: impl Into<String>, fields: Vec<Field>) -> Self {
        Self { name, doc: doc.into(), body: Body::Record(fields) }
    }

    pub fn alias(name: TypeRef, doc: impl Into<String>, kind: Kind) -> Self {
        Self { name, doc: doc.into(), body: Body::Alias(kind) }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// UNIVERSE
// ————————————————————————————————————————————————————————————————————————————

/// All resolved declarations of one run, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    types: IndexMap<TypeRef, TypeDecl>,
}

impl Universe {
    pub fn new() -> Self { Self::default() }

    /// Rejects a second declaration under an existing name.
    pub fn from_decls<I>(decls: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = TypeDecl>,
    {
        let mut universe = Self::new();
        for decl in decls {
            universe.insert(decl)?;
        }
        Ok(universe)
    }

    pub fn insert(&mut self, decl: TypeDecl) -> Result<(), LoadError> {
        if self.types.contains_key(&decl.name) {
            return Err(LoadError::Duplicate(decl.name));
        }
        self.types.insert(decl.name.clone(), decl);
        Ok(())
    }

    pub fn get(&self, name: &TypeRef) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values()
    }

    pub fn len(&self) -> usize { self.types.len() }
    pub fn is_empty(&self) -> bool { self.types.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ref_parses_dotted_hosts() {
        let r: TypeRef = "github.com/go-openapi/spec.Schema".parse().unwrap();
        assert_eq!(r.namespace, "github.com/go-openapi/spec");
        assert_eq!(r.name, "Schema");
        assert_eq!(r.to_string(), "github.com/go-openapi/spec.Schema");

        let r: TypeRef = "base/foo.Blah".parse().unwrap();
        assert_eq!(r, TypeRef::new("base/foo", "Blah"));
    }

    #[test]
    fn type_ref_rejects_unqualified_names() {
        assert!("Blah".parse::<TypeRef>().is_err());
        assert!("base/foo".parse::<TypeRef>().is_err());
        assert!("base/foo.".parse::<TypeRef>().is_err());
        assert!(".Blah".parse::<TypeRef>().is_err());
    }

    #[test]
    fn decls_deserialize_from_json() {
        let decl: TypeDecl = serde_json::from_value(serde_json::json!({
            "name": "base/foo.Blah",
            "doc": "Blah is a test.",
            "body": { "record": [
                { "name": "Count", "ty": { "primitive": { "class": "integer", "bits": 64, "signed": true } } },
                { "name": "Next", "ty": { "pointer": { "named": "base/foo.Blah" } }, "directives": ["omit_empty", "unheard_of"] },
            ]}
        }))
        .unwrap();

        let Body::Record(fields) = &decl.body else { panic!("expected a record") };
        assert_eq!(fields[0].ty, Kind::Primitive(Primitive::int(64)));
        assert_eq!(fields[1].ty, Kind::pointer(Kind::Named(TypeRef::new("base/foo", "Blah"))));
        assert_eq!(fields[1].directives, vec![Directive::OmitEmpty, Directive::Other]);
    }

    #[test]
    fn universe_rejects_duplicates() {
        let name = TypeRef::new("base/foo", "Blah");
        let decl = TypeDecl::record(name.clone(), "", Vec::new());
        let err = Universe::from_decls([decl.clone(), decl]).unwrap_err();
        assert!(matches!(err, LoadError::Duplicate(n) if n == name));
    }

    #[test]
    fn byte_detection() {
        assert!(Primitive::byte().is_byte());
        assert!(Primitive::uint(8).is_byte());
        assert!(!Primitive::int(8).is_byte());
        assert!(!Primitive::uint(16).is_byte());
    }
}
