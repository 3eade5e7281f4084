//! Primitive descriptor → OpenAPI `(type, format)`.

use crate::error::GenError;
use crate::ir::{Primitive, ScalarClass};
use crate::schema::SchemaType;

/// Total over the fixed descriptor table; anything else is unsupported.
///
/// Signed 8-bit integers map to `uint8`. That mirrors the mapping existing
/// consumers were generated against, so it is kept as is.
pub fn classify(p: &Primitive) -> Result<(SchemaType, &'static str), GenError> {
    use ScalarClass as S;
    let pair = match (p.class, p.bits, p.signed) {
        (S::Bool, _, _) => (SchemaType::Boolean, ""),
        (S::String, _, _) => (SchemaType::String, ""),
        (S::Bytes, _, _) => (SchemaType::String, "byte"),
        (S::Byte, _, _) => (SchemaType::Integer, "uint8"),

        (S::Integer, Some(64), true) => (SchemaType::Integer, "int64"),
        (S::Integer, Some(64), false) => (SchemaType::Integer, "uint64"),
        (S::Integer, Some(32), true) => (SchemaType::Integer, "int32"),
        (S::Integer, Some(32), false) => (SchemaType::Integer, "uint32"),
        (S::Integer, Some(16), true) => (SchemaType::Integer, "int16"),
        (S::Integer, Some(16), false) => (SchemaType::Integer, "uint16"),
        (S::Integer, Some(8), _) => (SchemaType::Integer, "uint8"),
        (S::Integer, None, false) => (SchemaType::Integer, "uint"),

        (S::Float, Some(64), _) => (SchemaType::Number, "double"),
        (S::Float, Some(32), _) => (SchemaType::Number, "float"),

        _ => return Err(GenError::UnsupportedKind(*p)),
    };
    Ok(pair)
}
