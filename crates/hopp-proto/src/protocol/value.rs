//! Exact-typed accessors over decoded JSON values.
//!
//! Validation rules:
//! - Never index into a `Value` — every access goes through an accessor
//!   that reports `MissingField` / `InvalidFieldType` with the field name.
//! - Types match exactly: a number is never accepted where a bool or string
//!   is declared, and vice versa.

use serde_json::{Map, Value};

use crate::error::{ProtoError, Result};

pub(crate) fn as_object<'a>(v: &'a Value, field: &'static str) -> Result<&'a Map<String, Value>> {
    v.as_object().ok_or(ProtoError::InvalidFieldType {
        field,
        expected: "object",
    })
}

pub(crate) fn get<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value> {
    obj.get(field).ok_or(ProtoError::MissingField(field))
}

pub(crate) fn get_obj<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Map<String, Value>> {
    as_object(get(obj, field)?, field)
}

pub(crate) fn get_f64(obj: &Map<String, Value>, field: &'static str) -> Result<f64> {
    get(obj, field)?
        .as_f64()
        .ok_or(ProtoError::InvalidFieldType {
            field,
            expected: "number",
        })
}

pub(crate) fn get_bool(obj: &Map<String, Value>, field: &'static str) -> Result<bool> {
    get(obj, field)?
        .as_bool()
        .ok_or(ProtoError::InvalidFieldType {
            field,
            expected: "boolean",
        })
}

pub(crate) fn get_u32(obj: &Map<String, Value>, field: &'static str) -> Result<u32> {
    let n = get(obj, field)?
        .as_u64()
        .ok_or(ProtoError::InvalidFieldType {
            field,
            expected: "non-negative integer",
        })?;
    u32::try_from(n).map_err(|_| ProtoError::InvalidFieldType {
        field,
        expected: "u32 integer",
    })
}

pub(crate) fn get_str<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a str> {
    get(obj, field)?
        .as_str()
        .ok_or(ProtoError::InvalidFieldType {
            field,
            expected: "string",
        })
}

pub(crate) fn get_string(obj: &Map<String, Value>, field: &'static str) -> Result<String> {
    Ok(get_str(obj, field)?.to_owned())
}

/// Byte payloads travel as JSON arrays of integers in `[0, 255]`.
pub(crate) fn get_bytes(obj: &Map<String, Value>, field: &'static str) -> Result<Vec<u8>> {
    let arr = get(obj, field)?
        .as_array()
        .ok_or(ProtoError::InvalidFieldType {
            field,
            expected: "byte array",
        })?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        let b = item
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or(ProtoError::InvalidFieldType {
                field,
                expected: "byte array",
            })?;
        out.push(b);
    }
    Ok(out)
}

/// Ordered key-symbol sequences travel as JSON arrays of strings.
pub(crate) fn get_str_seq(obj: &Map<String, Value>, field: &'static str) -> Result<Vec<String>> {
    let arr = get(obj, field)?
        .as_array()
        .ok_or(ProtoError::InvalidFieldType {
            field,
            expected: "string array",
        })?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        let s = item.as_str().ok_or(ProtoError::InvalidFieldType {
            field,
            expected: "string array",
        })?;
        out.push(s.to_owned());
    }
    Ok(out)
}
