//! # Schema Validator
//!
//! Checks the structural shape of a raw request body: required fields are
//! present and every field has its declared JSON type. Nothing here looks at
//! values beyond their type.
//!
//! Order of checks:
//! 1. Body is an object.
//! 2. Envelope fields present (`identifier`, `reqId`, `operation`).
//! 3. Envelope field types.
//! 4. `operation.type` present, a string, and a known transaction type.
//! 5. Action fields present (`dest`, `meta`, `name`, `version`, `type`,
//!    plus `data` for writes), all missing ones reported together.
//! 6. Action field types, first mismatch reported.

use crate::domain::errors::{Rejection, SchemaError};
use crate::domain::request::{Action, OperationName, RequestHeader};
use serde_json::{Map, Value};

/// Request with every field of the right type; values not yet checked.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRequest {
    pub header: RequestHeader,
    pub operation: OperationName,
    pub dest: String,
    pub name: String,
    pub version: String,
    pub doc_type: String,
    /// Present for writes only.
    pub payload: Option<Value>,
}

/// JSON name of a value's primitive type.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Best-effort attribution of a raw body to an operation name.
pub fn operation_name_of(raw: &Value) -> OperationName {
    raw.get("operation")
        .and_then(|op| op.get("type"))
        .and_then(Value::as_str)
        .map(OperationName::from_txn_type)
        .unwrap_or(OperationName::Client)
}

pub fn check_schema(raw: &Value) -> Result<TypedRequest, Rejection> {
    let name = operation_name_of(raw);
    let reject = |err: SchemaError| Rejection::new(name, err);

    let body = raw.as_object().ok_or_else(|| {
        reject(SchemaError::NotAnObject {
            actual: json_type_name(raw),
        })
    })?;

    let missing = missing_fields(body, &["identifier", "reqId", "operation"]);
    if !missing.is_empty() {
        return Err(reject(SchemaError::MissedFields(missing)));
    }

    let header = check_header(body).map_err(reject)?;
    let operation = expect_object(body, "operation").map_err(reject)?;

    let txn_type = match operation.get("type") {
        None | Some(Value::Null) => {
            return Err(reject(SchemaError::MissedFields(vec!["operation.type"])));
        }
        Some(v) => v
            .as_str()
            .ok_or_else(|| reject(mismatch("operation.type", "string", v)))?,
    };
    let Some(action) = name.action() else {
        return Err(reject(SchemaError::UnknownTxnType(txn_type.to_string())));
    };
    let is_write = action == Action::Write;

    let meta = operation.get("meta").and_then(Value::as_object);

    let mut missing = Vec::new();
    if !is_present(operation.get("dest")) {
        missing.push("dest");
    }
    match meta {
        None => missing.push("meta"),
        Some(meta) => missing.extend(missing_fields(meta, &["name", "version", "type"])),
    }
    if is_write && !is_present(operation.get("data")) {
        missing.push("data");
    }
    if !missing.is_empty() {
        return Err(reject(SchemaError::MissedFields(missing)));
    }
    let Some(meta) = meta else {
        return Err(reject(SchemaError::MissedFields(vec!["meta"])));
    };

    let dest = expect_str(operation, "dest").map_err(reject)?;
    let doc_name = expect_str(meta, "name").map_err(reject)?;
    let version = expect_str(meta, "version").map_err(reject)?;
    let doc_type = expect_str(meta, "type").map_err(reject)?;
    let payload = if is_write {
        Some(Value::Object(expect_object(operation, "data").map_err(reject)?.clone()))
    } else {
        None
    };

    Ok(TypedRequest {
        header,
        operation: name,
        dest: dest.to_string(),
        name: doc_name.to_string(),
        version: version.to_string(),
        doc_type: doc_type.to_string(),
        payload,
    })
}

fn check_header(body: &Map<String, Value>) -> Result<RequestHeader, SchemaError> {
    let identifier = expect_str(body, "identifier")?;
    let req_id = expect_u64(body, "reqId")?;
    let protocol_version = match body.get("protocolVersion") {
        None | Some(Value::Null) => None,
        Some(_) => Some(expect_u64(body, "protocolVersion")?),
    };
    Ok(RequestHeader {
        identifier: identifier.to_string(),
        req_id,
        protocol_version,
    })
}

fn is_present(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null))
}

fn missing_fields(obj: &Map<String, Value>, fields: &[&'static str]) -> Vec<&'static str> {
    fields
        .iter()
        .copied()
        .filter(|f| !is_present(obj.get(*f)))
        .collect()
}

fn mismatch(field: &'static str, expected: &'static str, value: &Value) -> SchemaError {
    SchemaError::TypeMismatch {
        field,
        expected,
        actual: json_type_name(value),
        value: value.to_string(),
    }
}

fn field<'a>(obj: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, SchemaError> {
    match obj.get(name) {
        None | Some(Value::Null) => Err(SchemaError::MissedFields(vec![name])),
        Some(v) => Ok(v),
    }
}

fn expect_str<'a>(obj: &'a Map<String, Value>, name: &'static str) -> Result<&'a str, SchemaError> {
    let value = field(obj, name)?;
    value.as_str().ok_or_else(|| mismatch(name, "string", value))
}

fn expect_u64(obj: &Map<String, Value>, name: &'static str) -> Result<u64, SchemaError> {
    let value = field(obj, name)?;
    value.as_u64().ok_or_else(|| mismatch(name, "integer", value))
}

fn expect_object<'a>(
    obj: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a Map<String, Value>, SchemaError> {
    let value = field(obj, name)?;
    value.as_object().ok_or_else(|| mismatch(name, "object", value))
}
