//! # Semantic Validator
//!
//! Applies domain rules to a [`TypedRequest`]. Every field present is
//! checked the same way whatever the action, so a read names exactly the
//! keys a write could have created.

use crate::domain::errors::{Rejection, SchemaError, SemanticError};
use crate::domain::request::{
    Operation, OperationName, ReadTarget, ValidatedRequest, WriteTarget,
};
use crate::domain::rules::ValidationRules;
use crate::domain::schema::TypedRequest;
use shared_types::{DocType, DocumentKey};

pub fn check_semantics(
    typed: TypedRequest,
    rules: &ValidationRules,
) -> Result<ValidatedRequest, Rejection> {
    let operation_name = typed.operation;
    let reject = |err: SemanticError| Rejection::new(operation_name, err);

    check_identifier("identifier", &typed.header.identifier, rules).map_err(reject)?;

    if let Some(received) = typed.header.protocol_version {
        if received != rules.protocol_version() {
            return Err(reject(SemanticError::UnsupportedProtocolVersion {
                received,
                supported: rules.protocol_version(),
            }));
        }
    }

    check_identifier("dest", &typed.dest, rules).map_err(reject)?;
    check_name(&typed.name, rules).map_err(reject)?;

    if !rules.is_valid_version(&typed.version) {
        return Err(reject(SemanticError::InvalidVersion(typed.version.clone())));
    }

    let doc_type = DocType::from_tag(&typed.doc_type).ok_or_else(|| {
        reject(SemanticError::UnknownDocType {
            actual: typed.doc_type.clone(),
        })
    })?;

    let key = DocumentKey::new(typed.dest, typed.name, typed.version);
    let operation = match (operation_name, typed.payload) {
        (OperationName::SetContext, Some(payload)) => Operation::SetContext(WriteTarget {
            key,
            doc_type,
            payload,
        }),
        (OperationName::GetContext, _) => Operation::GetContext(ReadTarget { key, doc_type }),
        // Schema guarantees a payload for writes and a known action.
        (name, _) => {
            return Err(Rejection::new(name, SchemaError::MissedFields(vec!["data"])))
        }
    };

    Ok(ValidatedRequest {
        header: typed.header,
        operation,
    })
}

fn check_identifier(
    field: &'static str,
    value: &str,
    rules: &ValidationRules,
) -> Result<(), SemanticError> {
    if value.trim().is_empty() {
        return Err(SemanticError::Blank {
            field,
            value: value.to_string(),
        });
    }
    let chars = rules.forbidden_chars(value);
    if !chars.is_empty() {
        return Err(SemanticError::ForbiddenChars {
            field,
            chars,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_name(name: &str, rules: &ValidationRules) -> Result<(), SemanticError> {
    if name.trim().is_empty() {
        return Err(SemanticError::Blank {
            field: "name",
            value: name.to_string(),
        });
    }
    let len = name.chars().count();
    if len > rules.max_name_length() {
        return Err(SemanticError::NameTooLong {
            len,
            max: rules.max_name_length(),
        });
    }
    Ok(())
}
