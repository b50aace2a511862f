//! Validation service wiring the domain validators behind the inbound port.

use crate::domain::{
    authorize_write, check_schema, check_semantics, Operation, Rejection, ValidatedRequest,
    ValidationRules,
};
use crate::ports::{RequestValidationApi, ValidationOutcome};
use shared_types::Role;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RequestValidator {
    rules: Arc<ValidationRules>,
}

impl RequestValidator {
    pub fn new(rules: Arc<ValidationRules>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new(ValidationRules::shared_default())
    }
}

impl RequestValidationApi for RequestValidator {
    fn validate(&self, raw: &serde_json::Value) -> ValidationOutcome {
        let typed = check_schema(raw)?;
        check_semantics(typed, &self.rules)
    }

    fn authorize(&self, request: &ValidatedRequest, role: Option<Role>) -> Result<(), Rejection> {
        match &request.operation {
            Operation::SetContext(target) => authorize_write(&request.header, target, role),
            Operation::GetContext(_) => Ok(()),
        }
    }
}
