use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Name,
    Image,
    Price,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequiredField::Name => "name",
            RequiredField::Image => "image",
            RequiredField::Price => "price",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field '{0}' is empty")]
    MissingField(RequiredField),
}

impl ValidationError {
    pub fn field(&self) -> RequiredField {
        match self {
            ValidationError::MissingField(field) => *field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown priority '{0}', expected one of Baixa, Média, Alta")]
pub struct UnknownPriority(pub String);
