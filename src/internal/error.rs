use std::fmt;
use std::io;
use std::num::ParseIntError;

use crate::internal::statement::Kind;
use crate::internal::token::{Token, Type};

#[derive(Debug)]
pub enum MealplanError {
    Io(io::Error),
    InvalidAmount {
        ingredient: String,
        literal: String,
        source: ParseIntError,
    },
    UnexpectedToken {
        expected: Type,
        found: Token,
    },
    UnterminatedBlock(String),
    StrayToken {
        block: String,
        found: Token,
    },
    NestingTooDeep(String),
    UnexpectedStatement {
        container: String,
        expected: Kind,
        found: Kind,
        literal: String,
    },
    AmountOverflow(String),
    WithContext {
        source: Box<MealplanError>,
        context: String,
    },
}

impl MealplanError {
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        MealplanError::WithContext {
            source: Box::new(self),
            context: context.into(),
        }
    }
}

impl fmt::Display for MealplanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MealplanError::Io(e) => write!(f, "IO error: {}", e),
            MealplanError::InvalidAmount {
                ingredient,
                literal,
                source,
            } => write!(
                f,
                "Error parsing amount for ingredient {}: {:?} ({})",
                ingredient, literal, source
            ),
            MealplanError::UnexpectedToken { expected, found } => write!(
                f,
                "Expected {}, found {} {:?}",
                expected, found.token_type, found.literal
            ),
            MealplanError::UnterminatedBlock(name) => {
                write!(f, "Block {} is missing its closing ')'", name)
            }
            MealplanError::StrayToken { block, found } => write!(
                f,
                "Unexpected {} {:?} in {}",
                found.token_type, found.literal, block
            ),
            MealplanError::NestingTooDeep(name) => {
                write!(f, "Block {} is nested too deeply", name)
            }
            MealplanError::UnexpectedStatement {
                container,
                expected,
                found,
                literal,
            } => write!(
                f,
                "Unexpected statement {:?} in {}. Expected {}, found {}",
                literal, container, expected, found
            ),
            MealplanError::AmountOverflow(ingredient) => {
                write!(f, "Total amount of {} is too large", ingredient)
            }
            MealplanError::WithContext { source, context } => {
                write!(f, "{}\nContext: {}", source, context)
            }
        }
    }
}

impl std::error::Error for MealplanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MealplanError::Io(e) => Some(e),
            MealplanError::InvalidAmount { source, .. } => Some(source),
            MealplanError::WithContext { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for MealplanError {
    fn from(err: io::Error) -> Self {
        MealplanError::Io(err)
    }
}
