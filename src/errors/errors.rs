use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::SourceRead { .. } => "SourceRead",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::MalformedNumber { lexeme, found } => {
                let found = match found {
                    Some(c) => format!("`{}`", c),
                    None => String::from("end of input"),
                };
                ErrorTip::Suggestion(format!(
                    "Expected a digit after `{}`, found {}",
                    lexeme, found
                ))
            }
            ErrorImpl::UnterminatedString { .. } => {
                ErrorTip::Suggestion(String::from("Close the string with a `\"`"))
            }
            ErrorImpl::SourceRead { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (line {}, {})",
            self.internal_error, self.position.0, self.position.1
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("lexical error: character after '.' is not a digit in {lexeme:?}")]
    MalformedNumber { lexeme: String, found: Option<char> },
    #[error("lexical error: unterminated string {text:?}")]
    UnterminatedString { text: String },
    #[error("could not read source: {reason}")]
    SourceRead { reason: String },
}
