use thiserror::Error;

/// error types for formula parsing, molar mass evaluation and equation balancing.
/// Messages are meant to be shown to the user as they are.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoichError {
    #[error("{0}")]
    InvalidFormula(String),
    #[error("Unknown element: {0}")]
    UnknownElement(String),
    #[error("Invalid term format: {0}")]
    InvalidTerm(String),
    #[error("{0}")]
    InvalidEquation(String),
    #[error("Unable to balance equation ({0}).")]
    UnbalanceableSystem(String),
}

pub const DISALLOWED_CHARACTERS: &str =
    "Invalid formula: Use only letters, numbers, and parentheses.";
pub const INVALID_FORMAT: &str = "Invalid formula format.";
pub const MISSING_SEPARATOR: &str =
    "Equation must contain '=' or '->' to separate reactants and products.";

impl StoichError {
    /// short machine-friendly name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            StoichError::InvalidFormula(_) => "InvalidFormula",
            StoichError::UnknownElement(_) => "UnknownElement",
            StoichError::InvalidTerm(_) => "InvalidTerm",
            StoichError::InvalidEquation(_) => "InvalidEquation",
            StoichError::UnbalanceableSystem(_) => "UnbalanceableSystem",
        }
    }
}
