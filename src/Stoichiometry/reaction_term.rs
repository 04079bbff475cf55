/// One term of a reaction equation: a formula with an optional phase mark at the end,
/// like `MgCO3(s)`, `O2(g)`, `NaCl(aq)` or just `H2O`.
use crate::Stoichiometry::formula_parser::parse_formula;
use crate::Stoichiometry::stoich_errors::StoichError;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

static TERM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)(?:\((s|l|g|aq)\))?$").unwrap());

/// Phase enum: solid, liquid, gas, aqueous solution, or not given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
    Aqueous,
    #[default]
    Unspecified,
}

impl Phase {
    pub fn from_code(code: &str) -> Option<Phase> {
        match code {
            "s" => Some(Phase::Solid),
            "l" => Some(Phase::Liquid),
            "g" => Some(Phase::Gas),
            "aq" => Some(Phase::Aqueous),
            "" => Some(Phase::Unspecified),
            _ => None,
        }
    }

    /// `s`, `l`, `g`, `aq` or the empty string
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Solid => "s",
            Phase::Liquid => "l",
            Phase::Gas => "g",
            Phase::Aqueous => "aq",
            Phase::Unspecified => "",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Unspecified => Ok(()),
            phase => write!(f, "({})", phase.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReactionTerm {
    /// term as written by the user, trimmed
    pub raw: String,
    /// formula body without the phase mark and without whitespace
    pub formula: String,
    pub composition: HashMap<String, usize>,
    pub phase: Phase,
}

/// Splits a term into formula body and phase, and expands the body into element counts.
/// Structural problems give `InvalidTerm`, symbols missing from the element table give
/// `UnknownElement`.
pub fn parse_formula_with_state(term: &str) -> Result<ReactionTerm, StoichError> {
    let raw = term.trim();
    let invalid = || StoichError::InvalidTerm(raw.to_string());
    let captures = TERM_REGEX.captures(raw).ok_or_else(invalid)?;
    let body = captures.get(1).map_or("", |m| m.as_str());
    let phase_code = captures.get(2).map_or("", |m| m.as_str());
    let phase = Phase::from_code(phase_code).ok_or_else(invalid)?;

    let as_term_error = |e: StoichError| match e {
        StoichError::InvalidFormula(_) => invalid(),
        other => other,
    };
    let parsed = parse_formula(body).map_err(as_term_error)?;
    parsed.check_elements()?;
    Ok(ReactionTerm {
        raw: raw.to_string(),
        composition: parsed.element_counts().map_err(as_term_error)?,
        formula: parsed.formula,
        phase,
    })
}

impl fmt::Display for ReactionTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.formula, self.phase)
    }
}
