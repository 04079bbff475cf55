/// Tokenizer and recursive-descent parser for chemical formulae like `H2O`, `CuSO4`,
/// `(NH4)2SO4` or `K4(Fe(CN)6)`.
///
/// grammar:
/// ```text
/// formula := unit+
/// unit    := ELEMENT [NUMBER] | '(' formula ')' [NUMBER]
/// ELEMENT := [A-Z][a-z]?
/// NUMBER  := [0-9]+
/// ```
/// Groups may be nested to any depth. The parser only checks the shape of the formula;
/// whether the element symbols exist is checked by the consumers (molar mass, element counts).
use crate::Stoichiometry::elements::is_element;
use crate::Stoichiometry::stoich_errors::{DISALLOWED_CHARACTERS, INVALID_FORMAT, StoichError};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Element(String),
    Number(u32),
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// char position in the whitespace-free formula
    pub position: usize,
}

/// node of the formula syntax tree
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaNode {
    Atom { symbol: String, count: u32 },
    Group { nodes: Vec<FormulaNode>, count: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFormula {
    /// formula with all whitespace removed
    pub formula: String,
    pub nodes: Vec<FormulaNode>,
}

/// removes whitespace and checks that only letters, digits and parentheses are left
pub fn normalize_formula(formula: &str) -> Result<String, StoichError> {
    let formula: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    if formula.is_empty() {
        return Err(StoichError::InvalidFormula(INVALID_FORMAT.to_string()));
    }
    if !formula
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '(' || c == ')')
    {
        return Err(StoichError::InvalidFormula(DISALLOWED_CHARACTERS.to_string()));
    }
    Ok(formula)
}

fn syntax_error(formula: &str, position: usize, what: &str) -> StoichError {
    StoichError::InvalidFormula(format!(
        "Invalid formula format: {} at position {} in '{}'.",
        what, position, formula
    ))
}

/// splits a whitespace-free formula into tokens
pub fn tokenize(formula: &str) -> Result<Vec<Token>, StoichError> {
    let chars: Vec<char> = formula.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let start = i;
        let kind = if c.is_ascii_uppercase() {
            let mut symbol = c.to_string();
            if let Some(&next) = chars.get(i + 1) {
                if next.is_ascii_lowercase() {
                    symbol.push(next);
                    i += 1;
                }
            }
            i += 1;
            TokenKind::Element(symbol)
        } else if c.is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let digits: String = chars[start..i].iter().collect();
            let number = digits
                .parse::<u32>()
                .map_err(|_| syntax_error(formula, start, "count is too large"))?;
            TokenKind::Number(number)
        } else if c == '(' {
            i += 1;
            TokenKind::LParen
        } else if c == ')' {
            i += 1;
            TokenKind::RParen
        } else if c.is_ascii_lowercase() {
            return Err(syntax_error(
                formula,
                start,
                &format!("element symbol cannot start with '{}'", c),
            ));
        } else {
            return Err(StoichError::InvalidFormula(DISALLOWED_CHARACTERS.to_string()));
        };
        tokens.push(Token {
            kind,
            position: start,
        });
    }
    Ok(tokens)
}

struct FormulaParser<'a> {
    formula: &'a str,
    tokens: Vec<Token>,
    position: usize,
}

impl<'a> FormulaParser<'a> {
    fn new(formula: &'a str, tokens: Vec<Token>) -> Self {
        FormulaParser {
            formula,
            tokens,
            position: 0,
        }
    }

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// char position used in error messages
    fn here(&self) -> usize {
        self.current_token()
            .map(|t| t.position)
            .unwrap_or(self.formula.chars().count())
    }

    /// formula := unit+ , stops at ')' or at the end of input
    fn parse_sequence(&mut self) -> Result<Vec<FormulaNode>, StoichError> {
        let mut nodes = Vec::new();
        while let Some(token) = self.current_token() {
            match &token.kind {
                TokenKind::Element(_) => nodes.push(self.parse_atom()?),
                TokenKind::LParen => nodes.push(self.parse_group()?),
                TokenKind::RParen => break,
                TokenKind::Number(n) => {
                    return Err(syntax_error(
                        self.formula,
                        token.position,
                        &format!("count {} does not follow an element or group", n),
                    ));
                }
            }
        }
        Ok(nodes)
    }

    /// optional count after an element or a closing bracket, 1 if absent
    fn parse_count(&mut self) -> Result<u32, StoichError> {
        if let Some(Token {
            kind: TokenKind::Number(n),
            position,
        }) = self.current_token()
        {
            let (n, position) = (*n, *position);
            if n == 0 {
                return Err(syntax_error(self.formula, position, "count must be positive"));
            }
            self.advance();
            return Ok(n);
        }
        Ok(1)
    }

    fn parse_atom(&mut self) -> Result<FormulaNode, StoichError> {
        let symbol = match self.current_token() {
            Some(Token {
                kind: TokenKind::Element(symbol),
                ..
            }) => symbol.clone(),
            _ => return Err(syntax_error(self.formula, self.here(), "expected element")),
        };
        self.advance();
        let count = self.parse_count()?;
        Ok(FormulaNode::Atom { symbol, count })
    }

    fn parse_group(&mut self) -> Result<FormulaNode, StoichError> {
        let open_at = self.here();
        self.advance(); // '('
        let nodes = self.parse_sequence()?;
        match self.current_token() {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => self.advance(),
            _ => return Err(syntax_error(self.formula, open_at, "unmatched '('")),
        }
        if nodes.is_empty() {
            return Err(syntax_error(self.formula, open_at, "empty group"));
        }
        let count = self.parse_count()?;
        Ok(FormulaNode::Group { nodes, count })
    }
}

/// parses a formula into a syntax tree. Whitespace is ignored.
pub fn parse_formula(formula: &str) -> Result<ParsedFormula, StoichError> {
    let formula = normalize_formula(formula)?;
    let tokens = tokenize(&formula)?;
    let mut parser = FormulaParser::new(&formula, tokens);
    let nodes = parser.parse_sequence()?;
    if let Some(token) = parser.current_token() {
        // parse_sequence only stops early on ')'
        return Err(syntax_error(&formula, token.position, "unmatched ')'"));
    }
    if nodes.is_empty() {
        return Err(StoichError::InvalidFormula(INVALID_FORMAT.to_string()));
    }
    Ok(ParsedFormula { formula, nodes })
}

fn count_overflow(formula: &str) -> StoichError {
    StoichError::InvalidFormula(format!(
        "Invalid formula format: atom count is too large in '{}'.",
        formula
    ))
}

fn accumulate_counts(
    nodes: &[FormulaNode],
    multiplier: usize,
    counts: &mut HashMap<String, usize>,
) -> Option<()> {
    for node in nodes {
        match node {
            FormulaNode::Atom { symbol, count } => {
                let atoms = (*count as usize).checked_mul(multiplier)?;
                let entry = counts.entry(symbol.clone()).or_insert(0);
                *entry = entry.checked_add(atoms)?;
            }
            FormulaNode::Group { nodes, count } => {
                accumulate_counts(nodes, multiplier.checked_mul(*count as usize)?, counts)?
            }
        }
    }
    Some(())
}

fn collect_symbols<'n>(nodes: &'n [FormulaNode], symbols: &mut Vec<&'n str>) {
    for node in nodes {
        match node {
            FormulaNode::Atom { symbol, .. } => symbols.push(symbol),
            FormulaNode::Group { nodes, .. } => collect_symbols(nodes, symbols),
        }
    }
}

impl ParsedFormula {
    /// element symbol -> number of atoms, groups multiplied out.
    /// Fails when a total does not fit in `usize`.
    pub fn element_counts(&self) -> Result<HashMap<String, usize>, StoichError> {
        let mut counts = HashMap::new();
        accumulate_counts(&self.nodes, 1, &mut counts)
            .ok_or_else(|| count_overflow(&self.formula))?;
        Ok(counts)
    }

    /// element symbols in order of appearance (with repetitions)
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols = Vec::new();
        collect_symbols(&self.nodes, &mut symbols);
        symbols
    }

    /// fails on the first symbol (left to right) missing from the element table
    pub fn check_elements(&self) -> Result<(), StoichError> {
        match self.symbols().into_iter().find(|s| !is_element(s)) {
            Some(unknown) => Err(StoichError::UnknownElement(unknown.to_string())),
            None => Ok(()),
        }
    }
}

/// element composition of a formula, fails on unknown elements
pub fn element_composition(formula: &str) -> Result<HashMap<String, usize>, StoichError> {
    let parsed = parse_formula(formula)?;
    parsed.check_elements()?;
    parsed.element_counts()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs.iter().map(|(s, n)| (s.to_string(), *n)).collect()
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Ca(OH)2").unwrap();
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Element("Ca".to_string()),
                TokenKind::LParen,
                TokenKind::Element("O".to_string()),
                TokenKind::Element("H".to_string()),
                TokenKind::RParen,
                TokenKind::Number(2),
            ]
        );
    }

    #[test]
    fn test_element_counts() {
        assert_eq!(
            element_composition("C6H8O6").unwrap(),
            counts(&[("C", 6), ("H", 8), ("O", 6)])
        );
        assert_eq!(
            element_composition("Na(NO3)2").unwrap(),
            counts(&[("Na", 1), ("N", 2), ("O", 6)])
        );
        // repeated symbols are summed
        assert_eq!(
            element_composition("CH3COOH").unwrap(),
            counts(&[("C", 2), ("H", 4), ("O", 2)])
        );
        assert_eq!(
            element_composition("Al2(SO4)3").unwrap(),
            counts(&[("Al", 2), ("S", 3), ("O", 12)])
        );
    }

    #[test]
    fn test_nested_groups() {
        assert_eq!(
            element_composition("K4(Fe(CN)6)").unwrap(),
            counts(&[("K", 4), ("Fe", 1), ("C", 6), ("N", 6)])
        );
        assert_eq!(
            element_composition("((CH3)3C)2O").unwrap(),
            counts(&[("C", 8), ("H", 18), ("O", 1)])
        );
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(
            element_composition(" H2 O ").unwrap(),
            counts(&[("H", 2), ("O", 1)])
        );
    }

    #[test]
    fn test_structural_errors() {
        for bad in ["(H2O", "H2O)", "()2", "2H2O", "h2o", "H0", ""] {
            match parse_formula(bad) {
                Err(StoichError::InvalidFormula(_)) => {}
                other => panic!("{:?} gave {:?}", bad, other),
            }
        }
        assert_eq!(
            parse_formula("H2O!").unwrap_err(),
            StoichError::InvalidFormula(DISALLOWED_CHARACTERS.to_string())
        );
    }

    #[test]
    fn test_unknown_element_found_left_to_right() {
        assert_eq!(
            element_composition("NaXxQ").unwrap_err(),
            StoichError::UnknownElement("Xx".to_string())
        );
        // parsing alone does not consult the element table
        assert!(parse_formula("Xx2").is_ok());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_huge_nested_counts_are_rejected() {
        match element_composition("(((H999999)999999)999999)999999") {
            Err(StoichError::InvalidFormula(msg)) => assert!(msg.contains("too large")),
            other => panic!("expected InvalidFormula, got {:?}", other),
        }
        // just below 2^64 hydrogen atoms, still representable
        let nearly_max = "(H4294967295)4294967295";
        assert_eq!(
            element_composition(nearly_max).unwrap()["H"],
            4294967295usize * 4294967295usize
        );
        // the same group twice overflows on addition
        assert!(matches!(
            element_composition(&format!("{nearly_max}{nearly_max}")),
            Err(StoichError::InvalidFormula(_))
        ));
    }
}
