//! # Chemical equation balancer
//!
//! ## Aim
//! Takes an equation typed by the user, e.g. `MgCO3(s) + HCl(aq) = MgCl2(aq) + CO2(g) + H2O(l)`,
//! and returns it with integer stoichiometric coefficients:
//! `MgCO3(s) + 2HCl(aq) -> MgCl2(aq) + CO2(g) + H2O(l)`.
//!
//! ## Main Data Structures and Logic
//! - `ReactionEquation`: ordered reactant and product terms (`ReactionTerm`, formula + phase)
//! - composition matrix: one row per element (sorted symbols), one column per term
//!   (reactants first, then products); product entries are negated, so a vector of
//!   coefficients `x` balances the equation exactly when `A x = 0`
//! - `BalancingMethod::Exact`: null space of `A` over the rationals, scaled to the
//!   smallest integer vector. The null space must be one-dimensional.
//! - `BalancingMethod::LeastSquares`: `A` with an extra row `[1, 0, .., 0]` and target
//!   `[0, .., 0, 1]` solved by SVD least squares, divided by the smallest coefficient
//!   above `epsilon` and rounded
//! - whatever the method, the integer coefficients are checked against `A` before
//!   the equation is returned
//!
//! ## Usage
//! ```rust
//! use ChemPrac::Stoichiometry::balancer::balance_equation;
//! let balanced = balance_equation("H2 + O2 = H2O").unwrap();
//! assert_eq!(balanced, "2H2 + O2 -> 2H2O");
//! ```
use crate::Stoichiometry::molmass::compute_molar_mass;
use crate::Stoichiometry::rational_nullspace::{from_integer_rows, null_space, to_minimal_integers};
use crate::Stoichiometry::reaction_term::{ReactionTerm, parse_formula_with_state};
use crate::Stoichiometry::stoich_errors::{MISSING_SEPARATOR, StoichError};
use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector};
use num_traits::{Signed, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// singular values below this are treated as zero in the least squares solve
const SVD_EPS: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BalancingMethod {
    /// rational null space, always the minimal integer coefficients
    #[default]
    Exact,
    /// least squares plus rounding
    LeastSquares,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReactionEquation {
    pub reactants: Vec<ReactionTerm>,
    pub products: Vec<ReactionTerm>,
}

fn parse_side(side: &str) -> Result<Vec<ReactionTerm>, StoichError> {
    side.split('+').map(parse_formula_with_state).collect()
}

impl ReactionEquation {
    /// Splits `reactants -> products` (or `reactants = products`) into terms.
    pub fn parse(equation: &str) -> Result<Self, StoichError> {
        let normalized = equation.replace('=', "->");
        if !normalized.contains("->") {
            return Err(StoichError::InvalidEquation(MISSING_SEPARATOR.to_string()));
        }
        let sides: Vec<&str> = normalized.split("->").collect();
        if sides.len() != 2 {
            return Err(StoichError::InvalidEquation(format!(
                "Equation must contain exactly one '=' or '->', found {}.",
                sides.len() - 1
            )));
        }
        let reactants = parse_side(sides[0])?;
        let products = parse_side(sides[1])?;
        debug!(
            "parsed equation: {} reactant(s), {} product(s)",
            reactants.len(),
            products.len()
        );
        Ok(ReactionEquation {
            reactants,
            products,
        })
    }

    /// reactants followed by products
    pub fn terms(&self) -> impl Iterator<Item = &ReactionTerm> {
        self.reactants.iter().chain(self.products.iter())
    }

    pub fn number_of_terms(&self) -> usize {
        self.reactants.len() + self.products.len()
    }

    /// every element found in any term, sorted by symbol
    pub fn elements(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.terms().flat_map(|t| t.composition.keys()).collect();
        set.into_iter().cloned().collect()
    }

    /// rows: elements (see [`Self::elements`]), columns: reactants then products,
    /// product counts negated. Fails when an atom count does not fit in `i64`.
    pub fn composition_matrix(&self) -> Result<(Vec<String>, Vec<Vec<i64>>), StoichError> {
        let elements = self.elements();
        let n_reactants = self.reactants.len();
        let rows = elements
            .iter()
            .map(|element| {
                self.terms()
                    .enumerate()
                    .map(|(j, term)| {
                        let count = *term.composition.get(element).unwrap_or(&0);
                        let count = i64::try_from(count).map_err(|_| {
                            StoichError::InvalidTerm(format!(
                                "{} (too many {} atoms)",
                                term.raw, element
                            ))
                        })?;
                        Ok(if j < n_reactants { count } else { -count })
                    })
                    .collect::<Result<Vec<i64>, StoichError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((elements, rows))
    }
}

/// equation together with one integer coefficient per term
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedEquation {
    pub equation: ReactionEquation,
    /// reactants then products, same order as [`ReactionEquation::terms`]
    pub coefficients: Vec<u64>,
}

fn format_side(terms: &[ReactionTerm], coefficients: &[u64]) -> String {
    terms
        .iter()
        .zip(coefficients)
        .map(|(term, &c)| {
            if c == 1 {
                term.to_string()
            } else {
                format!("{}{}", c, term)
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

impl fmt::Display for BalancedEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n_reactants = self.equation.reactants.len();
        let (reactant_coeffs, product_coeffs) = self.coefficients.split_at(n_reactants);
        write!(
            f,
            "{} -> {}",
            format_side(&self.equation.reactants, reactant_coeffs),
            format_side(&self.equation.products, product_coeffs)
        )
    }
}

impl BalancedEquation {
    /// total mass of reactants and of products (g per "mole of reaction");
    /// equal for a balanced equation
    pub fn mass_balance(&self) -> Result<(f64, f64), StoichError> {
        let n_reactants = self.equation.reactants.len();
        let mut masses = (0.0, 0.0);
        for (j, (term, &c)) in self.equation.terms().zip(&self.coefficients).enumerate() {
            let mass = c as f64 * compute_molar_mass(&term.formula)?;
            if j < n_reactants {
                masses.0 += mass;
            } else {
                masses.1 += mass;
            }
        }
        Ok(masses)
    }
}

/// checks A x = 0 with integer arithmetic, names the first element that is not conserved
pub fn verify_conservation(
    elements: &[String],
    matrix: &[Vec<i64>],
    coefficients: &[u64],
) -> Result<(), StoichError> {
    for (element, row) in elements.iter().zip(matrix) {
        let total = row
            .iter()
            .zip(coefficients)
            .try_fold(0i128, |acc, (&a, &c)| {
                (a as i128)
                    .checked_mul(c as i128)
                    .and_then(|term| acc.checked_add(term))
            })
            .ok_or_else(|| {
                StoichError::UnbalanceableSystem(format!(
                    "atom total of {} is too large",
                    element
                ))
            })?;
        if total != 0 {
            return Err(StoichError::UnbalanceableSystem(format!(
                "coefficients do not conserve {}",
                element
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct EquationBalancer {
    pub method: BalancingMethod,
    /// least squares only: coefficients at or below it are ignored when looking for
    /// the smallest one
    pub epsilon: f64,
}

impl Default for EquationBalancer {
    fn default() -> Self {
        Self {
            method: BalancingMethod::Exact,
            epsilon: 0.001,
        }
    }
}

impl EquationBalancer {
    pub fn new(method: BalancingMethod, epsilon: f64) -> Self {
        Self { method, epsilon }
    }

    pub fn balance(&self, equation: &str) -> Result<BalancedEquation, StoichError> {
        let equation = ReactionEquation::parse(equation)?;
        let (elements, matrix) = equation.composition_matrix()?;
        debug!("composition matrix over {:?}: {:?}", elements, matrix);
        let coefficients = match self.method {
            BalancingMethod::Exact => exact_coefficients(&matrix, equation.number_of_terms())?,
            BalancingMethod::LeastSquares => {
                least_squares_coefficients(&matrix, equation.number_of_terms(), self.epsilon)?
            }
        };
        if let Err(e) = verify_conservation(&elements, &matrix, &coefficients) {
            warn!("{:?} solver gave {:?}: {}", self.method, coefficients, e);
            return Err(e);
        }
        let balanced = BalancedEquation {
            equation,
            coefficients,
        };
        info!("balanced: {}", balanced);
        Ok(balanced)
    }
}

fn exact_coefficients(matrix: &[Vec<i64>], n_terms: usize) -> Result<Vec<u64>, StoichError> {
    let rational = from_integer_rows(matrix);
    let basis = null_space(&rational, n_terms);
    match basis.len() {
        1 => {}
        0 => {
            return Err(StoichError::UnbalanceableSystem(
                "singular matrix: only the zero solution exists".to_string(),
            ));
        }
        n => {
            return Err(StoichError::UnbalanceableSystem(format!(
                "complex reaction: {} independent reactions are mixed together",
                n
            )));
        }
    }
    let integers = to_minimal_integers(&basis[0]);
    if integers.iter().any(|x| x.is_negative()) {
        return Err(StoichError::UnbalanceableSystem(
            "a substance would have to change sides".to_string(),
        ));
    }
    integers
        .iter()
        .map(|x| {
            x.to_u64().ok_or_else(|| {
                StoichError::UnbalanceableSystem("coefficient is too large".to_string())
            })
        })
        .collect()
}

fn least_squares_coefficients(
    matrix: &[Vec<i64>],
    n_terms: usize,
    epsilon: f64,
) -> Result<Vec<u64>, StoichError> {
    let n_elements = matrix.len();
    let composition = DMatrix::from_fn(n_elements, n_terms, |i, j| matrix[i][j] as f64);
    let rank = composition.rank(SVD_EPS);
    if rank + 1 != n_terms {
        return Err(StoichError::UnbalanceableSystem(format!(
            "singular matrix or complex reaction: rank {} for {} substances",
            rank, n_terms
        )));
    }
    // pin the first coefficient
    let augmented = DMatrix::from_fn(n_elements + 1, n_terms, |i, j| {
        if i < n_elements {
            composition[(i, j)]
        } else if j == 0 {
            1.0
        } else {
            0.0
        }
    });
    let mut target = DVector::<f64>::zeros(n_elements + 1);
    target[n_elements] = 1.0;
    let solution = augmented
        .svd(true, true)
        .solve(&target, SVD_EPS)
        .map_err(|e| StoichError::UnbalanceableSystem(e.to_string()))?;
    debug!("least squares solution: {:?}", solution.as_slice());

    let smallest = solution
        .iter()
        .copied()
        .filter(|&c| c > epsilon)
        .fold(f64::INFINITY, f64::min);
    if !smallest.is_finite() {
        return Err(StoichError::UnbalanceableSystem(
            "no positive coefficient found".to_string(),
        ));
    }
    solution
        .iter()
        .map(|c| {
            let rounded = (c / smallest).round();
            if rounded < 0.0 {
                Err(StoichError::UnbalanceableSystem(
                    "a substance would have to change sides".to_string(),
                ))
            } else {
                Ok(rounded as u64)
            }
        })
        .collect()
}

/// Balances with the exact method and returns the formatted equation,
/// e.g. `"H2 + O2 = H2O"` -> `"2H2 + O2 -> 2H2O"`.
pub fn balance_equation(equation: &str) -> Result<String, StoichError> {
    EquationBalancer::default()
        .balance(equation)
        .map(|balanced| balanced.to_string())
}
