/// Table of chemical elements and their relative atomic masses
pub mod elements;
/// Tokenizer and recursive-descent parser of chemical formulae with nested groups
///
///  # Examples
/// ```
/// use ChemPrac::Stoichiometry::formula_parser::element_composition;
/// let composition = element_composition("(NH4)2SO4").unwrap();
/// assert_eq!(composition["N"], 2);
/// assert_eq!(composition["H"], 8);
/// ```
pub mod formula_parser;
/// Module to calculate the molar mass and atomic composition of a chemical formula
///
///  # Examples
/// ```
/// use ChemPrac::Stoichiometry::molmass::{compute_molar_mass, format_molar_mass};
/// let molar_mass = compute_molar_mass("CuSO4").unwrap();
/// assert_eq!(format_molar_mass(molar_mass), "159.62 g/mol");
/// ```
pub mod molmass;
/// Terms of a reaction equation: formula plus optional phase mark (s), (l), (g), (aq)
pub mod reaction_term;
/// Exact rational Gauss-Jordan elimination and null space
pub mod rational_nullspace;
/// Balancing of chemical equations
///
///  # Examples
/// ```
/// use ChemPrac::Stoichiometry::balancer::{BalancingMethod, EquationBalancer};
/// let balancer = EquationBalancer::new(BalancingMethod::Exact, 0.001);
/// let balanced = balancer.balance("C3H8 + O2 = CO2 + H2O").unwrap();
/// assert_eq!(balanced.coefficients, vec![1, 5, 3, 4]);
/// println!("{}", balanced);
/// ```
pub mod balancer;
mod balancer_tests;
/// error kinds of the stoichiometry tools
pub mod stoich_errors;
