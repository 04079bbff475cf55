pub mod solution_examples;
pub mod stoichiometry_examples;
