/// Module to calculate the molar mass and atomic composition of a chemical formula
///
use crate::Stoichiometry::elements::atomic_mass;
use crate::Stoichiometry::formula_parser::{FormulaNode, parse_formula};
use crate::Stoichiometry::stoich_errors::StoichError;
use log::debug;
use nalgebra::DMatrix;
use std::collections::{BTreeSet, HashMap};

fn nodes_mass(nodes: &[FormulaNode]) -> Result<f64, StoichError> {
    let mut total_mass = 0.0;
    for node in nodes {
        match node {
            FormulaNode::Atom { symbol, count } => {
                let mass = atomic_mass(symbol)
                    .ok_or_else(|| StoichError::UnknownElement(symbol.clone()))?;
                total_mass += mass * *count as f64;
            }
            FormulaNode::Group { nodes, count } => {
                total_mass += nodes_mass(nodes)? * *count as f64;
            }
        }
    }
    Ok(total_mass)
}

/// Total relative molecular mass of a formula (g/mol), e.g. 18.02 for `H2O`.
/// Whitespace inside the formula is ignored. The returned value is not rounded,
/// use [`format_molar_mass`] for display.
pub fn compute_molar_mass(formula: &str) -> Result<f64, StoichError> {
    let parsed = parse_formula(formula)?;
    let molar_mass = nodes_mass(&parsed.nodes)?;
    debug!("molar mass of {} = {}", parsed.formula, molar_mass);
    Ok(molar_mass)
}

/// rounds to the given number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// "18.02 g/mol"
pub fn format_molar_mass(molar_mass: f64) -> String {
    format!("{:.2} g/mol", molar_mass)
}

/// molar mass together with the element composition of the formula
pub fn calculate_molar_mass(formula: &str) -> Result<(f64, HashMap<String, usize>), StoichError> {
    let parsed = parse_formula(formula)?;
    let molar_mass = nodes_mass(&parsed.nodes)?;
    Ok((molar_mass, parsed.element_counts()?))
}

// Function to calculate the molar mass of a vector of chemical formulas
pub fn calculate_molar_mass_of_vector_of_subs(
    vec_of_formulae: &[&str],
) -> Result<Vec<f64>, StoichError> {
    vec_of_formulae
        .iter()
        .map(|formula| compute_molar_mass(formula))
        .collect()
}

/// mass fraction of every element in the substance, in percent
pub fn mass_percent_composition(formula: &str) -> Result<Vec<(String, f64)>, StoichError> {
    let (molar_mass, counts) = calculate_molar_mass(formula)?;
    let mut percents = Vec::with_capacity(counts.len());
    let sorted: BTreeSet<&String> = counts.keys().collect();
    for element in sorted {
        let mass =
            atomic_mass(element).ok_or_else(|| StoichError::UnknownElement(element.clone()))?;
        percents.push((
            element.clone(),
            100.0 * mass * counts[element] as f64 / molar_mass,
        ));
    }
    Ok(percents)
}

/// matrix of atomic composition: rows are substances, columns are elements (sorted symbols)
pub fn create_elem_composition_matrix(
    vec_of_formulae: &[&str],
) -> Result<(DMatrix<f64>, Vec<String>), StoichError> {
    let mut set_of_elems: BTreeSet<String> = BTreeSet::new();
    let mut vec_of_compositions = Vec::new();
    for formula in vec_of_formulae.iter() {
        let parsed = parse_formula(formula)?;
        parsed.check_elements()?;
        let counts = parsed.element_counts()?;
        set_of_elems.extend(counts.keys().cloned());
        vec_of_compositions.push(counts);
    }
    let unique_vec_of_elems = set_of_elems.into_iter().collect::<Vec<_>>();
    let matrix = DMatrix::from_fn(vec_of_compositions.len(), unique_vec_of_elems.len(), |i, j| {
        *vec_of_compositions[i]
            .get(&unique_vec_of_elems[j])
            .unwrap_or(&0) as f64
    });
    Ok((matrix, unique_vec_of_elems))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stoichiometry::stoich_errors::DISALLOWED_CHARACTERS;
    use approx::assert_relative_eq;

    #[test]
    fn test_compute_molar_mass() {
        assert_relative_eq!(round_to(compute_molar_mass("H2O").unwrap(), 2), 18.02);
        assert_relative_eq!(round_to(compute_molar_mass("CuSO4").unwrap(), 2), 159.62);
        assert_relative_eq!(round_to(compute_molar_mass("NaCl").unwrap(), 2), 58.45);
        assert_relative_eq!(
            compute_molar_mass("C6H8O6").unwrap(),
            6.0 * 12.01 + 8.0 * 1.01 + 6.0 * 16.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_group_is_multiplied_before_the_rest_is_added() {
        let expected = 2.0 * (14.01 + 4.0 * 1.01) + 32.07 + 4.0 * 16.0;
        let molar_mass = compute_molar_mass("(NH4)2SO4").unwrap();
        assert_relative_eq!(molar_mass, expected, epsilon = 1e-9);
        assert_relative_eq!(round_to(molar_mass, 2), 132.17);
        // the same without parentheses
        assert_relative_eq!(
            molar_mass,
            compute_molar_mass("N2H8SO4").unwrap(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_nested_group_mass() {
        let expected = 4.0 * 39.10 + 55.85 + 6.0 * (12.01 + 14.01);
        assert_relative_eq!(
            compute_molar_mass("K4(Fe(CN)6)").unwrap(),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            compute_molar_mass("Xx").unwrap_err(),
            StoichError::UnknownElement("Xx".to_string())
        );
        assert_eq!(
            compute_molar_mass("H2O!").unwrap_err(),
            StoichError::InvalidFormula(DISALLOWED_CHARACTERS.to_string())
        );
        assert!(matches!(
            compute_molar_mass("   "),
            Err(StoichError::InvalidFormula(_))
        ));
    }

    #[test]
    fn test_display_rounding() {
        let molar_mass = compute_molar_mass("Ca(NO3)2").unwrap();
        assert_eq!(format_molar_mass(molar_mass), "164.10 g/mol");
        // raw value is kept
        assert!((molar_mass - round_to(molar_mass, 2)).abs() < 0.005);
    }

    #[test]
    fn test_calculate_molar_mass_of_vector_of_substances() {
        let masses = calculate_molar_mass_of_vector_of_subs(&["H2O", "NaCl", "CaCO3"]).unwrap();
        let expected = [18.02, 58.45, 100.09];
        for (m, e) in masses.iter().zip(expected.iter()) {
            assert_relative_eq!(round_to(*m, 2), *e);
        }
        assert!(calculate_molar_mass_of_vector_of_subs(&["H2O", "Qq"]).is_err());
    }

    #[test]
    fn test_mass_percent_composition() {
        let percents = mass_percent_composition("H2O").unwrap();
        assert_eq!(percents[0].0, "H");
        assert_eq!(percents[1].0, "O");
        let total: f64 = percents.iter().map(|(_, p)| p).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_element_matrix() {
        let (matrix, elements) =
            create_elem_composition_matrix(&["H2O", "NaCl", "C3H8", "CH4"]).unwrap();
        assert_eq!(matrix.nrows(), 4);
        assert_eq!(matrix.ncols(), 5);
        assert_eq!(elements, vec!["C", "Cl", "H", "Na", "O"]);
        assert_eq!(matrix[(2, 2)], 8.0);
        assert_eq!(matrix[(0, 4)], 1.0);
    }
}
