#[cfg(test)]
mod tests {
    use crate::Stoichiometry::balancer::{
        BalancingMethod, EquationBalancer, ReactionEquation, balance_equation,
        verify_conservation,
    };
    use crate::Stoichiometry::reaction_term::{Phase, parse_formula_with_state};
    use crate::Stoichiometry::stoich_errors::StoichError;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    /// counts atoms of every element on one side of a balanced equation string like "2H2 + O2"
    fn side_totals(side: &str) -> HashMap<String, usize> {
        let mut totals = HashMap::new();
        for term in side.split(" + ") {
            let digits: String = term.chars().take_while(|c| c.is_ascii_digit()).collect();
            let coefficient: usize = if digits.is_empty() {
                1
            } else {
                digits.parse().unwrap()
            };
            let parsed = parse_formula_with_state(&term[digits.len()..]).unwrap();
            for (element, count) in parsed.composition {
                *totals.entry(element).or_insert(0) += coefficient * count;
            }
        }
        totals
    }

    fn assert_conserved(balanced: &str) {
        let (left, right) = balanced.split_once(" -> ").unwrap();
        assert_eq!(side_totals(left), side_totals(right), "{}", balanced);
    }

    fn ls_balancer() -> EquationBalancer {
        EquationBalancer::new(BalancingMethod::LeastSquares, 0.001)
    }

    #[test]
    fn test_water_synthesis() {
        assert_eq!(balance_equation("H2 + O2 = H2O").unwrap(), "2H2 + O2 -> 2H2O");
        assert_eq!(balance_equation("H2 + O2 -> H2O").unwrap(), "2H2 + O2 -> 2H2O");
        assert_eq!(
            ls_balancer().balance("H2 + O2 = H2O").unwrap().to_string(),
            "2H2 + O2 -> 2H2O"
        );
    }

    #[test]
    fn test_ammonia_smallest_coefficient_is_one() {
        assert_eq!(balance_equation("N2 + H2 = NH3").unwrap(), "N2 + 3H2 -> 2NH3");
        assert_eq!(
            ls_balancer().balance("N2 + H2 = NH3").unwrap().to_string(),
            "N2 + 3H2 -> 2NH3"
        );
    }

    #[test]
    fn test_phases_are_preserved() {
        let balanced = balance_equation("MgCO3(s) + O2(g) = MgO(s) + CO2(g)").unwrap();
        assert!(balanced.contains("MgCO3(s)"));
        assert!(balanced.contains("O2(g)"));
        assert!(balanced.contains("MgO(s)"));
        assert!(balanced.contains("CO2(g)"));
        assert_conserved(&balanced);

        let balanced =
            balance_equation("MgCO3(s) + HCl(aq) = MgCl2(aq) + CO2(g) + H2O(l)").unwrap();
        assert_eq!(
            balanced,
            "MgCO3(s) + 2HCl(aq) -> MgCl2(aq) + CO2(g) + H2O(l)"
        );
        assert_conserved(&balanced);
    }

    #[test]
    fn test_spectator_gets_explicit_zero() {
        // O2 cannot take part in the decomposition of MgCO3
        let balanced = balance_equation("MgCO3(s) + O2(g) = MgO(s) + CO2(g)").unwrap();
        assert_eq!(balanced, "MgCO3(s) + 0O2(g) -> MgO(s) + CO2(g)");
        let balanced = ls_balancer()
            .balance("MgCO3(s) + O2(g) = MgO(s) + CO2(g)")
            .unwrap();
        assert_eq!(balanced.coefficients, vec![1, 0, 1, 1]);
    }

    #[test]
    fn test_larger_equations() {
        let cases = [
            ("C3H8 + O2 = CO2 + H2O", "C3H8 + 5O2 -> 3CO2 + 4H2O"),
            ("Fe + O2 = Fe2O3", "4Fe + 3O2 -> 2Fe2O3"),
            ("NaCl = Na + Cl2", "2NaCl -> 2Na + Cl2"),
            (
                "KMnO4 + HCl = KCl + MnCl2 + H2O + Cl2",
                "2KMnO4 + 16HCl -> 2KCl + 2MnCl2 + 8H2O + 5Cl2",
            ),
            (
                "Al2(SO4)3 + Ca(OH)2 = Al(OH)3 + CaSO4",
                "Al2(SO4)3 + 3Ca(OH)2 -> 2Al(OH)3 + 3CaSO4",
            ),
            (
                "(NH4)2Cr2O7 = Cr2O3 + N2 + H2O",
                "(NH4)2Cr2O7 -> Cr2O3 + N2 + 4H2O",
            ),
        ];
        for (input, expected) in cases {
            let balanced = balance_equation(input).unwrap();
            assert_eq!(balanced, expected);
            assert_conserved(&balanced);
        }
    }

    #[test]
    fn test_rounding_heuristic_is_caught_by_verification() {
        // least squares gives 1 : 0.75 : 0.5, scaled by 0.5 -> 2 : 1.5 : 1, rounded -> 2 : 2 : 1
        match ls_balancer().balance("Fe + O2 = Fe2O3") {
            Err(StoichError::UnbalanceableSystem(msg)) => assert!(msg.contains("O")),
            other => panic!("expected UnbalanceableSystem, got {:?}", other),
        }
    }

    #[test]
    fn test_unbalanceable() {
        for input in ["H2O = H2O2", "C + O2 = CO + CO2", "NaCl = KBr"] {
            for balancer in [EquationBalancer::default(), ls_balancer()] {
                match balancer.balance(input) {
                    Err(StoichError::UnbalanceableSystem(_)) => {}
                    other => panic!("{} with {:?}: {:?}", input, balancer.method, other),
                }
            }
        }
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            balance_equation("H2 + O2 H2O"),
            Err(StoichError::InvalidEquation(_))
        ));
        assert!(matches!(
            balance_equation("H2 -> O2 -> H2O"),
            Err(StoichError::InvalidEquation(_))
        ));
        assert_eq!(
            balance_equation("H2 + = H2O").unwrap_err(),
            StoichError::InvalidTerm(String::new())
        );
        assert_eq!(
            balance_equation("H2 + O2! = H2O").unwrap_err(),
            StoichError::InvalidTerm("O2!".to_string())
        );
        match balance_equation("A = B") {
            Err(StoichError::InvalidTerm(_)) | Err(StoichError::UnknownElement(_)) => {}
            other => panic!("A = B gave {:?}", other),
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_counts_fail_instead_of_wrapping() {
        // overflows usize while multiplying out the groups
        match balance_equation("(((H999999)999999)999999)999999 = H2") {
            Err(StoichError::InvalidTerm(_)) => {}
            other => panic!("expected InvalidTerm, got {:?}", other),
        }
        // fits in usize but not in i64
        let equation = ReactionEquation::parse("(H4294967295)4294967295 = H2").unwrap();
        assert!(matches!(
            equation.composition_matrix(),
            Err(StoichError::InvalidTerm(_))
        ));
        assert!(matches!(
            balance_equation("(H4294967295)4294967295 = H2"),
            Err(StoichError::InvalidTerm(_))
        ));
        // large but representable counts are still balanced exactly
        assert_eq!(
            balance_equation("(H65535)65535 = H2").unwrap(),
            "2(H65535)65535 -> 4294836225H2"
        );
    }

    #[test]
    fn test_idempotent() {
        let input = "KMnO4 + HCl = KCl + MnCl2 + H2O + Cl2";
        let first = balance_equation(input).unwrap();
        let second = balance_equation(input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_composition_matrix() {
        let equation = ReactionEquation::parse("H2 + O2(g) = H2O(l)").unwrap();
        assert_eq!(equation.reactants[1].phase, Phase::Gas);
        assert_eq!(equation.products[0].phase, Phase::Liquid);
        let (elements, matrix) = equation.composition_matrix().unwrap();
        assert_eq!(elements, vec!["H", "O"]);
        assert_eq!(matrix, vec![vec![2, 0, -2], vec![0, 2, -1]]);
        assert!(verify_conservation(&elements, &matrix, &[2, 1, 2]).is_ok());
        assert!(verify_conservation(&elements, &matrix, &[1, 1, 1]).is_err());
    }

    #[test]
    fn test_mass_balance() {
        let balanced = EquationBalancer::default()
            .balance("C3H8 + O2 = CO2 + H2O")
            .unwrap();
        let (reactants, products) = balanced.mass_balance().unwrap();
        assert_relative_eq!(reactants, products, epsilon = 1e-9);
    }
}
