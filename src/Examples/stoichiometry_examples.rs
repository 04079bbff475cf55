use crate::Stoichiometry::balancer::{BalancingMethod, EquationBalancer, balance_equation};
use crate::Stoichiometry::molmass::{
    calculate_molar_mass, calculate_molar_mass_of_vector_of_subs, create_elem_composition_matrix,
    format_molar_mass, mass_percent_composition,
};

pub fn stoich_examples(task: usize) {
    match task {
        0 => {
            // molar masses, element counts and composition matrix
            let formula = "K4(Fe(CN)6)";
            match calculate_molar_mass(formula) {
                Ok((molar_mass, element_composition)) => {
                    println!("Element counts: {:?}", element_composition);
                    println!("Molar mass of {}: {}", formula, format_molar_mass(molar_mass));
                }
                Err(e) => println!("Error: {}", e),
            }
            match mass_percent_composition("(NH4)2SO4") {
                Ok(percents) => {
                    for (element, percent) in percents {
                        println!("{}: {:.2} %", element, percent);
                    }
                }
                Err(e) => println!("Error: {}", e),
            }
            let vec_of_formulae = ["H2O", "NaCl", "C6H8O6", "Ca(NO3)2"];
            match calculate_molar_mass_of_vector_of_subs(&vec_of_formulae) {
                Ok(masses) => {
                    for (formula, mass) in vec_of_formulae.iter().zip(masses) {
                        println!("{}: {}", formula, format_molar_mass(mass));
                    }
                }
                Err(e) => println!("Error: {}", e),
            }
            match create_elem_composition_matrix(&["H2O", "NaCl", "C3H8", "CH4"]) {
                Ok((matrix, elements)) => {
                    println!("elements: {:?}", elements);
                    println!("{}", matrix);
                }
                Err(e) => println!("Error: {}", e),
            }
            // typos are reported, not guessed
            for formula in ["NaCL", "H2O)", "Xy2"] {
                if let Err(e) = calculate_molar_mass(formula) {
                    println!("{}: {}", formula, e);
                }
            }
        }
        1 => {
            // balancing with phases
            let equations = [
                "H2 + O2 = H2O",
                "MgCO3(s) + HCl(aq) = MgCl2(aq) + CO2(g) + H2O(l)",
                "KMnO4 + HCl = KCl + MnCl2 + H2O + Cl2",
                "Al2(SO4)3 + Ca(OH)2 = Al(OH)3 + CaSO4",
            ];
            for equation in equations {
                match balance_equation(equation) {
                    Ok(balanced) => println!("{}\n    {}", equation, balanced),
                    Err(e) => println!("{}\n    Error: {}", equation, e),
                }
            }
        }
        2 => {
            // exact and least squares balancing side by side
            let exact = EquationBalancer::new(BalancingMethod::Exact, 0.001);
            let least_squares = EquationBalancer::new(BalancingMethod::LeastSquares, 0.001);
            for equation in ["C3H8 + O2 = CO2 + H2O", "Fe + O2 = Fe2O3", "C + O2 = CO + CO2"] {
                for balancer in [&exact, &least_squares] {
                    match balancer.balance(equation) {
                        Ok(balanced) => {
                            println!("{:?}: {}", balancer.method, balanced);
                            if let Ok((reactants, products)) = balanced.mass_balance() {
                                println!("    mass: {:.2} g -> {:.2} g", reactants, products);
                            }
                        }
                        Err(e) => println!("{:?}: {} -> {}", balancer.method, equation, e),
                    }
                }
            }
        }
        _ => println!("No example with number {}", task),
    }
}
