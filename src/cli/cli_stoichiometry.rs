use super::cli_main::{print_error, prompt};
use crate::Stoichiometry::molmass::{
    calculate_molar_mass, format_molar_mass, mass_percent_composition,
};
use crate::settings::with_settings;
use prettytable::{Table, row};

pub fn molar_mass_menu() {
    loop {
        let Some(formula) = prompt("\nEnter a chemical formula (e.g. Ca(NO3)2), empty to go back: ")
        else {
            break;
        };
        if formula.is_empty() {
            break;
        }
        match calculate_molar_mass(&formula) {
            Ok((molar_mass, _)) => {
                println!("Molar Mass of {}: {}", formula, format_molar_mass(molar_mass));
                if let Ok(percents) = mass_percent_composition(&formula) {
                    let mut table = Table::new();
                    table.add_row(row!["Element", "Mass %"]);
                    for (element, percent) in percents {
                        table.add_row(row![element, format!("{:.2}", percent)]);
                    }
                    table.printstd();
                }
            }
            Err(e) => print_error(&e),
        }
    }
}

pub fn balance_menu() {
    let balancer = with_settings(|s| s.equation_balancer());
    println!("\nBalancing with the {:?} method", balancer.method);
    loop {
        let Some(equation) = prompt(
            "Enter an equation (e.g. MgCO3(s) + HCl(aq) = MgCl2(aq) + CO2(g) + H2O(l)), \
             empty to go back: ",
        ) else {
            break;
        };
        if equation.is_empty() {
            break;
        }
        match balancer.balance(&equation) {
            Ok(balanced) => println!("Balanced Equation: {}", balanced),
            Err(e) => print_error(&e),
        }
    }
}
