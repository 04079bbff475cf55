use super::cli_main::{parse_flask_list, print_error, prompt};
use crate::Solutions::bulk_preparation::{BulkRequest, calculate_bulk};
use crate::Solutions::chemical_catalogue::all_chemicals;
use crate::Solutions::solution_calculator::{
    ConcentrationKind, Reagent, SolutionRequest, calculate_solution,
};
use crate::Utils::units::{needs_reorder, parse_quantity, try_convert_units};
use crate::settings::with_settings;
use std::fs;

/// asks until the answer parses or the user gives up with an empty line
fn prompt_number(message: &str) -> Option<f64> {
    loop {
        let answer = prompt(message)?;
        if answer.is_empty() {
            return None;
        }
        match answer.parse::<f64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("'{}' is not a number.", answer),
        }
    }
}

fn choose_reagent() -> Option<Reagent> {
    println!("\nChemicals:");
    for (i, chemical) in all_chemicals().iter().enumerate() {
        println!("{:>3}. {}", i + 1, chemical.name);
    }
    println!("  c. Custom formula");
    loop {
        let answer = prompt("Choose a chemical (empty to go back): ")?;
        if answer.is_empty() {
            return None;
        }
        if answer.eq_ignore_ascii_case("c") {
            let formula = prompt("Formula: ")?;
            if formula.is_empty() {
                return None;
            }
            return Some(Reagent::custom(&formula));
        }
        let chosen = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| all_chemicals().get(i));
        match chosen.map(|c| Reagent::from_catalogue(c.name)) {
            Some(Ok(reagent)) => return Some(reagent),
            Some(Err(e)) => print_error(&e),
            None => println!("Invalid choice. Please try again."),
        }
    }
}

fn choose_concentration_kind() -> Option<ConcentrationKind> {
    for (i, kind) in ConcentrationKind::ALL.iter().enumerate() {
        println!("{}. {}", i + 1, kind);
    }
    loop {
        let answer = prompt("Concentration type: ")?;
        match answer.as_str() {
            "" => return None,
            "1" => return Some(ConcentrationKind::Molarity),
            "2" => return Some(ConcentrationKind::PercentWeightVolume),
            "3" => return Some(ConcentrationKind::PercentVolumeVolume),
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

/// reagent, concentration type, value and optional stock override
fn read_solution_request() -> Option<SolutionRequest> {
    let mut reagent = choose_reagent()?;
    let kind = choose_concentration_kind()?;
    let value = prompt_number("Concentration value: ")?;
    let stock = prompt_number("Stock concentration (empty to keep the catalogue value): ");
    if let Some(stock) = stock {
        match reagent.with_stock(stock, kind) {
            Ok(r) => reagent = r,
            Err(e) => {
                print_error(&e);
                return None;
            }
        }
    }
    match SolutionRequest::new(reagent, kind, value) {
        Ok(request) => Some(request),
        Err(e) => {
            print_error(&e);
            None
        }
    }
}

fn read_flasks(message: &str) -> Option<Vec<u32>> {
    loop {
        let answer = prompt(message)?;
        match parse_flask_list(&answer) {
            Ok(flasks) => return Some(flasks),
            Err(e) => print_error(&e),
        }
    }
}

fn offer_to_save(text: &str) {
    let Some(path) = prompt("Save report to file (path, empty to skip): ") else {
        return;
    };
    if path.is_empty() {
        return;
    }
    match fs::write(&path, text) {
        Ok(()) => println!("Report saved to {}", path),
        Err(e) => print_error(&e),
    }
}

pub fn solution_menu() {
    let Some(request) = read_solution_request() else {
        return;
    };
    let configured = with_settings(|s| s.flask_sizes().to_vec());
    let Some(mut flasks) = read_flasks(&format!(
        "Flask sizes in mL (e.g. 100, 250), empty for all {:?}: ",
        configured
    )) else {
        return;
    };
    if flasks.is_empty() {
        flasks = configured;
    }
    match calculate_solution(&request, &flasks) {
        Ok(report) => {
            report.pretty_print();
            offer_to_save(&report.to_text());
        }
        Err(e) => print_error(&e),
    }
}

pub fn bulk_menu() {
    let Some(request) = read_solution_request() else {
        return;
    };
    let Some(students) = prompt_number("Number of students: ") else {
        return;
    };
    if students < 0.0 || students.fract() != 0.0 || students > u32::MAX as f64 {
        print_error(&"Number of students must be a whole number.");
        return;
    }
    let Some(volume_per_student_ml) = prompt_number("Volume per student (mL): ") else {
        return;
    };
    let (configured, default_extra) =
        with_settings(|s| (s.flask_sizes().to_vec(), s.default_extra_volume_percent()));
    let extra_volume_percent = prompt_number(&format!(
        "Extra volume % (empty for {}): ",
        default_extra
    ))
    .unwrap_or(default_extra);
    let Some(preferred_flasks) = read_flasks("Preferred flask sizes in mL, empty for all: ") else {
        return;
    };
    let bulk = BulkRequest {
        students: students as u32,
        volume_per_student_ml,
        extra_volume_percent,
        preferred_flasks,
    };
    match calculate_bulk(&request, &bulk, &configured) {
        Ok(plan) => {
            let text = plan.to_text();
            println!("{}", text);
            offer_to_save(&text);
        }
        Err(e) => print_error(&e),
    }
}

pub fn unit_conversion_menu() {
    loop {
        println!("\n=== Unit Conversion ===");
        println!("1. Convert a quantity");
        println!("2. Check reorder level");
        println!("0. Back to main menu");
        let Some(choice) = prompt("Enter your choice: ") else {
            break;
        };
        match choice.as_str() {
            "1" => {
                let Some(input) = prompt("Quantity (e.g. 2.5 L): ") else {
                    break;
                };
                let Some(quantity) = parse_quantity(&input) else {
                    print_error(&format!("cannot read a quantity from '{}'", input));
                    continue;
                };
                let Some(target) = prompt("Convert to unit: ") else {
                    break;
                };
                match try_convert_units(quantity.value, &quantity.unit, &target) {
                    Some(value) => println!("{} = {} {}", quantity, value, target),
                    None => print_error(&format!(
                        "cannot convert {} to {}",
                        quantity.unit, target
                    )),
                }
            }
            "2" => {
                let Some(stock) = prompt("Quantity in stock (e.g. 400 mL): ") else {
                    break;
                };
                let Some(level) = prompt("Reorder level (e.g. 0.5 L): ") else {
                    break;
                };
                if needs_reorder(&stock, &level) {
                    println!("\x1b[31mReorder: {} is at or below {}\x1b[0m", stock, level);
                } else {
                    println!("Stock is sufficient.");
                }
            }
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
