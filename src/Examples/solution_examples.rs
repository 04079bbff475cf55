use crate::Solutions::bulk_preparation::{BulkRequest, calculate_bulk};
use crate::Solutions::chemical_catalogue::all_chemicals;
use crate::Solutions::solution_calculator::{
    ConcentrationKind, Reagent, SolutionRequest, calculate_solution,
};
use crate::Utils::units::{convert_units, needs_reorder, parse_quantity};
use crate::settings::with_settings;

pub fn solution_examples(task: usize) {
    match task {
        0 => {
            // 0.1 M NaCl in every flask of the lab
            let flasks = with_settings(|s| s.flask_sizes().to_vec());
            let request = Reagent::from_catalogue("Sodium Chloride (NaCl)")
                .and_then(|r| SolutionRequest::new(r, ConcentrationKind::Molarity, 0.1));
            match request.and_then(|r| calculate_solution(&r, &flasks)) {
                Ok(report) => report.pretty_print(),
                Err(e) => println!("Error: {}", e),
            }
        }
        1 => {
            // 1 M HCl from the 12 M stock, and 70 % v/v ethanol
            let requests = [
                ("Hydrochloric Acid (HCl)", ConcentrationKind::Molarity, 1.0),
                ("Ethanol (C2H5OH)", ConcentrationKind::PercentVolumeVolume, 70.0),
            ];
            for (name, kind, value) in requests {
                let report = Reagent::from_catalogue(name)
                    .and_then(|r| SolutionRequest::new(r, kind, value))
                    .and_then(|r| calculate_solution(&r, &[100, 250]));
                match report {
                    Ok(report) => println!("{}", report.to_text()),
                    Err(e) => println!("Error: {}", e),
                }
            }
        }
        2 => {
            // a class of 30 students, 50 mL of 5 % w/v CuSO4 each
            let (flasks, extra) =
                with_settings(|s| (s.flask_sizes().to_vec(), s.default_extra_volume_percent()));
            let bulk = BulkRequest {
                students: 30,
                volume_per_student_ml: 50.0,
                extra_volume_percent: extra,
                preferred_flasks: vec![500, 250, 100],
            };
            let plan = Reagent::from_catalogue("Copper(II) Sulfate (CuSO4)")
                .and_then(|r| SolutionRequest::new(r, ConcentrationKind::PercentWeightVolume, 5.0))
                .and_then(|r| calculate_bulk(&r, &bulk, &flasks));
            match plan {
                Ok(plan) => println!("{}", plan.to_text()),
                Err(e) => println!("Error: {}", e),
            }
        }
        3 => {
            // catalogue and store book quantities
            for chemical in all_chemicals() {
                println!("{:<35} {:<8} {}", chemical.name, chemical.kind, chemical.safety);
            }
            if let Some(q) = parse_quantity("2.5 L") {
                println!("{} = {} mL", q, convert_units(q.value, &q.unit, "mL"));
            }
            println!("reorder 400 mL at 0.5 L: {}", needs_reorder("400 mL", "0.5 L"));
        }
        _ => println!("No example with number {}", task),
    }
}
