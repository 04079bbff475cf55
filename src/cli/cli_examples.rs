use super::cli_main::prompt;
use crate::Examples::solution_examples::solution_examples;
use crate::Examples::stoichiometry_examples::stoich_examples;

pub fn examples_menu() {
    loop {
        println!("\n=== Examples ===");
        println!("1. Molar masses and composition");
        println!("2. Balancing equations");
        println!("3. Exact vs least squares balancing");
        println!("4. Solution preparation");
        println!("5. Solutions from stock");
        println!("6. Bulk preparation");
        println!("7. Catalogue and units");
        println!("0. Back to main menu");
        let Some(choice) = prompt("Enter your choice: ") else {
            break;
        };
        match choice.as_str() {
            "1" => stoich_examples(0),
            "2" => stoich_examples(1),
            "3" => stoich_examples(2),
            "4" => solution_examples(0),
            "5" => solution_examples(1),
            "6" => solution_examples(2),
            "7" => solution_examples(3),
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
