use super::cli_examples::examples_menu;
use super::cli_settings::settings_menu;
use super::cli_solutions::{bulk_menu, solution_menu, unit_conversion_menu};
use super::cli_stoichiometry::{balance_menu, molar_mass_menu};
use std::io::{self, Write};

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            println!("Goodbye!");
            break;
        };

        match choice.trim() {
            "1" => molar_mass_menu(),
            "2" => balance_menu(),
            "3" => solution_menu(),
            "4" => bulk_menu(),
            "5" => unit_conversion_menu(),
            "6" => examples_menu(),
            "7" => settings_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text
Yellow (\x1b[33m) - Menu options
Cyan (\x1b[36m) - prompts
Red (\x1b[31m) - errors
Reset (\x1b[0m) - back to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to ChemPrac: molar masses, equation balancing\n
    and solution preparation for the school laboratory \n \x1b[0m"
    );
    println!("\x1b[33m1. Molar Mass\x1b[0m");
    println!("\x1b[33m2. Balance Equation\x1b[0m");
    println!("\x1b[33m3. Solution Preparation\x1b[0m");
    println!("\x1b[33m4. Bulk Preparation\x1b[0m");
    println!("\x1b[33m5. Unit Conversion\x1b[0m");
    println!("\x1b[33m6. Examples\x1b[0m");
    println!("\x1b[33m7. Settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

/// one line from stdin, None at end of input
pub(crate) fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}

/// prints the prompt and reads the trimmed answer
pub(crate) fn prompt(message: &str) -> Option<String> {
    print!("\x1b[36m{}\x1b[0m", message);
    let _ = io::stdout().flush();
    get_user_input().map(|s| s.trim().to_string())
}

pub(crate) fn print_error(error: &dyn std::fmt::Display) {
    println!("\x1b[31mError: {}\x1b[0m", error);
}

/// "100, 250 500" -> [100, 250, 500]
pub(crate) fn parse_flask_list(input: &str) -> Result<Vec<u32>, String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| format!("'{}' is not a flask size in mL", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flask_list() {
        assert_eq!(parse_flask_list("100, 250 500").unwrap(), vec![100, 250, 500]);
        assert!(parse_flask_list("").unwrap().is_empty());
        assert!(parse_flask_list("100, big").is_err());
    }
}
