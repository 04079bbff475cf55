use super::cli_main::{parse_flask_list, print_error, prompt};
use crate::Stoichiometry::balancer::BalancingMethod;
use crate::settings::{SettingsError, with_settings, with_settings_mut};

fn report(result: Result<(), SettingsError>) {
    match result {
        Ok(()) => println!("Settings saved."),
        Err(e) => print_error(&e),
    }
}

pub fn settings_menu() {
    loop {
        let (config, file) =
            with_settings(|s| (s.get_config().clone(), s.config_file().to_string()));
        println!("\n=== Settings ({}) ===", file);
        println!("1. Flask sizes: {:?} mL", config.flask_sizes);
        println!("2. Balancing method: {:?}", config.balancing_method);
        println!("3. Coefficient epsilon: {}", config.coefficient_epsilon);
        println!("4. Default extra volume: {} %", config.default_extra_volume_percent);
        println!("5. Reset to defaults");
        println!("0. Back to main menu");
        let Some(choice) = prompt("Enter your choice: ") else {
            break;
        };
        match choice.as_str() {
            "1" => {
                let Some(answer) = prompt("Flask sizes in mL (e.g. 50, 100, 250): ") else {
                    break;
                };
                match parse_flask_list(&answer) {
                    Ok(sizes) => report(with_settings_mut(|s| s.set_flask_sizes(&sizes))),
                    Err(e) => print_error(&e),
                }
            }
            "2" => {
                let method = match config.balancing_method {
                    BalancingMethod::Exact => BalancingMethod::LeastSquares,
                    BalancingMethod::LeastSquares => BalancingMethod::Exact,
                };
                report(with_settings_mut(|s| s.set_balancing_method(method)));
            }
            "3" | "4" => {
                let Some(answer) = prompt("New value: ") else {
                    break;
                };
                let Ok(value) = answer.parse::<f64>() else {
                    print_error(&format!("'{}' is not a number", answer));
                    continue;
                };
                if choice == "3" {
                    report(with_settings_mut(|s| s.set_coefficient_epsilon(value)));
                } else {
                    report(with_settings_mut(|s| s.set_default_extra_volume_percent(value)));
                }
            }
            "5" => report(with_settings_mut(|s| s.reset_to_defaults())),
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
