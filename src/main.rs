use ChemPrac::Utils::logger::init_logger;
use ChemPrac::cli::cli_main::run_interactive_menu;
use ChemPrac::settings::with_settings;

pub fn main() {
    let (level, log_file) = with_settings(|s| {
        let config = s.get_config();
        (config.log_level.clone(), config.log_file.clone())
    });
    if let Err(e) = init_logger(&level, &log_file) {
        eprintln!("Logging disabled: {}", e);
    }
    run_interactive_menu();
}
