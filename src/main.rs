use colored::Colorize;
use netaddr_summary::cli::{self, CommandLine};
use netaddr_summary::config::{self, Config};
use std::error::Error;
use std::process::ExitCode;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = CommandLine::parse_args();
    // logger first, Config::from_env warns about bad values
    let log_config = config::log_config_from_env();
    if let Err(e) = log4rs::init_file(&log_config, Default::default()) {
        // no log config, run without logging
        eprintln!("# {} {}: {}", "NOTE".yellow(), log_config, e);
    }
    let config = Config::from_env();
    log::info!("#Start main() {:?}", args.command);

    match cli::run(&args, &config) {
        Ok(text) => {
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            log::warn!("command failed: {}", e);
            eprintln!("{} {}", "Error:".red(), e);
            Ok(ExitCode::FAILURE)
        }
    }
}
