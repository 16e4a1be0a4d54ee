use crate::logger;
use crate::GlobalOpts;
use clap::Subcommand;
use colored::*;
use umbpack_config::Config;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show configured values
    Show,
    /// Set a configuration value
    Set { key: String, value: String },
    /// Print the path of the configuration file
    Path,
}

/// Handle `umbpack config` and return the process exit status
pub fn handle_config(action: ConfigAction, opts: &GlobalOpts) -> i32 {
    match action {
        ConfigAction::Show => match Config::load() {
            Ok(config) => {
                println!("{}", "Configuration:".bold().green());
                if config.is_empty() {
                    if opts.verbosity_level() > 0 {
                        println!("  {}", "(empty)".yellow());
                    }
                } else {
                    for (key, value) in config.values_iter() {
                        println!("  {}: {}", key.cyan(), value);
                    }
                }
                0
            }
            Err(e) => {
                logger::error(&format!("Failed to load config: {}", e));
                1
            }
        },
        ConfigAction::Set { key, value } => {
            let mut config = match Config::load() {
                Ok(config) => config,
                Err(e) => {
                    logger::error(&format!("Failed to load config: {}", e));
                    return 1;
                }
            };
            if let Err(e) = config.set(&key, value.clone()) {
                logger::error(&e.to_string());
                return 1;
            }
            match config.save() {
                Ok(()) => {
                    logger::success(&format!("Set {} = {}", key, value));
                    0
                }
                Err(e) => {
                    logger::error(&format!("Failed to save config: {}", e));
                    1
                }
            }
        }
        ConfigAction::Path => {
            let config_path = Config::path();
            logger::debug(&format!("Reading config from: {}", config_path.display()));
            println!("{}", config_path.display());
            0
        }
    }
}
