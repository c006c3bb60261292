use phaseplan::cli::commands::{CliArgs, Commands};
use phaseplan::cli::handlers::{handle_catalog, handle_plan, handle_rules, handle_run};
use phaseplan::pipeline::EXIT_USAGE;
use phaseplan::util::logging::{config_from_env, init_logging, InvalidLogLevel, LoggingConfig};
use phaseplan::VERSION;

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    let logging = match logging_config_from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(EXIT_USAGE);
        }
    };
    init_logging(logging);

    debug!("phaseplan v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match args.command_or_default() {
        Commands::Run(run_args) => handle_run(&run_args, args.quiet),
        Commands::Catalog(catalog_args) => handle_catalog(&catalog_args),
        Commands::Plan(plan_args) => handle_plan(&plan_args),
        Commands::Rules(rules_args) => handle_rules(&rules_args),
    };

    std::process::exit(exit_code);
}

fn logging_config_from_args(args: &CliArgs) -> Result<LoggingConfig, InvalidLogLevel> {
    let env_config = config_from_env()?;

    let level = if let Some(level) = args.log_level {
        level
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        env_config.level
    };

    Ok(LoggingConfig {
        level,
        ..env_config
    })
}
