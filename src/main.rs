use clap::Parser;
use lrud::cli::{Cli, Commands};
use lrud::error::{LrudError, Result};
use lrud::main_lib;

fn init_logging(verbose: bool) -> Result<()> {
    // Log to a file when LRUD_LOG is set, otherwise only on --verbose
    if let Ok(log_file) = std::env::var("LRUD_LOG") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .filter_level(log::LevelFilter::Debug)
            .init();
        log::info!("lrud starting up");
    } else if verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Test { verbose: true, .. });
    init_logging(verbose)?;

    match cli.command {
        Commands::Execute {
            layout,
            command,
            output,
        } => {
            main_lib::execute_command(&layout, &command, output.as_deref())?;
            Ok(())
        }
        Commands::Test {
            script,
            layout,
            verbose: _,
            overwrite,
        } => {
            log::info!("🧪 Script: {}", script);
            let result = main_lib::run_script(&script, layout.as_deref(), overwrite)?;
            result.print_summary();

            if result.success {
                Ok(())
            } else {
                log::error!("🧪 Test failed");
                Err(LrudError::from("Test failed"))
            }
        }
        Commands::Inspect { layout } => {
            print!("{}", main_lib::inspect_layout(&layout)?);
            Ok(())
        }
    }
}
