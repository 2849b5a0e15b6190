//! signgen's main application entry point.
//! Collects the launch parameters from settings file, command line and
//! prompts, runs the launcher and prints its report.

use signgen::{
    cli::{get_args, Args},
    config::load_settings,
    constants::SETTINGS_FILES,
    encoding,
    error::{default_error_handler, Error, Result},
    launcher::Launcher,
    logger::init_logger,
    prompt::{complete_settings, DialoguerPrompter},
    report::RunResult,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => default_error_handler(err),
    }
}

/// Main application logic execution.
///
/// # Returns
/// * `Result<bool>` - Whether the run succeeded
///
/// # Flow
/// 1. Loads the settings file, if any
/// 2. Applies command-line overrides
/// 3. Prompts for a missing input table or template list
/// 4. Validates the parameters and runs the launcher
/// 5. Prints the report
fn run(args: Args) -> Result<bool> {
    if args.list_encodings {
        let default = encoding::default_name();
        for name in encoding::available() {
            if name == default {
                println!("{name} (default)");
            } else {
                println!("{name}");
            }
        }
        return Ok(true);
    }

    let current_dir = std::env::current_dir().map_err(Error::IoError)?;
    let settings = load_settings(args.settings.as_deref(), &current_dir, &SETTINGS_FILES)?
        .merge(args.overrides());
    let settings = if args.no_input || settings.is_complete() {
        settings
    } else {
        let prompt = DialoguerPrompter::new();
        complete_settings(&prompt, settings)?
    };

    let launcher = Launcher::new(settings.into_run_config()).inspect_err(|_| {
        eprintln!("The given parameters do not match the expectation. Please check your configuration.");
    })?;

    if !args.json {
        println!("Generating documents, please wait...");
    }
    let result = launcher.run();
    print_result(&result, args.json)?;

    Ok(result.succeeded())
}

fn print_result(result: &RunResult, json: bool) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(result)
            .map_err(|e| Error::IoError(e.into()))?;
        println!("{output}");
        return Ok(());
    }

    if result.succeeded() {
        println!("Documents generated successfully.");
        if !result.message().is_empty() {
            println!("Please note the following warnings:{}", result.message());
        }
    } else {
        if !result.message().is_empty() {
            println!("{}", result.message());
        }
        println!("An error occurred while generating documents.");
    }
    Ok(())
}
