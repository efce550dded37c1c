mod cli;

use clap::Parser;

use cli::{Args, CliError, Command};

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

fn main() {
    init_logging();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    match &args.command {
        Some(Command::Config { action }) => {
            cli::handle_config_action(action.clone(), args.config.as_deref())
        }
        None => cli::render(args, &mut std::io::stdout().lock()),
    }
}
