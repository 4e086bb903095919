use clap::Parser;

use growth::api::cli::{Cli, Command, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let default_filter = match cli.command {
        Command::Serve(_) => "info,growth=debug,tower_http=debug",
        Command::Project(_) => "warn",
    };
    growth::logging::init(cli.global.log.as_deref(), default_filter);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
