use clap::Parser;
use tradelog::cli::{self, Cli, Commands};
use tradelog::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.logging.init();

    if let Err(e) = run(&config, cli).await {
        cli::output::error(e);
        std::process::exit(1);
    }
}

async fn run(config: &Config, cli: Cli) -> tradelog::error::Result<()> {
    let client = cli::build_client(config)?;
    match cli.command {
        Commands::Login(args) => cli::login::execute(&client, args).await,
        Commands::Logout => cli::login::execute_logout(&client).await,
        Commands::Trades(args) => cli::trades::execute(&client, args).await,
        Commands::Stats(args) => cli::stats::execute(&client, args).await,
    }
}
