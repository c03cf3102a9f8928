mod cli;
mod coverage;
mod db;
mod error;
mod fmt;
mod importer;
mod models;
mod settings;

use clap::Parser;

use cli::{AccountsCommands, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Accounts { command } => match command {
            AccountsCommands::Add {
                name,
                account_type,
                institution,
                frequency,
            } => cli::accounts::add(&name, &account_type, institution.as_deref(), frequency),
            AccountsCommands::List => cli::accounts::list(),
            AccountsCommands::Frequency { name, days, opt_out } => {
                cli::accounts::frequency(&name, days, opt_out)
            }
        },
        Commands::Import { file, account } => cli::import::run(&file, &account),
        Commands::Coverage { account, as_of } => cli::coverage::run(account, as_of),
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
