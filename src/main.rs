mod cli;

use clap::Parser;

use cli::{BackupCommands, Cli, Commands};
use pocket::models::Kind;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = pocket::config::resolve(cli.data_dir.as_deref());

    let result = match cli.command {
        None | Some(Commands::Status) => cli::status::run(&config),
        Some(Commands::Init) => cli::init::run(&config),
        Some(Commands::Add {
            title,
            amount,
            category,
            income,
            date,
        }) => cli::transactions::add(&config, &title, amount, &category, income, date),
        Some(Commands::List) => cli::transactions::list(&config),
        Some(Commands::Edit {
            id,
            title,
            amount,
            category,
            income,
            expense,
            date,
        }) => {
            let kind = match (income, expense) {
                (true, _) => Some(Kind::Income),
                (_, true) => Some(Kind::Expense),
                _ => None,
            };
            cli::transactions::edit(
                &config,
                &id,
                cli::transactions::Edit {
                    title,
                    amount,
                    category,
                    kind,
                    date,
                },
            )
        }
        Some(Commands::Delete { id }) => cli::transactions::delete(&config, &id),
        Some(Commands::Summary) => cli::summary::run(&config),
        Some(Commands::Budget { amount }) => cli::preferences::budget(&config, amount),
        Some(Commands::Currency { symbol }) => cli::preferences::currency(&config, symbol),
        Some(Commands::DarkMode { state }) => cli::preferences::dark_mode(&config, state),
        Some(Commands::Categories) => cli::preferences::categories(&config),
        Some(Commands::Backup { command }) => match command {
            BackupCommands::Create => cli::backup::create(&config),
            BackupCommands::List => cli::backup::list(&config),
            BackupCommands::Restore { file } => cli::backup::restore(&config, &file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
