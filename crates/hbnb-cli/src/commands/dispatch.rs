use hbnb_storage::Storage;
use serde_json::Value;

use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, storage: &mut Storage) -> anyhow::Result<Value> {
    match command {
        Commands::Create(args) => commands::create::run(&args, storage).await,
        Commands::Show(args) => commands::show::run(&args, storage).await,
        Commands::Destroy(args) => commands::destroy::run(&args, storage).await,
        Commands::All(args) => commands::all::run(&args, storage).await,
        Commands::Update(args) => commands::update::run(&args, storage).await,
        Commands::Count(args) => commands::count::run(&args, storage).await,
        Commands::Stats => commands::stats::run(storage).await,
        Commands::Link(args) => commands::link::run_link(&args, storage).await,
        Commands::Unlink(args) => commands::link::run_unlink(&args, storage).await,
        Commands::Related(args) => commands::related::run(&args, storage).await,
        Commands::Search(args) => commands::search::run(&args, storage).await,
    }
}
