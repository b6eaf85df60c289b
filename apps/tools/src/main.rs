use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use shared::{
    domain::ItemId,
    error::{normalize_name, ValidationError},
    listing::rows_from_items,
};
use storage::{Storage, UpdateOutcome};
use tracing::info;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://items.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List {
        #[arg(long)]
        json: bool,
    },
    Add {
        name: String,
    },
    Rename {
        item_id: i64,
        name: String,
    },
    Remove {
        item_id: i64,
    },
    Exists {
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::List { json } => {
            let rows = rows_from_items(storage.list_items().await?);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in rows {
                    println!("{}\t{}\t{}", row.position, row.item.id, row.item.name);
                }
            }
        }
        Command::Add { name } => {
            let name = normalize_name(&name)?;
            let Some(item) = storage.create_item(name).await? else {
                bail!(ValidationError::DuplicateName);
            };
            info!(item_id = %item.id, "item added");
            println!("created item_id={}", item.id);
        }
        Command::Rename { item_id, name } => {
            let name = normalize_name(&name)?;
            match storage.update_item_name(ItemId(item_id), name).await? {
                UpdateOutcome::Renamed => println!("renamed item_id={item_id}"),
                UpdateOutcome::Missing => println!("no item with item_id={item_id}"),
                UpdateOutcome::NameTaken => bail!(ValidationError::DuplicateName),
            }
        }
        Command::Remove { item_id } => {
            if storage.remove_item(ItemId(item_id)).await? {
                println!("removed item_id={item_id}");
            } else {
                println!("no item with item_id={item_id}");
            }
        }
        Command::Exists { name } => {
            println!("{}", storage.item_name_exists(&name).await?);
        }
    }

    Ok(())
}
