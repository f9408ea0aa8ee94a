//! Category CLI commands

use clap::Subcommand;

use crate::display::record::format_category_list;
use crate::error::HomeboxResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all categories
    #[command(alias = "ls")]
    List,

    /// Add a category (no-op if the name already exists)
    Add {
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> HomeboxResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Add { name } => {
            let category = service.add(&name)?;
            println!("Category: {} (ID: {})", category.name, category.id);
        }
    }

    Ok(())
}
