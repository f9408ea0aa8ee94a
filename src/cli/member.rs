//! Member CLI commands

use clap::Subcommand;

use crate::display::member::{badge_for, format_member_list};
use crate::error::HomeboxResult;
use crate::services::MemberService;
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// List household members
    #[command(alias = "ls")]
    List,

    /// Add a member (no-op if the name already exists)
    Add {
        /// Member name
        name: String,
    },
}

/// Handle a member command
pub fn handle_member_command(storage: &Storage, cmd: MemberCommands) -> HomeboxResult<()> {
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::List => {
            let members = service.list()?;
            print!("{}", format_member_list(&members));
        }

        MemberCommands::Add { name } => {
            let member = service.add(&name)?;
            println!(
                "Member: {} {} (ID: {})",
                badge_for(&member.name),
                member.name,
                member.id
            );
        }
    }

    Ok(())
}
