//! `shopdesk mechanic` - mechanic management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::prompts::{require_int, require_string, TermOperator};
use crate::cli::table;
use crate::cli::GlobalOpts;
use crate::core::workflows::{self, NewMechanic};
use crate::core::{config, Store};

#[derive(Subcommand, Debug)]
pub enum MechanicCommands {
    /// Add a mechanic (prompts for missing fields)
    Add(AddArgs),

    /// List mechanics
    List,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Years of experience
    #[arg(long)]
    pub experience: Option<i64>,
}

pub fn run(cmd: MechanicCommands, global: &GlobalOpts) -> Result<()> {
    let store = Store::open(&config::database_path(global.db.clone())).into_diagnostic()?;

    match cmd {
        MechanicCommands::Add(args) => add(&store, args, global),
        MechanicCommands::List => list(&store),
    }
}

fn add(store: &Store, args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut op = TermOperator::new();
    let mechanic = NewMechanic {
        first_name: require_string(args.first_name, "First name", &mut op).into_diagnostic()?,
        last_name: require_string(args.last_name, "Last name", &mut op).into_diagnostic()?,
        experience: require_int(args.experience, "Years of experience", &mut op)
            .into_diagnostic()?,
    };

    let id = workflows::create_mechanic(store.conn(), &mechanic).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Added mechanic #{} {} {}",
            style("✓").green(),
            id,
            mechanic.first_name,
            mechanic.last_name
        );
    }
    Ok(())
}

fn list(store: &Store) -> Result<()> {
    let rows = store
        .query(
            "SELECT id, first_name, last_name, experience FROM mechanic ORDER BY id",
            &[],
        )
        .into_diagnostic()?;

    if rows.is_empty() {
        println!("No mechanics yet");
        return Ok(());
    }

    println!(
        "{}",
        table::render(&["ID", "First", "Last", "Experience"], &rows)
    );
    println!("{} mechanic(s)", rows.len());
    Ok(())
}
