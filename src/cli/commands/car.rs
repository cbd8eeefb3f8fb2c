//! `shopdesk car` - car management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::prompts::{require_int, require_string, TermOperator};
use crate::cli::table;
use crate::cli::GlobalOpts;
use crate::core::workflows::{self, NewCar};
use crate::core::{config, Store};

#[derive(Subcommand, Debug)]
pub enum CarCommands {
    /// Add a car (prompts for missing fields)
    Add(AddArgs),

    /// List cars
    List,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Vehicle identification number
    #[arg(long)]
    pub vin: Option<String>,

    /// Make
    #[arg(long)]
    pub make: Option<String>,

    /// Model
    #[arg(long)]
    pub model: Option<String>,

    /// Model year
    #[arg(long)]
    pub year: Option<i64>,

    /// Customer id to record as an owner
    #[arg(long)]
    pub owner: Option<i64>,
}

pub fn run(cmd: CarCommands, global: &GlobalOpts) -> Result<()> {
    let mut store = Store::open(&config::database_path(global.db.clone())).into_diagnostic()?;

    match cmd {
        CarCommands::Add(args) => add(&mut store, args, global),
        CarCommands::List => list(&store),
    }
}

fn add(store: &mut Store, args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut op = TermOperator::new();
    let car = NewCar {
        vin: require_string(args.vin, "VIN", &mut op).into_diagnostic()?,
        make: require_string(args.make, "Make", &mut op).into_diagnostic()?,
        model: require_string(args.model, "Model", &mut op).into_diagnostic()?,
        year: require_int(args.year, "Year", &mut op).into_diagnostic()?,
    };

    // Car insert and ownership link commit together
    let tx = store.transaction().into_diagnostic()?;
    workflows::create_car(&tx, &car).into_diagnostic()?;
    if let Some(owner) = args.owner {
        workflows::link_ownership(&tx, owner, &car.vin).into_diagnostic()?;
    }
    tx.commit().into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Added car {} {} {} ({})",
            style("✓").green(),
            car.year,
            car.make,
            car.model,
            car.vin
        );
        if let Some(owner) = args.owner {
            println!("{} Linked to customer #{}", style("◆").cyan(), owner);
        }
    }
    Ok(())
}

fn list(store: &Store) -> Result<()> {
    let rows = store
        .query("SELECT vin, make, model, year FROM car ORDER BY vin", &[])
        .into_diagnostic()?;

    if rows.is_empty() {
        println!("No cars yet");
        return Ok(());
    }

    println!("{}", table::render(&["VIN", "Make", "Model", "Year"], &rows));
    println!("{} car(s)", rows.len());
    Ok(())
}
