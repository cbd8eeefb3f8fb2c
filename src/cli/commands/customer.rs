//! `shopdesk customer` - customer management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::prompts::{require_string, TermOperator};
use crate::cli::table;
use crate::cli::GlobalOpts;
use crate::core::workflows::{self, NewCustomer};
use crate::core::{config, Store};

#[derive(Subcommand, Debug)]
pub enum CustomerCommands {
    /// Add a customer (prompts for missing fields)
    Add(AddArgs),

    /// List customers
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

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,
}

pub fn run(cmd: CustomerCommands, global: &GlobalOpts) -> Result<()> {
    let store = Store::open(&config::database_path(global.db.clone())).into_diagnostic()?;

    match cmd {
        CustomerCommands::Add(args) => add(&store, args, global),
        CustomerCommands::List => list(&store),
    }
}

fn add(store: &Store, args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut op = TermOperator::new();
    let customer = NewCustomer {
        first_name: require_string(args.first_name, "First name", &mut op).into_diagnostic()?,
        last_name: require_string(args.last_name, "Last name", &mut op).into_diagnostic()?,
        phone: require_string(args.phone, "Phone", &mut op).into_diagnostic()?,
        address: require_string(args.address, "Address", &mut op).into_diagnostic()?,
    };

    let id = workflows::create_customer(store.conn(), &customer).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Added customer #{} {} {}",
            style("✓").green(),
            id,
            customer.first_name,
            customer.last_name
        );
    }
    Ok(())
}

fn list(store: &Store) -> Result<()> {
    let rows = store
        .query(
            "SELECT id, first_name, last_name, phone, address FROM customer ORDER BY id",
            &[],
        )
        .into_diagnostic()?;

    if rows.is_empty() {
        println!("No customers yet");
        return Ok(());
    }

    println!(
        "{}",
        table::render(&["ID", "First", "Last", "Phone", "Address"], &rows)
    );
    println!("{} customer(s)", rows.len());
    Ok(())
}
