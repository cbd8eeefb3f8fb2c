//! `shopdesk request` - service request intake and closing

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::prompts::{require_int, require_string, TermOperator};
use crate::cli::table;
use crate::cli::GlobalOpts;
use crate::core::error::ShopError;
use crate::core::{config, intake, workflows, Store};

#[derive(Subcommand, Debug)]
pub enum RequestCommands {
    /// Open a new service request (interactive intake)
    New,

    /// Close a service request with a mechanic, comment, and bill
    Close(CloseArgs),

    /// List open (unclosed) service requests
    Open,
}

#[derive(clap::Args, Debug)]
pub struct CloseArgs {
    /// Service request id
    #[arg(long)]
    pub rid: i64,

    /// Mechanic id who did the work
    #[arg(long)]
    pub mechanic: i64,

    /// Close date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Close comment
    #[arg(long)]
    pub comment: Option<String>,

    /// Bill amount
    #[arg(long)]
    pub bill: Option<i64>,
}

pub fn run(cmd: RequestCommands, global: &GlobalOpts) -> Result<()> {
    let mut store = Store::open(&config::database_path(global.db.clone())).into_diagnostic()?;

    match cmd {
        RequestCommands::New => new(&mut store, global),
        RequestCommands::Close(args) => close(&store, args, global),
        RequestCommands::Open => open(&store),
    }
}

fn new(store: &mut Store, global: &GlobalOpts) -> Result<()> {
    let mut op = TermOperator::new();
    let outcome = intake::run(store, &mut op).into_diagnostic()?;

    if !global.quiet {
        if outcome.created_customer {
            println!(
                "{} Added customer #{}",
                style("◆").cyan(),
                outcome.customer_id
            );
        }
        if outcome.created_car {
            println!("{} Added car {}", style("◆").cyan(), outcome.vin);
        }
        println!(
            "{} Created service request #{} for customer #{} ({})",
            style("✓").green(),
            outcome.request_id,
            outcome.customer_id,
            outcome.vin
        );
    }
    Ok(())
}

fn close(store: &Store, args: CloseArgs, global: &GlobalOpts) -> Result<()> {
    let mut op = TermOperator::new();
    let raw_date =
        require_string(args.date, "Close date (YYYY-MM-DD)", &mut op).into_diagnostic()?;
    let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
        .map_err(|_| ShopError::Date(raw_date))
        .into_diagnostic()?;
    let comment = require_string(args.comment, "Comment", &mut op).into_diagnostic()?;
    let bill = require_int(args.bill, "Bill amount", &mut op).into_diagnostic()?;

    workflows::close_request(store.conn(), args.rid, args.mechanic, date, &comment, bill)
        .into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Closed request #{} (bill {})",
            style("✓").green(),
            args.rid,
            bill
        );
    }
    Ok(())
}

fn open(store: &Store) -> Result<()> {
    let rows = store
        .query(
            "SELECT sr.rid, sr.customer_id, c.first_name || ' ' || c.last_name, \
                    sr.car_vin, sr.date, sr.odometer, sr.complaint \
             FROM service_request sr \
             JOIN customer c ON c.id = sr.customer_id \
             WHERE sr.rid NOT IN (SELECT rid FROM closed_request) \
             ORDER BY sr.rid",
            &[],
        )
        .into_diagnostic()?;

    if rows.is_empty() {
        println!("No open requests");
        return Ok(());
    }

    println!(
        "{}",
        table::render(
            &["RID", "Cust", "Customer", "VIN", "Date", "Odometer", "Complaint"],
            &rows
        )
    );
    println!("{} open request(s)", rows.len());
    Ok(())
}
