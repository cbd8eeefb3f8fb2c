//! `shopdesk report` - the fixed reporting queries

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::table;
use crate::cli::GlobalOpts;
use crate::core::{config, reports, Store};

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Customers whose total closed-request bill is under 100
    #[command(name = "bills-under-100")]
    BillsUnder100,

    /// Customers owning more than 20 cars
    ManyCars,

    /// Cars made before 1995 serviced with under 50,000 miles
    VintageCars,

    /// The K make/model pairs with the most service requests
    TopModels(TopModelsArgs),

    /// Customers by descending total closed-request bill
    TotalBills,
}

#[derive(clap::Args, Debug)]
pub struct TopModelsArgs {
    /// How many make/model pairs to list
    #[arg(short = 'k', long, default_value_t = 10)]
    pub k: i64,
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    let store = Store::open(&config::database_path(global.db.clone())).into_diagnostic()?;
    let conn = store.conn();

    match cmd {
        ReportCommands::BillsUnder100 => {
            let rows = reports::customers_with_total_bill_under(conn, 100).into_diagnostic()?;
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.first_name.clone(),
                        r.last_name.clone(),
                        r.total_bill.to_string(),
                    ]
                })
                .collect();
            print_table(&["ID", "First", "Last", "Total bill"], &cells);
        }
        ReportCommands::ManyCars => {
            let rows = reports::customers_with_more_than_n_cars(conn, 20).into_diagnostic()?;
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.first_name.clone(),
                        r.last_name.clone(),
                        r.cars.to_string(),
                    ]
                })
                .collect();
            print_table(&["ID", "First", "Last", "Cars"], &cells);
        }
        ReportCommands::VintageCars => {
            let rows = reports::cars_before_year_with_odometer_under(conn, 1995, 50_000)
                .into_diagnostic()?;
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.vin.clone(),
                        r.make.clone(),
                        r.model.clone(),
                        r.year.to_string(),
                        r.odometer.to_string(),
                    ]
                })
                .collect();
            print_table(&["VIN", "Make", "Model", "Year", "Odometer"], &cells);
        }
        ReportCommands::TopModels(args) => {
            let rows = reports::top_k_serviced_models(conn, args.k).into_diagnostic()?;
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| vec![r.make.clone(), r.model.clone(), r.requests.to_string()])
                .collect();
            print_table(&["Make", "Model", "Requests"], &cells);
        }
        ReportCommands::TotalBills => {
            let rows = reports::customers_by_total_bill_desc(conn).into_diagnostic()?;
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.first_name.clone(),
                        r.last_name.clone(),
                        r.total_bill.to_string(),
                    ]
                })
                .collect();
            print_table(&["ID", "First", "Last", "Total bill"], &cells);
        }
    }

    Ok(())
}

fn print_table(headers: &[&str], cells: &[Vec<String>]) {
    if cells.is_empty() {
        println!("No rows");
        return;
    }
    println!("{}", table::render(headers, cells));
    println!("{} row(s)", cells.len());
}
