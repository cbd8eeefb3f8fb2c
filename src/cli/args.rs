//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    car::CarCommands, customer::CustomerCommands, mechanic::MechanicCommands,
    report::ReportCommands, request::RequestCommands,
};

#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(author, version, about = "Automotive repair shop management")]
#[command(
    long_about = "A CLI for managing an automotive repair shop: customers, mechanics, cars, ownership records, and service requests."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Path to the shop database (default: user data directory)
    #[arg(long, global = true, env = "SHOPDESK_DB")]
    pub db: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Customer management
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Mechanic management
    #[command(subcommand)]
    Mechanic(MechanicCommands),

    /// Car management
    #[command(subcommand)]
    Car(CarCommands),

    /// Service request intake and closing
    #[command(subcommand)]
    Request(RequestCommands),

    /// Fixed reporting queries
    #[command(subcommand)]
    Report(ReportCommands),
}
