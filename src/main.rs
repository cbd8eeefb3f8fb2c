use clap::Parser;
use miette::Result;
use shopdesk::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Customer(cmd) => shopdesk::cli::commands::customer::run(cmd, &global),
        Commands::Mechanic(cmd) => shopdesk::cli::commands::mechanic::run(cmd, &global),
        Commands::Car(cmd) => shopdesk::cli::commands::car::run(cmd, &global),
        Commands::Request(cmd) => shopdesk::cli::commands::request::run(cmd, &global),
        Commands::Report(cmd) => shopdesk::cli::commands::report::run(cmd, &global),
    }
}
