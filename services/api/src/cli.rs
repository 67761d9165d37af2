use crate::demo::{run_demo, run_registration_report, DemoArgs, RegistrationReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use plenum::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Plenum Conference Service",
    about = "Demonstrate and run the Plenum conference management service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Derive registration statuses for planning and support requests
    Registration {
        #[command(subcommand)]
        command: RegistrationCommand,
    },
    /// Run an end-to-end CLI demo covering registration and paper workflows
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum RegistrationCommand {
    /// Report the registration window, waiting-list pressure, and age checks
    Report(RegistrationReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Registration {
            command: RegistrationCommand::Report(args),
        } => run_registration_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
