use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use orbitroute_cli::output::OutputFormat;
use orbitroute_lib::HitSelection;

mod commands;

use commands::neighbours::handle_neighbours_command;
use commands::route::{handle_route_command, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Satellite relay visibility and routing")]
struct Cli {
    /// Scenario file listing the satellites and the ROUTE endpoints.
    #[arg(long, env = "ORBITROUTE_DATA")]
    data: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the relay chain with the fewest hops between two nodes.
    Route(RouteArgs),
    /// List every node with the nodes it can see.
    Neighbours,
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Starting node id. Defaults to the scenario's first ground station.
    #[arg(long = "from", default_value = "A")]
    from: String,
    /// Destination node id. Defaults to the scenario's second ground station.
    #[arg(long = "to", default_value = "B")]
    to: String,
    /// Rule for choosing among routes that reach the destination
    /// (fewest-hops or legacy).
    #[arg(long, default_value = "fewest-hops")]
    selection: HitSelection,
}

impl From<RouteArgs> for RouteCommandArgs {
    fn from(args: RouteArgs) -> Self {
        RouteCommandArgs {
            from: args.from,
            to: args.to,
            selection: args.selection,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route(args) => handle_route_command(&cli.data, cli.format, &args.into()),
        Command::Neighbours => handle_neighbours_command(&cli.data, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
