use clap::{Parser, Subcommand};
use log::{error, LevelFilter};
use addr_geocoder::compare::CompareArgs;
use addr_geocoder::geocode::GeocodeArgs;

/// Match free-text addresses against a reference street list
#[derive(Parser)]
#[command(name = "addr-geocoder", version)]
struct Cli {
    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand)]
enum Command {
    /// Localize every address of the input file against the reference file
    Geocode(GeocodeArgs),

    /// Compare two addresses and print the match result
    Compare(CompareArgs)
}

fn main() {
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let cli = Cli::parse();

    let res = match cli.command {
        Command::Geocode(args) => addr_geocoder::geocode::main(&args).map(|_| ()),
        Command::Compare(args) => addr_geocoder::compare::main(&args).map(|_| ())
    };

    match res {
        Ok(_) => (),
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };
}
