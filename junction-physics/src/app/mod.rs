/// This module governs the command line application built around the engine
mod calculations;
mod configuration;
mod error;
mod styles;
mod telemetry;

pub(crate) use configuration::Configuration;
pub(crate) use error::JunctionError;
pub(crate) use styles::Styles;

use clap::{ArgEnum, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    #[clap(arg_enum, short, long, default_value = "info", global = true)]
    log_level: LogLevel,
    /// Also write JSON formatted logs to this file
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Band gap, effective densities of states and intrinsic concentration
    Bands {
        /// Temperature in K
        #[clap(short, long, default_value_t = 300.0)]
        temperature: f64,
    },
    /// Equilibrium Fermi level and occupation of a uniformly doped region
    Fermi {
        /// Temperature in K
        #[clap(short, long, default_value_t = 300.0)]
        temperature: f64,
        /// Donor density in cm^-3
        #[clap(long, default_value_t = 0.0)]
        donors: f64,
        /// Acceptor density in cm^-3
        #[clap(long, default_value_t = 0.0)]
        acceptors: f64,
        /// Print the hole occupation `1 - f` instead of the electron occupation
        #[clap(long)]
        holes: bool,
    },
    /// Depletion region and electrostatic profile of a biased junction
    Junction {
        /// Acceptor density on the p-side in cm^-3
        #[clap(long)]
        acceptors: f64,
        /// Donor density on the n-side in cm^-3
        #[clap(long)]
        donors: f64,
        /// Applied bias in V, positive for forward bias
        #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
        bias: f64,
        /// Temperature in K
        #[clap(short, long, default_value_t = 300.0)]
        temperature: f64,
        /// Acceptor density of the zero bias reference, defaults to `--acceptors`
        #[clap(long)]
        reference_acceptors: Option<f64>,
        /// Donor density of the zero bias reference, defaults to `--donors`
        #[clap(long)]
        reference_donors: Option<f64>,
    },
    /// Diode current, I-V sweep, carrier profile and band diagram
    Current {
        /// Acceptor density on the p-side in cm^-3
        #[clap(long)]
        acceptors: f64,
        /// Donor density on the n-side in cm^-3
        #[clap(long)]
        donors: f64,
        /// Applied bias in V, positive for forward bias
        #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
        bias: f64,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

/// Parses the command line, installs the subscriber and runs the requested calculation
pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = App::parse();

    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, cli.log_file.as_deref());
    telemetry::init_subscriber(subscriber)?;

    let config = Configuration::build()?;
    let styles = Styles::for_stdout();
    let mut term = console::Term::stdout();

    match cli.command {
        Command::Bands { temperature } => {
            calculations::band_structure(&config, &styles, &mut term, temperature)?
        }
        Command::Fermi {
            temperature,
            donors,
            acceptors,
            holes,
        } => calculations::fermi_level(
            &config,
            &styles,
            &mut term,
            calculations::FermiInput {
                temperature,
                donors,
                acceptors,
                holes,
            },
        )?,
        Command::Junction {
            acceptors,
            donors,
            bias,
            temperature,
            reference_acceptors,
            reference_donors,
        } => calculations::junction(
            &config,
            &styles,
            &mut term,
            calculations::JunctionInput {
                acceptors,
                donors,
                bias,
                temperature,
                reference_acceptors: reference_acceptors.unwrap_or(acceptors),
                reference_donors: reference_donors.unwrap_or(donors),
            },
        )?,
        Command::Current {
            acceptors,
            donors,
            bias,
        } => calculations::current(&config, &styles, &mut term, acceptors, donors, bias)?,
    }

    Ok(())
}
