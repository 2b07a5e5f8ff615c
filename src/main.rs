use anyhow::Result;
use chew::commands::{self, Settings};
use chew::error::exit_code_for;
use chew::report;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

/// chew - fetch a package's repository into the Kitchen and put its
/// executable on your PATH.
///
/// Examples:
///   chew install dac    # Clone dac into the Kitchen and link Bin/dac
///   chew update dac     # Pull the latest dac
///   chew remove dac     # Delete dac and its link
#[derive(Parser, Debug)]
#[command(author, version = env!("CHEW_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding one cloned repository per package
    #[arg(long, env = "CHEW_KITCHEN", value_name = "PATH", global = true)]
    pub kitchen: Option<PathBuf>,

    /// Directory where package executables are linked (should be on PATH)
    #[arg(long, env = "CHEW_BIN", value_name = "PATH", global = true)]
    pub bin: Option<PathBuf>,

    /// Package lookup endpoint; the package name is appended as `?<name>`
    #[arg(long = "fridge-url", env = "CHEW_FRIDGE_URL", value_name = "URL", global = true)]
    pub fridge_url: Option<String>,

    /// git executable to run
    #[arg(long, env = "CHEW_GIT", value_name = "PROGRAM", global = true)]
    pub git: Option<OsString>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Clone a package into the Kitchen and link its executable into Bin
    Install(PackageArgs),

    /// Pull the latest version of an installed package
    Update(PackageArgs),

    /// Delete a package from the Kitchen and its link from Bin
    Remove(PackageArgs),
}

#[derive(clap::Args, Debug)]
pub struct PackageArgs {
    /// The short name of the package
    #[arg(value_name = "PACKAGE", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub package: String,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            kitchen: self.kitchen.clone(),
            bin: self.bin.clone(),
            fridge_url: self.fridge_url.clone(),
            git: self.git.clone(),
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let runtime = chew::runtime::RealRuntime;
    let settings = cli.settings();

    match cli.command {
        Commands::Install(args) => commands::install(runtime, &args.package, settings).await,
        Commands::Update(args) => commands::update(runtime, &args.package, settings),
        Commands::Remove(args) => commands::remove(runtime, &args.package, settings),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report::error(format!("{:#}", err));
            ExitCode::from(exit_code_for(&err))
        }
    }
}
