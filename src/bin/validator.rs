//! Schema Validator CLI
//!
//! Placeholder: takes one JSON-LD file and echoes its path. No validation is
//! performed yet.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Any single argument is the file, including ones starting with `-`
#[derive(Parser)]
#[command(name = "schema-validator")]
#[command(about = "Validate a JSON-LD instance against openMINDS schemas")]
#[command(disable_help_flag = true)]
struct Cli {
    /// JSON-LD file to validate
    #[arg(allow_hyphen_values = true)]
    json_ld_file: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match parse_args(std::env::args_os()) {
        Some(json_ld_file) => println!("{}", json_ld_file.display()),
        None => {
            println!("Wrong number of arguments");
            print_help();
            std::process::exit(1);
        }
    }
}

/// The JSON-LD file, or `None` unless exactly one argument follows the program name
fn parse_args<I, T>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).ok().map(|cli| cli.json_ld_file)
}

fn print_help() {
    println!("Usage:");
    println!("schema-validator <json-ld-file>");
}
