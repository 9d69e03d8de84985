
use clap::Parser;

use super::Cli;

pub(crate) fn parse(args: &[&str]) -> Cli {
    Cli::parse_from(args)
}
