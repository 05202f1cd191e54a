// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use clap::Parser;
use sorrel_cli::convert;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: convert::ConvertArgs,
}

fn main() {
    let cli = Cli::parse();

    convert::convert(&cli.args);
}
