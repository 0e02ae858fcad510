// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sessync binary entry point.

use clap::Parser;

use sessync::cli::Cli;
use sessync::commands;
use sessync::logging;
use sessync::output::print_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, &commands::log_target(&cli.command));

    if let Err(e) = commands::run(cli).await {
        tracing::error!(error = %e, "command failed");
        print_error(&e);
        std::process::exit(e.exit_code());
    }
}
