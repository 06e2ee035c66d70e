//! Storefront CLI entry point.

use std::process;

use clap::Parser;
use storefront_app_lib::cli::Cli;

#[tokio::main]
async fn main() {
    storefront_app_lib::init_tracing();

    let cli = Cli::parse();

    match storefront_app_lib::run(cli).await {
        Ok(output) => println!("{output:#}"),
        Err(error) => {
            match serde_json::to_string_pretty(&error) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{error}"),
            }
            process::exit(1);
        }
    }
}
