//! tsuml CLI - Class diagrams from declaration dumps

mod cli;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli_args = cli::Cli::parse();
    let app = cli::TsumlApp::new();

    if let Err(e) = app.run(cli_args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
