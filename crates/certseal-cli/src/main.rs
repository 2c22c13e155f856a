//! Certseal CLI Entry Point
//!
//! Usage:
//!   certseal encrypt <FILE>   - Seal a file with the configured public key
//!   certseal decrypt <FILE>   - Open a sealed file with the private key
//!   certseal lookup <KEY>     - Resolve a key across the sealed hierarchy

use clap::Parser;
use certseal_cli::{handler, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = handler::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
