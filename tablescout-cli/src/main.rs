//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use tablescout_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr before exiting"
)]
fn main() {
    if let Err(err) = tablescout_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        eprintln!("tablescout: {err}");
        std::process::exit(1);
    }
}
