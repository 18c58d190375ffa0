//! Binary entry point for the `eventide` command-line interface.
#![forbid(unsafe_code)]
#![expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on stderr before the process exits"
)]

fn main() {
    if let Err(err) = eventide_cli::run() {
        eprintln!("eventide: {err}");
        std::process::exit(1);
    }
}
