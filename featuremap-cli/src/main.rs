//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = featuremap_cli::run() {
        eprintln!("featuremap: {err}");
        std::process::exit(1);
    }
}
