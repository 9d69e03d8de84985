use imgfetch_core::logging;

mod cli;

fn main() {
    // Log to the state-dir file so stdout stays clean for the session;
    // fall back to stderr if the file cannot be opened.
    if logging::init().is_err() {
        logging::init_stderr();
    }

    if let Err(err) = cli::run_from_args() {
        eprintln!("imgfetch error: {:#}", err);
        std::process::exit(1);
    }
}
