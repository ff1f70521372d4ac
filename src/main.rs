#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]

//! lexfind -- Find whitespace-delimited tokens equal to a query in files.

use log::info;
use std::env;
use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use lexfind::options::Options;
use lexfind::printer::{Format, Printer};

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );
    let args: Vec<OsString> = env::args_os().collect();
    let options = Options::new(&args);
    info!("Using options: {:#?}", options);

    let results = match lexfind::run(&options) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("lexfind: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let format = if options.json {
        Format::Json
    } else {
        Format::Text
    };
    let mut printer = Printer::stdout(options.color, format);
    match printer.print_all(&results) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => {
            eprintln!("lexfind: {}", e);
            return ExitCode::FAILURE;
        }
    }
    results.release();
    ExitCode::SUCCESS
}
