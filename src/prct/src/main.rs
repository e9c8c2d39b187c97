use clap::{error::ErrorKind, Parser};
use prct::{
    cli::{self, options::Options},
    process::KillSender,
    util::logging::init_logging,
};
use std::{
    io::{self, Write},
    process::ExitCode,
};
use tracing::debug;

fn main() -> eyre::Result<ExitCode> {
    // Parse command-line options first (before initializing tracing)
    let opts = match Options::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            // Help and version go to stdout; usage errors to stderr
            let _ = e.print();
            return Ok(match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            });
        }
    };

    init_logging(opts.verbose);
    debug!("Options: {:?}", opts);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = cli::run(&opts, &KillSender, &mut out).and_then(|()| Ok(out.flush()?));

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // The reader went away (`prct ... | head`); nothing left to report to
        Err(e) if is_broken_pipe(&e) => {
            debug!("Stdout closed early: {}", e);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(e),
    }
}

fn is_broken_pipe(err: &eyre::Report) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
    })
}
