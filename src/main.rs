use std::{
    env,
    fs::{self, File},
    io::{self, BufWriter},
    process,
};

use recast::errors::errors::report;
use recast::writer::writer::{rewrite, RewriteError};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter =
        EnvFilter::try_from_env("RECAST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 4 {
        eprintln!("usage: recast <input> <output> <diagnostics>");
        process::exit(1);
    }

    let source = match fs::read_to_string(&args[1]) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("recast: cannot read {}: {}", args[1], err);
            process::exit(1);
        }
    };

    let out = match File::create(&args[2]) {
        Ok(file) => BufWriter::new(file),
        Err(err) => {
            eprintln!("recast: cannot create {}: {}", args[2], err);
            process::exit(1);
        }
    };

    // Created up front, so a clean run leaves an empty diagnostics file.
    let mut diagnostics = match File::create(&args[3]) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("recast: cannot create {}: {}", args[3], err);
            process::exit(1);
        }
    };

    debug!("rewriting {} ({} bytes)", args[1], source.len());

    match rewrite(source, Some(args[1].clone()), out) {
        Ok(()) => {}
        Err(RewriteError::Lex(lex_error)) => {
            error!("fatal lexical error in {}: {}", args[1], lex_error);
            if let Err(err) = report(&lex_error, &mut diagnostics) {
                eprintln!("recast: cannot write {}: {}", args[3], err);
                process::exit(1);
            }
            process::exit(2);
        }
        Err(RewriteError::Io(err)) => {
            eprintln!("recast: cannot write {}: {}", args[2], err);
            process::exit(1);
        }
    }
}
