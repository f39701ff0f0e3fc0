use std::io::Write;

use clap::Parser;

use cerberus::args::CerberusCli;
use cerberus::error::CerberusError;

fn main() {
    let cli = CerberusCli::parse();
    cerberus::logging::init_logging(cli.verbose);
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let mut out = std::io::stdout().lock();
    let code = match cerberus::run::run(&cli, &cwd, &mut out) {
        Ok(code) => code,
        Err(err @ CerberusError::Usage(_)) => {
            eprintln!("cerberus: {err}");
            2
        }
        Err(err) => {
            eprintln!("cerberus: {err}");
            1
        }
    };
    let code = match out.flush() {
        Ok(()) => code,
        Err(err) => {
            eprintln!("cerberus: failed to flush stdout: {err}");
            1
        }
    };
    std::process::exit(code);
}
