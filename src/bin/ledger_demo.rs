use std::{env, ffi::OsStr, io, path::PathBuf};

use ledger_core::{config::ConfigManager, demo::run_demo, errors::Result, init, utils::build_info};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = env::args_os().skip(1);
    let first = args.next();
    if first.as_deref() == Some(OsStr::new("--version")) {
        println!("{}", build_info::current());
        return Ok(());
    }

    let mut config = ConfigManager::from_env().load()?;
    config.apply_env();
    if let Some(path) = first {
        config.data_file = PathBuf::from(path);
    }

    run_demo(&config, &mut io::stdout().lock())?;
    Ok(())
}
