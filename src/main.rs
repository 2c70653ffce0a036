// SPDX-License-Identifier: MPL-2.0
use std::process::ExitCode;
use swipe_reel::app::{self, paths, Flags};

const USAGE: &str = "\
usage: swipe_reel [OPTIONS] [FOLDER]

options:
  --config-dir <DIR>   directory holding settings.toml
  --data-dir <DIR>     directory holding state.cbor
  --seed <N>           seed for a reproducible shuffle order
  -h, --help           print this text

Without FOLDER the last browsed folder is reopened.
Type 'help' once running for the list of commands.";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let config_dir = args.opt_value_from_str("--config-dir")?;
    let data_dir = args.opt_value_from_str("--data-dir")?;
    let seed = args.opt_value_from_str("--seed")?;
    let folder = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Some(Flags {
        folder,
        data_dir,
        config_dir,
        seed,
    }))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    match app::run(flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
