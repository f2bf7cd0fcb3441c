// SPDX-License-Identifier: MPL-2.0
use iced_poster::app::{self, Flags};
use iced_poster::loader::ImageLoader;
use iced_poster::{config, logging, paths};
use std::process::ExitCode;

const HELP: &str = "\
iced_poster - BlurHash placeholder preview

USAGE:
    iced_poster [OPTIONS]

OPTIONS:
    --url <URL>           Image to show instead of the demo poster
    --config-dir <DIR>    Directory holding settings.toml
    --cache-dir <DIR>     Directory for the image disk cache
    -h, --help            Print this help
";

struct Args {
    url: Option<String>,
    config_dir: Option<String>,
    cache_dir: Option<String>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        url: args.opt_value_from_str("--url")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        cache_dir: args.opt_value_from_str("--cache-dir")?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unexpected arguments");
    }

    Ok(Some(parsed))
}

fn main() -> ExitCode {
    logging::init_tracing();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    paths::init_cli_overrides(args.config_dir, args.cache_dir);

    let (config, config_warning) = config::load();
    let loader = match ImageLoader::new(&config.loader, paths::get_image_cache_dir()) {
        Ok(loader) => loader,
        Err(err) => {
            tracing::error!(error = %err, "failed to create image loader");
            return ExitCode::FAILURE;
        }
    };

    let flags = Flags {
        config,
        config_warning,
        loader,
        url: args.url,
    };

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "application exited with an error");
            ExitCode::FAILURE
        }
    }
}
