// SPDX-License-Identifier: MPL-2.0
use tracing_subscriber::EnvFilter;
use tv3_home_hub::app::{self, paths, Flags};

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        lang: parse_opt(&mut args, "--lang"),
        data_dir: parse_opt(&mut args, "--data-dir"),
        config_dir: parse_opt(&mut args, "--config-dir"),
        backend_url: parse_opt(&mut args, "--backend-url"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unrecognized arguments");
    }

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());
    app::run(flags)
}

fn parse_opt(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    args.opt_value_from_str(key).unwrap_or_else(|err| {
        tracing::warn!(%key, "invalid argument: {err}");
        None
    })
}
