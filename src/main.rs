use std::{env, ffi::OsString, path::PathBuf};

use color_eyre::{Section, eyre::eyre};
use libsitecfg::config::SiteConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "SITECFG_CONFIG";
const USAGE: &str = "usage: sitecfg [check|dump|toml] [--config <path>]";

#[derive(Debug, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Check,
    Dump,
    Toml,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // stdout is reserved for `dump` and `toml` output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (command, path) = parse_args(env::args().skip(1))?;
    let path = config_path(path, env::var_os(CONFIG_ENV));

    let config = SiteConfig::resolve(path.as_deref())?;

    match command {
        Command::Check => info!(
            source = %path.as_ref().map_or("built-in".into(), |p| p.display().to_string()),
            active_socials = config.active_socials().count(),
            "configuration ok"
        ),
        Command::Dump => println!("{}", config.to_json_string()?),
        Command::Toml => print!("{}", config.to_toml_string()?),
    }

    Ok(())
}

/// `--config` wins over `SITECFG_CONFIG`; an empty variable counts as unset.
fn config_path(flag: Option<PathBuf>, env_value: Option<OsString>) -> Option<PathBuf> {
    flag.or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}

fn parse_args(
    args: impl IntoIterator<Item = String>,
) -> color_eyre::Result<(Command, Option<PathBuf>)> {
    let mut command = None;
    let mut path = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = args
                    .next()
                    .ok_or_else(|| eyre!("--config needs a path"))
                    .with_note(|| USAGE)?;
                path = Some(PathBuf::from(value));
            }
            "check" | "dump" | "toml" if command.is_some() => {
                return Err(eyre!("more than one command given")).with_note(|| USAGE);
            }
            "check" => command = Some(Command::Check),
            "dump" => command = Some(Command::Dump),
            "toml" => command = Some(Command::Toml),
            other => {
                return Err(eyre!("unexpected argument {other:?}")).with_note(|| USAGE);
            }
        }
    }

    Ok((command.unwrap_or_default(), path))
}
