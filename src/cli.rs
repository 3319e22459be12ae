mod assembly;
mod cli_model;
mod config;

pub use assembly::Assembly;
pub use config::Config;

pub fn handle_cli() -> anyhow::Result<Config> {
    let m = cli_model::cli_model().get_matches();
    super::log_utils::init_log(&m)?;
    Config::from_matches(&m)
}

/// Build a configuration from an argument list without touching the logger
#[cfg(test)]
pub fn config_from_args<I, T>(args: I) -> anyhow::Result<Config>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let m = cli_model::cli_model().try_get_matches_from(args)?;
    Config::from_matches(&m)
}
