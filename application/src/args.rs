//! [`Args`] definitions.

use std::ffi::OsString;

use clap::Parser;

/// Server quoting flooring installations.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    ///
    /// A missing file is fine: defaults and `CONF.`-prefixed environment
    /// variables are used then.
    #[arg(short, long, env = "FLOORING_QUOTE_CONFIG", default_value = "config.toml")]
    pub config: String,
}

impl Args {
    /// Parses command line arguments of the current process.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }

    /// Parses the provided command line arguments, the first one being the
    /// binary name.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }
}
