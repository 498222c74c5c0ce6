//! Demo configuration from command line arguments and environment.

use anyhow::{Context, Result, bail};

/// Environment variable naming the simulated reader.
pub const ENV_NAME: &str = "TAPPY_NAME";

const USAGE: &str = "usage: tappy-demo [--name NAME] [--uri URI] [--text TEXT] [--lock]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub name: String,
    pub uri: String,
    pub text: String,
    pub lock: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            name: "Tappy Demo".to_string(),
            uri: "https://www.taptrack.com".to_string(),
            text: "Hello from Tappy".to_string(),
            lock: false,
        }
    }
}

impl DemoConfig {
    /// Defaults, overridden by `TAPPY_NAME`, overridden by arguments.
    pub fn load() -> Result<Self> {
        let name = std::env::var(ENV_NAME).ok();
        Self::parse(name, std::env::args().skip(1))
    }

    pub fn parse<I>(env_name: Option<String>, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        if let Some(name) = env_name.filter(|n| !n.trim().is_empty()) {
            config.name = name;
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--name" => config.name = value(&mut args, "--name")?,
                "--uri" => config.uri = value(&mut args, "--uri")?,
                "--text" => config.text = value(&mut args, "--text")?,
                "--lock" => config.lock = true,
                other => bail!("unknown argument {other:?}\n{USAGE}"),
            }
        }
        Ok(config)
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} requires a value\n{USAGE}"))
}
