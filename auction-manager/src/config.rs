use {
    crate::{
        auction::entities::TransitionPolicy,
        kernel::db::Deadlines,
    },
    anyhow::Result,
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    std::fs,
};

mod server;

// `Options` is a structup definition to provide clean command-line args for the auction manager.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the auction manager service.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub config: ConfigOptions,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Config Options")]
#[group(id = "Config")]
pub struct ConfigOptions {
    /// Path to a configuration file with storage deadlines and lifecycle settings.
    #[arg(long = "config")]
    #[arg(env = "AUCTION_CONFIG")]
    #[arg(default_value = "config.yaml")]
    pub config: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub deadlines: Deadlines,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

impl Config {
    pub fn load(path: &str) -> Result<Config> {
        let yaml_content = fs::read_to_string(path)?;
        Self::parse(&yaml_content)
    }

    fn parse(yaml_content: &str) -> Result<Config> {
        if yaml_content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml_content)?;
        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct LifecycleConfig {
    /// How start, stop and winner transitions treat the state they were validated against.
    #[serde(default)]
    pub transition_policy:            TransitionPolicy,
    /// List auctions that were never started as stop candidates too.
    #[serde(default)]
    pub stop_list_includes_unstarted: bool,
    /// Reject winners that are not stored bids of the auction.
    #[serde(default = "LifecycleConfig::default_verify_winning_bid")]
    pub verify_winning_bid:           bool,
}

impl LifecycleConfig {
    fn default_verify_winning_bid() -> bool {
        true
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            transition_policy:            TransitionPolicy::default(),
            stop_list_includes_unstarted: false,
            verify_winning_bid:           Self::default_verify_winning_bid(),
        }
    }
}
