use holdem_engine::game::TableConfig;
use serde::{Deserialize, Serialize};
use std::fs;

pub const MAX_BOTS: usize = 9;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub bots: usize,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub bet_amount: u32,
    pub starting_pot: u32,
    pub bot_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub bots: ValueSource,
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub bet_amount: ValueSource,
    pub starting_pot: ValueSource,
    pub bot_delay_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            bots: ValueSource::Default,
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            bet_amount: ValueSource::Default,
            starting_pot: ValueSource::Default,
            bot_delay_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let table = TableConfig::default();
        Self {
            seed: table.seed,
            bots: table.bots,
            starting_stack: table.starting_stack,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            bet_amount: table.bet_amount,
            starting_pot: table.starting_pot,
            bot_delay_ms: table.bot_delay_ms,
        }
    }
}

impl Config {
    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            bots: self.bots,
            starting_stack: self.starting_stack,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            bet_amount: self.bet_amount,
            starting_pot: self.starting_pot,
            seed: self.seed,
            bot_delay_ms: self.bot_delay_ms,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Resolves configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_with_lookup(|key| std::env::var(key).ok())
}

/// Resolves configuration: defaults, then the TOML file named by
/// `HOLDEM_CONFIG`, then `HOLDEM_*` variables. `lookup` stands in for the
/// environment.
pub fn load_with_lookup<F>(lookup: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(path) = var("HOLDEM_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.bots {
            cfg.bots = v;
            sources.bots = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.bet_amount {
            cfg.bet_amount = v;
            sources.bet_amount = ValueSource::File;
        }
        if let Some(v) = f.starting_pot {
            cfg.starting_pot = v;
            sources.starting_pot = ValueSource::File;
        }
        if let Some(v) = f.bot_delay_ms {
            cfg.bot_delay_ms = v;
            sources.bot_delay_ms = ValueSource::File;
        }
    }

    if let Some(seed) = var("HOLDEM_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(bet) = var("HOLDEM_BET_AMOUNT") {
        cfg.bet_amount = bet
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid bet amount".into()))?;
        sources.bet_amount = ValueSource::Env;
    }
    if let Some(bots) = var("HOLDEM_BOTS") {
        cfg.bots = bots
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid bot count".into()))?;
        sources.bots = ValueSource::Env;
    }
    if let Some(stack) = var("HOLDEM_STARTING_STACK") {
        cfg.starting_stack = stack
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting stack".into()))?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(sb) = var("HOLDEM_SMALL_BLIND") {
        cfg.small_blind = sb
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid small blind".into()))?;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(bb) = var("HOLDEM_BIG_BLIND") {
        cfg.big_blind = bb
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid big blind".into()))?;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(pot) = var("HOLDEM_STARTING_POT") {
        cfg.starting_pot = pot
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting pot".into()))?;
        sources.starting_pot = ValueSource::Env;
    }
    if let Some(delay) = var("HOLDEM_BOT_DELAY_MS") {
        cfg.bot_delay_ms = delay
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid bot delay".into()))?;
        sources.bot_delay_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    bots: Option<usize>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    bet_amount: Option<u32>,
    #[serde(default)]
    starting_pot: Option<u32>,
    #[serde(default)]
    bot_delay_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.bots == 0 || cfg.bots > MAX_BOTS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: bots must be between 1 and {}",
            MAX_BOTS
        )));
    }
    if cfg.big_blind < cfg.small_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big_blind must be >= small_blind".into(),
        ));
    }
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    Ok(())
}
