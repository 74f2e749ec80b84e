use std::path::{Path, PathBuf};

use serde::Deserialize;

use rmx_types::{ChainConfig, ChainSeed, ChannelConfig, ChannelMode, ClockSource};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

const FALLBACK_RANDOM_SEED: u64 = 1;

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    chain: ChainSection,
    #[serde(default, rename = "channel")]
    channels: Option<Vec<ChannelEntry>>,
}

#[derive(Deserialize, Default)]
struct ChainSection {
    seed: Option<bool>,
    random_seed: Option<u64>,
}

#[derive(Deserialize, Default, Clone)]
struct ChannelEntry {
    mode: Option<Setting>,
    probability: Option<i64>,
    division: Option<i64>,
    clock: Option<Setting>,
}

/// A key that accepts either a name or an integer id.
#[derive(Deserialize, Clone)]
#[serde(untagged)]
enum Setting {
    Id(i64),
    Name(String),
}

pub struct Config {
    chain: ChainSection,
    channels: Vec<ChannelEntry>,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    pub fn load() -> Self {
        Self::load_layered(user_config_path().as_deref())
    }

    /// Embedded defaults, then `user_path` on top when it exists. An
    /// unreadable or malformed user file is logged and skipped.
    fn load_layered(user_path: Option<&Path>) -> Self {
        let mut base = embedded();

        if let Some(path) = user_path.filter(|p| p.exists()) {
            match read_file(path) {
                Ok(user) => merge(&mut base, user),
                Err(e) => {
                    log::warn!(target: "config", "ignoring config {}: {}", path.display(), e)
                }
            }
        }

        Self::from_file(base)
    }

    /// Embedded defaults merged with an explicit file. Unlike [`Config::load`]
    /// a missing or malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let mut base = embedded();
        let user = read_file(path)?;
        merge(&mut base, user);
        log::debug!(target: "config", "loaded {}", path.display());
        Ok(Self::from_file(base))
    }

    /// Parse a standalone TOML document (no embedded defaults).
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str::<ConfigFile>(contents)
            .map(Self::from_file)
            .map_err(|e| e.to_string())
    }

    fn from_file(file: ConfigFile) -> Self {
        Config {
            chain: file.chain,
            channels: file.channels.unwrap_or_default(),
        }
    }

    /// Chain configuration; falls back to six default channels when none are listed.
    pub fn chain_config(&self) -> ChainConfig {
        let seed = ChainSeed::from_bool(self.chain.seed.unwrap_or(false));
        if self.channels.is_empty() {
            return ChainConfig::default().with_seed(seed);
        }
        ChainConfig::new(self.channels.iter().map(channel_config).collect()).with_seed(seed)
    }

    pub fn random_seed(&self) -> u64 {
        self.chain.random_seed.unwrap_or(FALLBACK_RANDOM_SEED)
    }
}

fn embedded() -> ConfigFile {
    toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!(target: "config", "embedded config.toml is malformed: {}", e);
        ConfigFile::default()
    })
}

fn read_file(path: &Path) -> Result<ConfigFile, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read {}: {}", path.display(), e))?;
    toml::from_str::<ConfigFile>(&contents)
        .map_err(|e| format!("malformed {}: {}", path.display(), e))
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("rmx").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    if user.chain.seed.is_some() {
        base.chain.seed = user.chain.seed;
    }
    if user.chain.random_seed.is_some() {
        base.chain.random_seed = user.chain.random_seed;
    }
    if user.channels.is_some() {
        base.channels = user.channels;
    }
}

fn channel_config(entry: &ChannelEntry) -> ChannelConfig {
    let fallback = ChannelConfig::default();
    let mut cfg = fallback;
    cfg.set_mode(entry.mode.as_ref().and_then(parse_mode).unwrap_or(fallback.mode));
    cfg.set_clock_source(
        entry
            .clock
            .as_ref()
            .and_then(parse_clock)
            .unwrap_or(fallback.clock_source),
    );
    if let Some(p) = entry.probability {
        cfg.set_probability(clamp_u8(p));
    }
    if let Some(d) = entry.division {
        cfg.set_division_index(clamp_u8(d));
    }
    cfg
}

fn clamp_u8(v: i64) -> u8 {
    v.clamp(0, u8::MAX as i64) as u8
}

fn parse_mode(setting: &Setting) -> Option<ChannelMode> {
    match setting {
        Setting::Id(id) => Some(ChannelMode::from_id(clamp_u8(*id))),
        Setting::Name(name) => ChannelMode::parse(name),
    }
}

fn parse_clock(setting: &Setting) -> Option<ClockSource> {
    match setting {
        Setting::Id(id) => Some(ClockSource::from_id(clamp_u8(*id))),
        Setting::Name(name) => ClockSource::parse(name),
    }
}
