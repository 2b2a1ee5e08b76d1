use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Which generation of the hotfix artifacts to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// `ORDER BY ID DESC` selects, `(ID)` primary keys, no load info
    #[default]
    Classic,
    /// `VerifiedBuild` aware selects and keys, max-id statements and DB2LoadInfo.h
    Metadata,
}

/// Generator settings, loaded from an optional JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Only structs whose name contains this are generated
    pub struct_filter: String,
    /// Substitutions applied to struct names, in order
    pub acronyms: Vec<(String, String)>,
    /// Extra typedefs: alias → known type
    pub aliases: BTreeMap<String, String>,
    /// Constants usable as array bounds
    pub defines: BTreeMap<String, u32>,
    pub statement_prefix: String,
    pub engine: String,
    pub charset: String,
    pub line_length: usize,
    pub flavor: Flavor,
}

impl Default for Config {
    fn default() -> Self {
        let acronyms = [
            ("GameObject", "Gameobject"),
            ("PvP", "Pvp"),
            ("PVP", "Pvp"),
            ("QuestXP", "QuestXp"),
            ("WMO", "Wmo"),
            ("AddOn", "Addon"),
            ("LFG", "Lfg"),
        ]
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        let aliases = [("BattlegroundBracketId", "uint32")]
            .iter()
            .map(|(alias, target)| (alias.to_string(), target.to_string()))
            .collect();

        let defines = [
            ("MAX_ITEM_PROTO_FLAGS", 4),
            ("MAX_ITEM_PROTO_ZONES", 2),
            ("MAX_ITEM_PROTO_SOCKETS", 3),
            ("MAX_ITEM_PROTO_STATS", 10),
            ("MAX_SPELL_AURA_INTERRUPT_FLAGS", 2),
        ]
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect();

        Self {
            struct_filter: "Entry".to_string(),
            acronyms,
            aliases,
            defines,
            statement_prefix: "HOTFIX_SEL_".to_string(),
            engine: "MyISAM".to_string(),
            charset: "utf8".to_string(),
            line_length: 150,
            flavor: Flavor::Classic,
        }
    }
}

impl Config {
    /// Load from an explicit path, or the per-user config file if it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// `<config dir>/db2-hotfix-gen/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "db2-hotfix-gen").map(|dirs| dirs.config_dir().join("config.json"))
}
