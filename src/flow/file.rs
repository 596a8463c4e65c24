//! Loading `.gitlab-flow` files
//!
//! A flow file is TOML with one table per flow:
//!
//! ```toml
//! [release]
//! command = "mr"
//! target = "master"
//! title = "ask"
//! merge = true
//! ```

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory
pub const FLOW_FILE_NAME: &str = ".gitlab-flow";

/// Value that makes the resolver prompt the operator
pub const ASK_SENTINEL: &str = "ask";

/// Key naming the command a flow runs
pub const COMMAND_KEY: &str = "command";

/// Raw value of one flow entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowValue {
    /// Literal text, passed through unchanged
    Literal(String),
    /// Boolean flag
    Flag(bool),
    /// Prompt the operator at run time
    Ask,
}

impl std::fmt::Display for FlowValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "{s:?}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Ask => write!(f, "{ASK_SENTINEL}"),
        }
    }
}

/// One named flow section
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowDefinition {
    /// Entries in key order, `command` included
    pub entries: BTreeMap<String, FlowValue>,
}

impl FlowDefinition {
    /// Raw `command` value, if declared as text
    pub fn command(&self) -> Option<&str> {
        match self.entries.get(COMMAND_KEY) {
            Some(FlowValue::Literal(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Entries other than `command`
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &FlowValue)> {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != COMMAND_KEY)
            .map(|(k, v)| (k.as_str(), v))
    }
}

/// All flows declared in one file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowFile {
    /// Where the flows were read from
    pub path: PathBuf,
    /// Flows by name
    pub flows: BTreeMap<String, FlowDefinition>,
}

impl FlowFile {
    /// Load `.gitlab-flow` from `dir`
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load(&dir.join(FLOW_FILE_NAME))
    }

    /// Load and parse a flow file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Flow(format!(
                "cannot find or read \"{FLOW_FILE_NAME}\" file at {}: {e}",
                path.display()
            ))
        })?;

        let flows = parse_flows(&content)
            .map_err(|e| Error::Flow(format!("failed to parse {}: {e}", path.display())))?;
        debug!(path = %path.display(), count = flows.len(), "loaded flow file");

        Ok(Self {
            path: path.to_path_buf(),
            flows,
        })
    }

    /// Look up a flow by name
    pub fn flow(&self, name: &str) -> Result<&FlowDefinition> {
        self.flows
            .get(name)
            .ok_or_else(|| Error::Flow(format!("cannot find section \"{name}\" in {FLOW_FILE_NAME}")))
    }
}

/// Parse flow file content into named definitions
pub fn parse_flows(content: &str) -> std::result::Result<BTreeMap<String, FlowDefinition>, String> {
    let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;

    let mut flows = BTreeMap::new();
    for (name, section) in table {
        let toml::Value::Table(section) = section else {
            return Err(format!(
                "top-level key \"{name}\" is not a flow section; wrap it in [section]"
            ));
        };

        let mut entries = BTreeMap::new();
        for (key, value) in section {
            let value = match value {
                toml::Value::String(s) if s == ASK_SENTINEL => FlowValue::Ask,
                toml::Value::String(s) => FlowValue::Literal(s),
                toml::Value::Boolean(b) => FlowValue::Flag(b),
                toml::Value::Integer(i) => FlowValue::Literal(i.to_string()),
                toml::Value::Float(x) => FlowValue::Literal(x.to_string()),
                other => {
                    return Err(format!(
                        "[{name}] {key}: unsupported value {other}; use a string, number or boolean"
                    ));
                }
            };
            entries.insert(key, value);
        }
        flows.insert(name, FlowDefinition { entries });
    }

    Ok(flows)
}
