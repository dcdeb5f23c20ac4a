//! Agent registry: one markdown descriptor per agent, header in YAML front
//! matter.
//!
//! ```text
//! ---
//! name: tdd-guide
//! description: Test-driven development specialist. Use proactively when writing tests; enforces coverage.
//! tools: ["Read", "Write", "Edit", "Bash"]
//! model: opus
//! ---
//!
//! You are a TDD specialist ...
//! ```
//!
//! `tools` may also be a comma-separated string (`Read, Grep, Glob`).

use crate::error::{Result, SteerError};
use crate::io::{read_text, require_dir, sorted_entries};
use crate::paths::AGENT_EXTENSION;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

// ---------------------------------------------------------------------------
// AgentDescriptor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDescriptor {
    pub name: String,
    pub trigger_description: String,
    /// Allowlist of external actions the persona may take. Advisory only.
    pub tool_capabilities: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Body after the header, verbatim.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instructions: String,
    pub path: PathBuf,
}

impl AgentDescriptor {
    pub fn new(name: impl Into<String>, trigger_description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trigger_description: trigger_description.into(),
            tool_capabilities: BTreeSet::new(),
            model: None,
            instructions: String::new(),
            path: PathBuf::new(),
        }
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tool_capabilities = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn allows(&self, tool: &str) -> bool {
        self.tool_capabilities.contains(tool)
    }

    /// Parse a descriptor file's text. `path` is only used for diagnostics.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let (header, body) = split_front_matter(text)
            .ok_or_else(|| SteerError::malformed(path, "missing YAML front matter delimited by ---"))?;

        let fm: FrontMatter = if header.trim().is_empty() {
            FrontMatter::default()
        } else {
            serde_yaml::from_str(header)
                .map_err(|e| SteerError::malformed(path, format!("invalid YAML: {e}")))?
        };

        let name = required(path, "name", fm.name)?;
        let trigger_description = required(path, "description", fm.description)?;
        let tool_capabilities = fm.tools.map(ToolList::into_set).unwrap_or_default();
        let model = fm
            .model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        Ok(Self {
            name,
            trigger_description,
            tool_capabilities,
            model,
            instructions: body.trim().to_string(),
            path: path.to_path_buf(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tools: Option<ToolList>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ToolList {
    List(Vec<String>),
    Csv(String),
}

impl ToolList {
    fn into_set(self) -> BTreeSet<String> {
        let items: Vec<String> = match self {
            ToolList::List(v) => v,
            ToolList::Csv(s) => s.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

fn required(path: &Path, field: &str, value: Option<String>) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SteerError::malformed(path, format!("missing field `{field}`")))
}

/// Split `---\n<yaml>\n---\n<body>` into header and body.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rest = text.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

// ---------------------------------------------------------------------------
// AgentRegistry
// ---------------------------------------------------------------------------

/// Read-only set of agent descriptors, keyed and iterated by name.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<String, AgentDescriptor>,
}

impl AgentRegistry {
    /// Load every `*.md` descriptor directly inside `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        require_dir(dir, "agents")?;

        let mut descriptors = Vec::new();
        for path in sorted_entries(dir)? {
            if path.is_dir() || !path.extension().is_some_and(|e| e == AGENT_EXTENSION) {
                debug!(path = %path.display(), "skipping non-descriptor entry");
                continue;
            }
            let text = read_text(&path)?;
            descriptors.push(AgentDescriptor::parse(&path, &text)?);
        }

        let registry = Self::from_descriptors(descriptors)?;
        debug!(path = %dir.display(), count = registry.len(), "loaded agent registry");
        Ok(registry)
    }

    /// Register descriptors, rejecting repeated names.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = AgentDescriptor>) -> Result<Self> {
        let mut agents: BTreeMap<String, AgentDescriptor> = BTreeMap::new();
        for agent in descriptors {
            if let Some(existing) = agents.get(&agent.name) {
                return Err(SteerError::DuplicateAgent {
                    name: agent.name,
                    first: existing.path.clone(),
                    second: agent.path,
                });
            }
            agents.insert(agent.name.clone(), agent);
        }
        Ok(Self { agents })
    }

    pub fn find_by_name(&self, name: &str) -> Result<&AgentDescriptor> {
        self.agents
            .get(name)
            .ok_or_else(|| SteerError::AgentNotFound(name.to_string()))
    }

    /// Agents in lexical name order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentDescriptor> {
        self.agents.values()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
