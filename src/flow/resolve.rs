//! Resolving a flow definition into orchestrator options
//!
//! Resolution happens in two passes: first every key is validated against
//! the command and literals are converted, then `ask` entries are prompted
//! for. A broken flow therefore fails before the operator types anything.

use crate::error::{Error, Result};
use crate::flow::file::{COMMAND_KEY, FlowDefinition, FlowValue};
use crate::interact::Prompter;
use crate::mr::{CreateOptions, MergeOptions};
use std::collections::BTreeMap;
use tracing::debug;

/// Namespace the flow commands are displayed under
pub const COMMAND_NAMESPACE: &str = "gitlab";

/// Commands a flow can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowCommand {
    /// `gitlab:mr` - open an MR
    CreateMr,
    /// `gitlab:mr-merge` - accept an MR
    MergeMr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamKind {
    Text,
    Flag,
    Number,
}

const CREATE_PARAMS: &[(&str, ParamKind)] = &[
    ("source", ParamKind::Text),
    ("target", ParamKind::Text),
    ("title", ParamKind::Text),
    ("description", ParamKind::Text),
    ("no-assignee", ParamKind::Flag),
    ("no-milestone", ParamKind::Flag),
    ("wip", ParamKind::Flag),
    ("no-push", ParamKind::Flag),
    ("merge", ParamKind::Flag),
    ("remove-source", ParamKind::Flag),
    ("update-local", ParamKind::Flag),
    ("tag-after", ParamKind::Text),
];

const MERGE_PARAMS: &[(&str, ParamKind)] = &[
    ("id", ParamKind::Number),
    ("message", ParamKind::Text),
    ("remove-source", ParamKind::Flag),
    ("push", ParamKind::Flag),
    ("update-local", ParamKind::Flag),
    ("tag-after", ParamKind::Text),
    ("yes", ParamKind::Flag),
];

impl FlowCommand {
    /// Parse a `command` value, with or without the `gitlab:` prefix
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let name = trimmed
            .strip_prefix(COMMAND_NAMESPACE)
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(trimmed);
        match name {
            "mr" => Ok(Self::CreateMr),
            "mr-merge" => Ok(Self::MergeMr),
            _ => Err(Error::Flow(format!(
                "unknown flow command \"{raw}\"; expected \"mr\" or \"mr-merge\""
            ))),
        }
    }

    /// Short command name
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateMr => "mr",
            Self::MergeMr => "mr-merge",
        }
    }

    /// Name including the namespace, e.g. `gitlab:mr`
    pub fn qualified_name(self) -> String {
        format!("{COMMAND_NAMESPACE}:{}", self.name())
    }

    const fn params(self) -> &'static [(&'static str, ParamKind)] {
        match self {
            Self::CreateMr => CREATE_PARAMS,
            Self::MergeMr => MERGE_PARAMS,
        }
    }

    fn kind_of(self, key: &str) -> Option<ParamKind> {
        self.params()
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, kind)| *kind)
    }
}

impl std::fmt::Display for FlowCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

/// A resolved parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Text option
    Text(String),
    /// Boolean flag
    Flag(bool),
    /// Numeric argument
    Number(u64),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A flow with every `ask` answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFlow {
    /// Flow name
    pub name: String,
    /// Command to run
    pub command: FlowCommand,
    /// Parameters by key (without any leading `--`)
    pub params: BTreeMap<String, ParamValue>,
}

/// What a resolved flow runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowInvocation {
    /// Open an MR
    CreateMr(CreateOptions),
    /// Accept an MR
    MergeMr(MergeOptions),
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "0" | "no" | "n" | "off" | "" => Ok(false),
        other => Err(Error::Flow(format!(
            "\"{key}\" expects true or false, got \"{other}\""
        ))),
    }
}

/// Empty text leaves a text option unset
fn unset_text(kind: ParamKind, raw: &str) -> bool {
    kind == ParamKind::Text && raw.trim().is_empty()
}

fn convert(key: &str, kind: ParamKind, raw: &str) -> Result<ParamValue> {
    match kind {
        ParamKind::Text => Ok(ParamValue::Text(raw.to_string())),
        ParamKind::Flag => parse_flag(key, raw).map(ParamValue::Flag),
        ParamKind::Number => raw.trim().parse::<u64>().map(ParamValue::Number).map_err(|_| {
            Error::Flow(format!("\"{key}\" expects a number, got \"{raw}\""))
        }),
    }
}

/// Resolve a flow, prompting for every `ask` entry
pub fn resolve_flow(
    name: &str,
    definition: &FlowDefinition,
    prompter: &dyn Prompter,
) -> Result<ResolvedFlow> {
    let raw_command = definition
        .command()
        .ok_or_else(|| Error::Flow(format!("flow \"{name}\" does not declare a {COMMAND_KEY}")))?;
    let command = FlowCommand::parse(raw_command)?;

    let mut params = BTreeMap::new();
    let mut pending = Vec::new();
    for (raw_key, value) in definition.parameters() {
        let key = raw_key.trim_start_matches('-');
        let kind = command.kind_of(key).ok_or_else(|| {
            Error::Flow(format!(
                "flow \"{name}\": \"{raw_key}\" is not an option of {command}"
            ))
        })?;

        match value {
            FlowValue::Ask => pending.push((key, kind)),
            FlowValue::Literal(raw) if unset_text(kind, raw) => {}
            FlowValue::Literal(raw) => {
                params.insert(key.to_string(), convert(key, kind, raw)?);
            }
            FlowValue::Flag(false) if kind == ParamKind::Text => {}
            FlowValue::Flag(true) if kind == ParamKind::Text => {
                return Err(Error::Flow(format!(
                    "flow \"{name}\": \"{raw_key}\" expects a value, got true"
                )));
            }
            FlowValue::Flag(flag) => {
                params.insert(key.to_string(), convert(key, kind, &flag.to_string())?);
            }
        }
    }

    if command == FlowCommand::MergeMr
        && !params.contains_key("id")
        && !pending.iter().any(|(key, _)| *key == "id")
    {
        return Err(Error::Flow(format!(
            "flow \"{name}\" runs {command} but sets no \"id\""
        )));
    }

    for (key, kind) in pending {
        let answer = prompter.ask(&format!(
            "Please enter the value for the argument/option \"{key}\""
        ))?;
        if unset_text(kind, &answer) {
            continue;
        }
        params.insert(key.to_string(), convert(key, kind, &answer)?);
    }

    debug!(flow = name, %command, count = params.len(), "resolved flow");
    Ok(ResolvedFlow {
        name: name.to_string(),
        command,
        params,
    })
}

impl ResolvedFlow {
    fn text(&self, key: &str) -> Option<String> {
        match self.params.get(key) {
            Some(ParamValue::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn flag(&self, key: &str) -> bool {
        matches!(self.params.get(key), Some(ParamValue::Flag(true)))
    }

    /// Map the parameters onto the selected command's options
    pub fn invocation(&self) -> Result<FlowInvocation> {
        match self.command {
            FlowCommand::CreateMr => Ok(FlowInvocation::CreateMr(CreateOptions {
                source: self.text("source"),
                target: self.text("target"),
                title: self.text("title"),
                description: self.text("description"),
                no_assignee: self.flag("no-assignee"),
                no_milestone: self.flag("no-milestone"),
                wip: self.flag("wip"),
                no_push: self.flag("no-push"),
                merge: self.flag("merge"),
                remove_source: self.flag("remove-source"),
                update_local: self.flag("update-local"),
                tag_after: self.text("tag-after"),
            })),
            FlowCommand::MergeMr => {
                let Some(ParamValue::Number(mr_iid)) = self.params.get("id") else {
                    return Err(Error::Flow(format!(
                        "flow \"{}\" needs an MR \"id\"",
                        self.name
                    )));
                };
                Ok(FlowInvocation::MergeMr(MergeOptions {
                    mr_iid: *mr_iid,
                    message: self.text("message"),
                    remove_source: self.flag("remove-source"),
                    push: self.flag("push"),
                    update_local: self.flag("update-local"),
                    tag_after: self.text("tag-after"),
                    yes: self.flag("yes"),
                }))
            }
        }
    }
}
