//! Named flows
//!
//! A flow is a saved set of options for one command, kept in a
//! `.gitlab-flow` file in the working directory. Values of `ask` are
//! filled in interactively each time the flow runs.

mod file;
mod resolve;

pub use file::{
    ASK_SENTINEL, COMMAND_KEY, FLOW_FILE_NAME, FlowDefinition, FlowFile, FlowValue, parse_flows,
};
pub use resolve::{
    COMMAND_NAMESPACE, FlowCommand, FlowInvocation, ParamValue, ResolvedFlow, resolve_flow,
};

/// Default flow name when none is given
pub const DEFAULT_FLOW: &str = "default";

/// Human-readable listing of every flow in a file
pub fn describe_flows(file: &FlowFile) -> Vec<String> {
    let mut lines = vec![format!("Flows in {}", file.path.display())];
    if file.flows.is_empty() {
        lines.push(" - No flows defined".to_string());
    }
    for (name, definition) in &file.flows {
        lines.push(String::new());
        lines.push(format!("[{name}]"));
        lines.extend(
            definition
                .entries
                .iter()
                .map(|(key, value)| format!("  {key} = {value}")),
        );
    }
    lines
}

/// Lines announcing a flow right before it runs
pub fn flow_banner(flow: &ResolvedFlow) -> Vec<String> {
    let mut lines = vec![
        "--------------------------".to_string(),
        format!("  CALLING FLOW {}  ", flow.name),
        format!("  {}  ", flow.command),
        "  OPTIONS  ".to_string(),
    ];
    if flow.params.is_empty() {
        lines.push("    (none)".to_string());
    }
    lines.extend(
        flow.params
            .iter()
            .map(|(key, value)| format!("    --{key} => {value}")),
    );
    lines.push("--------------------------".to_string());
    lines
}
