use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::outcome::ExecutionOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandGroup {
    Init,
    Add,
    Get,
    List,
    Remove,
    Move,
    Release,
}

impl fmt::Display for CommandGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandGroup::Init => "init",
            CommandGroup::Add => "add",
            CommandGroup::Get => "get",
            CommandGroup::List => "ls",
            CommandGroup::Remove => "rm",
            CommandGroup::Move => "mv",
            CommandGroup::Release => "release",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CommandInfo {
    pub group: CommandGroup,
    pub name: &'static str,
}

impl CommandInfo {
    #[must_use]
    pub const fn new(group: CommandGroup, name: &'static str) -> Self {
        Self { group, name }
    }
}

#[must_use]
pub fn format_status_message(info: CommandInfo, message: &str) -> String {
    format!("pts {}: {message}", info.name)
}

#[must_use]
pub fn to_json_response(info: CommandInfo, outcome: &ExecutionOutcome, code: i32) -> Value {
    json!({
        "command": info.name,
        "status": outcome.status.as_str(),
        "message": outcome.message,
        "details": outcome.details,
        "code": code,
    })
}
