use atty::Stream;
use color_eyre::Result;
use pts_core::{CommandGroup, CommandInfo, CommandStatus, ExecutionOutcome};
use serde_json::Value;

use crate::style::Style;

#[derive(Clone, Copy, Debug)]
pub struct OutputOptions {
    pub quiet: bool,
    pub json: bool,
    pub no_color: bool,
}

pub fn emit_output(
    opts: &OutputOptions,
    info: CommandInfo,
    outcome: &ExecutionOutcome,
) -> Result<i32> {
    let code = match outcome.status {
        CommandStatus::Ok => 0,
        CommandStatus::UserError => 1,
        CommandStatus::Failure => 2,
    };

    let style = Style::new(opts.no_color, atty::is(Stream::Stdout));

    if opts.json {
        let payload = pts_core::to_json_response(info, outcome, code);
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if outcome.status == CommandStatus::Ok && is_passthrough(&outcome.details) {
        // The resolved value is the command's output; --quiet only drops status lines.
        println!("{}", outcome.message);
    } else if !opts.quiet {
        let message = pts_core::format_status_message(info, &outcome.message);
        println!("{}", style.status(&outcome.status, &message));
        if let Some(hint) = hint_from_details(&outcome.details) {
            let prefix = if outcome.status == CommandStatus::Ok {
                "Tip"
            } else {
                "Hint"
            };
            println!("{}", style.info(&format!("{prefix}: {hint}")));
        }
        if let Some(table) = render_secret_table(&style, info, &outcome.details) {
            println!("{table}");
        }
    }

    Ok(code)
}

fn hint_from_details(details: &Value) -> Option<&str> {
    details
        .as_object()
        .and_then(|map| map.get("hint"))
        .and_then(Value::as_str)
}

fn is_passthrough(details: &Value) -> bool {
    details
        .as_object()
        .and_then(|map| map.get("passthrough"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn render_secret_table(style: &Style, info: CommandInfo, details: &Value) -> Option<String> {
    if info.group != CommandGroup::List {
        return None;
    }
    let secrets = details.get("secrets")?.as_array()?;
    if secrets.is_empty() {
        return None;
    }

    let mut rows = Vec::with_capacity(secrets.len());
    for secret in secrets {
        let label = secret.get("label").and_then(Value::as_str)?.to_string();
        let kind = secret.get("kind").and_then(Value::as_str)?.to_string();
        let modified = secret
            .get("modified")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let salt = secret
            .get("salt")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        rows.push((label, kind, modified, salt));
    }

    let label_width = rows
        .iter()
        .map(|(label, ..)| label.len())
        .chain(["LABEL".len()])
        .max()
        .unwrap_or(0);
    let kind_width = rows
        .iter()
        .map(|(_, kind, ..)| kind.len())
        .chain(["KIND".len()])
        .max()
        .unwrap_or(0);
    let modified_width = rows
        .iter()
        .map(|(_, _, modified, _)| modified.len())
        .chain(["MODIFIED".len()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&style.header(&format!(
        "{:label_width$}  {:kind_width$}  {:modified_width$}  SALT",
        "LABEL", "KIND", "MODIFIED"
    )));
    for (label, kind, modified, salt) in &rows {
        out.push('\n');
        out.push_str(&format!(
            "{label:label_width$}  {kind:kind_width$}  {modified:modified_width$}  {salt}"
        ));
    }
    Some(out)
}
