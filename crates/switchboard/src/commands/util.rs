//! Shared helpers for command handlers.

use std::io::IsTerminal;

use switchboard_core::EntityId;

use crate::error::CliError;

/// Parse a command-line identifier the way the backend hands them out.
pub fn entity_id(raw: &str) -> EntityId {
    EntityId::from(raw.to_owned())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Key/value block used by single-item table output.
pub fn detail_block(fields: &[(&str, String)]) -> String {
    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(key, value)| format!("{key:<width$}  {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_keep_their_text() {
        assert_eq!(entity_id("42"), EntityId::Int(42));
        assert_eq!(entity_id("007").to_string(), "007");
        assert_eq!(entity_id("kitchen"), EntityId::Key("kitchen".into()));
    }

    #[test]
    fn detail_block_aligns_values() {
        let block = detail_block(&[("ID", "1".into()), ("Name", "desk".into())]);
        assert_eq!(block, "ID    1\nName  desk");
    }
}
