use crate::commands::{CmdMessage, CmdResult};
use crate::config::ZealotConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Reads or updates `config.json` in `dir`. Unknown keys and unparsable
/// values are reported as error messages and leave the file untouched.
pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = ZealotConfig::load(dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {
            for key in ZealotConfig::keys() {
                if let Some(value) = config.get(key) {
                    result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
                }
            }
        }
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Some(value) => result.add_message(CmdMessage::info(value)),
            None => result.add_message(CmdMessage::error(format!("Unknown config key: {}", key))),
        },
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            config.save(dir)?;
            let shown = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
        }
    }
    Ok(result)
}
