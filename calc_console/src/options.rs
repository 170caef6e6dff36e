//! Command-line options and settings loading

use crate::console::{ConsoleError, ConsoleResult};
use services_settings::persistence::deserialize_overrides;
use services_settings::{create_default_registry, SettingsRegistry};
use std::fs;
use std::path::{Path, PathBuf};

/// Options accepted by the `calc` binary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Settings overrides file
    pub settings_path: Option<PathBuf>,
    /// Read key scripts from this file instead of stdin
    pub script_path: Option<PathBuf>,
    /// Log every key and dump the log to stderr at exit
    pub trace: bool,
    pub help: bool,
}

/// Parses `args` (including the program name at index 0)
pub fn parse_args(args: &[String]) -> ConsoleResult<ConsoleOptions> {
    let mut options = ConsoleOptions::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--settings" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| ConsoleError::Usage("Missing value for --settings".to_string()))?;
                options.settings_path = Some(PathBuf::from(path));
            }
            "--script" | "-s" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| ConsoleError::Usage("Missing value for --script".to_string()))?;
                options.script_path = Some(PathBuf::from(path));
            }
            "--trace" => {
                options.trace = true;
            }
            "--help" | "-h" => {
                options.help = true;
            }
            other => {
                return Err(ConsoleError::Usage(format!("Unknown option: {}", other)));
            }
        }
        i += 1;
    }

    Ok(options)
}

pub fn usage(program: &str) -> String {
    let mut text = format!("Usage: {} [OPTIONS]\n\n", program);
    text.push_str("Options:\n");
    text.push_str("  --settings <FILE>        Settings overrides (JSON)\n");
    text.push_str("  -s, --script <FILE>      Read key scripts from FILE instead of stdin\n");
    text.push_str("  --trace                  Print the key log to stderr at exit\n");
    text.push_str("  -h, --help               Show this help message\n\n");
    text.push_str("Each input line is a key script, e.g. `12+3=`.\n");
    text.push_str("Keys: 0-9 + - * x / = c (clear) e (clear entry) n (+/-) and DEL.\n");
    text.push_str("Commands: :snapshot, :q");
    text
}

/// Loads a settings file on top of the default registry
pub fn load_settings(path: &Path) -> ConsoleResult<SettingsRegistry> {
    let bytes = fs::read(path)?;
    let data = deserialize_overrides(&bytes)
        .map_err(|e| ConsoleError::Settings(format!("{}: {}", path.display(), e)))?;

    let mut registry = create_default_registry();
    data.apply_to(&mut registry).map_err(|e| ConsoleError::Settings(format!("{}: {}", path.display(), e)))?;
    Ok(registry)
}
