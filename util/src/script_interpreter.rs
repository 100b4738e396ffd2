//! # Edit script interpreter module
//!
//! This module provides an interpreter for edit scripts, which allow a path to be built or
//! modified from a text file instead of interactively.
//!
//! A script is a sequence of JSON edit commands, each terminated by a `;`. Lines starting with
//! `#` are comments:
//!
//! ```text
//! # Start in the bottom left, facing right
//! {"cmd": "set_start", "x_in": -60, "y_in": -60, "heading_deg": 90};
//! {"cmd": "append_waypoint", "x_in": 0, "y_in": -60};
//! {"cmd": "add_turn", "index": 1, "angle_deg": 0};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use regex::RegexBuilder;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal
use studio_if::edit::{EditCmd, EditParseError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A script interpreter.
///
/// After loading a script use `.next_cmd()` (or iterate) to get the commands in order.
pub struct ScriptInterpreter {
    script_path: Option<PathBuf>,
    cmds: VecDeque<EditCmd>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error("Script contains an invalid command at statement {0}: {1}")]
    InvalidCmd(usize, EditParseError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {
    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = PathBuf::from(script_path.as_ref());

        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path.display().to_string()));
        }

        let script = fs::read_to_string(&path).map_err(ScriptError::ScriptLoadError)?;

        let mut interp = Self::from_script(&script)?;
        interp.script_path = Some(path);

        Ok(interp)
    }

    /// Create a new interpreter from the text of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        // Drop comment lines first so a `;` inside a comment can't end a statement
        let body: String = script
            .lines()
            .filter(|l| !l.trim_start().starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");

        // Statements run up to a `;`, and (as JSON never contains a bare `;` outside strings)
        // the payload is everything before it.
        let re = RegexBuilder::new(r"\s*([^;]+);")
            .multi_line(true)
            .build()
            .map_err(|_| ScriptError::ScriptEmpty)?;

        let mut cmds = VecDeque::new();

        for (i, cap) in re.captures_iter(&body).enumerate() {
            let payload = match cap.get(1) {
                Some(m) => m.as_str().trim(),
                None => continue,
            };

            let cmd = EditCmd::from_json(payload).map_err(|e| ScriptError::InvalidCmd(i + 1, e))?;

            cmds.push_back(cmd);
        }

        if cmds.is_empty() {
            return Err(ScriptError::ScriptEmpty);
        }

        Ok(ScriptInterpreter {
            script_path: None,
            cmds,
        })
    }

    /// Get the next command to execute, or `None` at the end of the script.
    pub fn next_cmd(&mut self) -> Option<EditCmd> {
        self.cmds.pop_front()
    }

    /// Get the number of commands remaining in the script
    pub fn get_num_cmds(&self) -> usize {
        self.cmds.len()
    }

    /// The path the script was loaded from, if it came from a file.
    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }
}

impl Iterator for ScriptInterpreter {
    type Item = EditCmd;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_cmd()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    const SCRIPT: &str = r#"
# Start in the bottom left, facing right; comments may hold semicolons
{"cmd": "set_start", "x_in": -60, "y_in": -60, "heading_deg": 90};
{"cmd": "append_waypoint",
 "x_in": 0, "y_in": -60};
{"cmd": "add_turn", "index": 1, "angle_deg": 0};
"#;

    #[test]
    fn test_parse_script() {
        let interp = ScriptInterpreter::from_script(SCRIPT).unwrap();
        assert_eq!(interp.get_num_cmds(), 3);

        let cmds: Vec<EditCmd> = interp.collect();
        assert_eq!(
            cmds[0],
            EditCmd::SetStart {
                x_in: -60.0,
                y_in: -60.0,
                heading_deg: 90.0
            }
        );
        assert_eq!(
            cmds[2],
            EditCmd::AddTurn {
                index: 1,
                angle_deg: 0.0
            }
        );
    }

    #[test]
    fn test_empty_script() {
        assert!(matches!(
            ScriptInterpreter::from_script("# nothing here\n\n"),
            Err(ScriptError::ScriptEmpty)
        ));
    }

    #[test]
    fn test_invalid_statement_position() {
        let script = "{\"cmd\": \"round_all\"};\n{\"cmd\": \"fly\"};\n";
        match ScriptInterpreter::from_script(script) {
            Err(ScriptError::InvalidCmd(2, EditParseError::InvalidType(_))) => (),
            other => panic!("Unexpected result: {:?}", other.map(|i| i.get_num_cmds())),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SCRIPT).unwrap();

        let interp = ScriptInterpreter::new(file.path()).unwrap();
        assert_eq!(interp.script_path(), Some(file.path()));
        assert_eq!(interp.get_num_cmds(), 3);

        assert!(matches!(
            ScriptInterpreter::new("/no/such/script.edit"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
