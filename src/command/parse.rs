use crate::Result;
use crate::command::kind::Command;
use crate::diagnostics;

use anyhow::bail;
use regex::Regex;

/// Compiled patterns for session input.
///
/// Accepted lines (whitespace-tolerant, `#` starts a comment line):
///   country=SG
///   set country SG
///   clear method
///   reset | show | records | help | quit | exit
pub struct CommandParser {
    assignment: Regex,
    verb: Regex,
}

impl CommandParser {
    pub fn new() -> Result<Self> {
        // Capture:
        // 1) field: anything up to '=' without whitespace
        // 2) value: rest of line, trimmed (may be empty, which clears)
        let assignment = Regex::new(r#"^\s*([^\s=]+)\s*=\s*(.*?)\s*$"#)?;
        // Capture:
        // 1) verb
        // 2) arguments: rest of line, trimmed
        let verb = Regex::new(r#"^\s*([A-Za-z]+)(?:\s+(.*?))?\s*$"#)?;
        Ok(Self { assignment, verb })
    }

    /// Parse `field=value` as given to `--select`.
    pub fn parse_assignment(&self, text: &str) -> Result<(String, String)> {
        match self.assignment.captures(text) {
            Some(caps) => Ok((caps[1].to_string(), caps[2].to_string())),
            None => bail!(
                "{}",
                diagnostics::error_message(format!("expected <field>=<value>, got {:?}", text))
            ),
        }
    }

    /// Parse one session line. Blank and comment lines yield `None`.
    pub fn parse_line(&self, line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        if self.assignment.is_match(line) {
            let (field, value) = self.parse_assignment(line)?;
            return Ok(Some(Command::Set { field, value }));
        }

        let caps = match self.verb.captures(line) {
            Some(c) => c,
            None => bail!(
                "{}",
                diagnostics::error_message(format!("cannot parse command: {:?}", line))
            ),
        };
        let verb = caps[1].to_ascii_lowercase();
        let args = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        let command = match verb.as_str() {
            "set" => {
                let (field, value) = match args.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => bail!(
                        "{}",
                        diagnostics::error_message("usage: set <field> <value>")
                    ),
                };
                Command::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "clear" => {
                if args.is_empty() || args.contains(char::is_whitespace) {
                    bail!("{}", diagnostics::error_message("usage: clear <field>"));
                }
                Command::Clear {
                    field: args.to_string(),
                }
            }
            "reset" => Command::Reset,
            "show" => Command::Show,
            "records" => Command::Records,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!(
                "{}",
                diagnostics::error_message(format!("unknown command {:?} (try 'help')", other))
            ),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(field: &str, value: &str) -> Option<Command> {
        Some(Command::Set {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    #[test]
    fn assignments() {
        let p = CommandParser::new().unwrap();
        assert_eq!(
            p.parse_assignment("country = SG ").unwrap(),
            ("country".to_string(), "SG".to_string())
        );
        assert_eq!(
            p.parse_assignment("method=").unwrap(),
            ("method".to_string(), String::new())
        );
        assert!(p.parse_assignment("country SG").is_err());
    }

    #[test]
    fn set_accepts_both_spellings() {
        let p = CommandParser::new().unwrap();
        assert_eq!(p.parse_line("country=IN").unwrap(), set("country", "IN"));
        assert_eq!(p.parse_line("  set currency  US Dollar ").unwrap(), set("currency", "US Dollar"));
        assert!(p.parse_line("set currency").is_err());
    }

    #[test]
    fn verbs_and_noise() {
        let p = CommandParser::new().unwrap();
        assert_eq!(p.parse_line("").unwrap(), None);
        assert_eq!(p.parse_line("# comment").unwrap(), None);
        assert_eq!(
            p.parse_line("clear method").unwrap(),
            Some(Command::Clear {
                field: "method".to_string()
            })
        );
        assert_eq!(p.parse_line("RESET").unwrap(), Some(Command::Reset));
        assert_eq!(p.parse_line("show").unwrap(), Some(Command::Show));
        assert_eq!(p.parse_line("records").unwrap(), Some(Command::Records));
        assert_eq!(p.parse_line("help").unwrap(), Some(Command::Help));
        assert_eq!(p.parse_line("exit").unwrap(), Some(Command::Quit));
        assert!(p.parse_line("clear").is_err());
        assert!(p.parse_line("launch rockets").is_err());
        assert!(p.parse_line("42").is_err());
    }
}
