/// One line of input in an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: String, value: String },
    Clear { field: String },
    Reset,
    Show,
    Records,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  set <field> <value>   choose a value (also: <field>=<value>)
  clear <field>         reset a field to unselected
  reset                 clear every field
  show                  print the current options
  records               print every combination
  help                  this text
  quit                  leave";
