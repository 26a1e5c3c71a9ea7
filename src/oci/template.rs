//! Command templates with named placeholders.

use super::cli::CommandLine;

pub const POLICY_ID: &str = "{policy_id}";
pub const PARENT_RESOURCE_ID: &str = "{parent_resource_id}";
pub const NAME: &str = "{name}";

/// Argument list of an OCI CLI call with `{placeholder}` slots.
///
/// Substitution happens per argument, so a value can never spill into a
/// neighbouring argument whatever characters it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    args: Vec<String>,
}

impl CommandTemplate {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandTemplate {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Fill in the placeholders and attach the program to run.
    pub fn render(&self, program: &str, values: &[(&str, &str)]) -> CommandLine {
        let args = self.args.iter().map(|arg| {
            values
                .iter()
                .fold(arg.clone(), |acc, (key, value)| acc.replace(key, value))
        });
        CommandLine::new(program, args)
    }
}
