//! Interactive front door: mode menu and policy id prompt.
//!
//! Readers and writers are passed in so the dialogue can be driven from tests.

use crate::models::PolicyIdentifier;
use std::io::{self, BufRead, Write};

/// What the operator chose from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Export,
    Convert,
}

/// Where input acquisition ended up before any pipeline exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputState {
    AwaitingInput,
    Validated(PolicyIdentifier),
    Rejected,
}

fn read_trimmed_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Show the mode menu and read one choice. `None` for anything but 1 or 2.
pub fn select_mode<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<Mode>> {
    writeln!(out, "Export the OCI Network firewall policy using this tool!")?;
    writeln!(out, "Choose an option:")?;
    writeln!(out, "1. Export Policies to Json format")?;
    writeln!(out, "2. Convert Policies from Json to Excel Format")?;
    write!(out, "Enter your choice (1 or 2): ")?;
    out.flush()?;

    let mode = match read_trimmed_line(input)?.as_str() {
        "1" => Some(Mode::Export),
        "2" => Some(Mode::Convert),
        _ => {
            writeln!(out, "Invalid choice. Please enter 1 or 2.")?;
            None
        }
    };
    Ok(mode)
}

/// Validate a policy id that came from anywhere (prompt or flag).
///
/// A rejected id prints the diagnostic and leaves no other trace.
pub fn accept_policy_id<W: Write>(raw: &str, out: &mut W) -> io::Result<InputState> {
    match PolicyIdentifier::parse(raw) {
        Ok(policy_id) => Ok(InputState::Validated(policy_id)),
        Err(e) => {
            log::warn!("{e}");
            writeln!(
                out,
                "Invalid Network Firewall Policy ID. It should start with 'ocid1.networkfirewallpolicy.oc1.'. Exiting."
            )?;
            Ok(InputState::Rejected)
        }
    }
}

/// Ask for the policy id on `input` and validate it.
pub fn prompt_policy_id<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<InputState> {
    let mut state = InputState::AwaitingInput;
    log::debug!("input {state:?}");

    writeln!(out, "Please provide the Network Firewall Policy ID:")?;
    out.flush()?;
    let raw = read_trimmed_line(input)?;
    writeln!(out)?;

    state = accept_policy_id(&raw, out)?;
    log::debug!("input {state:?}");
    Ok(state)
}
