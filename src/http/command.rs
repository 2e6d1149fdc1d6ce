//! Indicator commands carried by a request.
//!
//! Two commands exist: `GET /on` switches the indicator on and `GET /off`
//! switches it off. How they are recognised depends on [`CommandMatch`].

use serde::Deserialize;

use crate::board::{Board, OutputState};
use crate::http::parser::parse_request_line;
use crate::http::request::{InboundRequest, Method};

/// Byte pattern selecting [`Command::IndicatorOn`] in substring mode.
pub const ON_PATTERN: &[u8] = b"GET /on";
/// Byte pattern selecting [`Command::IndicatorOff`] in substring mode.
pub const OFF_PATTERN: &[u8] = b"GET /off";

/// How commands are found in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandMatch {
    /// Pattern found anywhere in the payload, headers and body included.
    /// `GET /onward` therefore also switches the indicator on.
    #[default]
    Substring,
    /// Only a `GET` request line whose path is exactly `/on` or `/off`.
    RequestLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    IndicatorOn,
    IndicatorOff,
}

impl Command {
    /// Indicator state the command selects.
    pub fn target(&self) -> OutputState {
        match self {
            Command::IndicatorOn => OutputState::On,
            Command::IndicatorOff => OutputState::Off,
        }
    }
}

/// Finds the command carried by `payload`, if any.
///
/// The "on" command is checked first and wins when both are present.
pub fn find_command(payload: &[u8], mode: CommandMatch) -> Option<Command> {
    match mode {
        CommandMatch::Substring => {
            if contains(payload, ON_PATTERN) {
                Some(Command::IndicatorOn)
            } else if contains(payload, OFF_PATTERN) {
                Some(Command::IndicatorOff)
            } else {
                None
            }
        }
        CommandMatch::RequestLine => {
            let line = parse_request_line(payload).ok()?;
            if line.method != Method::GET {
                return None;
            }
            match line.path() {
                "/on" => Some(Command::IndicatorOn),
                "/off" => Some(Command::IndicatorOff),
                _ => None,
            }
        }
    }
}

/// Applies the command in `request`, if any, to the board.
///
/// Returns the command that was applied. Requests without a command leave
/// the indicator untouched.
pub fn interpret(request: &InboundRequest<'_>, board: &mut Board, mode: CommandMatch) -> Option<Command> {
    let command = find_command(request.bytes(), mode)?;
    board.set_output(command.target());
    Some(command)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
