/*!
 * Chat text interpretation.
 *
 * Slash-prefixed text carries one of two micro-grammars:
 * - a one-line command, `/export en` or `/reset en`
 * - a three-line vocabulary entry, `/en\ncruel\nжестокий`
 *
 * Anything else is not addressed to the bot. A single pass decides which
 * grammar applies and returns a [`Parsed`] value.
 */

use std::fmt;
use std::str::FromStr;

use crate::database::models::Phrase;
use crate::errors::SyntaxError;

/// Commands the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    /// Send all active phrases of a language as a file and archive them
    Export,
    /// Make every phrase of a language active again
    Reset,
}

impl CommandName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Export => "export",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = ();

    /// Case-sensitive: `/Export en` is not a command.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "export" => Ok(Self::Export),
            "reset" => Ok(Self::Reset),
            _ => Err(()),
        }
    }
}

/// A control instruction extracted from chat text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: CommandName,
    args: Vec<String>,
}

impl Command {
    /// Build a command, rejecting it when the language argument is missing
    pub fn new(name: CommandName, args: Vec<String>) -> Result<Self, SyntaxError> {
        if args.is_empty() {
            return Err(SyntaxError::MissingLang(name.to_string()));
        }
        Ok(Self { name, args })
    }

    pub fn name(&self) -> CommandName {
        self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Target language, the first argument
    pub fn lang(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }
}

/// Result of interpreting one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Command(Command),
    Phrase(Phrase),
    /// Not addressed to the bot; ignored
    Unrecognized,
}

/// Interpret raw chat text.
///
/// Returns `Ok(Parsed::Unrecognized)` for text without a leading `/`.
pub fn interpret(text: &str) -> Result<Parsed, SyntaxError> {
    if !text.starts_with('/') {
        return Ok(Parsed::Unrecognized);
    }
    let body = text.trim_start_matches('/');

    if let Some(command) = parse_command(body)? {
        return Ok(Parsed::Command(command));
    }

    parse_phrase(body).map(Parsed::Phrase)
}

/// Command grammar over the text with slashes already stripped.
///
/// The name ends at a space or tab only, so a name running into a line break
/// (`reset\nbye\nпока`) is not a command. Arguments come from the first line.
///
/// `Ok(None)` means the name is not a known command and the phrase grammar should be tried.
fn parse_command(body: &str) -> Result<Option<Command>, SyntaxError> {
    let name_end = body.find([' ', '\t']).unwrap_or(body.len());
    let (name, rest) = body.split_at(name_end);
    if name.is_empty() {
        return Err(SyntaxError::EmptyCommand);
    }

    let Ok(name) = name.parse::<CommandName>() else {
        return Ok(None);
    };

    let first_line = rest.split('\n').next().unwrap_or_default();
    let args = first_line.split_whitespace().map(str::to_string).collect();
    Command::new(name, args).map(Some)
}

/// Phrase grammar: exactly three newline-separated, non-blank segments
fn parse_phrase(body: &str) -> Result<Phrase, SyntaxError> {
    let tokens: Vec<&str> = body.split('\n').collect();
    let [lang, phrase, translation] = tokens.as_slice() else {
        return Err(SyntaxError::TokensSize { found: tokens.len() });
    };

    let lang = lang.trim();
    if lang.is_empty() {
        return Err(SyntaxError::EmptyLang);
    }
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return Err(SyntaxError::EmptyPhrase);
    }
    let translation = translation.trim();
    if translation.is_empty() {
        return Err(SyntaxError::EmptyTranslation);
    }

    Ok(Phrase::new(lang, phrase, translation))
}
