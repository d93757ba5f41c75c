/*!
 * Anki plain-text flashcard format.
 *
 * One language per file. The file starts with Anki's header directives and
 * then holds one `phrase<TAB>translation` card per line. Fields containing a
 * tab, a line break or a double quote (or starting with `#`) are wrapped in
 * double quotes with inner quotes doubled, which Anki's importer understands.
 */

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

use super::{PhraseBook, trimmed_phrase};
use crate::database::models::Phrase;
use crate::errors::FormatError;

const HEADER: &str = "#separator:tab\n#html:false\n";

/// Render phrases as an Anki import file
pub fn write(phrases: &[Phrase]) -> Vec<u8> {
    let mut out = String::from(HEADER);
    for phrase in phrases {
        out.push_str(&quote(&phrase.phrase));
        out.push('\t');
        out.push_str(&quote(&phrase.translation));
        out.push('\n');
    }
    out.into_bytes()
}

/// Parse an Anki import file into active phrases of `lang`
pub fn read(lang: &str, text: &str) -> Result<PhraseBook, FormatError> {
    if lang.trim().is_empty() {
        return Err(FormatError::EmptyField { lang: String::new(), field: "lang" });
    }
    let mut book = PhraseBook::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;

    while let Some(&next) = chars.peek() {
        match next {
            '#' => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
                line += 1;
                continue;
            }
            '\n' => {
                chars.next();
                line += 1;
                continue;
            }
            '\r' => {
                chars.next();
                continue;
            }
            _ => {}
        }

        let record_line = line;
        let fields = read_record(&mut chars, &mut line, record_line)?;
        let [phrase, translation] = fields.as_slice() else {
            return Err(FormatError::Line {
                line: record_line,
                message: format!("expected 2 fields, found {}", fields.len()),
            });
        };
        let phrase = trimmed_phrase(lang, phrase, translation).map_err(|e| FormatError::Line {
            line: record_line,
            message: e.to_string(),
        })?;
        book.push(phrase);
    }

    Ok(book)
}

fn needs_quotes(field: &str) -> bool {
    field.starts_with('#') || field.contains(['\t', '\n', '\r', '"'])
}

fn quote(field: &str) -> Cow<'_, str> {
    if needs_quotes(field) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Read tab-separated fields up to and including the end of the record
fn read_record(
    chars: &mut Peekable<Chars<'_>>,
    line: &mut usize,
    record_line: usize,
) -> Result<Vec<String>, FormatError> {
    let mut fields = Vec::new();
    loop {
        let mut field = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    Some('"') => break,
                    Some(c) => {
                        if c == '\n' {
                            *line += 1;
                        }
                        field.push(c);
                    }
                    None => {
                        return Err(FormatError::Line {
                            line: record_line,
                            message: "unterminated quoted field".to_string(),
                        });
                    }
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if matches!(c, '\t' | '\n' | '\r') {
                    break;
                }
                field.push(c);
                chars.next();
            }
        }
        fields.push(field);

        match chars.next() {
            Some('\t') => continue,
            Some('\n') | None => {
                *line += 1;
                return Ok(fields);
            }
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                *line += 1;
                return Ok(fields);
            }
            Some(c) => {
                return Err(FormatError::Line {
                    line: record_line,
                    message: format!("unexpected {:?} after quoted field", c),
                });
            }
        }
    }
}
