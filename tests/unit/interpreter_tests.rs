/*!
 * Tests for chat text interpretation
 */

use vocabacov::database::{Phrase, PhraseStatus};
use vocabacov::errors::SyntaxError;
use vocabacov::interpreter::{CommandName, Parsed, interpret};

fn command_parts(text: &str) -> (CommandName, Vec<String>) {
    match interpret(text) {
        Ok(Parsed::Command(command)) => (command.name(), command.args().to_vec()),
        other => panic!("expected command for {:?}, got {:?}", text, other),
    }
}

#[test]
fn test_interpret_withExport_shouldBuildCommand() {
    assert_eq!(
        command_parts("/export en"),
        (CommandName::Export, vec!["en".to_string()])
    );
}

#[test]
fn test_interpret_withReset_shouldBuildCommand() {
    assert_eq!(
        command_parts("/reset es"),
        (CommandName::Reset, vec!["es".to_string()])
    );
}

#[test]
fn test_interpret_withRepeatedSlashesAndSpaces_shouldKeepEveryArg() {
    let (name, args) = command_parts("///export   en  extra");

    assert_eq!(name, CommandName::Export);
    assert_eq!(args, ["en", "extra"]);
}

#[test]
fn test_interpret_withTabAfterName_shouldSplitOnTab() {
    assert_eq!(
        command_parts("/reset\tfr"),
        (CommandName::Reset, vec!["fr".to_string()])
    );
}

#[test]
fn test_interpret_withCommandNameOnFirstLine_shouldStorePhrase() {
    assert_eq!(
        interpret("/reset\nbye\nпока").unwrap(),
        Parsed::Phrase(Phrase::new("reset", "bye", "пока"))
    );
    // a newline never ends a command name, even right after a known one
    assert_eq!(
        interpret("/export\n").unwrap_err(),
        SyntaxError::TokensSize { found: 2 }
    );
}

#[test]
fn test_interpret_withoutLang_shouldNameCommand() {
    let error = interpret("/export").unwrap_err();

    assert_eq!(error, SyntaxError::MissingLang("export".to_string()));
    assert_eq!(error.to_string(), "export should have lang argument");
    assert!(error.is_command());

    assert_eq!(
        interpret("/reset   ").unwrap_err(),
        SyntaxError::MissingLang("reset".to_string())
    );
}

#[test]
fn test_interpret_withUnknownName_shouldNeverYieldCommand() {
    for text in ["/Export en", "/exporter en", "/delete en", "/hello"] {
        assert!(
            !matches!(interpret(text), Ok(Parsed::Command(_))),
            "{:?} was read as a command",
            text
        );
    }
    assert_eq!(
        interpret("/delete en").unwrap_err(),
        SyntaxError::TokensSize { found: 1 }
    );
}

#[test]
fn test_interpret_withPhrase_shouldBuildActivePhrase() {
    let parsed = interpret("/en\ncruel\nжестокий").unwrap();

    assert_eq!(parsed, Parsed::Phrase(Phrase::new("en", "cruel", "жестокий")));
    if let Parsed::Phrase(phrase) = parsed {
        assert_eq!(phrase.status, PhraseStatus::Active);
    }
}

#[test]
fn test_interpret_withPaddedSegments_shouldTrimEveryField() {
    assert_eq!(
        interpret("/en \n  to put up with \n мириться с \r").unwrap(),
        Parsed::Phrase(Phrase::new("en", "to put up with", "мириться с"))
    );
}

#[test]
fn test_interpret_withWrongSegmentCount_shouldReportTokensSize() {
    assert_eq!(
        interpret("/en\ncruel").unwrap_err(),
        SyntaxError::TokensSize { found: 2 }
    );
    let error = interpret("/en\ncruel\nжестокий\nextra").unwrap_err();
    assert_eq!(error, SyntaxError::TokensSize { found: 4 });
    assert_eq!(error.to_string(), "tokens size is incorrect");
    assert!(!error.is_command());
}

#[test]
fn test_interpret_withBlankSegment_shouldNameEmptyField() {
    assert_eq!(interpret("/ \ncruel\nжестокий").unwrap_err(), SyntaxError::EmptyCommand);
    assert_eq!(interpret("/en\n \nжестокий").unwrap_err(), SyntaxError::EmptyPhrase);
    assert_eq!(interpret("/en\ncruel\n").unwrap_err(), SyntaxError::EmptyTranslation);
    assert_eq!(interpret("/\t\ncruel\nжестокий").unwrap_err(), SyntaxError::EmptyCommand);
}

#[test]
fn test_interpret_withoutLeadingSlash_shouldBeUnrecognized() {
    assert_eq!(interpret("").unwrap(), Parsed::Unrecognized);
    assert_eq!(interpret("export en").unwrap(), Parsed::Unrecognized);
    assert_eq!(interpret(" /export en").unwrap(), Parsed::Unrecognized);
}

#[test]
fn test_interpret_withOnlySlashes_shouldReportEmptyCommand() {
    assert_eq!(interpret("/").unwrap_err(), SyntaxError::EmptyCommand);
    assert_eq!(interpret("/ en\ncruel\nжестокий").unwrap_err(), SyntaxError::EmptyCommand);
    assert_eq!(interpret("///").unwrap_err(), SyntaxError::EmptyCommand);
}
