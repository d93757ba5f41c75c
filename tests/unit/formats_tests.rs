/*!
 * Tests for the bulk phrase formats
 */

use vocabacov::database::{Phrase, PhraseStatus};
use vocabacov::errors::FormatError;
use vocabacov::formats::{BulkFormat, PhraseBook, anki, internal};

use crate::common::sample_phrases;

#[test]
fn test_bulkFormat_fromStr_shouldBeCaseInsensitive() {
    assert_eq!("internal".parse::<BulkFormat>().unwrap(), BulkFormat::Internal);
    assert_eq!("ANKI".parse::<BulkFormat>().unwrap(), BulkFormat::Anki);
    assert!("csv".parse::<BulkFormat>().is_err());
    assert_eq!(BulkFormat::default(), BulkFormat::Internal);
}

#[test]
fn test_phraseBook_shouldGroupByLanguageKeepingOrder() {
    let book: PhraseBook = sample_phrases().into_iter().collect();

    assert_eq!(book.len(), 4);
    assert_eq!(book.languages().collect::<Vec<_>>(), ["en", "es"]);
    let en: Vec<&str> = book.get("en").iter().map(|p| p.phrase.as_str()).collect();
    assert_eq!(en, ["cruel", "to put up with", "say \"cheese\""]);
    assert!(book.get("de").is_empty());
}

#[test]
fn test_internal_roundTrip_shouldKeepEveryField() {
    let book: PhraseBook = sample_phrases().into_iter().collect();

    let data = internal::write(&book).unwrap();
    let restored = internal::read(&data).unwrap();

    assert_eq!(restored, book);
}

#[test]
fn test_internal_write_shouldUseShortKeys() {
    let book: PhraseBook = vec![Phrase::new("en", "cruel", "жестокий")].into_iter().collect();

    let json: serde_json::Value = serde_json::from_slice(&internal::write(&book).unwrap()).unwrap();

    assert_eq!(json, serde_json::json!({"en": [{"p": "cruel", "t": "жестокий"}]}));
}

#[test]
fn test_internal_read_shouldDropStatus() {
    let archived = Phrase::new("en", "cruel", "жестокий").with_status(PhraseStatus::Archived);
    let book: PhraseBook = vec![archived].into_iter().collect();

    let restored = internal::read(&internal::write(&book).unwrap()).unwrap();

    assert!(restored.get("en")[0].is_active());
}

#[test]
fn test_internal_read_withEmptyTranslation_shouldNameField() {
    let error = internal::read(br#"{"en": [{"p": "cruel", "t": ""}]}"#).unwrap_err();

    assert!(matches!(
        error,
        FormatError::EmptyField { ref lang, field: "translation" } if lang == "en"
    ));
}

#[test]
fn test_internal_read_withBlankLangOrFields_shouldRejectDocument() {
    let error = internal::read(br#"{"": [{"p": "a", "t": "b"}], "en": [{"p": "c", "t": "d"}]}"#)
        .unwrap_err();
    assert!(matches!(error, FormatError::EmptyField { field: "lang", .. }));

    let error = internal::read(br#"{"en": [{"p": "   ", "t": " x "}]}"#).unwrap_err();
    assert!(matches!(
        error,
        FormatError::EmptyField { ref lang, field: "phrase" } if lang == "en"
    ));
}

#[test]
fn test_internal_read_withMalformedJson_shouldFail() {
    assert!(matches!(internal::read(b"[1, 2"), Err(FormatError::Json(_))));
}

#[test]
fn test_anki_roundTrip_shouldSurviveQuotesTabsAndNewlines() {
    let phrases = vec![
        Phrase::new("en", "cruel", "жестокий"),
        Phrase::new("en", "say \"cheese\"", "скажите \"сыр\""),
        Phrase::new("en", "tab\tinside", "line\nbreak"),
        Phrase::new("en", "#hashtag", "хештег"),
    ];

    let data = anki::write(&phrases);
    let text = String::from_utf8(data).unwrap();
    let restored = anki::read("en", &text).unwrap();

    assert_eq!(restored.get("en"), phrases.as_slice());
}

#[test]
fn test_anki_read_shouldSkipCommentsBlankLinesAndCarriageReturns() {
    let text = "#separator:tab\r\n\r\n# a note\r\ncruel\tжестокий\r\n\nhola\tпривет";

    let book = anki::read("es", text).unwrap();

    let pairs: Vec<(&str, &str)> = book
        .get("es")
        .iter()
        .map(|p| (p.phrase.as_str(), p.translation.as_str()))
        .collect();
    assert_eq!(pairs, [("cruel", "жестокий"), ("hola", "привет")]);
}

#[test]
fn test_anki_read_withSingleField_shouldReportLine() {
    let error = anki::read("en", "#html:false\ncruel\tжестокий\nlonely\n").unwrap_err();

    assert!(matches!(error, FormatError::Line { line: 3, .. }));
}

#[test]
fn test_anki_read_withUnterminatedQuote_shouldFail() {
    assert!(matches!(
        anki::read("en", "\"cruel\tжестокий\n"),
        Err(FormatError::Line { line: 1, .. })
    ));
}

#[test]
fn test_anki_read_withBlankField_shouldReportLineAndField() {
    let error = anki::read("en", "cruel	жестокий
fine	  
").unwrap_err();

    match error {
        FormatError::Line { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("translation"), "{}", message);
        }
        other => panic!("expected line error, got {:?}", other),
    }
}
