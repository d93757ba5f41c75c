/*!
 * Tests for error types and conversions
 */

use vocabacov::errors::{AppError, ConfigError, DeliveryError, FormatError, RepoError, SyntaxError};

#[test]
fn test_configError_missingToken_shouldNameVariable() {
    let display = ConfigError::MissingToken("VOCABACOV_TOKEN").to_string();
    assert!(display.contains("token not found"));
    assert!(display.contains("VOCABACOV_TOKEN"));
}

#[test]
fn test_configError_noChannels_shouldDisplayCorrectly() {
    assert_eq!(ConfigError::NoChannels.to_string(), "channels not found");
}

#[test]
fn test_syntaxError_shouldKnowItsGrammar() {
    assert!(SyntaxError::EmptyCommand.is_command());
    assert!(SyntaxError::MissingLang("reset".to_string()).is_command());
    assert!(!SyntaxError::TokensSize { found: 2 }.is_command());
    assert!(!SyntaxError::EmptyLang.is_command());
    assert!(!SyntaxError::EmptyPhrase.is_command());
    assert!(!SyntaxError::EmptyTranslation.is_command());
}

#[test]
fn test_syntaxError_shouldDisplayFixedMessages() {
    assert_eq!(SyntaxError::EmptyCommand.to_string(), "command is empty");
    assert_eq!(SyntaxError::EmptyLang.to_string(), "lang is empty");
    assert_eq!(SyntaxError::EmptyPhrase.to_string(), "phrase is empty");
    assert_eq!(SyntaxError::EmptyTranslation.to_string(), "translation is empty");
}

#[test]
fn test_repoError_fromAnyhow_shouldKeepContextChain() {
    let error = anyhow::anyhow!("disk full").context("Failed to insert phrase");

    let repo_error: RepoError = error.into();

    let display = repo_error.to_string();
    assert!(display.contains("Failed to insert phrase"));
    assert!(display.contains("disk full"));
}

#[test]
fn test_appError_fromRepoError_shouldWrapIt() {
    let app_error: AppError = RepoError::Corrupt("status \"LOST\"".to_string()).into();

    assert!(matches!(app_error, AppError::Repo(_)));
    assert!(app_error.to_string().starts_with("Repository error"));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");

    let app_error: AppError = io_error.into();

    assert!(matches!(app_error, AppError::File(ref m) if m.contains("missing.json")));
}

#[test]
fn test_appError_fromFormatAndDelivery_shouldWrapThem() {
    let format: AppError = FormatError::Line { line: 3, message: "empty field".to_string() }.into();
    let delivery: AppError = DeliveryError("timeout".to_string()).into();

    assert_eq!(format.to_string(), "Format error: line 3: empty field");
    assert_eq!(delivery.to_string(), "Delivery error: delivery failed: timeout");
}
