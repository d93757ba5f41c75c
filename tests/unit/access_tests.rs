/*!
 * Tests for the channel allow-list
 */

use vocabacov::access::ChannelSet;
use vocabacov::errors::ConfigError;

#[test]
fn test_parse_withWhitespaceVariants_shouldYieldSameSet() {
    let compact = ChannelSet::parse("1,2,3").unwrap();
    let spaced = ChannelSet::parse("1, 2, 3").unwrap();
    let padded = ChannelSet::parse("1 , 2 , 3 ").unwrap();

    assert_eq!(compact, spaced);
    assert_eq!(compact, padded);
    assert_eq!(compact.len(), 3);
    for id in [1, 2, 3] {
        assert!(compact.is_authorized(id));
    }
    assert!(!compact.is_authorized(4));
}

#[test]
fn test_parse_withNegativeIds_shouldAcceptThem() {
    let channels = ChannelSet::parse("123, -1234, 12345").unwrap();

    assert!(channels.is_authorized(-1234));
    assert!(!channels.is_authorized(1234));
}

#[test]
fn test_parse_withEmptyTokensAndDuplicates_shouldSkipAndCollapse() {
    let channels = ChannelSet::parse("1,,2, ,1").unwrap();

    assert_eq!(channels.len(), 2);
    assert_eq!(channels.to_string(), "1,2");
}

#[test]
fn test_parse_withEmptyInput_shouldFail() {
    assert!(matches!(ChannelSet::parse(""), Err(ConfigError::NoChannels)));
    assert!(matches!(ChannelSet::parse(" , "), Err(ConfigError::NoChannels)));
}

#[test]
fn test_parse_withNonInteger_shouldNameToken() {
    let error = ChannelSet::parse("1, abc ,3").unwrap_err();

    match &error {
        ConfigError::InvalidChannel { token, .. } => assert_eq!(token, "abc"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(error.to_string().contains("\"abc\""));
}

#[test]
fn test_parse_withOverflow_shouldFail() {
    assert!(ChannelSet::parse("99999999999999999999").is_err());
}

#[test]
fn test_fromStr_shouldMatchParse() {
    let parsed: ChannelSet = "-5, 7".parse().unwrap();
    assert_eq!(parsed, ChannelSet::parse("7,-5").unwrap());
}
