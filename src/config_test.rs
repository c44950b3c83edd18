use super::*;

#[test]
fn default_matches_server_defaults() {
    let cfg = ChatConfig::default();
    assert_eq!(cfg.server_url, "ws://localhost:8080/ws");
    assert_eq!(cfg.username, "Anonymous");
    assert_eq!(cfg.channel, "general");
    assert!(cfg.has_default_identity());
}

#[test]
fn default_builds_a_valid_address() {
    let addr = ChatConfig::default().address().expect("default address");
    assert_eq!(addr.url().as_str(), "ws://localhost:8080/ws?username=Anonymous&channel=general");
}

#[test]
fn identity_is_default_while_either_field_is() {
    let renamed = ChatConfig { username: "Alice".into(), ..ChatConfig::default() };
    assert!(renamed.has_default_identity());
    assert_eq!(renamed.address().expect("address").username(), "Alice");

    let custom = ChatConfig { username: "Alice".into(), channel: "rust".into(), ..ChatConfig::default() };
    assert!(!custom.has_default_identity());
}

#[test]
fn address_surfaces_validation_errors() {
    let blank = ChatConfig { channel: "  ".into(), ..ChatConfig::default() };
    assert_eq!(blank.address(), Err(AddressError::EmptyChannel));

    let bad_url = ChatConfig { server_url: "localhost".into(), ..ChatConfig::default() };
    assert!(matches!(bad_url.address(), Err(AddressError::InvalidUrl(_))));
}
