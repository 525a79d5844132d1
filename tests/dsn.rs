use pretty_assertions::assert_eq;

use deferred_reporter::{Dsn, DsnError};

#[test]
fn derives_bundle_url_from_public_key() {
    let dsn: Dsn = "https://abc123@o0.ingest.example.com/1".parse().unwrap();

    assert_eq!(dsn.public_key(), "abc123");
    assert_eq!(dsn.bundle_url(), "https://js.sentry-cdn.com/abc123.min.js");
    assert_eq!(dsn.as_str(), "https://abc123@o0.ingest.example.com/1");
}

#[test]
fn bundle_url_is_independent_of_host_and_path() {
    let a: Dsn = "https://abc123@o0.ingest.example.com/1".parse().unwrap();
    let b: Dsn = "https://abc123@errors.internal.example/production/42"
        .parse()
        .unwrap();

    assert_eq!(a.bundle_url(), b.bundle_url());
}

#[test]
fn splits_on_the_rightmost_at_sign() {
    let dsn: Dsn = "https://user@key@host.example/1".parse().unwrap();

    assert_eq!(dsn.public_key(), "user@key");
}

#[test]
fn rejects_malformed_credentials() {
    assert_eq!(
        "abc123@host/1".parse::<Dsn>(),
        Err(DsnError::MissingScheme("abc123@host/1".into()))
    );
    assert_eq!(
        "https://host/1".parse::<Dsn>(),
        Err(DsnError::MissingPublicKey("https://host/1".into()))
    );
    assert_eq!(
        "https://@host/1".parse::<Dsn>(),
        Err(DsnError::MissingPublicKey("https://@host/1".into()))
    );
    assert_eq!(
        "https://abc123@".parse::<Dsn>(),
        Err(DsnError::MissingHost("https://abc123@".into()))
    );
}
