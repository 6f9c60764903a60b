mod common;

use chrono::Duration;
use linkstash::application::registry::DEFAULT_VALIDITY_MINUTES;
use linkstash::prelude::*;

#[test]
fn test_create_batch_persists_across_reopen() {
    let (dir, registry) = common::temp_registry();

    let created = registry
        .create_batch(vec![
            LinkSubmission::new("https://example.com/alpha"),
            LinkSubmission::new("https://example.com/beta"),
        ])
        .unwrap();
    assert_eq!(created.len(), 2);

    let fresh = common::reopen(&dir);
    let records = fresh.list();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].original_url, "https://example.com/alpha");
    assert_eq!(records[1].original_url, "https://example.com/beta");
}

#[test]
fn test_collection_grows_by_batch_size() {
    let (_dir, registry) = common::temp_registry();

    registry
        .create_batch(vec![
            LinkSubmission::new("https://example.com/1"),
            LinkSubmission::new("https://example.com/2"),
            LinkSubmission::new("https://example.com/3"),
        ])
        .unwrap();
    assert_eq!(registry.list().len(), 3);

    registry
        .create_batch(vec![
            LinkSubmission::new("https://example.com/4"),
            LinkSubmission::new("https://example.com/5"),
        ])
        .unwrap();
    assert_eq!(registry.list().len(), 5);
}

#[test]
fn test_generated_codes_are_six_alphanumeric_and_distinct() {
    let (_dir, registry) = common::temp_registry();

    let created = registry
        .create_batch(vec![
            LinkSubmission::new("https://example.com/1"),
            LinkSubmission::new("https://example.com/2"),
            LinkSubmission::new("https://example.com/3"),
            LinkSubmission::new("https://example.com/4"),
            LinkSubmission::new("https://example.com/5"),
        ])
        .unwrap();

    let mut codes = std::collections::HashSet::new();
    for record in &created {
        assert_eq!(record.shortcode.len(), 6);
        assert!(record.shortcode.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(codes.insert(record.shortcode.clone()));
    }
}

#[test]
fn test_preferred_code_round_trip() {
    let (dir, registry) = common::temp_registry();

    registry
        .create_batch(vec![
            LinkSubmission::new("https://example.com/docs").with_preferred_shortcode("docs2025"),
        ])
        .unwrap();

    let found = common::reopen(&dir).lookup("docs2025").unwrap();
    assert_eq!(found.original_url, "https://example.com/docs");
}

#[test]
fn test_taken_code_rejected_across_batches() {
    let (_dir, registry) = common::temp_registry();

    registry
        .create_batch(vec![
            LinkSubmission::new("https://first.example").with_preferred_shortcode("abc"),
        ])
        .unwrap();

    let err = registry
        .create_batch(vec![
            LinkSubmission::new("https://second.example").with_preferred_shortcode("abc"),
        ])
        .unwrap_err();

    assert!(matches!(err, RegistryError::ShortcodeTaken { ref code } if code == "abc"));
    // The failed batch must not have touched the collection.
    assert_eq!(registry.list().len(), 1);
    assert_eq!(
        registry.lookup("abc").unwrap().original_url,
        "https://first.example"
    );
}

#[test]
fn test_duplicate_codes_within_batch_rejected_entirely() {
    let (_dir, registry) = common::temp_registry();

    let err = registry
        .create_batch(vec![
            LinkSubmission::new("https://a.example").with_preferred_shortcode("abc"),
            LinkSubmission::new("https://b.example").with_preferred_shortcode("abc"),
            LinkSubmission::new("https://c.example"),
        ])
        .unwrap_err();

    assert!(matches!(err, RegistryError::DuplicateInBatch { ref codes } if codes == &["abc"]));
    assert!(registry.list().is_empty());
}

#[test]
fn test_oversized_batch_rejected_entirely() {
    let (_dir, registry) = common::temp_registry();

    let submissions = (0..6)
        .map(|i| LinkSubmission::new(format!("https://example.com/{i}")))
        .collect();

    let err = registry.create_batch(submissions).unwrap_err();
    assert!(matches!(err, RegistryError::Validation { .. }));
    assert!(registry.list().is_empty());
}

#[test]
fn test_one_invalid_entry_fails_whole_batch() {
    let (_dir, registry) = common::temp_registry();

    let err = registry
        .create_batch(vec![
            LinkSubmission::new("https://good.example"),
            LinkSubmission::new("ftp://bad.example"),
        ])
        .unwrap_err();

    match err {
        RegistryError::Validation { errors } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].entry, 1);
            assert_eq!(errors[0].field, "original_url");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    assert!(registry.list().is_empty());
}

#[test]
fn test_default_validity_is_thirty_minutes() {
    let (_dir, registry) = common::temp_registry();

    let created = registry
        .create_batch(vec![LinkSubmission::new("https://example.com")])
        .unwrap();

    let record = &created[0];
    assert_eq!(
        record.expiry_at.unwrap() - record.created_at,
        Duration::minutes(DEFAULT_VALIDITY_MINUTES)
    );
}

#[test]
fn test_one_minute_validity_is_sixty_thousand_millis() {
    let (_dir, registry) = common::temp_registry();

    let created = registry
        .create_batch(vec![
            LinkSubmission::new("https://example.com").with_validity(1),
        ])
        .unwrap();

    let record = &created[0];
    let window = record.expiry_at.unwrap() - record.created_at;
    assert_eq!(window.num_milliseconds(), 60_000);
}

#[test]
fn test_whitespace_around_url_is_trimmed() {
    let (_dir, registry) = common::temp_registry();

    let created = registry
        .create_batch(vec![LinkSubmission::new("  https://example.com/page  ")])
        .unwrap();

    assert_eq!(created[0].original_url, "https://example.com/page");
}

#[test]
fn test_same_url_can_be_shortened_twice() {
    let (_dir, registry) = common::temp_registry();

    registry
        .create_batch(vec![LinkSubmission::new("https://example.com")])
        .unwrap();
    registry
        .create_batch(vec![LinkSubmission::new("https://example.com")])
        .unwrap();

    // No deduplication: each submission gets its own record and code.
    let records = registry.list();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].shortcode, records[1].shortcode);
}
