// Tests for the validated import paths

use linkvault_core::classify::UrlClassifier;
use linkvault_core::data::{UrlRecord, UrlStore};
use linkvault_core::import::UrlImporter;
use linkvault_core::query::UrlFilter;
use linkvault_core::scope::{HostScope, ScopeOracle};
use tempfile::TempDir;

fn create_test_store() -> (TempDir, UrlStore) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let store = UrlStore::open(&db_path).unwrap();
    (temp_dir, store)
}

fn record_for(store: &UrlStore, target: &str, url: &str) -> UrlRecord {
    let records = store.get_all(target, &UrlFilter::default()).unwrap();
    records
        .into_iter()
        .find(|r| r.url == url)
        .unwrap_or_else(|| panic!("no record for {}", url))
}

/// Oracle that flags everything as in scope, for tests that don't care.
struct AllowAll;

impl ScopeOracle for AllowAll {
    fn is_in_scope(&self, _url: &str, _target: &str) -> bool {
        true
    }
}

// ============================================================================
// Single Add Tests
// ============================================================================

#[test]
fn test_add_image_url_starts_unvisited() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = HostScope::single("example.com");
    let importer = UrlImporter::new(&store, &classifier, &scope);

    let url = "http://example.com/pic.png";
    assert!(classifier.is_image_url(url));
    assert!(importer.add_url("t1", url, None).unwrap());

    assert_eq!(record_for(&store, "t1", url), UrlRecord::new(url, false, true));
}

#[test]
fn test_add_rejects_non_url_silently() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = AllowAll;
    let importer = UrlImporter::new(&store, &classifier, &scope);

    assert!(!importer.add_url("t1", "not a url", None).unwrap());
    assert_eq!(store.count_all("t1").unwrap(), 0);
}

#[test]
fn test_any_found_value_marks_visited() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = AllowAll;
    let importer = UrlImporter::new(&store, &classifier, &scope);

    importer.add_url("t1", "http://example.com/hit", Some(true)).unwrap();
    importer.add_url("t1", "http://example.com/miss", Some(false)).unwrap();
    importer.add_url("t1", "http://example.com/new", None).unwrap();

    assert!(record_for(&store, "t1", "http://example.com/hit").visited);
    assert!(record_for(&store, "t1", "http://example.com/miss").visited);
    assert!(!record_for(&store, "t1", "http://example.com/new").visited);
}

#[test]
fn test_add_trims_before_storage() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = AllowAll;
    let importer = UrlImporter::new(&store, &classifier, &scope);

    assert!(importer.add_url("t1", "  http://example.com/a \n", None).unwrap());

    let records = store.get_all("t1", &UrlFilter::default()).unwrap();
    assert_eq!(records[0].url, "http://example.com/a");
}

#[test]
fn test_add_consults_scope_oracle() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = HostScope::single("example.com");
    let importer = UrlImporter::new(&store, &classifier, &scope);

    importer.add_url("t1", "http://example.com/in", None).unwrap();
    importer.add_url("t1", "http://elsewhere.org/out", None).unwrap();

    assert!(record_for(&store, "t1", "http://example.com/in").scope);
    assert!(!record_for(&store, "t1", "http://elsewhere.org/out").scope);
}

#[test]
fn test_add_upserts_existing_record() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = AllowAll;
    let importer = UrlImporter::new(&store, &classifier, &scope);

    importer.add_url("t1", "http://example.com/a", None).unwrap();
    importer.add_url("t1", "http://example.com/a", Some(true)).unwrap();

    assert_eq!(store.count_all("t1").unwrap(), 1);
    assert!(record_for(&store, "t1", "http://example.com/a").visited);
}

// ============================================================================
// Bulk Import Tests
// ============================================================================

#[test]
fn test_import_filters_and_counts() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = AllowAll;
    let importer = UrlImporter::new(&store, &classifier, &scope);

    let outcome = importer
        .import_urls("t1", ["http://a.com", "garbage", "http://b.com"])
        .unwrap();

    assert_eq!(outcome.accepted, vec!["http://a.com", "http://b.com"]);
    assert_eq!(outcome.new_records, 2);
    assert_eq!(store.count_all("t1").unwrap(), 2);
}

#[test]
fn test_import_keeps_duplicates_in_accepted_list() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = AllowAll;
    let importer = UrlImporter::new(&store, &classifier, &scope);

    let outcome = importer
        .import_urls("t1", ["http://a.com", "http://a.com"])
        .unwrap();

    // The accepted list mirrors the input; the store deduplicates.
    assert_eq!(outcome.accepted.len(), 2);
    assert_eq!(outcome.new_records, 1);
    assert_eq!(store.count_all("t1").unwrap(), 1);
}

#[test]
fn test_import_delta_excludes_preexisting_urls() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = AllowAll;
    let importer = UrlImporter::new(&store, &classifier, &scope);

    importer.add_url("t1", "http://a.com", Some(true)).unwrap();

    let outcome = importer
        .import_urls("t1", ["http://a.com", "http://b.com"])
        .unwrap();

    assert_eq!(outcome.accepted.len(), 2);
    assert_eq!(outcome.new_records, 1);
    assert_eq!(store.count_all("t1").unwrap(), 2);
}

#[test]
fn test_import_does_not_consult_scope_oracle() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    // Everything would be in scope if the oracle were asked.
    let scope = AllowAll;
    let importer = UrlImporter::new(&store, &classifier, &scope);

    importer.import_urls("t1", ["http://example.com/bulk"]).unwrap();

    let record = record_for(&store, "t1", "http://example.com/bulk");
    assert!(!record.visited);
    assert!(!record.scope);
}

#[test]
fn test_import_rejects_everything_quietly() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = AllowAll;
    let importer = UrlImporter::new(&store, &classifier, &scope);

    let outcome = importer
        .import_urls("t1", ["garbage", "also not a url", ""])
        .unwrap();

    assert!(outcome.accepted.is_empty());
    assert_eq!(outcome.new_records, 0);
    assert_eq!(store.count_all("t1").unwrap(), 0);
}

// ============================================================================
// Processed Import Tests
// ============================================================================

#[test]
fn test_import_processed_trusts_the_caller() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = HostScope::single("example.com");
    let importer = UrlImporter::new(&store, &classifier, &scope);

    // Records restored from a previous run: stored verbatim, no admission
    // gate, no oracle.
    let records = vec![
        UrlRecord::new("http://elsewhere.org/kept", true, true),
        UrlRecord::new("opaque-identifier", false, false),
    ];
    importer.import_processed("t1", &records).unwrap();

    assert_eq!(store.count_all("t1").unwrap(), 2);
    assert_eq!(
        record_for(&store, "t1", "http://elsewhere.org/kept"),
        UrlRecord::new("http://elsewhere.org/kept", true, true)
    );
    assert_eq!(
        record_for(&store, "t1", "opaque-identifier"),
        UrlRecord::new("opaque-identifier", false, false)
    );
}

#[test]
fn test_import_processed_overwrites_in_order() {
    let (_temp_dir, store) = create_test_store();
    let classifier = UrlClassifier::default();
    let scope = AllowAll;
    let importer = UrlImporter::new(&store, &classifier, &scope);

    let records = vec![
        UrlRecord::new("http://a.com", false, false),
        UrlRecord::new("http://a.com", true, true),
    ];
    importer.import_processed("t1", &records).unwrap();

    assert_eq!(store.count_all("t1").unwrap(), 1);
    assert_eq!(
        record_for(&store, "t1", "http://a.com"),
        UrlRecord::new("http://a.com", true, true)
    );
}
