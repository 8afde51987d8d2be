use std::sync::Once;

use dork_core::{AccumulatedUrls, UrlFilter};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dork_logging::initialize_for_tests);
}

fn accumulated(urls: &[&str]) -> AccumulatedUrls {
    let mut set = AccumulatedUrls::new();
    set.extend(urls.iter().map(|u| u.to_string()));
    set
}

#[test]
fn drops_excluded_domains_case_insensitively() {
    init_logging();
    let filter = UrlFilter::default();
    let candidates = [
        "https://good.com/a",
        "https://WWW.BING.COM/search",
        "https://m.facebook.com/page",
        "https://sub.duckduckgo.com/x",
    ];

    let survivors = filter.filter(&candidates, &AccumulatedUrls::new());
    assert_eq!(survivors, vec!["https://good.com/a"]);
}

#[test]
fn excluded_domain_matches_anywhere_in_the_url() {
    init_logging();
    let filter = UrlFilter::default();
    let survivors = filter.filter(
        &["https://good.com/redirect?to=twitter.com/x"],
        &AccumulatedUrls::new(),
    );
    assert!(survivors.is_empty());
}

#[test]
fn requires_http_or_https_prefix() {
    init_logging();
    let filter = UrlFilter::default();
    let candidates = [
        "/relative/path",
        "ftp://files.example.org/a",
        "javascript:void(0)",
        "HTTPS://upper.example.org/",
        "http://plain.example.org/",
        "https://secure.example.org/",
    ];

    let survivors = filter.filter(&candidates, &AccumulatedUrls::new());
    assert_eq!(
        survivors,
        vec!["http://plain.example.org/", "https://secure.example.org/"]
    );
}

#[test]
fn dedups_against_batch_and_accumulated_keeping_first_occurrence() {
    init_logging();
    let filter = UrlFilter::default();
    let existing = accumulated(&["https://seen.example.org/"]);
    let candidates = [
        "https://b.example.org/",
        "https://seen.example.org/",
        "https://a.example.org/",
        "https://b.example.org/",
    ];

    let survivors = filter.filter(&candidates, &existing);
    assert_eq!(
        survivors,
        vec!["https://b.example.org/", "https://a.example.org/"]
    );
}

#[test]
fn equality_is_byte_exact() {
    init_logging();
    let filter = UrlFilter::default();
    let existing = accumulated(&["https://example.org/a"]);
    let candidates = [
        "https://example.org/a/",
        "https://Example.org/a",
        "https://example.org/a?x=1&y=2",
        "https://example.org/a?y=2&x=1",
    ];

    let survivors = filter.filter(&candidates, &existing);
    assert_eq!(survivors.len(), 4);
}

#[test]
fn filter_is_idempotent() {
    init_logging();
    let filter = UrlFilter::default();
    let existing = accumulated(&["https://old.example.org/", "https://other.example.org/"]);
    let batches: Vec<Vec<&str>> = vec![
        vec![],
        vec!["https://old.example.org/"],
        vec!["https://n.example.org/", "https://n.example.org/", "/x"],
        vec![
            "https://yahoo.com/r",
            "https://ok.example.org/1",
            "http://ok.example.org/1",
            "https://ok.example.org/1",
            "mailto:a@b.c",
        ],
    ];

    for batch in batches {
        let once = filter.filter(&batch, &existing);
        let twice = filter.filter(&once, &existing);
        assert_eq!(twice, once);
    }
}

#[test]
fn survivors_never_violate_the_filter_rules() {
    init_logging();
    let filter = UrlFilter::default();
    let existing = accumulated(&["https://dup.example.org/"]);
    let batch = [
        "https://dup.example.org/",
        "https://pinterest.com/pin",
        "https://fine.example.org/",
        "www.noscheme.example.org",
        "https://fine.example.org/",
        "http://also-fine.example.org/",
    ];

    let survivors = filter.filter(&batch, &existing);
    for (i, url) in survivors.iter().enumerate() {
        assert!(!existing.contains(url));
        assert!(!filter.is_excluded(url));
        assert!(UrlFilter::has_accepted_scheme(url));
        assert!(!survivors[..i].contains(url));
    }
    assert_eq!(survivors.len(), 2);
}

#[test]
fn custom_exclusion_list_replaces_defaults() {
    init_logging();
    let filter = UrlFilter::new(["Example.NET"]);
    let survivors = filter.filter(
        &["https://bing.com/a", "https://www.example.net/b"],
        &AccumulatedUrls::new(),
    );
    assert_eq!(survivors, vec!["https://bing.com/a"]);
}
