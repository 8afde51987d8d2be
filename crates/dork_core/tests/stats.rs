use std::sync::Once;

use dork_core::{EngineStats, ProviderStats};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dork_logging::initialize_for_tests);
}

#[test]
fn stats_start_at_zero_and_sum_across_providers() {
    init_logging();
    let mut stats = EngineStats::for_providers(["bing", "yahoo"]);
    assert_eq!(stats.get("bing"), ProviderStats::default());

    stats.record("bing", 3, 1);
    stats.record("bing", 2, 2);
    stats.record("yahoo", 4, 0);

    assert_eq!(stats.get("bing"), ProviderStats { total: 5, valid: 3 });
    assert_eq!(stats.totals(), ProviderStats { total: 9, valid: 3 });
    assert_eq!(stats.get("naver"), ProviderStats::default());
}

#[test]
fn providers_are_listed_in_selection_order() {
    init_logging();
    let mut stats = EngineStats::for_providers(["yandex", "bing", "duckduckgo", "bing"]);
    stats.record("aol", 1, 1);
    stats.record("bing", 2, 1);

    let ids: Vec<_> = stats.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["yandex", "bing", "duckduckgo", "aol"]);
    assert_eq!(stats.iter().nth(1), Some(("bing", ProviderStats { total: 2, valid: 1 })));
}
