use dork_engine::{LinkExtractor, ProviderRegistry, AOL, BING, BING_NEWS, DUCKDUCKGO, GOOGLE_API, NAVER, YAHOO, YANDEX};
use pretty_assertions::assert_eq;

fn extract(provider: &str, body: &str) -> Vec<String> {
    ProviderRegistry::builtin()
        .get(provider)
        .expect("builtin provider")
        .extract(body)
}

#[test]
fn bing_reads_result_headings_in_document_order() {
    let html = r#"
        <ol id="b_results">
          <li class="b_algo"><h2><a href="https://first.example/">First</a></h2>
              <a href="https://not-a-heading.example/">cite</a></li>
          <li class="b_ad"><h2><a href="https://ad.example/">Ad</a></h2></li>
          <li class="b_algo"><h2><a href="https://second.example/x">Second</a></h2></li>
          <li class="b_algo"><h2><a>no href</a></h2></li>
        </ol>"#;
    assert_eq!(
        extract(BING, html),
        vec!["https://first.example/", "https://second.example/x"]
    );
}

#[test]
fn duckduckgo_skips_site_relative_links() {
    let html = r#"
        <a class="result__a" href="/l/?uddg=https%3A%2F%2Fredirect.example">r</a>
        <a class="result__a" href="https://direct.example/page">d</a>"#;
    assert_eq!(extract(DUCKDUCKGO, html), vec!["https://direct.example/page"]);
}

#[test]
fn yahoo_and_aol_share_markup_shape() {
    let html = r#"<div class="algo-sr"><h3><a href="https://y.example/">y</a></h3></div>"#;
    assert_eq!(extract(YAHOO, html), vec!["https://y.example/"]);
    assert_eq!(extract(AOL, html), vec!["https://y.example/"]);
}

#[test]
fn news_naver_and_yandex_use_their_own_selectors() {
    let news = r#"<div class="news-card"><a href="https://news.example/1">n</a></div>"#;
    let naver = r#"<div class="total_wrap"><a class="link_tit" href="https://nv.example/">t</a><a href="https://other.example/">o</a></div>"#;
    let yandex = r#"<a class="organic__url" href="https://ya.example/">y</a>"#;

    assert_eq!(extract(BING_NEWS, news), vec!["https://news.example/1"]);
    assert_eq!(extract(NAVER, naver), vec!["https://nv.example/"]);
    assert_eq!(extract(YANDEX, yandex), vec!["https://ya.example/"]);
    // Markup of one provider yields nothing for another.
    assert!(extract(YANDEX, news).is_empty());
}

#[test]
fn google_api_reads_item_links() {
    let body = r#"{"kind":"customsearch#search","items":[
        {"title":"a","link":"https://a.example/"},
        {"title":"no link"},
        {"title":"b","link":"https://b.example/"}
    ]}"#;
    assert_eq!(
        extract(GOOGLE_API, body),
        vec!["https://a.example/", "https://b.example/"]
    );
}

#[test]
fn google_api_degrades_to_empty_on_bad_payloads() {
    assert!(extract(GOOGLE_API, r#"{"error":{"code":403}}"#).is_empty());
    assert!(extract(GOOGLE_API, r#"{"items":"nope"}"#).is_empty());
    assert!(extract(GOOGLE_API, "<html>rate limited</html>").is_empty());
    assert!(extract(GOOGLE_API, "").is_empty());
}

#[test]
fn malformed_markup_and_bad_selectors_yield_nothing() {
    assert!(extract(BING, "<li class=\"b_algo\"><h2><a href=").is_empty());
    assert!(LinkExtractor::css("li[[[").extract("<a href=\"x\">").is_empty());
}
