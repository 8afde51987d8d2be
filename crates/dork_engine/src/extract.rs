use dork_logging::{dork_debug, dork_warn};
use scraper::{Html, Selector};
use serde_json::Value;

/// Declarative per-provider link extraction.
///
/// Extractors never fail: malformed markup, a bad selector or an unexpected
/// JSON payload all yield an empty candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkExtractor {
    /// Reads `attr` from every element matching `selector`, in document order.
    Css {
        selector: String,
        attr: String,
        skip_relative: bool,
    },
    /// Reads string `field` from each object of the top-level array `array`.
    JsonField { array: String, field: String },
}

impl LinkExtractor {
    pub fn css(selector: impl Into<String>) -> Self {
        LinkExtractor::Css {
            selector: selector.into(),
            attr: "href".to_string(),
            skip_relative: false,
        }
    }

    /// Same as [`LinkExtractor::css`] but drops site-relative hrefs (`/...`).
    pub fn css_absolute(selector: impl Into<String>) -> Self {
        LinkExtractor::Css {
            selector: selector.into(),
            attr: "href".to_string(),
            skip_relative: true,
        }
    }

    pub fn json_field(array: impl Into<String>, field: impl Into<String>) -> Self {
        LinkExtractor::JsonField {
            array: array.into(),
            field: field.into(),
        }
    }

    pub fn extract(&self, body: &str) -> Vec<String> {
        match self {
            LinkExtractor::Css {
                selector,
                attr,
                skip_relative,
            } => extract_css(body, selector, attr, *skip_relative),
            LinkExtractor::JsonField { array, field } => extract_json(body, array, field),
        }
    }
}

fn extract_css(body: &str, selector: &str, attr: &str, skip_relative: bool) -> Vec<String> {
    let selector = match Selector::parse(selector) {
        Ok(selector) => selector,
        Err(err) => {
            dork_warn!("Invalid selector {:?}: {:?}", selector, err);
            return Vec::new();
        }
    };

    let document = Html::parse_document(body);
    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .filter(|href| !(skip_relative && href.starts_with('/')))
        .map(str::to_string)
        .collect()
}

fn extract_json(body: &str, array: &str, field: &str) -> Vec<String> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            dork_debug!("Discarding malformed JSON payload: {}", err);
            return Vec::new();
        }
    };

    value
        .get(array)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get(field).and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
