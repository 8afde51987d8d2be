use std::collections::HashSet;

/// Deduplicated URLs of one run, kept in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccumulatedUrls {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl AccumulatedUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    /// Appends URLs not already present; returns how many were inserted.
    pub fn extend<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.order.len();
        for url in urls {
            if self.seen.insert(url.clone()) {
                self.order.push(url);
            }
        }
        self.order.len() - before
    }

    /// Newline-delimited rendering, one URL per line.
    pub fn to_lines(&self) -> String {
        let mut out = String::with_capacity(self.order.iter().map(|u| u.len() + 1).sum());
        for url in &self.order {
            out.push_str(url);
            out.push('\n');
        }
        out
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}
