/// Splits raw dork input into trimmed, non-empty queries in input order.
pub fn parse_dorks(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedDork {
    pub index: usize,
    pub text: String,
}

/// Index-ordered cursor over the dorks of one run.
///
/// Every index in `0..len` is handed out exactly once; the cursor never moves
/// past `len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DorkQueue {
    dorks: Vec<String>,
    cursor: usize,
}

impl DorkQueue {
    pub fn new(dorks: Vec<String>) -> Self {
        Self { dorks, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.dorks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dorks.is_empty()
    }

    /// Number of dorks handed out so far.
    pub fn claimed(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.dorks.len()
    }

    pub fn claim(&mut self) -> Option<ClaimedDork> {
        let text = self.dorks.get(self.cursor)?.clone();
        let index = self.cursor;
        self.cursor += 1;
        Some(ClaimedDork { index, text })
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_dorks, DorkQueue};

    #[test]
    fn parse_trims_and_drops_blank_lines() {
        let raw = "  inurl:admin \n\n\tsite:example.com filetype:pdf\n   \n";
        assert_eq!(
            parse_dorks(raw),
            vec!["inurl:admin", "site:example.com filetype:pdf"]
        );
    }

    #[test]
    fn claim_stops_at_the_last_index() {
        let mut queue = DorkQueue::new(vec!["a".into(), "b".into()]);
        assert_eq!(queue.claim().map(|d| d.index), Some(0));
        assert_eq!(queue.claim().map(|d| d.index), Some(1));
        assert_eq!(queue.claim(), None);
        assert_eq!(queue.claim(), None);
        assert_eq!(queue.claimed(), 2);
        assert!(queue.is_exhausted());
    }
}
