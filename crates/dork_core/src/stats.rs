#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProviderStats {
    /// Candidates extracted before filtering.
    pub total: u64,
    /// Candidates that survived filtering and were accumulated.
    pub valid: u64,
}

/// Per-provider counters for one run, kept in provider-selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineStats {
    per_provider: Vec<(String, ProviderStats)>,
}

impl EngineStats {
    /// Starts every listed provider at zero so idle providers still report.
    pub fn for_providers<I, S>(providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stats = Self::default();
        for id in providers {
            stats.entry(&id.into());
        }
        stats
    }

    /// Providers not seen before are appended after the existing ones.
    pub fn record(&mut self, provider: &str, total: usize, valid: usize) {
        let entry = self.entry(provider);
        entry.total += total as u64;
        entry.valid += valid as u64;
    }

    pub fn get(&self, provider: &str) -> ProviderStats {
        self.per_provider
            .iter()
            .find(|(id, _)| id == provider)
            .map(|(_, stats)| *stats)
            .unwrap_or_default()
    }

    /// Sum across providers ("URLs found" / "valid URLs").
    pub fn totals(&self) -> ProviderStats {
        self.per_provider
            .iter()
            .fold(ProviderStats::default(), |acc, (_, s)| ProviderStats {
                total: acc.total + s.total,
                valid: acc.valid + s.valid,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ProviderStats)> {
        self.per_provider.iter().map(|(id, s)| (id.as_str(), *s))
    }

    fn entry(&mut self, provider: &str) -> &mut ProviderStats {
        let index = match self.per_provider.iter().position(|(id, _)| id == provider) {
            Some(index) => index,
            None => {
                self.per_provider
                    .push((provider.to_string(), ProviderStats::default()));
                self.per_provider.len() - 1
            }
        };
        &mut self.per_provider[index].1
    }
}
