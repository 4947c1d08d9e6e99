// ABOUTME: In-memory suggestion source ranked with nucleo fuzzy matching
// ABOUTME: Prefix-preferring, smart-case fuzzy ranking over fixed candidate lists

use async_trait::async_trait;
use nucleo::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo::{Config, Matcher, Utf32Str};
use parking_lot::Mutex;
use taglet_types::{Candidate, TriggerKind};

use crate::fetcher::SuggestionSource;

/// Fixed candidate lists per trigger kind, fuzzy-ranked against the query
pub struct FuzzySource {
    mentions: Vec<Candidate>,
    tags: Vec<Candidate>,
    matcher: Mutex<Matcher>,
}

impl FuzzySource {
    pub fn new(mentions: Vec<Candidate>, tags: Vec<Candidate>) -> Self {
        let mut config = Config::DEFAULT;
        config.prefer_prefix = true;

        Self {
            mentions,
            tags,
            matcher: Mutex::new(Matcher::new(config)),
        }
    }

    fn candidates(&self, kind: TriggerKind) -> &[Candidate] {
        match kind {
            TriggerKind::Mention => &self.mentions,
            TriggerKind::Tag => &self.tags,
        }
    }

    /// Best matches first; ties keep list order. An empty query returns the list as is.
    pub fn rank(&self, kind: TriggerKind, query: &str) -> Vec<Candidate> {
        let candidates = self.candidates(kind);
        if query.is_empty() {
            return candidates.to_vec();
        }

        let pattern = Atom::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
            false,
        );

        let mut matcher = self.matcher.lock();
        let mut buf = Vec::new();
        let mut scored: Vec<(u16, usize)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                let text = match candidate.label.as_deref() {
                    Some(label) if !label.is_empty() => label,
                    _ => candidate.id.as_str(),
                };
                pattern
                    .score(Utf32Str::new(text, &mut buf), &mut matcher)
                    .map(|score| (score, index))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored
            .into_iter()
            .map(|(_, index)| candidates[index].clone())
            .collect()
    }
}

#[async_trait]
impl SuggestionSource for FuzzySource {
    async fn fetch(&self, kind: TriggerKind, query: &str) -> anyhow::Result<Vec<Candidate>> {
        Ok(self.rank(kind, query))
    }
}
