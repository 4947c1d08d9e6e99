// ABOUTME: Detects mention and tag triggers in the text before the caret
// ABOUTME: Produces a MatchResult in document coordinates or nothing

use regex::Regex;
use taglet_types::{MatchResult, TextRange, TriggerKind};

use crate::config::AutocompleteConfig;
use crate::error::AutocompleteError;

/// Characters allowed in a mention query: word chars plus path punctuation
const MENTION_CHARS: &str = r"[\w./-]";
const TAG_CHARS: &str = r"[\w-]";

/// Anchored trigger patterns, compiled once per engine
#[derive(Debug, Clone)]
pub struct TriggerMatcher {
    mention: Regex,
    tag: Regex,
}

impl TriggerMatcher {
    pub fn new(config: &AutocompleteConfig) -> Result<Self, AutocompleteError> {
        config.validate()?;

        let mention_trigger = regex::escape(&config.mention_trigger.to_string());
        let tag_trigger = regex::escape(&config.tag_trigger.to_string());

        let mention_query = if config.allow_spaces_in_mentions {
            format!("(?:{MENTION_CHARS}+ )?{MENTION_CHARS}*")
        } else {
            format!("{MENTION_CHARS}*")
        };

        let mention = Regex::new(&format!(r"(?:^|\s)({mention_trigger})({mention_query})$"))?;
        let tag = Regex::new(&format!(r"(?:^|\s)({tag_trigger})({TAG_CHARS}*)$"))?;

        Ok(Self { mention, tag })
    }

    /// Match against `text_before_caret`, the block text ending at the caret.
    ///
    /// `block_start` shifts the resulting range into document coordinates.
    /// Mentions win when both patterns match.
    pub fn find(&self, text_before_caret: &str, block_start: usize) -> Option<MatchResult> {
        let (kind, captures) = self
            .mention
            .captures(text_before_caret)
            .map(|c| (TriggerKind::Mention, c))
            .or_else(|| {
                self.tag
                    .captures(text_before_caret)
                    .map(|c| (TriggerKind::Tag, c))
            })?;

        let trigger = captures.get(1)?;
        let query = captures.get(2)?;

        let from = block_start + text_before_caret[..trigger.start()].chars().count();
        let to = block_start + text_before_caret.chars().count();

        Some(MatchResult::new(
            kind,
            TextRange::new(from, to),
            query.as_str(),
        ))
    }
}
