//! Reference tokens and the scanning tokeniser.

use crate::model::{Group, LanguageModel};
use serde::Serialize;

/// A half-open byte range into the input text.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Creates a new span. `end` must not precede `start`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end >= start);
        Self { start, end }
    }

    /// The number of bytes covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A token classification: the group it belongs to plus an opaque tag
/// such as `ART`, `ANX`, `AND`, or a decorated value tag like `AL_U_BB`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RefTag {
    /// The token group.
    pub group: Group,
    /// The tag within the group.
    pub tag: String,
}

impl RefTag {
    /// Builds a tag from its group and tag string.
    pub fn new(group: Group, tag: impl Into<String>) -> Self {
        Self { group, tag: tag.into() }
    }
}

/// One recognised token of the input text.
#[derive(Clone, Debug)]
pub struct RefToken {
    /// The classification.
    pub tag: RefTag,
    /// Where the token sits in the input.
    pub span: Span,
    /// The matched text.
    pub text: String,
    /// Whitespace between this token and the next one of the same
    /// sequence.
    pub tail: String,
    /// A trailing Latin ordinal attached during coordination.
    pub suffix: Option<String>,
}

impl RefToken {
    /// A fresh token with no tail and no suffix.
    pub fn new(tag: RefTag, span: Span, text: impl Into<String>) -> Self {
        Self {
            tag,
            span,
            text: text.into(),
            tail: String::new(),
            suffix: None,
        }
    }

    /// A zero-width axis token used when coordination has a value but no
    /// textual axis to pair it with.
    pub fn anonymous_axis(position: usize, tag: &str) -> Self {
        Self::new(
            RefTag::new(Group::Axis, tag),
            Span::new(position, position),
            "",
        )
    }

    /// A synthetic value token standing in for text that matched as
    /// something else.
    pub fn quasi_value(tag: &str, span: Span, text: &str) -> Self {
        Self::new(RefTag::new(Group::Value, tag), span, text)
    }

    /// Sort key for scan results: earliest first, longest wins ties.
    fn sort_key(&self) -> (usize, std::cmp::Reverse<usize>) {
        (self.span.start, std::cmp::Reverse(self.span.len()))
    }
}

impl PartialEq for RefToken {
    /// Token identity is positional: same span, same tag. Two clones of
    /// one scanned token stay equal, which is what sibling detection
    /// during nesting relies on.
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span && self.tag == other.tag
    }
}

impl Eq for RefToken {}

/// Scans `text` with every pattern family of the model and returns the
/// matches sorted by `(start, -length)`.
///
/// Named entities come first, then connectors, axes, and values, so that
/// equal-span ties resolve in that family order. Overlaps are kept; the
/// sequencer drops them against the sort order.
pub(crate) fn find_tokens(model: &LanguageModel, text: &str) -> Vec<RefToken> {
    let mut tokens = Vec::new();
    let mut scan = |group: Group, tag: &str, pattern: &regex::Regex| {
        for m in pattern.find_iter(text) {
            tokens.push(RefToken::new(
                RefTag::new(group, tag),
                Span::new(m.start(), m.end()),
                m.as_str(),
            ));
        }
    };
    for (tag, pattern) in model.named_entity_patterns() {
        scan(Group::NamedEntity, tag, pattern);
    }
    for (tag, pattern) in model.connector_patterns() {
        scan(Group::Connector, tag, pattern);
    }
    for (tag, pattern) in model.axis_patterns() {
        scan(Group::Axis, tag, pattern);
    }
    for (tag, pattern) in model.value_patterns() {
        scan(Group::Value, tag, pattern);
    }
    tokens.sort_by_key(RefToken::sort_key);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Language, language_model};

    fn tokens(text: &str) -> Vec<RefToken> {
        find_tokens(&language_model(Language::En, false), text)
    }

    #[test]
    fn sorted_earliest_then_longest() {
        let found = tokens("Article 43 of Regulation (EU) 575/2013");
        let mut last = (0, usize::MAX);
        for token in &found {
            assert!(
                token.span.start > last.0 || (token.span.start == last.0 && token.span.len() <= last.1),
                "tokens out of order at {token:?}"
            );
            last = (token.span.start, token.span.len());
        }
        let arts: Vec<_> = found.iter().filter(|t| t.tag.tag == "ART").collect();
        assert_eq!(arts.len(), 1);
        assert_eq!(arts[0].text, "Article");
    }

    #[test]
    fn longest_wins_at_equal_start() {
        let found = tokens("Directive 2004/39/EC");
        let first_at_10 = found.iter().find(|t| t.span.start == 10).unwrap();
        assert_eq!(first_at_10.tag.tag, "EULCOO");
        assert_eq!(first_at_10.text, "2004/39/EC");
    }

    #[test]
    fn named_entities_scan_before_their_axis_words() {
        let found = tokens("the Treaty establishing the European Economic Community");
        let ne = found
            .iter()
            .find(|t| t.tag.group == Group::NamedEntity)
            .unwrap();
        assert_eq!(ne.tag.tag, "PND_TITLE");
        // The bare TRT axis match starts at the same offset but is
        // shorter, so it sorts after the entity.
        let trt = found.iter().find(|t| t.tag.tag == "TRT").unwrap();
        assert_eq!(trt.span.start, ne.span.start);
        assert!(trt.span.len() < ne.span.len());
    }

    #[test]
    fn german_scan() {
        let found = find_tokens(
            &language_model(Language::De, false),
            "Art. 43 VO (EU) 575/2013",
        );
        let tags: Vec<&str> = found.iter().map(|t| t.tag.tag.as_str()).collect();
        assert!(tags.contains(&"ART"));
        assert!(tags.contains(&"REG"));
        assert!(tags.contains(&"EURCOO"));
    }
}
