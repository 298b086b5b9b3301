//! Extraction: text to finalised sequences to emitted references.

use crate::{
    Error,
    celex::Celexer,
    model::{AxisRole, LanguageModel, is_backref},
    sequence::{CoordId, TokenSequence},
    target::{Cycle, StdCache, StdCoordinate, Target, standardize},
    token::{Span, find_tokens},
};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// One detected and resolved reference.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Reference {
    /// Where the reference label sits in the input.
    pub span: Span,
    /// The target address.
    pub href: String,
    /// The human-readable title.
    pub title: String,
}

impl Reference {
    /// Merges `other` into this reference when the two are span-adjacent
    /// and one href prefixes the other. The longer, more specific href
    /// and its title survive. Returns whether a merge happened.
    pub fn join(&mut self, other: &Reference) -> bool {
        if !(self.href.starts_with(&other.href) || other.href.starts_with(&self.href)) {
            return false;
        }
        if other.span.start == self.span.end {
            self.span = Span::new(self.span.start, other.span.end);
        } else if self.span.start == other.span.end {
            self.span = Span::new(other.span.start, self.span.end);
        } else {
            return false;
        }
        if other.href.starts_with(&self.href) {
            self.href = other.href.clone();
            self.title = other.title.clone();
        }
        true
    }
}

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*$").unwrap());

/// The sequences found in one input string, plus the error count
/// accumulated while finalising them.
pub(crate) struct Extraction {
    pub sequences: Vec<TokenSequence>,
    pub errors: u32,
}

/// Tokenises `text` and partitions the tokens into finalised sequences.
///
/// Tokens separated by nothing but whitespace share a sequence; a
/// non-whitespace gap, or a hard separator token, starts a new one.
/// Sequences that fail to finalise are dropped and counted.
pub(crate) fn extract(model: &LanguageModel, text: &str) -> Extraction {
    let mut sequences: Vec<TokenSequence> = Vec::new();
    let mut last_end = 0usize;
    for token in find_tokens(model, text) {
        let Some(current) = sequences.last_mut() else {
            last_end = token.span.end;
            sequences.push(TokenSequence::new(token));
            continue;
        };
        if token.span.start < last_end {
            log::debug!("skipping overlapping token {:?}", token.tag);
            continue;
        }
        let gap = &text[last_end..token.span.start];
        last_end = token.span.end;
        if WHITESPACE.is_match(gap) && token.tag.tag != "SEPARATE" {
            if let Some(previous) = current.last_token_mut() {
                previous.tail = gap.to_string();
            }
            current.push(token);
        } else {
            sequences.push(TokenSequence::new(token));
        }
    }
    // Singleton sequences only survive for named entities and annexes.
    sequences.retain(|sequence| sequence.len() > 1 || sequence.keeps_singleton());
    let mut errors = 0;
    sequences.retain_mut(|sequence| match sequence.finalize(model) {
        Ok(()) => !sequence.is_empty(),
        Err(error) => {
            log::debug!("dropping sequence: {error}");
            errors += 1;
            false
        }
    });
    Extraction { sequences, errors }
}

/// Everything the emitter needs besides the sequences themselves.
pub(crate) struct EmitContext<'a> {
    pub model: &'a LanguageModel,
    pub celexer: &'a mut Celexer,
    pub cache: &'a mut StdCache,
    pub container: Option<&'a Target>,
    pub document: Option<&'a StdCoordinate>,
    pub min_role: AxisRole,
    pub domain: &'a str,
    pub recent: &'a mut Cycle,
}

/// Derives the target for one coordinate of a sequence.
///
/// The root-to-leaf path is standardised node by node; self-reference
/// coordinates drop out; context is injected afterwards.
fn target_for(
    sequence: &TokenSequence,
    id: CoordId,
    ctx: &mut EmitContext<'_>,
) -> Result<Target, Error> {
    let mut target = Target::default();
    for node in sequence.path(id) {
        let value = sequence.value_token(node);
        if value.tag.tag == "XTHISX" {
            continue;
        }
        let mut coordinate = standardize(
            ctx.cache,
            ctx.celexer,
            ctx.model,
            sequence.axis_tag(node),
            &value.tag.tag,
            &value.text,
        )?;
        if let Some(suffix) = &value.suffix {
            coordinate.value = Some(format!(
                "{}{suffix}",
                coordinate.value.unwrap_or_default()
            ));
        }
        target.push(coordinate);
    }
    if target.is_empty() {
        return Ok(target);
    }
    target.contextualize(ctx.container, ctx.document)?;
    Ok(target)
}

/// Runs the emission rules over every coordinate of every sequence.
///
/// Error handling follows the propagation policy: joining failures,
/// unsupported roles, and invariant guards skip the coordinate silently;
/// an inconsistent target aborts its sequence and counts; anything else
/// counts and skips. Returns the references and the error count.
pub(crate) fn references(
    extraction: &Extraction,
    ctx: &mut EmitContext<'_>,
) -> (Vec<Reference>, u32) {
    let mut out = Vec::new();
    let mut errors = 0;
    for sequence in &extraction.sequences {
        let mut deepest = Target::default();
        for id in sequence.coord_ids() {
            let result = emit_one(sequence, id, ctx);
            match result {
                Ok((target, reference)) => {
                    if target.len() > deepest.len() {
                        deepest = target;
                    }
                    out.push(reference);
                }
                Err(Error::InconsistentTarget) => {
                    errors += 1;
                    break;
                }
                Err(Error::Joining | Error::UnsupportedRole | Error::Invariant(_)) => {}
                Err(error) => {
                    log::debug!("skipping coordinate: {error}");
                    errors += 1;
                }
            }
        }
        if !deepest.is_empty() {
            ctx.recent.turn(deepest);
        }
    }
    (out, errors)
}

/// Emits a single coordinate, or says why not.
fn emit_one(
    sequence: &TokenSequence,
    id: CoordId,
    ctx: &mut EmitContext<'_>,
) -> Result<(Target, Reference), Error> {
    let mut target = target_for(sequence, id, ctx)?;
    if target.is_empty() {
        return Err(Error::Invariant("empty target"));
    }
    if target.len() == 1 && target.has_backref() {
        return Err(Error::Invariant("bare back-reference"));
    }
    if target
        .iter()
        .skip(1)
        .any(|co| co.value.as_deref().is_some_and(is_backref))
    {
        // A determiner that coordination wrapped as a plain trailing
        // value resolves nothing.
        return Err(Error::Invariant("back-reference below the head"));
    }
    if target.has_backref() {
        target.join(ctx.recent)?;
    }
    let role = target
        .ultimate_role()
        .ok_or(Error::Invariant("target without an ultimate role"))?;
    if role > ctx.min_role {
        return Err(Error::Invariant("below the minimum role"));
    }
    let reference = Reference {
        span: sequence.value_token(id).span,
        href: target.get_href(ctx.domain)?,
        title: target.get_spoken(ctx.model, ctx.celexer),
    };
    Ok((target, reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Language, language_model};

    fn extract_en(text: &str) -> Extraction {
        extract(&language_model(Language::En, false), text)
    }

    fn emit(text: &str, language: Language) -> Vec<Reference> {
        let model = language_model(language, false);
        let extraction = extract(&model, text);
        let mut celexer = Celexer::new();
        let mut cache = StdCache::new();
        let mut recent = Cycle::new(5);
        let mut ctx = EmitContext {
            model: &model,
            celexer: &mut celexer,
            cache: &mut cache,
            container: None,
            document: None,
            min_role: AxisRole::Token,
            domain: "",
            recent: &mut recent,
        };
        references(&extraction, &mut ctx).0
    }

    #[test]
    fn sequences_split_on_prose_gaps() {
        let extraction =
            extract_en("In Article 5 the procedure laid down in Article 251 applies.");
        assert_eq!(extraction.sequences.len(), 2);
        assert_eq!(extraction.errors, 0);
    }

    #[test]
    fn every_surviving_sequence_is_coordinated() {
        let texts = [
            "Article 43 of Regulation (EU) 575/2013",
            "points (a), (b) and (c) of Article 2",
            "Chapter A of Title I",
            "the first and second subparagraph of Article 7",
            "See Annex III, Part A.",
            "Article 2(1)(a)",
        ];
        for text in texts {
            let extraction = extract_en(text);
            assert!(!extraction.sequences.is_empty(), "nothing found in {text:?}");
            for sequence in &extraction.sequences {
                assert!(sequence.coordinated(), "uncoordinated sequence in {text:?}");
            }
        }
    }

    #[test]
    fn plain_prose_yields_nothing() {
        let extraction = extract_en("The Commission shall publish an annual report.");
        assert!(extraction.sequences.is_empty());
        assert_eq!(extraction.errors, 0);
    }

    #[test]
    fn emits_document_rooted_reference() {
        let refs = emit("Article 43 of Regulation (EU) 575/2013", Language::En);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].href, "/eu/32013R0575/ART_43/");
        assert_eq!(refs[0].title, "Regulation (EU) 575/2013 Art. 43");
        assert_eq!(refs[1].href, "/eu/32013R0575/");
        assert_eq!(refs[1].title, "Regulation (EU) 575/2013");
    }

    #[test]
    fn reference_spans_cover_the_value() {
        let text = "Article 43 of Regulation (EU) 575/2013";
        let refs = emit(text, Language::En);
        assert_eq!(&text[refs[0].span.start..refs[0].span.end], "43");
        assert_eq!(&text[refs[1].span.start..refs[1].span.end], "(EU) 575/2013");
    }

    #[test]
    fn insider_references_without_context() {
        let refs = emit("Article 2(1)(a)", Language::En);
        let hrefs: Vec<&str> = refs.iter().map(|r| r.href.as_str()).collect();
        assert_eq!(hrefs, vec!["#ART_2", "#ART_2-1", "#ART_2-1-a"]);
        assert_eq!(refs[2].title, "Art. 2(1)(a)");
    }

    #[test]
    fn backrefs_without_memory_are_skipped() {
        let refs = emit("Article 251 of the Treaty", Language::En);
        assert!(refs.is_empty());
    }

    #[test]
    fn memory_resolves_backrefs() {
        let model = language_model(Language::En, false);
        let mut celexer = Celexer::new();
        let mut cache = StdCache::new();
        let mut recent = Cycle::new(5);
        for text in [
            "the Treaty establishing the European Economic Community",
            "Article 251 of the Treaty",
        ] {
            let extraction = extract(&model, text);
            let mut ctx = EmitContext {
                model: &model,
                celexer: &mut celexer,
                cache: &mut cache,
                container: None,
                document: None,
                min_role: AxisRole::Token,
                domain: "",
                recent: &mut recent,
            };
            let (refs, errors) = references(&extraction, &mut ctx);
            assert_eq!(errors, 0);
            if text.starts_with("Article") {
                assert_eq!(refs.len(), 1);
                assert_eq!(refs[0].href, "/eu/TEEC/ART_251/");
                assert!(refs[0].title.ends_with("Art. 251"));
            } else {
                assert_eq!(refs[0].href, "/eu/TEEC/");
            }
        }
    }

    #[test]
    fn min_role_filters_fine_grained_targets() {
        let model = language_model(Language::En, false);
        let extraction = extract(
            &model,
            "reporting requirements related to points (a), (b) and (c) and to leverage;",
        );
        let mut celexer = Celexer::new();
        let mut cache = StdCache::new();
        let mut recent = Cycle::new(5);
        let mut ctx = EmitContext {
            model: &model,
            celexer: &mut celexer,
            cache: &mut cache,
            container: None,
            document: None,
            min_role: AxisRole::Leaf,
            domain: "",
            recent: &mut recent,
        };
        let (refs, errors) = references(&extraction, &mut ctx);
        assert!(refs.is_empty());
        assert_eq!(errors, 0);
    }

    #[test]
    fn reference_join_merges_adjacent_prefixes() {
        let mut left = Reference {
            span: Span::new(8, 9),
            href: "#ART_2".to_string(),
            title: "Art. 2".to_string(),
        };
        let right = Reference {
            span: Span::new(9, 12),
            href: "#ART_2-1".to_string(),
            title: "Art. 2(1)".to_string(),
        };
        assert!(left.join(&right));
        assert_eq!(left.span, Span::new(8, 12));
        assert_eq!(left.href, "#ART_2-1");
        let unrelated = Reference {
            span: Span::new(12, 15),
            href: "#TIT_V".to_string(),
            title: "Title V".to_string(),
        };
        assert!(!left.join(&unrelated));
        let distant = Reference {
            span: Span::new(40, 44),
            href: "#ART_2-1-a".to_string(),
            title: "Art. 2(1)(a)".to_string(),
        };
        assert!(!left.join(&distant), "gap between spans must block the merge");
    }
}
