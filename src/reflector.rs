//! The public façade: drives the pipeline over strings, lists of
//! strings, and XML trees.

use crate::{
    celex::Celexer,
    extract::{EmitContext, Reference, extract, references},
    markup::{collect_texts, markup_element, markup_string},
    model::{AxisRole, Language, LanguageModel, language_model},
    target::{Cycle, StdCache, StdCoordinate, Target},
};
use indexmap::IndexMap;
use minidom::Element;
use serde::Serialize;
use std::sync::Arc;

/// What the reflector returns for its input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Spans, hrefs, and titles only.
    Annotate,
    /// The input with `<a>` markup spliced in.
    Markup,
}

/// Construction options for a [`Reflector`].
#[derive(Default)]
pub struct Options {
    /// The container context references resolve against, e.g. the part
    /// and title the processed fragment sits in.
    pub container: Option<Target>,
    /// The document references without a document of their own belong
    /// to.
    pub document: Option<StdCoordinate>,
    /// Only references at this role or broader are emitted. Defaults to
    /// the permissive `Token` bound.
    pub min_role: Option<AxisRole>,
    /// Prefix for document-rooted hrefs, e.g. `https://example.org`.
    /// Defaults to empty, producing site-relative addresses.
    pub internet_domain: Option<String>,
    /// Skip the popular names of regulations and directives, keeping
    /// only treaties as named entities.
    pub only_treaty_names: bool,
    /// Merge neighbouring anchors whose hrefs are prefix-related and
    /// whose spans touch.
    pub unclose: bool,
}

/// One annotated input string.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Annotation {
    /// The input text.
    pub text: String,
    /// The references found in it.
    pub references: Vec<Reference>,
}

/// One marked-up input string.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MarkupText {
    /// The input text.
    pub raw: String,
    /// The text with anchors spliced in.
    pub markup: String,
}

/// The number of recent targets kept for back-reference resolution.
const MEM_SIZE: usize = 5;

/// Detects and resolves legal references in text.
///
/// One reflector holds one language, one context, and one short-term
/// memory. The memory persists across the strings of a list or the text
/// nodes of an XML tree, so later fragments can back-reference earlier
/// ones; single strings are processed memoryless.
pub struct Reflector {
    language: Language,
    mode: Mode,
    model: Arc<LanguageModel>,
    container: Option<Target>,
    document: Option<StdCoordinate>,
    min_role: AxisRole,
    domain: String,
    unclose: bool,
    memory: Cycle,
    celexer: Celexer,
    cache: StdCache,
    problematics: Vec<String>,
}

impl Reflector {
    /// Builds a reflector for `language` with the given mode and
    /// options. The language model is shared from the process-wide
    /// registry.
    pub fn new(language: Language, mode: Mode, options: Options) -> Self {
        Self {
            language,
            mode,
            model: language_model(language, options.only_treaty_names),
            container: options.container,
            document: options.document,
            min_role: options.min_role.unwrap_or(AxisRole::Token),
            domain: options.internet_domain.unwrap_or_default(),
            unclose: options.unclose,
            memory: Cycle::new(MEM_SIZE),
            celexer: Celexer::new(),
            cache: StdCache::new(),
            problematics: Vec::new(),
        }
    }

    /// The language this reflector processes.
    pub fn language(&self) -> Language {
        self.language
    }

    /// The configured mode. The typed entry points do not depend on it;
    /// front-ends dispatch on it.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Inputs whose processing counted errors, for downstream
    /// inspection.
    pub fn problematics(&self) -> &[String] {
        &self.problematics
    }

    /// Clears all caches and memories.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.celexer.reset();
        self.cache.clear();
        self.problematics.clear();
    }

    /// The display citation for a CELEX identifier, e.g.
    /// `"Verordnung 648/2012"`.
    pub fn celex_citation(&self, celex: &str) -> String {
        let (tag, citation) = self.celexer.decode(celex, self.language);
        match self.model.axis_standard(&tag).flatten() {
            Some(standard) => format!("{standard} {citation}"),
            None => citation,
        }
    }

    /// Runs extraction and emission over one string. With `remember`,
    /// the cross-string memory is consulted and updated.
    fn annotations(&mut self, text: &str, remember: bool) -> Vec<Reference> {
        let model = Arc::clone(&self.model);
        let extraction = extract(&model, text);
        let mut scratch = Cycle::new(MEM_SIZE);
        let recent = if remember { &mut self.memory } else { &mut scratch };
        let mut ctx = EmitContext {
            model: &model,
            celexer: &mut self.celexer,
            cache: &mut self.cache,
            container: self.container.as_ref(),
            document: self.document.as_ref(),
            min_role: self.min_role,
            domain: &self.domain,
            recent,
        };
        let (mut refs, emit_errors) = references(&extraction, &mut ctx);
        if extraction.errors + emit_errors > 0 {
            self.problematics.push(text.to_string());
        }
        if self.unclose {
            unclose(&mut refs);
        }
        refs
    }

    /// Annotates a single string, memoryless.
    pub fn annotate(&mut self, text: &str) -> Annotation {
        Annotation {
            text: text.to_string(),
            references: self.annotations(text, false),
        }
    }

    /// Annotates a list of strings with the cross-string memory on,
    /// reset first.
    pub fn annotate_list(&mut self, texts: &[&str]) -> Vec<Annotation> {
        self.memory.clear();
        texts
            .iter()
            .map(|text| Annotation {
                text: (*text).to_string(),
                references: self.annotations(text, true),
            })
            .collect()
    }

    /// Marks up a single string, memoryless.
    pub fn markup(&mut self, text: &str) -> String {
        let references = self.annotations(text, false);
        markup_string(text, &references)
    }

    /// Marks up a list of strings with the cross-string memory on,
    /// reset first.
    pub fn markup_list(&mut self, texts: &[&str]) -> Vec<MarkupText> {
        self.memory.clear();
        texts
            .iter()
            .map(|text| {
                let references = self.annotations(text, true);
                MarkupText {
                    raw: (*text).to_string(),
                    markup: markup_string(text, &references),
                }
            })
            .collect()
    }

    /// Annotates every text node of an XML tree, in document order, with
    /// the memory on.
    pub fn annotate_element(&mut self, element: &Element) -> Vec<Annotation> {
        self.element_annotations(element)
            .into_iter()
            .map(|(text, references)| Annotation { text, references })
            .collect()
    }

    /// Rebuilds an XML tree with anchors spliced into its text nodes.
    pub fn markup_element(&mut self, element: &Element) -> Element {
        let annotations = self.element_annotations(element);
        markup_element(element, &annotations)
    }

    /// Processes each distinct text node string once, memory on.
    fn element_annotations(&mut self, element: &Element) -> IndexMap<String, Vec<Reference>> {
        let mut texts = Vec::new();
        collect_texts(element, &mut texts);
        self.memory.clear();
        let mut annotations = IndexMap::new();
        for text in texts {
            if annotations.contains_key(&text) {
                continue;
            }
            let references = self.annotations(&text, true);
            annotations.insert(text, references);
        }
        annotations
    }
}

/// Merges neighbouring references whose hrefs are prefix-related and
/// whose spans are exactly adjacent. The merged reference keeps the more
/// specific href.
fn unclose(references: &mut Vec<Reference>) {
    if references.is_empty() {
        return;
    }
    let mut ultimate = references.len() - 1;
    for k in (0..references.len() - 1).rev() {
        let next = references[ultimate].clone();
        if references[k].join(&next) {
            references.remove(ultimate);
        }
        ultimate = k;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AxisRole;

    fn reflector(language: Language, options: Options) -> Reflector {
        let _ = env_logger::try_init();
        Reflector::new(language, Mode::Markup, options)
    }

    #[test]
    fn markup_article_of_regulation() {
        let mut r = reflector(Language::En, Options::default());
        assert_eq!(
            r.markup("Article 43 of Regulation (EU) 575/2013"),
            "Article <a title=\"Regulation (EU) 575/2013 Art. 43\" \
             href=\"/eu/32013R0575/ART_43/\">43</a> of Regulation \
             <a title=\"Regulation (EU) 575/2013\" href=\"/eu/32013R0575/\">(EU) 575/2013</a>"
        );
        assert!(r.problematics().is_empty());
    }

    #[test]
    fn container_and_document_context() {
        let mut r = reflector(
            Language::En,
            Options {
                container: Some(Target::from_pairs([("PRT", "1"), ("TIT", "V")])),
                document: StdCoordinate::from_document_path("/eu/32013R0575/"),
                ..Options::default()
            },
        );
        let annotation = r.annotate("Chapter A of Title I");
        let hrefs: Vec<&str> = annotation
            .references
            .iter()
            .map(|r| r.href.as_str())
            .collect();
        assert!(hrefs.contains(&"/eu/32013R0575/TOC/#toc-PRT_1-TIT_I-CHP_A"));
    }

    #[test]
    fn annex_container_context() {
        let mut r = reflector(
            Language::En,
            Options {
                container: Target::create("toc-ANX"),
                ..Options::default()
            },
        );
        assert_eq!(
            r.markup("See Annex III, Part A."),
            "See Annex <a title=\"Annex III\" href=\"#ANX_III\">III</a>, \
             Part <a title=\"Annex III Part A\" href=\"#ANX_III-PRT_A\">A</a>."
        );
    }

    #[test]
    fn min_role_leaves_fine_grained_text_alone() {
        let mut r = reflector(
            Language::En,
            Options {
                min_role: Some(AxisRole::Leaf),
                ..Options::default()
            },
        );
        let text = "reporting requirements related to points (a), (b) and (c) and to leverage;";
        assert_eq!(r.markup(text), text);
    }

    #[test]
    fn unclose_merges_nested_anchors() {
        let mut r = reflector(
            Language::En,
            Options {
                min_role: Some(AxisRole::Leaf),
                unclose: true,
                ..Options::default()
            },
        );
        assert_eq!(
            r.markup("Article 2(1)(a)"),
            "Article <a title=\"Art. 2(1)(a)\" href=\"#ART_2-1-a\">2(1)(a)</a>"
        );
    }

    #[test]
    fn german_document_context() {
        let mut r = reflector(
            Language::De,
            Options {
                document: StdCoordinate::from_document_path("/eu/32012R0648/"),
                ..Options::default()
            },
        );
        assert_eq!(
            r.markup("In Titel IV wird folgendes Kapitel eingefügt:"),
            "In Titel <a title=\"Verordnung 648/2012 Titel IV\" \
             href=\"/eu/32012R0648/TOC/#toc-TIT_IV\">IV</a> wird folgendes Kapitel eingefügt:"
        );
    }

    #[test]
    fn german_mixed_national_and_eu_citations() {
        let mut r = reflector(
            Language::De,
            Options {
                min_role: Some(AxisRole::Document),
                ..Options::default()
            },
        );
        assert_eq!(
            r.markup(
                "So wird auch in Gesetzen eine wesentliche Beteiligung angenommen \
                 (vgl. § 74 Abs. 2 AO, § 43 WpHG, Art. 43 VO (EU) 575/2013)."
            ),
            "So wird auch in Gesetzen eine wesentliche Beteiligung angenommen \
             (vgl. § 74 Abs. 2 AO, § 43 WpHG, \
             Art. <a title=\"Verordnung (EU) 575/2013 Art. 43\" \
             href=\"/eu/32013R0575/ART_43/\">43</a> VO \
             <a title=\"Verordnung (EU) 575/2013\" href=\"/eu/32013R0575/\">(EU) 575/2013</a>)."
        );
    }

    #[test]
    fn memory_resolves_treaty_across_paragraphs() {
        let mut r = reflector(Language::En, Options::default());
        let element: Element = "<div xmlns=''>\
             <p>Having regard to the Treaty establishing the European Economic Community, \
             and other issues</p>\
             <p>Acting in accordance with the procedure laid down in Article 251 of the \
             Treaty</p></div>"
            .parse()
            .unwrap();
        let marked = r.markup_element(&element);
        let paragraphs: Vec<&Element> = marked.children().collect();
        let first_anchor = paragraphs[0].children().next().unwrap();
        assert_eq!(first_anchor.attr("href"), Some("/eu/TEEC/"));
        assert_eq!(
            first_anchor.text(),
            "Treaty establishing the European Economic Community"
        );
        let second_anchor = paragraphs[1].children().next().unwrap();
        assert_eq!(second_anchor.attr("href"), Some("/eu/TEEC/ART_251/"));
        assert_eq!(second_anchor.text(), "251");
    }

    #[test]
    fn memoryless_single_string_skips_backrefs() {
        let mut r = reflector(Language::En, Options::default());
        let text = "Acting in accordance with the procedure laid down in Article 251 of the Treaty";
        assert_eq!(r.markup(text), text);
    }

    #[test]
    fn annex_references_without_context() {
        let mut r = reflector(Language::En, Options::default());
        assert_eq!(
            r.markup(
                "Service referred to in point (1) of Section B of Annex I to \
                 Directive 2004/39/EC, which provide."
            ),
            "Service referred to in point \
             <a title=\"Directive 2004/39/EC Annex I Section B point (1)\" \
             href=\"/eu/32004L0039/ANX_I/#SEC_B-1\">(1)</a> of Section \
             <a title=\"Directive 2004/39/EC Annex I Section B\" \
             href=\"/eu/32004L0039/ANX_I/#SEC_B\">B</a> of Annex \
             <a title=\"Directive 2004/39/EC Annex I\" href=\"/eu/32004L0039/ANX_I/\">I</a> to \
             Directive <a title=\"Directive 2004/39/EC\" \
             href=\"/eu/32004L0039/\">2004/39/EC</a>, which provide."
        );
    }

    #[test]
    fn only_treaty_names() {
        let text = "pursuant to the Capital Requirements Regulation";
        let mut open = reflector(Language::En, Options::default());
        assert!(open.markup(text).contains("/eu/32013R0575/"));
        let mut treaties = reflector(
            Language::En,
            Options {
                only_treaty_names: true,
                ..Options::default()
            },
        );
        assert_eq!(treaties.markup(text), text);
    }

    #[test]
    fn unknown_document_context_passes_through() {
        let mut r = reflector(
            Language::De,
            Options {
                document: StdCoordinate::from_document_path("/eu/52021PC0206"),
                ..Options::default()
            },
        );
        assert_eq!(
            r.markup("Artikel 22"),
            "Artikel <a title=\"52021PC0206 Art. 22\" \
             href=\"/eu/52021PC0206/ART_22/\">22</a>"
        );
    }

    #[test]
    fn inconsistent_targets_are_counted() {
        let mut r = reflector(
            Language::En,
            Options {
                container: Some(Target::from_pairs([("PRT", "1")])),
                ..Options::default()
            },
        );
        let text = "Article 2 of Chapter 5";
        assert_eq!(r.markup(text), text);
        assert_eq!(r.problematics(), [text.to_string()]);
    }

    #[test]
    fn list_processing_keeps_memory_per_call() {
        let mut r = reflector(Language::En, Options::default());
        let texts = [
            "the Treaty on European Union",
            "Article 5 of the Treaty applies",
        ];
        let annotations = r.annotate_list(&texts);
        assert_eq!(annotations[0].references[0].href, "/eu/TEU/");
        assert!(
            annotations[1]
                .references
                .iter()
                .any(|reference| reference.href == "/eu/TEU/ART_5/"),
            "memory must resolve the second string against the first"
        );
        // A fresh list starts from a clean memory again.
        let rerun = r.annotate_list(&texts[1..]);
        assert!(rerun[0].references.is_empty());
    }

    #[test]
    fn annotate_output_shape() {
        let mut r = Reflector::new(Language::En, Mode::Annotate, Options::default());
        let annotation = r.annotate("Article 43 of Regulation (EU) 575/2013");
        let json = serde_json::to_value(&annotation).unwrap();
        assert_eq!(json["text"], "Article 43 of Regulation (EU) 575/2013");
        assert_eq!(json["references"][0]["href"], "/eu/32013R0575/ART_43/");
        assert_eq!(json["references"][0]["span"]["start"], 8);
        assert_eq!(json["references"][0]["span"]["end"], 10);
    }

    #[test]
    fn celex_citation_display() {
        let r = reflector(Language::De, Options::default());
        assert_eq!(r.celex_citation("32012R0648"), "Verordnung 648/2012");
        assert_eq!(r.celex_citation("52021PC0206"), "52021PC0206");
    }

    #[test]
    fn reset_clears_memory_and_problematics() {
        let mut r = reflector(
            Language::En,
            Options {
                container: Some(Target::from_pairs([("PRT", "1")])),
                ..Options::default()
            },
        );
        r.markup("Article 2 of Chapter 5");
        assert!(!r.problematics().is_empty());
        r.reset();
        assert!(r.problematics().is_empty());
    }
}
