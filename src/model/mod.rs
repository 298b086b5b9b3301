//! The language model: per-language bundles of compiled recognition
//! patterns and structural metadata.
//!
//! Reference detection is not self-encapsulated in the input text; it
//! needs out-of-band knowledge about how each language spells structural
//! elements, labels, and connectors. That knowledge lives in the embedded
//! [`tables`] and is compiled here into immutable [`LanguageModel`]
//! bundles, built lazily per `(language, only_treaties)` pair and shared
//! through a process-wide registry.

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use std::{
    collections::HashMap,
    str::FromStr,
    sync::{Arc, LazyLock, Mutex},
};

pub(crate) mod tables;

use tables::{AXES, AXIS_PATTERNS, CONNECTORS, NAMED_ENTITIES, VALUES, VALUE_PATTERNS, ValueRow};

/// Value tags that stand for "the thing mentioned before".
pub(crate) const BACKREF_TAGS: [&str; 3] = ["XPREVX", "BRCRPL", "THEREOF"];

/// The hierarchy level assumed for coordinates whose level cannot be read
/// from the axis table (named entities, promoted backref connectors).
pub(crate) const ANONYMOUS_LEVEL: u32 = 10;

/// The token group a tag belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Group {
    /// A document known by a proper name.
    NamedEntity,
    /// Linguistic glue between tokens.
    Connector,
    /// A structural element kind.
    Axis,
    /// A label within an axis.
    Value,
    /// A synthetic axis/value pair produced by coordination.
    Coordinate,
}

impl Group {
    /// The single character representing this group in a sequence
    /// projection.
    pub(crate) fn symbol(self) -> char {
        match self {
            Group::NamedEntity => 'a',
            Group::Connector => 'b',
            Group::Axis => 'c',
            Group::Value => 'd',
            Group::Coordinate => 'e',
        }
    }

    /// The lower-case name of the group, as used for anonymous axis tags.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Group::NamedEntity => "named_entity",
            Group::Connector => "connector",
            Group::Axis => "axis",
            Group::Value => "value",
            Group::Coordinate => "coordinate",
        }
    }
}

/// The role a structural element plays within a reference target, ordered
/// from broadest to finest.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AxisRole {
    /// A legislative corpus.
    Domain,
    /// A regulation, directive, or treaty.
    Document,
    /// A part, title, chapter, or section.
    Container,
    /// An annex; plays container or leaf depending on labelling.
    Annex,
    /// An article or preamble.
    Leaf,
    /// A paragraph, point, or letter.
    Paragraph,
    /// An unnumbered sentence or indent.
    Phrase,
    /// A mix of the above; only produced during target handling.
    Mixed,
    /// The permissive upper bound used for emission filtering.
    Token,
}

impl AxisRole {
    /// Looks up a role by its lower-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "domain" => AxisRole::Domain,
            "document" => AxisRole::Document,
            "container" => AxisRole::Container,
            "annex" => AxisRole::Annex,
            "leaf" => AxisRole::Leaf,
            "paragraph" => AxisRole::Paragraph,
            "phrase" => AxisRole::Phrase,
            "mixed" => AxisRole::Mixed,
            "token" => AxisRole::Token,
            _ => return None,
        })
    }
}

/// A supported input language.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Language {
    /// English.
    En,
    /// German.
    De,
    /// Spanish.
    Es,
}

impl Language {
    /// The two-letter code used in the tables.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::De => "DE",
            Language::Es => "ES",
        }
    }
}

impl core::fmt::Display for Language {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// The error when a [`Language`] cannot be parsed from a string.
#[derive(Debug, thiserror::Error)]
#[error("unsupported language '{0}'; expected 'EN', 'DE', or 'ES'")]
pub struct LanguageError(String);

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("en") {
            Ok(Language::En)
        } else if s.eq_ignore_ascii_case("de") {
            Ok(Language::De)
        } else if s.eq_ignore_ascii_case("es") {
            Ok(Language::Es)
        } else {
            Err(LanguageError(s.to_string()))
        }
    }
}

/// Returns the conventional hierarchy level of an axis tag.
pub(crate) fn axis_level(tag: &str) -> Option<u32> {
    AXES.iter().find(|row| row.tag == tag).map(|row| row.level)
}

/// Returns the target role of an axis tag.
///
/// Besides the table rows, the synthetic `named_entity` axis resolves to
/// `Document` and the anonymous axis to `Paragraph`.
pub(crate) fn axis_role(tag: &str) -> Option<AxisRole> {
    match tag {
        "named_entity" => Some(AxisRole::Document),
        "" => Some(AxisRole::Paragraph),
        _ => AXES.iter().find(|row| row.tag == tag).map(|row| row.role),
    }
}

/// Whether `tag` marks a back-reference value.
pub(crate) fn is_backref(tag: &str) -> bool {
    BACKREF_TAGS.contains(&tag)
}

/// Whether two axes may appear on the same parent/child chain.
///
/// Compatible unless exactly one of the two roles is `Container` and the
/// other is neither `Container` nor `Document`. Unknown tags are
/// compatible with everything.
pub(crate) fn axes_compatible(a: &str, b: &str) -> bool {
    let (Some(ra), Some(rb)) = (axis_role(a), axis_role(b)) else {
        return true;
    };
    if ra == AxisRole::Container || rb == AxisRole::Container {
        ra == rb || ra == AxisRole::Document || rb == AxisRole::Document
    } else {
        true
    }
}

/// Whether two value sub-tags could label the same axis.
///
/// Equal keys always can. Otherwise the keys must carry the same
/// decoration suffix and one base must be the Roman-ambiguous `AMBRA`
/// while the other is `AL`, `ROM`, or `AMBRA`.
pub(crate) fn values_compatible(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let (base_a, suffix_a) = a.split_once('_').unwrap_or((a, ""));
    let (base_b, suffix_b) = b.split_once('_').unwrap_or((b, ""));
    if suffix_a != suffix_b {
        return false;
    }
    if base_a != "AMBRA" && base_b != "AMBRA" {
        return false;
    }
    let other = if base_a == "AMBRA" { base_b } else { base_a };
    matches!(other, "AL" | "ROM" | "AMBRA")
}

/// Enumerates the sub-tags a value row expands to, in a fixed order.
fn value_sub_tags(row: &ValueRow) -> Vec<String> {
    if row.capitalizable || row.loose {
        return vec![row.tag.to_string()];
    }
    let cases: &[&str] = if row.caseable { &["_L", "_U"] } else { &[""] };
    let mut tags = Vec::new();
    for case in cases {
        let tag = format!("{}{case}", row.tag);
        tags.push(tag.clone());
        if row.decorable {
            tags.push(format!("{tag}_B"));
            tags.push(format!("{tag}_BB"));
        }
    }
    tags
}

/// The projection alphabet, in assignment order.
const PROJECTION_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The single-character projection mapping shared by all languages.
///
/// Every tag outside the named-entity group gets a stable character, and
/// each group accumulates its characters into a class usable by the
/// pattern DSL. Coordinates project to the literal `#`.
pub(crate) struct TagMap {
    /// tag -> projection character.
    chars: HashMap<String, char>,
    /// DSL substitution table: tag or `Group.<name>` -> replacement.
    replacements: HashMap<String, String>,
}

impl TagMap {
    fn build() -> Self {
        let mut chars = HashMap::new();
        let mut classes: IndexMap<&'static str, String> = IndexMap::new();
        let mut alphabet = PROJECTION_ALPHABET.chars();
        let mut assign = |tag: String, group: &'static str| {
            let letter = alphabet
                .next()
                .expect("projection alphabet exhausted; shrink the tag tables");
            classes.entry(group).or_default().push(letter);
            chars.insert(tag, letter);
        };
        for row in AXES {
            assign(row.tag.to_string(), "Group.axis");
        }
        let mut seen = Vec::new();
        for row in CONNECTORS {
            if !seen.contains(&row.tag) {
                seen.push(row.tag);
                assign(row.tag.to_string(), "Group.connector");
            }
        }
        for row in VALUES {
            for tag in value_sub_tags(row) {
                assign(tag, "Group.value");
            }
        }
        let mut replacements: HashMap<String, String> = chars
            .iter()
            .map(|(tag, c)| (tag.clone(), c.to_string()))
            .collect();
        for (group, members) in classes {
            replacements.insert(group.to_string(), format!("[{members}]"));
        }
        replacements.insert("Group.coordinate".to_string(), "#".to_string());
        Self { chars, replacements }
    }

    /// The projection character for `tag`; a space for unmapped tags
    /// (named entities).
    pub fn symbol(&self, tag: &str) -> char {
        self.chars.get(tag).copied().unwrap_or(' ')
    }

    /// The DSL replacement for a tag or group name, if known.
    pub fn replacement(&self, name: &str) -> Option<&str> {
        self.replacements.get(name).map(String::as_str)
    }
}

/// The process-wide projection mapping.
pub(crate) static TAG_MAP: LazyLock<TagMap> = LazyLock::new(TagMap::build);

/// Compiles `pattern` with the given case sensitivity, panicking on
/// malformed table rows. Table patterns are static data; a bad row is a
/// build defect, not a runtime condition.
fn compile(pattern: &str, case_insensitive: bool) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .unwrap_or_else(|error| panic!("malformed table pattern '{pattern}': {error}"))
}

/// An immutable per-language bundle of compiled patterns and metadata.
///
/// Construction is cheap enough to do once per process and language; the
/// bundle is then shared freely across orchestrators and threads.
pub struct LanguageModel {
    /// The language of this bundle.
    language: Language,
    /// Scan patterns for named entities: the `PND_ABBREV` and `PND_TITLE`
    /// aggregates, in that order.
    ne_scan: Vec<(&'static str, Regex)>,
    /// Key-resolution patterns for named entities, anchored lookups run
    /// against matched text.
    ne_keys: Vec<(&'static str, Regex)>,
    /// Named-entity key -> display abbreviation (or title).
    ne_abbrev: HashMap<&'static str, &'static str>,
    /// Connector tag -> scan pattern.
    connector_patterns: IndexMap<&'static str, Regex>,
    /// Axis tag -> scan pattern.
    axis_patterns: IndexMap<&'static str, Regex>,
    /// Axis tag -> display standard. A key with a `None` value is
    /// recognised but never spoken.
    axis_standard: HashMap<&'static str, Option<&'static str>>,
    /// Decorated value sub-tag -> scan pattern, in table order.
    value_patterns: IndexMap<String, Regex>,
    /// Value tag -> (number, anchored pattern) rows for spoken values.
    as_number: HashMap<&'static str, Vec<(&'static str, Regex)>>,
}

impl LanguageModel {
    /// Compiles the bundle for `language`. With `only_treaties`, named
    /// entities flagged as standard CELEX documents are left out of the
    /// scan set.
    fn new(language: Language, only_treaties: bool) -> Self {
        let code = language.code();
        let in_lang = |lang: &str| lang == code || lang == "XX";

        let ne_rows: Vec<_> = NAMED_ENTITIES
            .iter()
            .filter(|row| row.lang == code && !(only_treaties && row.standard_doc))
            .collect();
        let abbrevs: Vec<&str> = ne_rows.iter().filter_map(|row| row.abbreviation).collect();
        let titles: Vec<&str> = ne_rows.iter().filter_map(|row| row.title_pattern).collect();
        let mut ne_scan = Vec::new();
        if !abbrevs.is_empty() {
            ne_scan.push((
                "PND_ABBREV",
                compile(&format!(r"\b({})\b", abbrevs.join("|")), false),
            ));
        }
        if !titles.is_empty() {
            ne_scan.push((
                "PND_TITLE",
                compile(&format!(r"\b({})\b", titles.join("|")), false),
            ));
        }
        let mut ne_keys = Vec::new();
        let mut ne_abbrev = HashMap::new();
        for row in &ne_rows {
            if let Some(title) = row.title_pattern {
                ne_keys.push((row.tag, compile(&format!(r"\b({title})\b"), true)));
            }
            if let Some(abbrev) = row.abbreviation {
                ne_keys.push((row.tag, compile(&format!(r"\b({abbrev})\b"), false)));
            }
            ne_abbrev.insert(row.tag, row.abbreviation.unwrap_or(row.title));
        }

        let mut connector_patterns = IndexMap::new();
        for row in CONNECTORS.iter().filter(|row| in_lang(row.lang)) {
            let pattern = if row.add_stopper {
                format!(r"\b(?:{})\b", row.pattern)
            } else {
                row.pattern.to_string()
            };
            connector_patterns.insert(row.tag, compile(&pattern, false));
        }

        let mut axis_patterns = IndexMap::new();
        let mut axis_standard = HashMap::new();
        for row in AXIS_PATTERNS.iter().filter(|row| row.lang == code) {
            axis_patterns.insert(row.tag, compile(row.pattern, true));
            axis_standard.insert(row.tag, row.standard);
        }

        let mut value_patterns = IndexMap::new();
        let mut as_number: HashMap<&'static str, Vec<(&'static str, Regex)>> = HashMap::new();
        for row in VALUES {
            let fragments: Vec<&str> = VALUE_PATTERNS
                .iter()
                .filter(|vp| vp.tag == row.tag && in_lang(vp.lang))
                .map(|vp| vp.pattern)
                .collect();
            if fragments.is_empty() {
                log::debug!("no {code} patterns for value tag {}", row.tag);
                continue;
            }
            let full = fragments.join("|");
            for (tag, pattern) in Self::value_sub_patterns(row, &full) {
                value_patterns.insert(tag, pattern);
            }
            if row.convert {
                let numbered = VALUE_PATTERNS
                    .iter()
                    .filter(|vp| vp.tag == row.tag && in_lang(vp.lang))
                    .filter_map(|vp| {
                        vp.as_number
                            .map(|n| (n, compile(&format!("(?:{})", vp.pattern), true)))
                    })
                    .collect();
                as_number.insert(row.tag, numbered);
            }
        }

        Self {
            language,
            ne_scan,
            ne_keys,
            ne_abbrev,
            connector_patterns,
            axis_patterns,
            axis_standard,
            value_patterns,
            as_number,
        }
    }

    /// Expands one value row into its decorated sub-patterns. The order
    /// here must stay aligned with [`value_sub_tags`].
    fn value_sub_patterns(row: &ValueRow, full: &str) -> Vec<(String, Regex)> {
        if row.capitalizable {
            return vec![(row.tag.to_string(), compile(&format!(r"\b({full})\b"), true))];
        }
        if row.loose {
            return vec![(row.tag.to_string(), compile(&format!("({full})"), true))];
        }
        let cases: Vec<(&str, String)> = if row.caseable {
            vec![("_L", full.to_lowercase()), ("_U", full.to_uppercase())]
        } else {
            vec![("", full.to_string())]
        };
        let mut patterns = Vec::new();
        for (suffix, case) in &cases {
            let tag = format!("{}{suffix}", row.tag);
            let pattern = if row.tag == "ROM" && *suffix == "_U" {
                // Amended provisions keep a letter suffix on the numeral,
                // as in "Titel IVa".
                format!(r"\b({case})[A-Ha-h]?\b")
            } else {
                format!(r"\b({case})\b")
            };
            patterns.push((tag.clone(), compile(&pattern, false)));
            if row.decorable {
                patterns.push((format!("{tag}_B"), compile(&format!(r"\b({case})\)"), false)));
                patterns.push((format!("{tag}_BB"), compile(&format!(r"\(({case})\)"), false)));
            }
        }
        patterns
    }

    /// The language of this bundle.
    pub fn language(&self) -> Language {
        self.language
    }

    /// The named-entity scan aggregates (`PND_ABBREV`, `PND_TITLE`).
    pub(crate) fn named_entity_patterns(&self) -> &[(&'static str, Regex)] {
        &self.ne_scan
    }

    /// The connector scan patterns.
    pub(crate) fn connector_patterns(&self) -> &IndexMap<&'static str, Regex> {
        &self.connector_patterns
    }

    /// The axis scan patterns.
    pub(crate) fn axis_patterns(&self) -> &IndexMap<&'static str, Regex> {
        &self.axis_patterns
    }

    /// The decorated value scan patterns, in table order.
    pub(crate) fn value_patterns(&self) -> &IndexMap<String, Regex> {
        &self.value_patterns
    }

    /// The display standard for an axis tag. `None` means the axis is
    /// unknown to this language; `Some(None)` means it is known but has
    /// no display form.
    pub(crate) fn axis_standard(&self, tag: &str) -> Option<Option<&'static str>> {
        self.axis_standard.get(tag).copied()
    }

    /// Reads a spoken value (`"first"`, `"bis"`) as the string form of
    /// the number it stands for.
    pub(crate) fn value_as_number(&self, tag: &str, expression: &str) -> Option<&'static str> {
        self.as_number.get(tag)?.iter().find_map(|(number, pattern)| {
            pattern
                .find(expression)
                .is_some_and(|m| m.start() == 0)
                .then_some(*number)
        })
    }

    /// Resolves the named-entity key whose pattern matches the start of
    /// `text`.
    pub(crate) fn named_entity_key(&self, text: &str) -> Option<&'static str> {
        self.ne_keys.iter().find_map(|(key, pattern)| {
            pattern.find(text).is_some_and(|m| m.start() == 0).then_some(*key)
        })
    }

    /// The display abbreviation (or canonical title) for a named-entity
    /// key.
    pub(crate) fn named_entity_abbrev(&self, key: &str) -> Option<&'static str> {
        self.ne_abbrev.get(key).copied()
    }
}

/// The lazily-filled registry of compiled language models.
static REGISTRY: LazyLock<Mutex<HashMap<(Language, bool), Arc<LanguageModel>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Returns the shared model for `(language, only_treaties)`, compiling it
/// on first use.
pub fn language_model(language: Language, only_treaties: bool) -> Arc<LanguageModel> {
    let mut registry = REGISTRY.lock().expect("language registry poisoned");
    registry
        .entry((language, only_treaties))
        .or_insert_with(|| Arc::new(LanguageModel::new(language, only_treaties)))
        .clone()
}
