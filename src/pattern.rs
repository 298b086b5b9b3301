//! The internal pattern mini-language.
//!
//! Coordination and nesting match regular expressions against single
//! character projections of a token sequence. The patterns are written
//! over tag names and `Group.<name>` classes; compiling substitutes each
//! known name with its projection character (or character class), drops
//! the `:` separators, and hands the result to a look-around capable
//! regex engine.

use crate::model::TAG_MAP;
use std::{collections::HashMap, sync::LazyLock};

/// Patterns over the `groups` projection (one character per token group).
const GROUP_BASE: &[(&str, &str)] = &[
    ("coordinates", "(axis:value|named_entity)"),
    (
        "connector_value",
        "(?P<leader>coordinate)value*(?P<buddies>(connector:value+)+)(?P<after>coordinate)?",
    ),
    ("coordinate_connector_value", "coordinate(connector:value)+"),
    ("value_n", "(?P<leader>coordinate)value+"),
    ("axis_connector", "^axis:connector"),
    ("adjacent_coordinates", "coordinate+"),
];

/// Patterns over the `values` projection (one character per tag).
const TAG_BASE: &[(&str, &str)] = &[
    ("spoken_latin", "(?<=Group.value)LATIN"),
    ("fourth_directive", "SRNK[REG:DIR:DEC]"),
    // first and second point of ...
    ("spoken_rank", "SRNK(?P<followers>Group.connector:SRNK)*Group.axis"),
    ("re_reference", "[XPREVX:XTHISX]Group.axis"),
    ("orphan_axes", "(?<![XPREVX:SRNK:XTHISX])Group.axis$"),
    ("orphan_annex", "(?<![XPREVX:SRNK])ANX(?!Group.value)"),
    ("generic_context", "[BRCRPL:THEREOF]"),
    // e.g. "points (k)(ii) to (v)"
    ("range_connected", "Group.coordinate:Group.value:RC:Group.value(?!Group.value)"),
    // e.g. "of 12 December 2001 on Community designs"
    ("of_day", "SPCLPR:NM$"),
    ("co_and_co", "^Group.coordinate:AND:Group.coordinate$"),
    ("co_desu_co", "Group.coordinate:XDESUX:Group.coordinate"),
    ("first_end", "SRNK$"),
    (
        "left_of_right",
        "(?P<subs>Group.coordinate+)[SPCLPR:XDESUX]:Group.coordinate(?!Group.coordinate)",
    ),
    ("co_underthe_co", "Group.coordinate:SPPLCR:Group.coordinate"),
    ("comma_stairway", "(Group.coordinate:COM)+Group.coordinate"),
];

/// One match of a DSL pattern against a projection. Offsets are token
/// indices, which is why the projection alphabet stays single-byte.
pub(crate) struct DslMatch {
    /// Start index of the whole match.
    pub start: usize,
    /// End index (exclusive) of the whole match.
    pub end: usize,
    /// The matched projection slice.
    pub text: String,
    /// Named capture group spans present in this match.
    named: HashMap<&'static str, (usize, usize)>,
}

impl DslMatch {
    /// The span of a named group, if it participated in the match.
    pub fn group(&self, name: &str) -> Option<(usize, usize)> {
        self.named.get(name).copied()
    }
}

/// A compiled set of DSL patterns.
pub(crate) struct PatternSet {
    patterns: HashMap<&'static str, fancy_regex::Regex>,
}

impl PatternSet {
    /// Compiles `base` using `lookup` for name substitution.
    fn compile(base: &[(&'static str, &'static str)], lookup: impl Fn(&str) -> Option<String>) -> Self {
        let name = regex::Regex::new(r"[A-Za-z_][A-Za-z0-9_.]*").unwrap();
        let patterns = base
            .iter()
            .map(|(key, pattern)| {
                let substituted = name.replace_all(pattern, |caps: &regex::Captures<'_>| {
                    let ident = caps.get(0).unwrap().as_str();
                    lookup(ident).unwrap_or_else(|| ident.to_string())
                });
                let stripped = substituted.replace(':', "");
                let compiled = fancy_regex::Regex::new(&stripped).unwrap_or_else(|error| {
                    panic!("malformed projection pattern '{key}' -> '{stripped}': {error}")
                });
                (*key, compiled)
            })
            .collect();
        Self { patterns }
    }

    /// Whether the pattern `key` matches anywhere in `projection`.
    pub fn is_match(&self, key: &str, projection: &str) -> bool {
        self.patterns[key].is_match(projection).unwrap_or(false)
    }

    /// All matches of `key` in `projection`, newest-to-oldest when
    /// `reverse` so that in-place rewrites keep upstream indices valid.
    pub fn find(&self, key: &str, projection: &str, reverse: bool) -> Vec<DslMatch> {
        let regex = &self.patterns[key];
        let names = self.names(key);
        let mut matches = Vec::new();
        for caps in regex.captures_iter(projection).filter_map(Result::ok) {
            let whole = caps.get(0).expect("capture group 0 always participates");
            let mut named = HashMap::new();
            for name in &names {
                if let Some(m) = caps.name(name) {
                    named.insert(*name, (m.start(), m.end()));
                }
            }
            matches.push(DslMatch {
                start: whole.start(),
                end: whole.end(),
                text: whole.as_str().to_string(),
                named,
            });
        }
        if reverse {
            matches.reverse();
        }
        matches
    }

    /// The named capture groups a pattern declares.
    fn names(&self, key: &str) -> Vec<&'static str> {
        let mut names = Vec::new();
        for name in self.patterns[key].capture_names().flatten() {
            for known in ["leader", "buddies", "after", "subs", "followers"] {
                if name == known {
                    names.push(known);
                }
            }
        }
        names
    }
}

/// The compiled group-projection patterns.
pub(crate) static GROUP_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::compile(GROUP_BASE, |name| {
        match name {
            "named_entity" => Some("a"),
            "connector" => Some("b"),
            "axis" => Some("c"),
            "value" => Some("d"),
            "coordinate" => Some("e"),
            _ => None,
        }
        .map(str::to_string)
    })
});

/// The compiled tag-projection patterns.
pub(crate) static TAG_PATTERNS: LazyLock<PatternSet> =
    LazyLock::new(|| PatternSet::compile(TAG_BASE, |name| TAG_MAP.replacement(name).map(str::to_string)));
