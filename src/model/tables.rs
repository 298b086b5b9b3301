//! Embedded language tables.
//!
//! The linguistic configuration is compiled into the binary as plain row
//! arrays. Loading these tables from durable storage is explicitly not a
//! concern of this crate; a build of the tables *is* the configuration.
//! Rows are consumed through the accessors on
//! [`LanguageModel`](super::LanguageModel) only.

use super::AxisRole;

/// A structural element kind (Article, Chapter, Annex, ...).
pub struct AxisRow {
    /// The unique axis tag.
    pub tag: &'static str,
    /// Conventional hierarchy level of the element kind. Parts sit above
    /// chapters, chapters above articles, and so on.
    pub level: u32,
    /// The role this element kind plays in a reference target.
    pub role: AxisRole,
    /// What the tag stands for.
    #[allow(dead_code)]
    pub description: &'static str,
}

/// A per-language recognition pattern and display form for an axis.
pub struct AxisPatternRow {
    /// The axis tag this pattern belongs to.
    pub tag: &'static str,
    /// Two-letter language code.
    pub lang: &'static str,
    /// Recognition pattern. Compiled case-insensitively; word boundaries
    /// are part of the pattern since abbreviated forms end in a dot.
    pub pattern: &'static str,
    /// Display form used when building reference titles. `None` means the
    /// axis is recognised but never spoken.
    pub standard: Option<&'static str>,
}

/// A label system within an axis (`1`, `III`, `(a)`, `first`, ...).
pub struct ValueRow {
    /// The unique base value tag. Decorations derive sub-tags from it.
    pub tag: &'static str,
    /// Whether the token may carry label brackets, deriving the `_B`
    /// (`x)`) and `_BB` (`(x)`) sub-tags.
    pub decorable: bool,
    /// Whether lower/upper variants are distinct labels, deriving the
    /// `_L` and `_U` sub-tags.
    pub caseable: bool,
    /// Whether the pattern is stored capitalised and matched
    /// case-insensitively. Mutually exclusive with `decorable`.
    pub capitalizable: bool,
    /// Whether the matched expression is replaced by the number it
    /// represents when building the target.
    pub convert: bool,
    /// Whether the pattern is compiled without word-boundary wrapping and
    /// case-insensitively. Citation ordinates start with brackets or
    /// digits, so boundary wrapping would misfire on them.
    pub loose: bool,
    /// What the tag stands for.
    #[allow(dead_code)]
    pub description: &'static str,
}

/// A recognition pattern for a value, optionally carrying the number the
/// expression stands for.
pub struct ValuePatternRow {
    /// The base value tag this pattern belongs to.
    pub tag: &'static str,
    /// The numeric reading of the expression, as a string, when the value
    /// is convertible.
    pub as_number: Option<&'static str>,
    /// Two-letter language code, or `XX` for language-independent rows.
    pub lang: &'static str,
    /// Recognition pattern fragment. Fragments of one tag and language
    /// are alternated into the full pattern.
    pub pattern: &'static str,
}

/// A document known by a proper name (treaties, nicknamed acts).
pub struct NamedEntityRow {
    /// The unique entity key. For acts with a CELEX identifier the key is
    /// that identifier, so targets collate directly to a document path.
    pub tag: &'static str,
    /// Two-letter language code.
    pub lang: &'static str,
    /// Pattern matching the spelled-out title. Matched
    /// case-insensitively during key lookup, case-sensitively during
    /// scanning.
    pub title_pattern: Option<&'static str>,
    /// Conventional abbreviation. Matched case-sensitively.
    pub abbreviation: Option<&'static str>,
    /// Canonical title, used as the display form when no abbreviation
    /// exists.
    pub title: &'static str,
    /// Whether the row names a standard CELEX-identified document rather
    /// than a treaty. The `only_treaties` scan mode excludes these.
    pub standard_doc: bool,
}

/// Linguistic glue between reference tokens.
pub struct ConnectorRow {
    /// The unique connector tag.
    pub tag: &'static str,
    /// Two-letter language code, or `XX` for language-independent rows.
    pub lang: &'static str,
    /// Recognition pattern. Compiled case-sensitively; alternations carry
    /// their own initial-capital variants where needed.
    pub pattern: &'static str,
    /// Whether the pattern is wrapped in word boundaries.
    pub add_stopper: bool,
    /// What the tag stands for.
    #[allow(dead_code)]
    pub description: &'static str,
}

pub static AXES: &[AxisRow] = &[
    AxisRow { tag: "REG", level: 1, role: AxisRole::Document, description: "Regulation" },
    AxisRow { tag: "DIR", level: 1, role: AxisRole::Document, description: "Directive" },
    AxisRow { tag: "DEC", level: 1, role: AxisRole::Document, description: "Decision" },
    AxisRow { tag: "FDC", level: 1, role: AxisRole::Document, description: "Framework Decision" },
    AxisRow { tag: "TRT", level: 1, role: AxisRole::Document, description: "Treaty" },
    AxisRow { tag: "DOC", level: 1, role: AxisRole::Document, description: "Generic document" },
    AxisRow { tag: "ANX", level: 2, role: AxisRole::Annex, description: "Annex" },
    AxisRow { tag: "PRT", level: 3, role: AxisRole::Container, description: "Part" },
    AxisRow { tag: "TIT", level: 4, role: AxisRole::Container, description: "Title" },
    AxisRow { tag: "CHP", level: 5, role: AxisRole::Container, description: "Chapter" },
    AxisRow { tag: "SEC", level: 6, role: AxisRole::Container, description: "Section" },
    AxisRow { tag: "ART", level: 7, role: AxisRole::Leaf, description: "Article" },
    AxisRow { tag: "PRE", level: 7, role: AxisRole::Leaf, description: "Preamble" },
    AxisRow { tag: "PG", level: 8, role: AxisRole::Paragraph, description: "Paragraph" },
    AxisRow { tag: "PNT", level: 9, role: AxisRole::Paragraph, description: "Point" },
    AxisRow { tag: "LTR", level: 9, role: AxisRole::Paragraph, description: "Lettered point" },
    AxisRow { tag: "SNT", level: 10, role: AxisRole::Phrase, description: "Sentence" },
    AxisRow { tag: "IND", level: 10, role: AxisRole::Phrase, description: "Indent" },
];

#[rustfmt::skip]
pub static AXIS_PATTERNS: &[AxisPatternRow] = &[
    // EN
    AxisPatternRow { tag: "REG", lang: "EN", pattern: r"\bRegulations?\b", standard: Some("Regulation") },
    AxisPatternRow { tag: "DIR", lang: "EN", pattern: r"\bDirectives?\b", standard: Some("Directive") },
    AxisPatternRow { tag: "DEC", lang: "EN", pattern: r"\bDecisions?\b", standard: Some("Decision") },
    AxisPatternRow { tag: "FDC", lang: "EN", pattern: r"\bFramework\s+Decisions?\b", standard: Some("Framework Decision") },
    AxisPatternRow { tag: "TRT", lang: "EN", pattern: r"\bTreat(?:y|ies)\b", standard: Some("Treaty") },
    AxisPatternRow { tag: "ANX", lang: "EN", pattern: r"\bAnnex(?:es)?\b", standard: Some("Annex") },
    AxisPatternRow { tag: "PRT", lang: "EN", pattern: r"\bParts?\b", standard: Some("Part") },
    AxisPatternRow { tag: "TIT", lang: "EN", pattern: r"\bTitles?\b", standard: Some("Title") },
    AxisPatternRow { tag: "CHP", lang: "EN", pattern: r"\bChapters?\b", standard: Some("Chapter") },
    AxisPatternRow { tag: "SEC", lang: "EN", pattern: r"\bSections?\b", standard: Some("Section") },
    AxisPatternRow { tag: "ART", lang: "EN", pattern: r"\bArticles?\b|\bArt\.", standard: Some("Art.") },
    AxisPatternRow { tag: "PRE", lang: "EN", pattern: r"\bPreamble\b", standard: Some("Preamble") },
    AxisPatternRow { tag: "PG", lang: "EN", pattern: r"\b(?:sub)?paragraphs?\b|\bpara\.", standard: Some("paragraph") },
    AxisPatternRow { tag: "PNT", lang: "EN", pattern: r"\bpoints?\b", standard: Some("point") },
    AxisPatternRow { tag: "LTR", lang: "EN", pattern: r"\bletters?\b", standard: Some("point") },
    AxisPatternRow { tag: "SNT", lang: "EN", pattern: r"\bsentences?\b", standard: None },
    AxisPatternRow { tag: "IND", lang: "EN", pattern: r"\bindents?\b", standard: None },
    // DE
    AxisPatternRow { tag: "REG", lang: "DE", pattern: r"\bVerordnung(?:en)?\b|\bVO\b", standard: Some("Verordnung") },
    AxisPatternRow { tag: "DIR", lang: "DE", pattern: r"\bRichtlinien?\b|\bRL\b", standard: Some("Richtlinie") },
    AxisPatternRow { tag: "DEC", lang: "DE", pattern: r"\bBeschl(?:uss(?:es)?|üsse[n]?)\b|\bEntscheidung(?:en)?\b", standard: Some("Beschluss") },
    AxisPatternRow { tag: "FDC", lang: "DE", pattern: r"\bRahmenbeschl(?:uss(?:es)?|üsse[n]?)\b", standard: Some("Rahmenbeschluss") },
    AxisPatternRow { tag: "TRT", lang: "DE", pattern: r"\bVertr(?:ag(?:s|es)?|äge[n]?)\b", standard: Some("Vertrag") },
    AxisPatternRow { tag: "ANX", lang: "DE", pattern: r"\bAnh(?:ang(?:s|es)?|änge[n]?)\b|\bAnh\.", standard: Some("Anhang") },
    AxisPatternRow { tag: "PRT", lang: "DE", pattern: r"\bTeil(?:s|e|en)?\b", standard: Some("Teil") },
    AxisPatternRow { tag: "TIT", lang: "DE", pattern: r"\bTitel[sn]?\b", standard: Some("Titel") },
    AxisPatternRow { tag: "CHP", lang: "DE", pattern: r"\bKapitel[sn]?\b|\bKap\.", standard: Some("Kapitel") },
    AxisPatternRow { tag: "SEC", lang: "DE", pattern: r"\bAbschnitt(?:s|e|en|es)?\b", standard: Some("Abschnitt") },
    AxisPatternRow { tag: "ART", lang: "DE", pattern: r"\bArtikel[sn]?\b|\bArt\.", standard: Some("Art.") },
    AxisPatternRow { tag: "PRE", lang: "DE", pattern: r"\bPräambel\b", standard: Some("Präambel") },
    AxisPatternRow { tag: "PG", lang: "DE", pattern: r"\b(?:Unter)?[Aa]bs(?:atz(?:es)?|ätze[n]?)\b|\bAbs\.", standard: Some("Abs.") },
    AxisPatternRow { tag: "PNT", lang: "DE", pattern: r"\bNummer[n]?\b|\bNr\.", standard: Some("Nr.") },
    AxisPatternRow { tag: "LTR", lang: "DE", pattern: r"\bBuchstaben?\b|\bBuchst\.", standard: Some("Buchst.") },
    AxisPatternRow { tag: "SNT", lang: "DE", pattern: r"\bSatz(?:es)?\b|\bSätze[n]?\b", standard: Some("Satz") },
    AxisPatternRow { tag: "IND", lang: "DE", pattern: r"\bGedankenstrich(?:s|e|en|es)?\b", standard: None },
    // ES
    AxisPatternRow { tag: "REG", lang: "ES", pattern: r"\bReglamentos?\b", standard: Some("Reglamento") },
    AxisPatternRow { tag: "DIR", lang: "ES", pattern: r"\bDirectivas?\b", standard: Some("Directiva") },
    AxisPatternRow { tag: "DEC", lang: "ES", pattern: r"\bDecisi(?:ón|ones)\b", standard: Some("Decisión") },
    AxisPatternRow { tag: "FDC", lang: "ES", pattern: r"\bDecisi(?:ón|ones)\s+marco\b", standard: Some("Decisión marco") },
    AxisPatternRow { tag: "TRT", lang: "ES", pattern: r"\bTratados?\b", standard: Some("Tratado") },
    AxisPatternRow { tag: "ANX", lang: "ES", pattern: r"\bAnexos?\b", standard: Some("Anexo") },
    AxisPatternRow { tag: "PRT", lang: "ES", pattern: r"\bPartes?\b", standard: Some("Parte") },
    AxisPatternRow { tag: "TIT", lang: "ES", pattern: r"\bTítulos?\b", standard: Some("Título") },
    AxisPatternRow { tag: "CHP", lang: "ES", pattern: r"\bCapítulos?\b", standard: Some("Capítulo") },
    AxisPatternRow { tag: "SEC", lang: "ES", pattern: r"\bSecci(?:ón|ones)\b", standard: Some("Sección") },
    AxisPatternRow { tag: "ART", lang: "ES", pattern: r"\bArtículos?\b|\bArt\.", standard: Some("Art.") },
    AxisPatternRow { tag: "PG", lang: "ES", pattern: r"\bapartados?\b|\bpárrafos?\b", standard: Some("apartado") },
    AxisPatternRow { tag: "PNT", lang: "ES", pattern: r"\bpuntos?\b", standard: Some("punto") },
    AxisPatternRow { tag: "LTR", lang: "ES", pattern: r"\bletras?\b", standard: Some("letra") },
];

#[rustfmt::skip]
pub static VALUES: &[ValueRow] = &[
    ValueRow { tag: "NM", decorable: true, caseable: false, capitalizable: false, convert: false, loose: false, description: "Arabic number" },
    ValueRow { tag: "AL", decorable: true, caseable: true, capitalizable: false, convert: false, loose: false, description: "Plain letter label" },
    ValueRow { tag: "AMBRA", decorable: true, caseable: true, capitalizable: false, convert: false, loose: false, description: "Letter that is also a Roman numeral" },
    ValueRow { tag: "ROM", decorable: true, caseable: true, capitalizable: false, convert: false, loose: false, description: "Roman numeral" },
    ValueRow { tag: "SRNK", decorable: false, caseable: false, capitalizable: true, convert: true, loose: false, description: "Spoken rank" },
    ValueRow { tag: "SPN", decorable: false, caseable: false, capitalizable: true, convert: true, loose: false, description: "Spoken number" },
    ValueRow { tag: "LATIN", decorable: false, caseable: false, capitalizable: true, convert: true, loose: false, description: "Latin ordinal suffix" },
    ValueRow { tag: "XPREVX", decorable: false, caseable: false, capitalizable: true, convert: false, loose: false, description: "Back-reference determiner" },
    ValueRow { tag: "XTHISX", decorable: false, caseable: false, capitalizable: true, convert: false, loose: false, description: "Self-reference determiner" },
    ValueRow { tag: "EURCOO", decorable: false, caseable: false, capitalizable: false, convert: false, loose: true, description: "Regulation citation ordinate" },
    ValueRow { tag: "EULCOO", decorable: false, caseable: false, capitalizable: false, convert: false, loose: true, description: "Directive citation ordinate" },
    ValueRow { tag: "EUFCOO", decorable: false, caseable: false, capitalizable: false, convert: false, loose: true, description: "Framework decision citation ordinate" },
];

#[rustfmt::skip]
pub static VALUE_PATTERNS: &[ValuePatternRow] = &[
    ValuePatternRow { tag: "NM", as_number: None, lang: "XX", pattern: r"\d+" },
    ValuePatternRow { tag: "AL", as_number: None, lang: "XX", pattern: "[a-hj-uw-z]" },
    ValuePatternRow { tag: "AMBRA", as_number: None, lang: "XX", pattern: "[ivxlcdm]" },
    ValuePatternRow { tag: "ROM", as_number: None, lang: "XX", pattern: "[ivxlcdm]{2,6}" },
    // Spoken ranks.
    ValuePatternRow { tag: "SRNK", as_number: Some("1"), lang: "EN", pattern: "First" },
    ValuePatternRow { tag: "SRNK", as_number: Some("2"), lang: "EN", pattern: "Second" },
    ValuePatternRow { tag: "SRNK", as_number: Some("3"), lang: "EN", pattern: "Third" },
    ValuePatternRow { tag: "SRNK", as_number: Some("4"), lang: "EN", pattern: "Fourth" },
    ValuePatternRow { tag: "SRNK", as_number: Some("5"), lang: "EN", pattern: "Fifth" },
    ValuePatternRow { tag: "SRNK", as_number: Some("6"), lang: "EN", pattern: "Sixth" },
    ValuePatternRow { tag: "SRNK", as_number: Some("7"), lang: "EN", pattern: "Seventh" },
    ValuePatternRow { tag: "SRNK", as_number: Some("8"), lang: "EN", pattern: "Eighth" },
    ValuePatternRow { tag: "SRNK", as_number: Some("9"), lang: "EN", pattern: "Ninth" },
    ValuePatternRow { tag: "SRNK", as_number: Some("10"), lang: "EN", pattern: "Tenth" },
    ValuePatternRow { tag: "SRNK", as_number: Some("1"), lang: "DE", pattern: "Erste[rsnm]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("2"), lang: "DE", pattern: "Zweite[rsnm]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("3"), lang: "DE", pattern: "Dritte[rsnm]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("4"), lang: "DE", pattern: "Vierte[rsnm]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("5"), lang: "DE", pattern: "Fünfte[rsnm]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("6"), lang: "DE", pattern: "Sechste[rsnm]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("7"), lang: "DE", pattern: "Sieb(?:en)?te[rsnm]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("8"), lang: "DE", pattern: "Achte[rsnm]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("9"), lang: "DE", pattern: "Neunte[rsnm]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("10"), lang: "DE", pattern: "Zehnte[rsnm]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("1"), lang: "ES", pattern: "Primer[oa]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("2"), lang: "ES", pattern: "Segund[oa]" },
    ValuePatternRow { tag: "SRNK", as_number: Some("3"), lang: "ES", pattern: "Tercer[oa]?" },
    ValuePatternRow { tag: "SRNK", as_number: Some("4"), lang: "ES", pattern: "Cuart[oa]" },
    ValuePatternRow { tag: "SRNK", as_number: Some("5"), lang: "ES", pattern: "Quint[oa]" },
    ValuePatternRow { tag: "SRNK", as_number: Some("6"), lang: "ES", pattern: "Sext[oa]" },
    ValuePatternRow { tag: "SRNK", as_number: Some("7"), lang: "ES", pattern: "Séptim[oa]" },
    ValuePatternRow { tag: "SRNK", as_number: Some("8"), lang: "ES", pattern: "Octav[oa]" },
    ValuePatternRow { tag: "SRNK", as_number: Some("9"), lang: "ES", pattern: "Noven[oa]" },
    ValuePatternRow { tag: "SRNK", as_number: Some("10"), lang: "ES", pattern: "Décim[oa]" },
    // Spoken numbers.
    ValuePatternRow { tag: "SPN", as_number: Some("1"), lang: "EN", pattern: "One" },
    ValuePatternRow { tag: "SPN", as_number: Some("2"), lang: "EN", pattern: "Two" },
    ValuePatternRow { tag: "SPN", as_number: Some("3"), lang: "EN", pattern: "Three" },
    ValuePatternRow { tag: "SPN", as_number: Some("4"), lang: "EN", pattern: "Four" },
    ValuePatternRow { tag: "SPN", as_number: Some("5"), lang: "EN", pattern: "Five" },
    ValuePatternRow { tag: "SPN", as_number: Some("6"), lang: "EN", pattern: "Six" },
    ValuePatternRow { tag: "SPN", as_number: Some("7"), lang: "EN", pattern: "Seven" },
    ValuePatternRow { tag: "SPN", as_number: Some("8"), lang: "EN", pattern: "Eight" },
    ValuePatternRow { tag: "SPN", as_number: Some("9"), lang: "EN", pattern: "Nine" },
    ValuePatternRow { tag: "SPN", as_number: Some("10"), lang: "EN", pattern: "Ten" },
    ValuePatternRow { tag: "SPN", as_number: Some("1"), lang: "DE", pattern: "Eins" },
    ValuePatternRow { tag: "SPN", as_number: Some("2"), lang: "DE", pattern: "Zwei" },
    ValuePatternRow { tag: "SPN", as_number: Some("3"), lang: "DE", pattern: "Drei" },
    ValuePatternRow { tag: "SPN", as_number: Some("4"), lang: "DE", pattern: "Vier" },
    ValuePatternRow { tag: "SPN", as_number: Some("5"), lang: "DE", pattern: "Fünf" },
    ValuePatternRow { tag: "SPN", as_number: Some("6"), lang: "DE", pattern: "Sechs" },
    ValuePatternRow { tag: "SPN", as_number: Some("7"), lang: "DE", pattern: "Sieben" },
    ValuePatternRow { tag: "SPN", as_number: Some("8"), lang: "DE", pattern: "Acht" },
    ValuePatternRow { tag: "SPN", as_number: Some("9"), lang: "DE", pattern: "Neun" },
    ValuePatternRow { tag: "SPN", as_number: Some("10"), lang: "DE", pattern: "Zehn" },
    ValuePatternRow { tag: "SPN", as_number: Some("1"), lang: "ES", pattern: "Uno" },
    ValuePatternRow { tag: "SPN", as_number: Some("2"), lang: "ES", pattern: "Dos" },
    ValuePatternRow { tag: "SPN", as_number: Some("3"), lang: "ES", pattern: "Tres" },
    ValuePatternRow { tag: "SPN", as_number: Some("4"), lang: "ES", pattern: "Cuatro" },
    ValuePatternRow { tag: "SPN", as_number: Some("5"), lang: "ES", pattern: "Cinco" },
    ValuePatternRow { tag: "SPN", as_number: Some("6"), lang: "ES", pattern: "Seis" },
    ValuePatternRow { tag: "SPN", as_number: Some("7"), lang: "ES", pattern: "Siete" },
    ValuePatternRow { tag: "SPN", as_number: Some("8"), lang: "ES", pattern: "Ocho" },
    ValuePatternRow { tag: "SPN", as_number: Some("9"), lang: "ES", pattern: "Nueve" },
    ValuePatternRow { tag: "SPN", as_number: Some("10"), lang: "ES", pattern: "Diez" },
    // Latin ordinals as used for inserted provisions (Art. 22 bis = 22a).
    ValuePatternRow { tag: "LATIN", as_number: Some("a"), lang: "XX", pattern: "Bis" },
    ValuePatternRow { tag: "LATIN", as_number: Some("b"), lang: "XX", pattern: "Ter" },
    ValuePatternRow { tag: "LATIN", as_number: Some("c"), lang: "XX", pattern: "Quater" },
    ValuePatternRow { tag: "LATIN", as_number: Some("d"), lang: "XX", pattern: "Quinquies" },
    ValuePatternRow { tag: "LATIN", as_number: Some("e"), lang: "XX", pattern: "Sexies" },
    ValuePatternRow { tag: "LATIN", as_number: Some("f"), lang: "XX", pattern: "Septies" },
    ValuePatternRow { tag: "LATIN", as_number: Some("g"), lang: "XX", pattern: "Octies" },
    ValuePatternRow { tag: "LATIN", as_number: Some("h"), lang: "XX", pattern: "Novies" },
    ValuePatternRow { tag: "LATIN", as_number: Some("i"), lang: "XX", pattern: "Decies" },
    // Reference determiners.
    ValuePatternRow { tag: "XPREVX", as_number: None, lang: "EN", pattern: "The|Said" },
    ValuePatternRow { tag: "XPREVX", as_number: None, lang: "DE", pattern: "Genannten?|Besagten?" },
    ValuePatternRow { tag: "XPREVX", as_number: None, lang: "ES", pattern: "Dich[oa]s?" },
    ValuePatternRow { tag: "XTHISX", as_number: None, lang: "EN", pattern: "This" },
    ValuePatternRow { tag: "XTHISX", as_number: None, lang: "DE", pattern: "Diese[srmn]?" },
    ValuePatternRow { tag: "XTHISX", as_number: None, lang: "ES", pattern: "Presentes?|Este|Esta" },
    // Citation ordinates.
    ValuePatternRow { tag: "EURCOO", as_number: None, lang: "XX", pattern: r"(?:\((?:EU|EC|EEC|EG|EWG|UE|CE|CEE)\)\s+)?(?:N[or]?\.?\s+)?\d{1,4}/\d{2,4}" },
    ValuePatternRow { tag: "EULCOO", as_number: None, lang: "XX", pattern: r"\d{1,4}/\d{1,4}/(?:EC|EEC|EU|EG|EWG|CE|CEE|UE)" },
    ValuePatternRow { tag: "EUFCOO", as_number: None, lang: "XX", pattern: r"\d{1,4}/\d{1,4}/(?:JHA|JI|JAI)" },
];

#[rustfmt::skip]
pub static NAMED_ENTITIES: &[NamedEntityRow] = &[
    NamedEntityRow { tag: "TEU", lang: "EN", title_pattern: Some("Treaty on European Union"), abbreviation: Some("TEU"), title: "Treaty on European Union", standard_doc: false },
    NamedEntityRow { tag: "TEU", lang: "DE", title_pattern: Some("Vertrag über die Europäische Union"), abbreviation: Some("EUV"), title: "Vertrag über die Europäische Union", standard_doc: false },
    NamedEntityRow { tag: "TEU", lang: "ES", title_pattern: Some("Tratado de la Unión Europea"), abbreviation: Some("TUE"), title: "Tratado de la Unión Europea", standard_doc: false },
    NamedEntityRow { tag: "TFEU", lang: "EN", title_pattern: Some("Treaty on the Functioning of the European Union"), abbreviation: Some("TFEU"), title: "Treaty on the Functioning of the European Union", standard_doc: false },
    NamedEntityRow { tag: "TFEU", lang: "DE", title_pattern: Some("Vertrag über die Arbeitsweise der Europäischen Union"), abbreviation: Some("AEUV"), title: "Vertrag über die Arbeitsweise der Europäischen Union", standard_doc: false },
    NamedEntityRow { tag: "TFEU", lang: "ES", title_pattern: Some("Tratado de Funcionamiento de la Unión Europea"), abbreviation: Some("TFUE"), title: "Tratado de Funcionamiento de la Unión Europea", standard_doc: false },
    NamedEntityRow { tag: "TEEC", lang: "EN", title_pattern: Some("Treaty establishing the European (?:Economic )?Community"), abbreviation: None, title: "Treaty establishing the European Economic Community", standard_doc: false },
    NamedEntityRow { tag: "TEEC", lang: "DE", title_pattern: Some("Vertrag zur Gründung der Europäischen (?:Wirtschafts)?[Gg]emeinschaft"), abbreviation: Some("EGV"), title: "Vertrag zur Gründung der Europäischen Gemeinschaft", standard_doc: false },
    NamedEntityRow { tag: "TEEC", lang: "ES", title_pattern: Some("Tratado constitutivo de la Comunidad (?:Económica )?Europea"), abbreviation: Some("TCE"), title: "Tratado constitutivo de la Comunidad Económica Europea", standard_doc: false },
    NamedEntityRow { tag: "32013R0575", lang: "EN", title_pattern: Some("Capital Requirements Regulation"), abbreviation: Some("CRR"), title: "Capital Requirements Regulation", standard_doc: true },
    NamedEntityRow { tag: "32013R0575", lang: "DE", title_pattern: Some("Eigenmittelverordnung"), abbreviation: Some("CRR"), title: "Eigenmittelverordnung", standard_doc: true },
    NamedEntityRow { tag: "32016R0679", lang: "EN", title_pattern: Some("General Data Protection Regulation"), abbreviation: Some("GDPR"), title: "General Data Protection Regulation", standard_doc: true },
    NamedEntityRow { tag: "32016R0679", lang: "DE", title_pattern: Some("Datenschutz-Grundverordnung"), abbreviation: Some("DSGVO"), title: "Datenschutz-Grundverordnung", standard_doc: true },
    NamedEntityRow { tag: "32016R0679", lang: "ES", title_pattern: Some("Reglamento General de Protección de Datos"), abbreviation: Some("RGPD"), title: "Reglamento General de Protección de Datos", standard_doc: true },
];

#[rustfmt::skip]
pub static CONNECTORS: &[ConnectorRow] = &[
    ConnectorRow { tag: "AND", lang: "EN", pattern: "[Aa]nd|[Oo]r", add_stopper: true, description: "Conjunction" },
    ConnectorRow { tag: "AND", lang: "DE", pattern: "[Uu]nd|[Oo]der|sowie", add_stopper: true, description: "Conjunction" },
    ConnectorRow { tag: "AND", lang: "ES", pattern: "[Yy]|[Ee]|[Oo]|[Uu]", add_stopper: true, description: "Conjunction" },
    ConnectorRow { tag: "COM", lang: "XX", pattern: ",", add_stopper: false, description: "Comma" },
    ConnectorRow { tag: "RC", lang: "EN", pattern: "[Tt]o|[Uu]ntil", add_stopper: true, description: "Range connector" },
    ConnectorRow { tag: "RC", lang: "DE", pattern: "[Bb]is", add_stopper: true, description: "Range connector" },
    ConnectorRow { tag: "RC", lang: "ES", pattern: "[Aa]|hasta", add_stopper: true, description: "Range connector" },
    ConnectorRow { tag: "OTHERX", lang: "EN", pattern: r"as\s+well\s+as", add_stopper: true, description: "Additive conjunction" },
    ConnectorRow { tag: "OTHERX", lang: "DE", pattern: r"als\s+auch|wie\s+auch", add_stopper: true, description: "Additive conjunction" },
    ConnectorRow { tag: "OTHERX", lang: "ES", pattern: r"así\s+como", add_stopper: true, description: "Additive conjunction" },
    ConnectorRow { tag: "LF", lang: "XX", pattern: "\n", add_stopper: false, description: "Line feed" },
    ConnectorRow { tag: "SEPARATE", lang: "XX", pattern: ";", add_stopper: false, description: "Hard sequence separator" },
    ConnectorRow { tag: "SPCLPR", lang: "EN", pattern: "of", add_stopper: true, description: "Subordinating preposition" },
    ConnectorRow { tag: "SPCLPR", lang: "DE", pattern: "von|vom", add_stopper: true, description: "Subordinating preposition" },
    ConnectorRow { tag: "SPCLPR", lang: "ES", pattern: "de", add_stopper: true, description: "Subordinating preposition" },
    ConnectorRow { tag: "XDESUX", lang: "DE", pattern: "des|der|dem", add_stopper: true, description: "Genitive article" },
    ConnectorRow { tag: "XDESUX", lang: "ES", pattern: r"de\s+la|del", add_stopper: true, description: "Genitive article" },
    ConnectorRow { tag: "SPPLCR", lang: "EN", pattern: r"comprising|consisting\s+of", add_stopper: true, description: "Containment marker" },
    ConnectorRow { tag: "SPPLCR", lang: "DE", pattern: r"bestehend\s+aus|umfassend", add_stopper: true, description: "Containment marker" },
    ConnectorRow { tag: "SPPLCR", lang: "ES", pattern: r"que\s+comprende", add_stopper: true, description: "Containment marker" },
    ConnectorRow { tag: "THEREOF", lang: "EN", pattern: "thereof|hereof", add_stopper: true, description: "Trailing back-reference" },
    ConnectorRow { tag: "BRCRPL", lang: "DE", pattern: "dessen|deren", add_stopper: true, description: "Possessive back-reference" },
    ConnectorRow { tag: "BRCRPL", lang: "ES", pattern: "sus?", add_stopper: true, description: "Possessive back-reference" },
];
