//! Bidirectional mapping between human citations and CELEX identifiers.
//!
//! A CELEX identifier has the shape `{sector}{year}{type}{number}`, e.g.
//! `32013R0575` for Regulation (EU) 575/2013. Regulations cite as
//! `number/year`, directives and decisions as `year/number`, and since
//! 2015 regulations may cite year-first too, so encoding runs a
//! plausibility gate over both readings instead of trusting the order.

use crate::{Error, model::Language};
use schnellru::{ByLength, LruMap};
use std::collections::HashMap;

/// No act of interest predates the Bretton Woods era.
const MIN_YEAR: i64 = 1944;

/// CELEX sector 3: legislation.
const SECTOR: char = '3';

/// CELEX type letter to document axis tag.
static INTER_TO_DOC: phf::Map<char, &'static str> = phf::phf_map! {
    'R' => "REG",
    'D' => "DEC",
    'L' => "DIR",
    'F' => "FDC",
};

/// The size cap for the encode memo.
const MEMO_SIZE: u32 = 1024;

/// The current year, the upper bound of the plausibility gate.
fn max_year() -> i64 {
    i64::from(time::OffsetDateTime::now_utc().year())
}

/// Whether it is plausible that `n` is a citation year.
fn year_test(n: i64) -> bool {
    (MIN_YEAR..=max_year()).contains(&n)
}

/// Reads the document type tag off a CELEX identifier, defaulting to the
/// generic `DOC`.
pub(crate) fn doc_type(celex: &str) -> &'static str {
    celex
        .chars()
        .nth(5)
        .and_then(|c| INTER_TO_DOC.get(&c))
        .copied()
        .unwrap_or("DOC")
}

/// Assembles a CELEX identifier, swapping the pair when only the number
/// passes the year gate.
fn build_celex(year: i64, number: i64, inter: char) -> String {
    let year = if year < 100 { year + 1900 } else { year };
    if year_test(number) && !year_test(year) {
        format!("{SECTOR}{number:04}{inter}{year:04}")
    } else {
        format!("{SECTOR}{year:04}{inter}{number:04}")
    }
}

/// Splits the final whitespace-separated chunk of an ordinate on `/`.
fn ordinate_pair(ordinate: &str) -> Option<(i64, i64)> {
    let chunk = ordinate.split_whitespace().next_back()?;
    let mut parts = chunk.split('/');
    let a = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    Some((a, b))
}

/// Encodes a Regulation ordinate (`"(EU) 575/2013"`, number-first).
///
/// Unparsable ordinates fall through to the directive reading with the
/// Regulation type letter; `depth` caps that bounce at one hop.
fn encode_reg(ordinate: &str, depth: u8) -> Result<String, Error> {
    if depth > 1 {
        return Err(Error::RecursionDepthExceeded(ordinate.to_string()));
    }
    let Some((mut number, mut year)) = ordinate_pair(ordinate) else {
        return encode_dir('R', ordinate, depth + 1);
    };
    // "(EU) 2016/679" style citations put the year first; the bracketed
    // sub-domain list plus a post-2014 leading value betrays them.
    if let Some(domains) = ordinate.split('(').nth(1).and_then(|s| s.split(')').next()) {
        let first = domains.split(',').next().unwrap_or("").trim().to_lowercase();
        if (first == "eu" || first == "ue") && number >= 2015 {
            (year, number) = (number, year);
        }
    }
    Ok(build_celex(year, number, 'R'))
}

/// Encodes a year-first ordinate (`"2004/39/EC"`) with the given type
/// letter, falling back to the Regulation reading when it does not parse.
fn encode_dir(inter: char, ordinate: &str, depth: u8) -> Result<String, Error> {
    let Some((year, number)) = ordinate_pair(ordinate) else {
        // Sometimes they write Directive (EU) .../... after all.
        let celex = encode_reg(ordinate, depth + 1)?;
        let year: i64 = celex[1..5].parse().map_err(|_| Error::BadCitation(ordinate.to_string()))?;
        let number: i64 = celex[6..10].parse().map_err(|_| Error::BadCitation(ordinate.to_string()))?;
        return Ok(build_celex(year, number, inter));
    };
    Ok(build_celex(year, number, inter))
}

/// The stateful citation codec.
///
/// Encoding remembers each `(celex, language)` pairing so that decoding
/// can return the very citation the input used; unseen identifiers
/// reconstruct the canonical format for their document type.
pub(crate) struct Celexer {
    /// Encode memo, capped.
    memo: LruMap<(String, String, Language), String, ByLength>,
    /// `(celex, language)` -> `(doc tag, original citation)`.
    inverse: HashMap<(String, Language), (String, String)>,
}

impl Celexer {
    pub fn new() -> Self {
        Self {
            memo: LruMap::new(ByLength::new(MEMO_SIZE)),
            inverse: HashMap::new(),
        }
    }

    /// Whether `tag` names a CELEX-bearing document axis.
    pub fn is_doc_axis(tag: &str) -> bool {
        matches!(tag, "REG" | "DEC" | "DIR" | "FDC")
    }

    /// Encodes a document citation into its CELEX identifier.
    pub fn encode(
        &mut self,
        axis_tag: &str,
        ordinate: &str,
        language: Language,
    ) -> Result<String, Error> {
        if ordinate.trim().is_empty() {
            return Err(Error::BadCitation(ordinate.to_string()));
        }
        let key = (axis_tag.to_string(), ordinate.to_string(), language);
        if let Some(celex) = self.memo.get(&key) {
            return Ok(celex.clone());
        }
        let celex = match axis_tag {
            "REG" => encode_reg(ordinate, 0),
            "DEC" => encode_dir('D', ordinate, 0),
            "DIR" => encode_dir('L', ordinate, 0),
            "FDC" => encode_dir('F', ordinate, 0),
            _ => Err(Error::BadCitation(ordinate.to_string())),
        }?;
        self.inverse.insert(
            (celex.clone(), language),
            (axis_tag.to_string(), ordinate.to_string()),
        );
        self.memo.insert(key, celex.clone());
        Ok(celex)
    }

    /// Decodes a CELEX identifier into `(doc tag, citation)`, preferring
    /// the memorised original input for this language.
    pub fn decode(&self, celex: &str, language: Language) -> (String, String) {
        if let Some((tag, citation)) = self.inverse.get(&(celex.to_string(), language)) {
            return (tag.clone(), citation.clone());
        }
        Self::fallback_inversion(celex)
    }

    /// Reconstructs the canonical citation for an unseen identifier.
    fn fallback_inversion(celex: &str) -> (String, String) {
        let tag = doc_type(celex);
        if tag == "DOC" || celex.len() < 10 || !celex[6..10].bytes().all(|b| b.is_ascii_digit()) {
            return (tag.to_string(), celex.to_string());
        }
        let year = &celex[1..5];
        let number = celex[6..10].trim_start_matches('0');
        let number = if number.is_empty() { "0" } else { number };
        let citation = if tag == "REG" {
            format!("{number}/{year}")
        } else {
            format!("{year}/{number}")
        };
        (tag.to_string(), citation)
    }

    /// Drops all memory.
    pub fn reset(&mut self) {
        self.memo = LruMap::new(ByLength::new(MEMO_SIZE));
        self.inverse.clear();
    }
}
