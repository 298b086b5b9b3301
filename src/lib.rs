#![doc = include_str!("../README.md")]
#![warn(clippy::pedantic, missing_docs, rust_2018_idioms)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod celex;
mod extract;
mod markup;
mod model;
mod pattern;
mod reflector;
mod sequence;
mod target;
mod token;

pub use extract::Reference;
pub use model::{AxisRole, Group, Language, LanguageError, LanguageModel, language_model};
pub use reflector::{Annotation, MarkupText, Mode, Options, Reflector};
pub use target::{Cycle, StdCoordinate, Target};
pub use token::{RefTag, RefToken, Span};

/// Everything that can go wrong while detecting and resolving
/// references.
///
/// Most kinds never escape the crate: the reference emitter consumes
/// them and decides per kind whether to skip the coordinate, skip and
/// count, or abort the sequence.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The CELEX codec cannot parse a citation ordinate.
    #[error("cannot parse citation ordinate '{0}'")]
    BadCitation(String),
    /// Contextualisation produced a nonsensical role mix.
    #[error("mixed container and other roles")]
    InconsistentTarget,
    /// A phrase-level coordinate reached target assembly.
    #[error("phrase elements are not supported")]
    UnsupportedRole,
    /// A back-reference found nothing to join against.
    #[error("back-reference could not be resolved against recent targets")]
    Joining,
    /// Nesting detected levels that violate the tree invariants.
    #[error("nesting error: {0}")]
    Nesting(&'static str),
    /// The Regulation/Directive citation fallback bounced more than
    /// once.
    #[error("citation fallback exceeded one hop for '{0}'")]
    RecursionDepthExceeded(String),
    /// An internal guard tripped; the offending coordinate is skipped.
    #[error("invariant violated: {0}")]
    Invariant(&'static str),
}
