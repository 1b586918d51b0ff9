//! # Record Carrier Types

use crate::{
    record::sparse_vector::SparseVector,
    types::{FPHashMap, SymbolIndex},
};

/// One token in a token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The token text.
    pub text: String,

    /// An optional collaborator-supplied tag (POS, segment label).
    pub tag: Option<String>,
}

impl Token {
    /// Create an untagged token.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: None,
        }
    }

    /// Create a tagged token.
    pub fn tagged(
        text: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            tag: Some(tag.into()),
        }
    }
}

/// The active representation of a record's data.
///
/// Exactly one variant is active at a time; each stage accepts one
/// variant and either transforms it in place or transitions it to the
/// next representation. A stage handed the wrong variant fails with
/// [`crate::errors::FeaturePipeError::TypeMismatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// An unresolved source handle (a path, uri, or inline text).
    Raw(String),

    /// A character sequence.
    Chars(String),

    /// A token sequence.
    Tokens(Vec<Token>),

    /// A feature-index sequence over the pipeline's data alphabet.
    Indices(Vec<SymbolIndex>),

    /// A sparse feature vector.
    Vector(SparseVector),
}

impl Payload {
    /// The name of the active variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Raw(_) => "raw",
            Payload::Chars(_) => "chars",
            Payload::Tokens(_) => "tokens",
            Payload::Indices(_) => "indices",
            Payload::Vector(_) => "vector",
        }
    }
}

/// The record's target (label) slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// No target; unlabeled data.
    None,

    /// A raw label value, not yet bound to the target alphabet.
    Raw(String),

    /// A label index resolved against the pipeline's target alphabet.
    Label(SymbolIndex),
}

/// The unit of data flowing through a pipeline.
///
/// Created per input item; flows through exactly one pipeline
/// invocation. Stages must not retain records - shared state belongs
/// in the pipeline's alphabets.
#[derive(Debug, Clone)]
pub struct Record {
    /// An optional record name, for diagnostics.
    pub name: Option<String>,

    /// The active data representation.
    pub data: Payload,

    /// The target slot.
    pub target: Target,

    /// Optional provenance (file, corpus, url).
    pub source: Option<String>,

    /// Open key/value side-channel.
    pub properties: FPHashMap<String, serde_json::Value>,
}

impl Record {
    /// Create a record with the given data and no name, target, or source.
    pub fn new(data: Payload) -> Self {
        Self {
            name: None,
            data,
            target: Target::None,
            source: None,
            properties: FPHashMap::default(),
        }
    }

    /// Set the record name.
    pub fn with_name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the raw target value.
    pub fn with_target(
        mut self,
        target: impl Into<String>,
    ) -> Self {
        self.target = Target::Raw(target.into());
        self
    }

    /// Set the provenance.
    pub fn with_source(
        mut self,
        source: impl Into<String>,
    ) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The record's name and source, for error messages.
    pub fn diagnostic_name(&self) -> String {
        let name = self.name.as_deref().unwrap_or("<unnamed>");
        match &self.source {
            Some(source) => format!("{name} ({source})"),
            None => name.to_string(),
        }
    }
}
