use thiserror::Error;

/// Text substituted when every part of a template rendered to nothing
pub const FALLBACK_NAME: &str = "untitled";

/// Named fields a template can reference inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    /// `sn`: zero-padded season number
    SeasonNumber,
    /// `pn`: zero-padded part number
    PartNumber,
    /// `st`: series/season title
    SeasonTitle,
    /// `en`: zero-padded episode number
    EpisodeNumber,
    /// `et`: episode title
    EpisodeTitle,
}

impl Placeholder {
    pub const ALL: [Placeholder; 5] = [
        Placeholder::SeasonNumber,
        Placeholder::PartNumber,
        Placeholder::SeasonTitle,
        Placeholder::EpisodeNumber,
        Placeholder::EpisodeTitle,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Placeholder::SeasonNumber => "sn",
            Placeholder::PartNumber => "pn",
            Placeholder::SeasonTitle => "st",
            Placeholder::EpisodeNumber => "en",
            Placeholder::EpisodeTitle => "et",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

/// A single token inside a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, including preserved whitespace and nested-group contents
    Literal(String),
    Placeholder(Placeholder),
    /// `\&`
    EscapedAmpersand,
}

/// A `{...}` span whose output collapses to `default` when a referenced field is absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub tokens: Vec<Token>,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Group(Group),
}

/// A template string parsed into segments, reusable across renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate {
    pub(super) source: String,
    pub(super) segments: Vec<Segment>,
}

impl ParsedTemplate {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholders referenced anywhere in the template, in order of appearance
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut found = Vec::new();
        for segment in &self.segments {
            if let Segment::Group(group) = segment {
                for token in &group.tokens {
                    if let Token::Placeholder(p) = token {
                        if !found.contains(p) {
                            found.push(*p);
                        }
                    }
                }
            }
        }
        found
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unclosed '{{' at byte {offset} in template \"{template}\"")]
    UnclosedGroup { template: String, offset: usize },

    #[error("Unexpected '}}' at byte {offset} in template \"{template}\"")]
    UnexpectedClose { template: String, offset: usize },
}
