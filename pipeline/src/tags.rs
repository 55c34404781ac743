//! Qualified-name tag parsing.
//!
//! Corpus contract names follow a fixed convention: six `_`-separated
//! fields. The fields are opaque here -- their meaning belongs to the
//! upstream corpus generator -- and are carried into the mapping table
//! verbatim, with no normalization.

use crate::error::PipelineError;

/// Number of tag fields in a well-formed qualified name.
pub const TAG_COUNT: usize = 6;

/// The ordered tag fields of one qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTags {
    tags: [String; TAG_COUNT],
}

impl NameTags {
    /// Split `name` on `_` into exactly [`TAG_COUNT`] fields.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MalformedName`] (carrying the observed part
    /// count) when the split yields any other count.
    pub fn parse(name: &str) -> Result<Self, PipelineError> {
        let parts: Vec<String> = name.split('_').map(str::to_string).collect();
        let count = parts.len();
        let tags: [String; TAG_COUNT] =
            parts
                .try_into()
                .map_err(|_| PipelineError::MalformedName {
                    name: name.to_string(),
                    parts: count,
                })?;
        Ok(Self { tags })
    }

    /// The tag fields in name order.
    #[must_use]
    pub fn fields(&self) -> &[String; TAG_COUNT] {
        &self.tags
    }

    /// Bracketed display form, e.g. `{a,b,c,d,e,f}`.
    #[must_use]
    pub fn display_set(&self) -> String {
        format!("{{{}}}", self.tags.join(","))
    }
}
