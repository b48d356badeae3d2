//! Render paths for nested form controls
//!
//! A [`RenderPath`] is the chain of field names (and array indices) leading
//! from the root instance to a control. Its dot-joined form becomes the
//! control's `name` attribute.

use std::fmt;

/// Segment of a render path
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Record field access: `.field`
    Field(String),
    /// Array element access: `.0`, `.1`, ...
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// Path from the root instance to the current field (e.g. "user.address.city")
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderPath {
    segments: Vec<PathSegment>,
}

impl RenderPath {
    /// Create a root path (empty)
    pub fn root() -> Self {
        Self { segments: vec![] }
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the depth (number of segments)
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Return a new path with a field segment appended
    pub fn extend(&self, field_name: &str) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Field(field_name.to_string()));
        new
    }

    /// Return a new path with an array index segment appended
    pub fn extend_index(&self, idx: usize) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Index(idx));
        new
    }

    /// Get the last segment
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// DOM-safe identifier for this path: segments joined with `-`.
    ///
    /// Used for element ids, where `.` would need escaping in CSS selectors.
    /// Inside a segment `_` becomes `__` and `-` becomes `_h`, so every `-`
    /// in the result is a separator and distinct paths never share an id.
    pub fn dom_id(&self, prefix: &str) -> String {
        let joined = self
            .segments
            .iter()
            .map(|seg| escape_id_segment(&seg.to_string()))
            .collect::<Vec<_>>()
            .join("-");
        format!("{}{}", prefix, joined)
    }

    /// Human-readable form for diagnostics; the root path reads as `<root>`
    pub fn describe(&self) -> String {
        if self.is_root() {
            "<root>".to_string()
        } else {
            self.to_string()
        }
    }
}

fn escape_id_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '_' => out.push_str("__"),
            '-' => out.push_str("_h"),
            other => out.push(other),
        }
    }
    out
}

impl fmt::Display for RenderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}
