//! Path module for novadb
//!
//! A path is a dot separated string (`"users.alice.email"`) addressing a
//! location inside a document.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use serde::{Serialize, Deserialize};

/// Errors that can occur when working with paths
#[derive(Error, Debug, PartialEq)]
pub enum PathError {
    #[error("Empty path")]
    EmptyPath,
}

/// A segment in a path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSegment(String);

impl PathSegment {
    /// Create a new path segment
    pub fn new<S: Into<String>>(segment: S) -> Self {
        PathSegment(segment.into())
    }

    /// Get the segment as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the segment as an array index
    pub fn as_index(&self) -> Option<usize> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }
}

/// A path in the document (e.g., "users.alice.profile.bio")
///
/// Empty segments produced by leading, trailing or doubled dots are kept
/// as empty-string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Create a path from a vector of segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::EmptyPath);
        }
        Ok(Path { segments })
    }

    /// Single-segment path naming a top-level key verbatim, dots included
    pub fn top_level<S: Into<String>>(key: S) -> Self {
        Path {
            segments: vec![PathSegment::new(key)],
        }
    }

    /// Get the number of segments in the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// A parsed path always holds at least one segment
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get all segments in the path
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Get a specific segment by index
    pub fn segment(&self, index: usize) -> Option<&PathSegment> {
        self.segments.get(index)
    }

    /// First segment, i.e. the top-level key this path lives under
    pub fn root(&self) -> &PathSegment {
        &self.segments[0]
    }

    /// Every segment except the last one
    pub fn parents(&self) -> &[PathSegment] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The final segment
    pub fn last(&self) -> &PathSegment {
        &self.segments[self.segments.len() - 1]
    }
}

/// Parse a string into a Path
impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::EmptyPath);
        }

        let segments = s.split('.')
            .map(PathSegment::new)
            .collect();

        Ok(Path { segments })
    }
}

/// Format a Path as a string with dot separators
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = self.segments
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(".");

        write!(f, "{}", path_str)
    }
}
