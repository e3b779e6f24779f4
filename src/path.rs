//! Paths locating values in nested structures.
//!
//! A [`JsonPath`] is built one segment per nesting level. Extending a path
//! always produces a new value, so sibling branches validated against the same
//! parent never observe each other's segments.

use std::fmt::{self, Display};

/// A single step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A record key (e.g., `user`, `email`)
    Field(String),
    /// A sequence position (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Returns true if this segment renders in bracket form.
    ///
    /// Indices always do. Field names made entirely of ASCII digits do too,
    /// since a stringified index and such a key are indistinguishable.
    pub fn is_bracketed(&self) -> bool {
        match self {
            PathSegment::Index(_) => true,
            PathSegment::Field(name) => {
                !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
            }
        }
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// A location inside a nested value, empty at the root.
///
/// # Example
///
/// ```rust
/// use pathwise::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("a")
///     .push_index(2)
///     .push_field("b");
///
/// assert_eq!(path.to_string(), "a[2].b");
/// assert_eq!(path.to_segments(), vec!["a", "2", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns a new path with `segment` appended.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the segments as strings, indices stringified.
    pub fn to_segments(&self) -> Vec<String> {
        self.segments.iter().map(|s| s.to_string()).collect()
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl<S: Into<String>> FromIterator<S> for JsonPath {
    /// Builds a path from string segments. Every segment becomes a field;
    /// digit-only segments still render in bracket form.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(PathSegment::field).collect(),
        }
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if segment.is_bracketed() {
                write!(f, "[{}]", segment)?;
            } else {
                if i > 0 {
                    write!(f, ".")?;
                }
                write!(f, "{}", segment)?;
            }
        }
        Ok(())
    }
}
