//! Mount path ordering primitive.
//!
//! # Responsibilities
//! - Normalize a module's mount path into its segment list
//! - Order mount paths so the most specific one is tried first
//!
//! # Design Decisions
//! - More segments sort first; ties break lexicographically per segment
//! - Distinct source strings never compare equal (required for correct
//!   BTreeMap semantics)
//! - Immutable after construction

use std::cmp::Ordering;
use std::fmt;

/// The base path prefix owned by one sibling module within a shared
/// virtual host.
///
/// Used only as an ordering key: iterating a `BTreeMap<MountPath, _>`
/// visits the most specific mount first, so a module at `/a/b` is tried
/// before a sibling at `/a` when resolving an endpoint under `/a/b/`.
#[derive(Debug, Clone)]
pub struct MountPath {
    source: String,
    segments: Vec<String>,
}

impl MountPath {
    /// Create a mount path from its registered form, e.g. `/app`.
    pub fn new(path: impl Into<String>) -> Self {
        let source = path.into();
        let segments = source
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        Self { source, segments }
    }

    /// The mount path exactly as registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of non-empty `/`-separated segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Whether `request_path` falls under this mount.
    pub fn matches(&self, request_path: &str) -> bool {
        request_path.starts_with(&self.source)
    }
}

impl fmt::Display for MountPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for MountPath {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for MountPath {}

impl std::hash::Hash for MountPath {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl PartialOrd for MountPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MountPath {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.source == other.source {
            return Ordering::Equal;
        }
        // Deeper mounts first, then alphabetically per segment. The
        // final source comparison keeps the order total when two
        // distinct paths normalize to the same segment list.
        other
            .segments
            .len()
            .cmp(&self.segments.len())
            .then_with(|| self.segments.cmp(&other.segments))
            .then_with(|| self.source.cmp(&other.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_deeper_mount_sorts_first() {
        let shallow = MountPath::new("/a");
        let deep = MountPath::new("/a/b");
        assert!(deep < shallow);
    }

    #[test]
    fn test_equal_depth_sorts_lexicographically() {
        let a = MountPath::new("/app");
        let b = MountPath::new("/zoo");
        assert!(a < b);
    }

    #[test]
    fn test_identical_sources_are_equal() {
        let a = MountPath::new("/app");
        let b = MountPath::new("/app");
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_distinct_sources_never_equal() {
        // Same segment list after normalization, different source.
        let a = MountPath::new("/app");
        let b = MountPath::new("/app/");
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_order_is_antisymmetric() {
        let paths = ["/a", "/a/b", "/a/b/c", "/b", "/b/a", "/app/"];
        for x in &paths {
            for y in &paths {
                let (x, y) = (MountPath::new(*x), MountPath::new(*y));
                assert_eq!(x.cmp(&y), y.cmp(&x).reverse(), "{} vs {}", x, y);
            }
        }
    }

    #[test]
    fn test_btreemap_iterates_most_specific_first() {
        let mut map = BTreeMap::new();
        map.insert(MountPath::new("/a"), "shallow");
        map.insert(MountPath::new("/a/b"), "deep");
        map.insert(MountPath::new("/a/b/c"), "deepest");

        let order: Vec<_> = map.keys().map(|p| p.as_str()).collect();
        assert_eq!(order, vec!["/a/b/c", "/a/b", "/a"]);
    }

    #[test]
    fn test_matches_is_plain_prefix() {
        let mount = MountPath::new("/a/b");
        assert!(mount.matches("/a/b/c"));
        assert!(mount.matches("/a/b"));
        assert!(!mount.matches("/a/x"));
    }
}
