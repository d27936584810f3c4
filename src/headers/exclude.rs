use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// A set of header names suppressed on serialization.
///
/// Matching is exact and case-sensitive against the stored header name.
///
/// ```rust
/// use hdrorder::HeaderMap;
///
/// let mut map = HeaderMap::new();
/// map.set("Content-Length", "0");
/// map.set("Expires", "-1");
///
/// let mut out = Vec::new();
/// map.write_subset(&mut out, &["Content-Length"], 0).unwrap();
/// assert_eq!(out, b"Expires: -1\r\n");
/// ```
pub trait Exclude {
    /// Returns `true` if the header `name` must not be written.
    fn excludes(&self, name: &str) -> bool;
}

/// Excludes nothing.
impl Exclude for () {
    #[inline]
    fn excludes(&self, _: &str) -> bool {
        false
    }
}

impl<T: Exclude + ?Sized> Exclude for &T {
    #[inline]
    fn excludes(&self, name: &str) -> bool {
        T::excludes(self, name)
    }
}

/// `None` excludes nothing.
impl<T: Exclude> Exclude for Option<T> {
    #[inline]
    fn excludes(&self, name: &str) -> bool {
        self.as_ref().is_some_and(|set| set.excludes(name))
    }
}

impl Exclude for [&str] {
    #[inline]
    fn excludes(&self, name: &str) -> bool {
        self.iter().any(|excluded| *excluded == name)
    }
}

impl<const N: usize> Exclude for [&str; N] {
    #[inline]
    fn excludes(&self, name: &str) -> bool {
        self.iter().any(|excluded| *excluded == name)
    }
}

impl<S: BuildHasher> Exclude for HashSet<String, S> {
    #[inline]
    fn excludes(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<S: BuildHasher> Exclude for HashSet<&str, S> {
    #[inline]
    fn excludes(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl Exclude for BTreeSet<String> {
    #[inline]
    fn excludes(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl Exclude for BTreeSet<&str> {
    #[inline]
    fn excludes(&self, name: &str) -> bool {
        self.contains(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn exact_case_match() {
        let set: HashSet<&str> = ["Content-Length"].into_iter().collect();
        assert!(set.excludes("Content-Length"));
        assert!(!set.excludes("content-length"));

        let owned: BTreeSet<String> = ["Expires".to_owned()].into_iter().collect();
        assert!(owned.excludes("Expires"));
        assert!(!owned.excludes("expires"));

        assert!(!().excludes("Expires"));
        assert!(!None::<[&str; 1]>.excludes("Expires"));
        assert!(Some(["Expires"]).excludes("Expires"));
        assert!((&["A", "B"][..]).excludes("B"));
    }
}
