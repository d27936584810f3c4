/// Pseudo header name that addresses the [`HeaderOrder`] hint through the regular
/// [`HeaderMap`][super::HeaderMap] operations.
///
/// The trailing `:` is not a token character, so no real header can collide with it. The name
/// is never stored as a header and never serialized.
pub const HEADER_ORDER_KEY: &str = "Header-Order:";

/// Explicit header emission order.
///
/// A list of header names, matched ASCII case-insensitively against the stored names when the
/// map is serialized. Stored headers follow the list order; names in the list that match no
/// stored header are skipped.
///
/// ```rust
/// use hdrorder::{HeaderMap, HeaderOrder};
///
/// let mut map = HeaderMap::new();
/// map.set("Host", "example.com");
/// map.set("User-Agent", "curl/8.0");
/// map.set_header_order(["user-agent", "host"].into_iter().collect());
///
/// let mut out = Vec::new();
/// map.write(&mut out).unwrap();
/// assert_eq!(out, b"User-Agent: curl/8.0\r\nHost: example.com\r\n");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderOrder {
    names: Vec<String>,
}

impl HeaderOrder {
    /// Create new empty [`HeaderOrder`].
    #[inline]
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    pub(crate) const fn from_vec(names: Vec<String>) -> Self {
        Self { names }
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.names
    }

    /// Append a name to the order.
    #[inline]
    pub fn push<S: Into<String>>(&mut self, name: S) {
        self.names.push(name.into());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the order lists no name.
    ///
    /// An empty order is not applied, the map is then serialized in sorted order.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for HeaderOrder {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for HeaderOrder {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for HeaderOrder {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

impl<'a> IntoIterator for &'a HeaderOrder {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
