/// Header Field.
///
/// Contains the header name, as inserted, and its ordered values.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct HeaderField {
    hash: u32,
    name: String,
    values: Vec<String>,
}

impl HeaderField {
    pub(crate) const fn new(hash: u32, name: String, values: Vec<String>) -> Self {
        Self { hash, name, values }
    }

    /// Returns cached hash.
    #[inline]
    pub(crate) const fn cached_hash(&self) -> u32 {
        self.hash
    }

    #[inline]
    pub(crate) fn eq_hash_and_name(&self, hash: u32, name: &str) -> bool {
        self.hash == hash && self.name == name
    }

    /// Returns the header name with its original casing.
    #[inline]
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Returns the values in insertion order.
    ///
    /// The slice may be empty, or contain empty strings.
    #[inline]
    pub(crate) fn values(&self) -> &[String] {
        &self.values
    }

    pub(crate) fn push(&mut self, value: String) {
        self.values.push(value);
    }

    pub(crate) fn replace(&mut self, values: Vec<String>) -> Vec<String> {
        std::mem::replace(&mut self.values, values)
    }

    /// Consume [`HeaderField`] into its name and values.
    #[inline]
    pub(crate) fn into_parts(self) -> (String, Vec<String>) {
        (self.name, self.values)
    }
}

impl std::fmt::Debug for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderField")
            .field("name", &self.name)
            .field("values", &self.values)
            .finish()
    }
}
