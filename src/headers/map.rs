use super::{
    HeaderField, HeaderOrder,
    iter::{Iter, Names, Slots},
    matches,
    order::HEADER_ORDER_KEY,
};

/// HTTP Headers Multimap.
///
/// Maps a header name, with its casing preserved, to an ordered list of values. Name identity
/// is exact: `Accept` and `accept` are two distinct entries.
///
/// The map also owns an optional [`HeaderOrder`], the hint that decides the emission order on
/// serialization. For interop, every operation given [`HEADER_ORDER_KEY`] as the name acts on
/// that hint instead of on the stored headers.
///
/// ```rust
/// use hdrorder::HeaderMap;
///
/// let mut map = HeaderMap::new();
/// map.add("Accept", "text/html");
/// map.add("Accept", "*/*");
/// map.set("Host", "example.com");
///
/// assert_eq!(map.get("Accept"), Some("text/html"));
/// assert_eq!(map.values("Accept"), ["text/html", "*/*"]);
/// assert!(map.get("accept").is_none());
/// ```
#[derive(Clone, Default)]
pub struct HeaderMap {
    /// open addressed table, capacity is zero or a power of two
    fields: Vec<Option<HeaderField>>,
    len: usize,
    order: Option<HeaderOrder>,
}

impl HeaderMap {
    /// Create new empty [`HeaderMap`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
            len: 0,
            order: None,
        }
    }

    /// Create new empty [`HeaderMap`] that can hold at least `capacity` header names without
    /// reallocating.
    ///
    /// If the `capacity` is `0`, this function does not allocate.
    pub fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            return Self::new();
        }
        // keep `capacity` below the load factor
        Self::with_slots((capacity * 10 / 7 + 1).next_power_of_two())
    }

    fn with_slots(slots: usize) -> Self {
        // it is required that slots is power of two, see `fn mask()`
        debug_assert!(slots.is_power_of_two());
        Self {
            fields: vec![None; slots],
            len: 0,
            order: None,
        }
    }

    /// Returns the number of distinct header names.
    ///
    /// The [`HeaderOrder`] hint is not counted.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map contains no header.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of header names the map can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.fields.len() * 7 / 10
    }
}

const fn mask(slots: usize, hash: u32) -> usize {
    // slots is always a power of two
    // any power of two - 1 will have all the appropriate bit set to mask the hash value
    hash as usize & (slots - 1)
}

const fn probe(slots: usize, index: usize) -> usize {
    (index + 1) & (slots - 1)
}

/// Cyclic distance from `from` forward to `to`.
const fn distance(slots: usize, from: usize, to: usize) -> usize {
    (to + slots - from) & (slots - 1)
}

// ===== Lookup =====

impl HeaderMap {
    /// Returns `true` if the map contains the exact header name.
    ///
    /// For [`HEADER_ORDER_KEY`], returns whether an ordering hint is set.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        if name == HEADER_ORDER_KEY {
            return self.order.is_some();
        }
        self.field(name).is_some()
    }

    /// Returns the first value of the header.
    ///
    /// Returns `None` if the header is absent or holds no value.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    /// Returns all values of the header in insertion order.
    ///
    /// Returns an empty slice if the header is absent.
    pub fn values(&self, name: &str) -> &[String] {
        if name == HEADER_ORDER_KEY {
            return match &self.order {
                Some(order) => order.as_slice(),
                None => &[],
            };
        }
        match self.field(name) {
            Some(field) => field.values(),
            None => &[],
        }
    }

    /// Returns an iterator over headers as name and value pair.
    ///
    /// A header with multiple values yields one pair per value, a header with no value yields
    /// nothing.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Returns an iterator over the stored header names.
    #[inline]
    pub fn names(&self) -> Names<'_> {
        Names::new(self)
    }

    /// Returns the ordering hint, if any.
    #[inline]
    pub const fn header_order(&self) -> Option<&HeaderOrder> {
        self.order.as_ref()
    }

    pub(crate) fn fields(&self) -> Slots<'_> {
        self.fields.iter().flatten()
    }

    fn field(&self, name: &str) -> Option<&HeaderField> {
        self.position(name).and_then(|index| self.fields[index].as_ref())
    }

    fn position(&self, name: &str) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let slots = self.fields.len();
        let hash = matches::hash(name.as_bytes());
        let mut index = mask(slots, hash);

        loop {
            // there is always a `None` slot because the load factor is limited
            let field = self.fields[index].as_ref()?;
            if field.eq_hash_and_name(hash, name) {
                return Some(index);
            }
            // hash collision, open address linear probing
            index = probe(slots, index);
        }
    }
}

// ===== Mutation =====

impl HeaderMap {
    /// Replace all values of the header with the single `value`.
    ///
    /// With [`HEADER_ORDER_KEY`], replaces the ordering hint with a single entry.
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.set_values(name, [value]);
    }

    /// Replace all values of the header with `values`.
    ///
    /// An empty `values` keeps the header present with no value, which serializes to nothing.
    pub fn set_values<K, I>(&mut self, name: K, values: I)
    where
        K: Into<String>,
        I: IntoIterator<Item: Into<String>>,
    {
        let name = name.into();
        let values = values.into_iter().map(Into::into).collect();
        if name == HEADER_ORDER_KEY {
            self.order = Some(HeaderOrder::from_vec(values));
            return;
        }
        self.insert_field(name, values, false);
    }

    /// Append `value` to the header, creating it if absent.
    ///
    /// With [`HEADER_ORDER_KEY`], appends an entry to the ordering hint.
    pub fn add<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        let name = name.into();
        let value = value.into();
        if name == HEADER_ORDER_KEY {
            self.order.get_or_insert_default().push(value);
            return;
        }
        self.insert_field(name, vec![value], true);
    }

    /// Removes a header from the map, returning its values if it was present.
    ///
    /// With [`HEADER_ORDER_KEY`], removes the ordering hint.
    pub fn delete(&mut self, name: &str) -> Option<Vec<String>> {
        if name == HEADER_ORDER_KEY {
            return self.order.take().map(HeaderOrder::into_vec);
        }
        self.remove_field(name).map(|field| field.into_parts().1)
    }

    /// Replace the ordering hint, returning the previous one.
    #[inline]
    pub fn set_header_order(&mut self, order: HeaderOrder) -> Option<HeaderOrder> {
        self.order.replace(order)
    }

    /// Returns a mutable reference to the ordering hint, if any.
    #[inline]
    pub fn header_order_mut(&mut self) -> Option<&mut HeaderOrder> {
        self.order.as_mut()
    }

    /// Removes the ordering hint.
    #[inline]
    pub fn take_header_order(&mut self) -> Option<HeaderOrder> {
        self.order.take()
    }

    /// Clear the map, removing all headers and the ordering hint.
    ///
    /// Allocated capacity is kept.
    pub fn clear(&mut self) {
        self.fields.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
        self.order = None;
    }

    fn insert_field(&mut self, name: String, values: Vec<String>, append: bool) {
        self.reserve_one();

        let slots = self.fields.len();
        let hash = matches::hash(name.as_bytes());
        let mut index = mask(slots, hash);

        loop {
            match &mut self.fields[index] {
                Some(field) => {
                    if field.eq_hash_and_name(hash, &name) {
                        if append {
                            values.into_iter().for_each(|value| field.push(value));
                        } else {
                            field.replace(values);
                        }
                        return;
                    }
                }
                // there is always `None` because the load factor is limited
                slot @ None => {
                    *slot = Some(HeaderField::new(hash, name, values));
                    self.len += 1;
                    return;
                }
            }

            // hash collision, open address linear probing
            index = probe(slots, index);
        }
    }

    fn remove_field(&mut self, name: &str) -> Option<HeaderField> {
        let mut hole = self.position(name)?;
        let removed = self.fields[hole].take();
        self.len -= 1;

        // backward shifting, keep every probe sequence free of holes
        let slots = self.fields.len();
        let mut next = probe(slots, hole);

        while let Some(field) = &self.fields[next] {
            let ideal = mask(slots, field.cached_hash());
            if distance(slots, ideal, hole) < distance(slots, ideal, next) {
                self.fields[hole] = self.fields[next].take();
                hole = next;
            }
            next = probe(slots, next);
        }

        removed
    }

    fn reserve_one(&mut self) {
        const LOAD_FACTOR_NUM: usize = 7;
        const LOAD_FACTOR_DEN: usize = 10;

        let slots = self.fields.len();
        if slots == 0 || (self.len + 1) * LOAD_FACTOR_DEN > slots * LOAD_FACTOR_NUM {
            self.grow(if slots == 0 { 4 } else { slots << 1 });
        }
    }

    /// Reserves capacity for at least `additional` more header names.
    pub fn reserve(&mut self, additional: usize) {
        if self.capacity() >= self.len + additional {
            return;
        }
        let slots = ((self.len + additional) * 10 / 7 + 1).next_power_of_two();
        self.grow(slots);
    }

    fn grow(&mut self, slots: usize) {
        let old = std::mem::replace(&mut self.fields, vec![None; slots]);

        for field in old.into_iter().flatten() {
            let mut index = mask(slots, field.cached_hash());
            while self.fields[index].is_some() {
                index = probe(slots, index);
            }
            self.fields[index] = Some(field);
        }
    }
}

// ===== Traits =====

impl std::fmt::Debug for HeaderMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        map.entries(self.fields().map(|field| (field.name(), field.values())));
        if let Some(order) = &self.order {
            map.entry(&HEADER_ORDER_KEY, &order.as_slice());
        }
        map.finish()
    }
}

impl PartialEq for HeaderMap {
    /// Two maps are equal when they hold the same names with the same values, and the same
    /// ordering hint. Storage layout is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.order == other.order
            && self
                .fields()
                .all(|field| other.field(field.name()).is_some_and(|o| o.values() == field.values()))
    }
}

impl Eq for HeaderMap {}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for HeaderMap {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.add(name, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
