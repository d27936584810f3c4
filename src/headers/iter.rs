use super::{HeaderField, HeaderMap};

impl<'a> IntoIterator for &'a HeaderMap {
    type Item = <Iter<'a> as Iterator>::Item;

    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub(crate) type Slots<'a> = std::iter::Flatten<std::slice::Iter<'a, Option<HeaderField>>>;

/// Iterator returned from [`HeaderMap::iter`].
///
/// Yields one `(name, value)` pair per stored value, in storage order.
#[derive(Debug)]
pub struct Iter<'a> {
    fields: Slots<'a>,
    current: Option<(&'a str, std::slice::Iter<'a, String>)>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(map: &'a HeaderMap) -> Self {
        Self {
            fields: map.fields(),
            current: None,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((name, values)) = &mut self.current
                && let Some(value) = values.next()
            {
                return Some((*name, value.as_str()));
            }

            let field = self.fields.next()?;
            self.current = Some((field.name(), field.values().iter()));
        }
    }
}

/// Iterator returned from [`HeaderMap::names`].
#[derive(Debug)]
pub struct Names<'a> {
    fields: Slots<'a>,
}

impl<'a> Names<'a> {
    pub(crate) fn new(map: &'a HeaderMap) -> Self {
        Self {
            fields: map.fields(),
        }
    }
}

impl<'a> Iterator for Names<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.fields.next().map(HeaderField::name)
    }
}
