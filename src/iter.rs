use std::iter::FusedIterator;

use crate::{HeaderField, HeaderName, HeaderValue, Headers};

impl<'a> IntoIterator for &'a Headers {
    type Item = <Entries as Iterator>::Item;

    type IntoIter = Entries;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// Iterator over sorted and combined header pairs.
///
/// Returned from [`Headers::entries`]. The pairs are captured when the iterator is created, later
/// mutation of the [`Headers`] is not observed.
#[derive(Debug, Clone)]
pub struct Entries {
    iter: std::vec::IntoIter<HeaderField>,
}

impl Entries {
    pub(crate) fn new(snapshot: Vec<HeaderField>) -> Self {
        Self {
            iter: snapshot.into_iter(),
        }
    }
}

impl Iterator for Entries {
    type Item = (HeaderName, HeaderValue);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(HeaderField::into_parts)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Entries { }
impl FusedIterator for Entries { }

/// Iterator over sorted header names, returned from [`Headers::keys`].
#[derive(Debug, Clone)]
pub struct Keys {
    entries: Entries,
}

impl Keys {
    pub(crate) fn new(entries: Entries) -> Self {
        Self { entries }
    }
}

impl Iterator for Keys {
    type Item = HeaderName;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(name, _)| name)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Keys { }
impl FusedIterator for Keys { }

/// Iterator over combined header values in name order, returned from [`Headers::values`].
#[derive(Debug, Clone)]
pub struct Values {
    entries: Entries,
}

impl Values {
    pub(crate) fn new(entries: Entries) -> Self {
        Self { entries }
    }
}

impl Iterator for Values {
    type Item = HeaderValue;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Values { }
impl FusedIterator for Values { }
