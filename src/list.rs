use crate::{HeaderName, HeaderValue};

/// Header Field.
///
/// Contains a single [`HeaderName`] and [`HeaderValue`] pair as stored in [`HeaderList`].
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderField {
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderField {
    #[inline]
    pub(crate) const fn new(name: HeaderName, value: HeaderValue) -> Self {
        Self { name, value }
    }

    /// Returns reference to [`HeaderName`].
    #[inline]
    pub const fn name(&self) -> &HeaderName {
        &self.name
    }

    /// Returns reference to [`HeaderValue`].
    #[inline]
    pub const fn value(&self) -> &HeaderValue {
        &self.value
    }

    /// Consume [`HeaderField`] into [`HeaderName`] and [`HeaderValue`].
    #[inline]
    pub fn into_parts(self) -> (HeaderName, HeaderValue) {
        (self.name, self.value)
    }
}

impl std::fmt::Debug for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderField")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish()
    }
}

/// Ordered list of header fields.
///
/// Multiple fields may share the same name, each [`append`][HeaderList::append] is stored as
/// distinct field. Values sharing a name are only combined on read.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    fields: Vec<HeaderField>,
}

impl HeaderList {
    /// Create new empty [`HeaderList`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Returns the number of stored fields, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if list has no field.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over stored fields in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, HeaderField> {
        self.fields.iter()
    }

    /// Returns `true` if at least one field matches `name`.
    #[inline]
    pub fn contains(&self, name: &HeaderName) -> bool {
        self.fields.iter().any(|field| field.name == *name)
    }

    /// Returns all values matching `name` joined with `", "`.
    #[inline]
    pub fn get(&self, name: &HeaderName) -> Option<HeaderValue> {
        HeaderValue::combine(self.get_all(name))
    }

    /// Returns an iterator over values matching `name` in list order.
    #[inline]
    pub fn get_all<'a>(&'a self, name: &'a HeaderName) -> impl Iterator<Item = &'a HeaderValue> + 'a {
        self.fields
            .iter()
            .filter(move |field| field.name == *name)
            .map(HeaderField::value)
    }

    /// Append a new field at the end of the list.
    #[inline]
    pub fn append(&mut self, name: HeaderName, value: HeaderValue) {
        self.fields.push(HeaderField::new(name, value));
    }

    /// Replace all fields matching `name` with a single field.
    ///
    /// The new field takes the position of the first match, or the end of the list if there is
    /// none.
    pub fn set(&mut self, name: HeaderName, value: HeaderValue) {
        let Some(first) = self.fields.iter().position(|field| field.name == name) else {
            self.append(name, value);
            return;
        };

        let mut index = 0;
        self.fields.retain(|field| {
            let keep = index <= first || field.name != name;
            index += 1;
            keep
        });

        self.fields[first].value = value;
    }

    /// Removes all fields matching `name`, returning `true` if any was removed.
    pub fn delete(&mut self, name: &HeaderName) -> bool {
        let len = self.fields.len();
        self.fields.retain(|field| field.name != *name);
        len != self.fields.len()
    }

    /// Retains only the fields specified by the predicate.
    #[inline]
    pub fn retain<F: FnMut(&HeaderField) -> bool>(&mut self, f: F) {
        self.fields.retain(f);
    }

    /// Removes all fields.
    #[inline]
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Returns fields sorted by name ascending, with values sharing a name combined.
    pub fn sort_and_combine(&self) -> Vec<HeaderField> {
        let mut sorted: Vec<&HeaderField> = self.fields.iter().collect();
        // stable, values of the same name stay in list order
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut output: Vec<HeaderField> = Vec::new();
        let mut rest = sorted.as_slice();

        while let [first, ..] = rest {
            let count = rest.iter().take_while(|field| field.name == first.name).count();
            let (group, tail) = rest.split_at(count);
            if let Some(value) = HeaderValue::combine(group.iter().map(|field| &field.value)) {
                output.push(HeaderField::new(first.name.clone(), value));
            }
            rest = tail;
        }

        output
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type Item = &'a HeaderField;

    type IntoIter = std::slice::Iter<'a, HeaderField>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for HeaderList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|field| (&field.name, &field.value)))
            .finish()
    }
}
