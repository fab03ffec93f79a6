use crate::TableError;

/// A key and its value, owned by exactly one slot of a [`HashTable`].
///
/// [`HashTable`]: crate::HashTable
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct Entry {
    key: String,
    value: Box<[u8]>,
}

impl Entry {
    /// Copies `key` and `value` into freshly reserved storage.
    ///
    /// Fails with [`TableError::Allocation`] instead of aborting when
    /// the allocator can't serve either buffer.
    pub fn try_new(key: &str, value: &[u8]) -> Result<Self, TableError> {
        let mut k = String::new();
        k.try_reserve_exact(key.len())?;
        k.push_str(key);

        let mut v = Vec::new();
        v.try_reserve_exact(value.len())?;
        v.extend_from_slice(value);

        Ok(Self {
            key: k,
            value: v.into_boxed_slice(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Splits the entry into its owned parts
    pub fn into_parts(self) -> (String, Box<[u8]>) {
        (self.key, self.value)
    }
}

#[cfg(test)]
mod test {
    use super::Entry;

    #[test]
    fn copies_key_and_value() {
        let key = String::from("peti");
        let value = vec![1u8, 2, 3];
        let e = Entry::try_new(&key, &value).unwrap();
        drop(key);
        drop(value);

        assert_eq!(e.key(), "peti");
        assert_eq!(e.value(), &[1, 2, 3]);
    }

    #[test]
    fn empty_value() {
        let e = Entry::try_new("", &[]).unwrap();
        assert_eq!(e.key(), "");
        assert!(e.value().is_empty());

        let (k, v) = e.into_parts();
        assert!(k.is_empty());
        assert_eq!(v.len(), 0);
    }
}
