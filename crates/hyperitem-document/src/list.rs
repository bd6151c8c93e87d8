/// Implements the shared collection surface of a `Vec` newtype: lookup by
/// predicate, filtering into a new list, and iteration.
macro_rules! list_type {
    ($list:ident, $elem:ty) => {
        impl $list {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn push(&mut self, elem: $elem) {
                self.0.push(elem);
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $elem> {
                self.0.iter()
            }

            pub fn find(&self, accept: impl Fn(&$elem) -> bool) -> Option<&$elem> {
                self.0.iter().find(|e| accept(e))
            }

            pub fn filter(&self, accept: impl Fn(&$elem) -> bool) -> $list {
                self.0.iter().filter(|e| accept(e)).cloned().collect()
            }
        }

        impl Extend<$elem> for $list {
            fn extend<I: IntoIterator<Item = $elem>>(&mut self, iter: I) {
                self.0.extend(iter);
            }
        }

        impl FromIterator<$elem> for $list {
            fn from_iter<I: IntoIterator<Item = $elem>>(iter: I) -> Self {
                $list(iter.into_iter().collect())
            }
        }

        impl From<Vec<$elem>> for $list {
            fn from(v: Vec<$elem>) -> Self {
                $list(v)
            }
        }

        impl IntoIterator for $list {
            type Item = $elem;
            type IntoIter = std::vec::IntoIter<$elem>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $list {
            type Item = &'a $elem;
            type IntoIter = std::slice::Iter<'a, $elem>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

pub(crate) use list_type;
