use core::cmp::PartialOrd;
use core::ops::Deref;

/// A triple of elements sorted in increasing order.
///
/// Two triples built from the same three elements, in any order, compare
/// equal and hash identically. This makes it a canonical key for triangular
/// faces given by vertex indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SortedTriple<T: PartialOrd>([T; 3]);

impl<T: PartialOrd + Copy> SortedTriple<T> {
    /// Sorts three elements in increasing order into a new triple.
    pub fn new(element1: T, element2: T, element3: T) -> Self {
        let mut elts = [element1, element2, element3];

        if elts[0] > elts[1] {
            elts.swap(0, 1);
        }
        if elts[1] > elts[2] {
            elts.swap(1, 2);
        }
        if elts[0] > elts[1] {
            elts.swap(0, 1);
        }

        SortedTriple(elts)
    }
}

impl<T: PartialOrd> Deref for SortedTriple<T> {
    type Target = [T; 3];

    fn deref(&self) -> &[T; 3] {
        &self.0
    }
}
