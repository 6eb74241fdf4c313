//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::sorted_triple::SortedTriple;

mod center;
pub mod hashmap;
mod sorted_triple;
