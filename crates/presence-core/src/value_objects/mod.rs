//! Value objects - immutable, validated domain values

mod member;

pub use member::Member;
