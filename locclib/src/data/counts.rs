//! Core line count value type.
//!
//! Every scope the reports talk about (a file, a language, the whole run) is
//! described by the same three numbers:
//!
//! - **code**: lines containing at least one code token
//! - **comment**: lines containing only comment text
//! - **blank**: whitespace-only lines
//!
//! The total is always derived, never stored, so it cannot drift from its parts.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Line counts for some scope (file, language or total).
///
/// `Counts` is a small `Copy` value. Addition is pointwise, so summing in any
/// order gives the same result and [`Counts::ZERO`] is the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Counts {
    /// Lines containing code
    pub code: u64,
    /// Lines containing only comments
    pub comment: u64,
    /// Blank lines (whitespace only)
    pub blank: u64,
}

impl Counts {
    /// No lines counted.
    pub const ZERO: Counts = Counts {
        code: 0,
        comment: 0,
        blank: 0,
    };

    /// Create counts from the three line categories.
    pub const fn new(code: u64, comment: u64, blank: u64) -> Self {
        Self {
            code,
            comment,
            blank,
        }
    }

    /// Total lines (code + comment + blank).
    pub fn total(&self) -> u64 {
        self.code + self.comment + self.blank
    }

    /// Pointwise sum of two counts.
    pub fn add(a: Counts, b: Counts) -> Counts {
        a + b
    }

    /// Whether no lines at all were counted.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for Counts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            code: self.code + other.code,
            comment: self.comment + other.comment,
            blank: self.blank + other.blank,
        }
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, other: Self) {
        self.code += other.code;
        self.comment += other.comment;
        self.blank += other.blank;
    }
}

impl Sum for Counts {
    fn sum<I: Iterator<Item = Counts>>(iter: I) -> Self {
        iter.fold(Counts::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Counts> for Counts {
    fn sum<I: Iterator<Item = &'a Counts>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_default() {
        let counts = Counts::default();
        assert_eq!(counts, Counts::ZERO);
        assert_eq!(counts.total(), 0);
        assert!(counts.is_zero());
    }

    #[test]
    fn test_counts_total() {
        let counts = Counts::new(12, 5, 3);
        assert_eq!(counts.total(), 20);
        assert!(!counts.is_zero());
    }

    #[test]
    fn test_counts_add() {
        let a = Counts::new(100, 30, 15);
        let b = Counts::new(50, 5, 10);
        let sum = a + b;
        assert_eq!(sum.code, 150);
        assert_eq!(sum.comment, 35);
        assert_eq!(sum.blank, 25);
        assert_eq!(sum.total(), 210);
        assert_eq!(Counts::add(a, b), sum);
    }

    #[test]
    fn test_counts_add_laws() {
        let a = Counts::new(1, 2, 3);
        let b = Counts::new(40, 0, 7);
        let c = Counts::new(0, 9, 0);
        assert_eq!(a + b, b + a);
        assert_eq!((a + b) + c, a + (b + c));
        assert_eq!(a + Counts::ZERO, a);
        assert_eq!(Counts::ZERO + a, a);
    }

    #[test]
    fn test_counts_add_assign_and_sum() {
        let mut acc = Counts::ZERO;
        acc += Counts::new(1, 1, 1);
        acc += Counts::new(2, 0, 4);
        assert_eq!(acc, Counts::new(3, 1, 5));

        let all = [Counts::new(1, 1, 1), Counts::new(2, 0, 4)];
        let owned: Counts = all.iter().copied().sum();
        let borrowed: Counts = all.iter().sum();
        assert_eq!(owned, acc);
        assert_eq!(borrowed, acc);

        let empty: Counts = std::iter::empty::<Counts>().sum();
        assert_eq!(empty, Counts::ZERO);
    }
}
