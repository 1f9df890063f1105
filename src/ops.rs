// ops.rs
//
// Operator sugar for Bits. Two Bits operands must share a width (enforced by
// the type); a plain integer operand adopts the other side's width. Results
// wrap modulo 2^N.

use std::cmp::Ordering;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};

use crate::bits::Bits;
use crate::width::{MAX_WIDTH, Word};

/// Shift amounts wrap within the machine word.
const SHIFT_MASK: Word = MAX_WIDTH as Word - 1;

fn divide(lhs: Word, rhs: Word) -> Word {
    lhs.checked_div(rhs).unwrap_or(Word::MAX)
}

fn remainder(lhs: Word, rhs: Word) -> Word {
    lhs.checked_rem(rhs).unwrap_or(lhs)
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<const N: usize> $trait for Bits<N> {
            type Output = Bits<N>;

            fn $method(self, rhs: Bits<N>) -> Bits<N> {
                Bits::new($op(self.value(), rhs.value()))
            }
        }

        impl<const N: usize> $trait<Word> for Bits<N> {
            type Output = Bits<N>;

            fn $method(self, rhs: Word) -> Bits<N> {
                Bits::new($op(self.value(), rhs))
            }
        }

        impl<const N: usize> $trait<Bits<N>> for Word {
            type Output = Bits<N>;

            fn $method(self, rhs: Bits<N>) -> Bits<N> {
                Bits::new($op(self, rhs.value()))
            }
        }
    };
}

binary_op!(Add, add, Word::wrapping_add);
binary_op!(Sub, sub, Word::wrapping_sub);
binary_op!(Mul, mul, Word::wrapping_mul);
binary_op!(Div, div, divide);
binary_op!(Rem, rem, remainder);
binary_op!(BitAnd, bitand, |a: Word, b: Word| a & b);
binary_op!(BitOr, bitor, |a: Word, b: Word| a | b);
binary_op!(BitXor, bitxor, |a: Word, b: Word| a ^ b);

impl<const N: usize> Not for Bits<N> {
    type Output = Bits<N>;

    fn not(self) -> Bits<N> {
        Bits::new(!self.value())
    }
}

impl<const N: usize> Neg for Bits<N> {
    type Output = Bits<N>;

    fn neg(self) -> Bits<N> {
        Bits::new(self.value().wrapping_neg())
    }
}

// The shift amount may have any width; only the value being shifted fixes
// the result width.
impl<const N: usize, const M: usize> Shl<Bits<M>> for Bits<N> {
    type Output = Bits<N>;

    fn shl(self, rhs: Bits<M>) -> Bits<N> {
        self << rhs.value()
    }
}

impl<const N: usize> Shl<Word> for Bits<N> {
    type Output = Bits<N>;

    fn shl(self, rhs: Word) -> Bits<N> {
        Bits::new(self.value() << (rhs & SHIFT_MASK))
    }
}

impl<const N: usize, const M: usize> Shr<Bits<M>> for Bits<N> {
    type Output = Bits<N>;

    fn shr(self, rhs: Bits<M>) -> Bits<N> {
        self >> rhs.value()
    }
}

impl<const N: usize> Shr<Word> for Bits<N> {
    type Output = Bits<N>;

    fn shr(self, rhs: Word) -> Bits<N> {
        Bits::new(self.value() >> (rhs & SHIFT_MASK))
    }
}

impl<const N: usize> Bits<N> {
    /// Arithmetic right shift: the sign bit of the `N`-bit value fills in.
    pub fn sra(self, amount: impl Into<Word>) -> Bits<N> {
        Bits::new((self.to_signed() >> (amount.into() & SHIFT_MASK)) as Word)
    }

    /// Signed less-than.
    pub fn lt_signed(self, rhs: Bits<N>) -> bool {
        self.to_signed() < rhs.to_signed()
    }

    /// Signed greater-or-equal.
    pub fn ge_signed(self, rhs: Bits<N>) -> bool {
        self.to_signed() >= rhs.to_signed()
    }
}

impl<const N: usize> PartialEq<Word> for Bits<N> {
    fn eq(&self, other: &Word) -> bool {
        self.value() == *other
    }
}

impl<const N: usize> PartialEq<Bits<N>> for Word {
    fn eq(&self, other: &Bits<N>) -> bool {
        *self == other.value()
    }
}

impl<const N: usize> PartialOrd<Word> for Bits<N> {
    fn partial_cmp(&self, other: &Word) -> Option<Ordering> {
        self.value().partial_cmp(other)
    }
}

impl<const N: usize> PartialOrd<Bits<N>> for Word {
    fn partial_cmp(&self, other: &Bits<N>) -> Option<Ordering> {
        self.partial_cmp(&other.value())
    }
}
