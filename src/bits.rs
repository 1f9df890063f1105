// bits.rs
//
// Fixed-width unsigned values. The width is part of the type, so combining
// values of different widths is a compile error rather than a runtime check.

use std::fmt;

use crate::error::{CHECKS, ErrorKind, SimError, or_fatal};
use crate::width::{self, BitPack, MAX_WIDTH, SignedWord, Word};

/// An unsigned value of exactly `N` bits, held modulo 2^N.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bits<const N: usize> {
    data: Word,
}

impl<const N: usize> Bits<N> {
    /// Width in bits.
    pub const WIDTH: usize = N;

    /// Build a value, keeping only the low `N` bits of `value`.
    pub const fn new(value: Word) -> Self {
        width::assert_width::<N>();
        Bits { data: width::truncate(value, N) }
    }

    pub const fn zero() -> Self {
        Self::new(0)
    }

    pub const fn ones() -> Self {
        Self::new(Word::MAX)
    }

    /// Build a value from a raw integer and a width known only at runtime.
    ///
    /// The width must equal `N`; the value is truncated like [`Bits::new`].
    #[track_caller]
    pub fn try_from_width(value: Word, width: usize) -> Result<Self, SimError> {
        if width != N {
            return Err(SimError::here(ErrorKind::WidthMismatch { expected: N, found: width }));
        }
        Ok(Self::new(value))
    }

    /// Build a value that must fit in `N` bits without truncation.
    #[track_caller]
    pub fn try_exact(value: Word) -> Result<Self, SimError> {
        let found = width::bits_needed(value);
        if found > N {
            return Err(SimError::here(ErrorKind::WidthMismatch { expected: N, found }));
        }
        Ok(Self::new(value))
    }

    /// The unsigned payload.
    pub const fn value(self) -> Word {
        self.data
    }

    /// The payload read as an `N`-bit two's-complement number.
    pub const fn to_signed(self) -> SignedWord {
        width::sign_extend_word(self.data, N)
    }

    pub const fn is_zero(self) -> bool {
        self.data == 0
    }

    /// Bits `[LO, HI]` as a new value of width `M = HI - LO + 1`.
    ///
    /// Bounds are checked at compile time.
    pub fn range<const HI: usize, const LO: usize, const M: usize>(self) -> Bits<M> {
        const {
            assert!(LO <= HI, "range: LO must not exceed HI");
            assert!(HI < N, "range: HI must be below the width");
            assert!(LO <= HI && M == HI - LO + 1, "range: result width must be HI - LO + 1");
        }
        Bits::new(self.data >> LO)
    }

    /// A copy with bits `[LO, HI]` replaced by `value`.
    pub fn with_range<const HI: usize, const LO: usize, const M: usize>(self, value: Bits<M>) -> Self {
        const {
            assert!(LO <= HI, "with_range: LO must not exceed HI");
            assert!(HI < N, "with_range: HI must be below the width");
            assert!(LO <= HI && M == HI - LO + 1, "with_range: value width must be HI - LO + 1");
        }
        let field = width::mask(M) << LO;
        Self::new((self.data & !field) | ((value.value() << LO) & field))
    }

    /// `M` bits starting at bit `lo`, with the position checked at runtime.
    #[track_caller]
    pub fn try_slice<const M: usize>(self, lo: usize) -> Result<Bits<M>, SimError> {
        if lo.checked_add(M).is_none_or(|end| end > N) {
            return Err(SimError::here(ErrorKind::OutOfRangeSlice {
                hi: lo.saturating_add(M - 1),
                lo,
                width: N,
            }));
        }
        Ok(Bits::new(self.data >> lo))
    }

    #[track_caller]
    pub fn slice<const M: usize>(self, lo: usize) -> Bits<M> {
        if CHECKS {
            or_fatal(self.try_slice(lo))
        } else {
            let shifted = u32::try_from(lo).ok().and_then(|s| self.data.checked_shr(s));
            Bits::new(shifted.unwrap_or(0))
        }
    }

    /// The single bit at `pos`.
    #[track_caller]
    pub fn bit(self, pos: usize) -> Bits<1> {
        self.slice::<1>(pos)
    }

    /// Join `parts`, first part in the most significant bits. The parts'
    /// widths must add up to `N`.
    ///
    /// ```
    /// use cyclesim::Bits;
    ///
    /// let word = Bits::<12>::concat((Bits::<4>::new(0xa), Bits::<8>::new(0xbc)));
    /// assert_eq!(word.value(), 0xabc);
    /// ```
    pub fn concat<P: BitPack>(parts: P) -> Self {
        const { assert!(P::WIDTH == N, "concat: part widths must add up to the result width") }
        Self::new(parts.pack())
    }

    /// Widen to `M` bits, replicating the sign bit.
    pub fn sign_extend<const M: usize>(self) -> Bits<M> {
        const { assert!(M > N && M <= MAX_WIDTH, "sign_extend: target must be wider") }
        Bits::new(self.to_signed() as Word)
    }

    /// Widen to `M` bits, filling with zeros.
    pub fn zero_extend<const M: usize>(self) -> Bits<M> {
        const { assert!(M > N && M <= MAX_WIDTH, "zero_extend: target must be wider") }
        Bits::new(self.data)
    }
}

impl<const N: usize> From<Word> for Bits<N> {
    fn from(value: Word) -> Self {
        Bits::new(value)
    }
}

impl<const N: usize> From<bool> for Bits<N> {
    fn from(value: bool) -> Self {
        Bits::new(value as Word)
    }
}

impl<const N: usize> From<Bits<N>> for Word {
    fn from(value: Bits<N>) -> Self {
        value.data
    }
}

impl From<Bits<1>> for bool {
    fn from(value: Bits<1>) -> Self {
        value.data != 0
    }
}

impl<const N: usize> fmt::Display for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.data, f)
    }
}

impl<const N: usize> fmt::Debug for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits<{}>(0x{:x})", N, self.data)
    }
}

impl<const N: usize> fmt::LowerHex for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.data, f)
    }
}

impl<const N: usize> fmt::UpperHex for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.data, f)
    }
}

impl<const N: usize> fmt::Binary for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.data, f)
    }
}
