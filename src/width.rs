// width.rs
//
// Shared width arithmetic for every width-typed cell: the machine word,
// masks, extension helpers and the packing trait behind concatenation.

use crate::bits::Bits;

/// Storage word for every width-typed value.
pub type Word = u32;

/// Two's-complement view of [`Word`].
pub type SignedWord = i32;

/// Widest value a cell can hold.
pub const MAX_WIDTH: usize = Word::BITS as usize;

/// Compile-time check that `N` is a legal width. Instantiating a cell with
/// an illegal width fails to build.
pub(crate) const fn assert_width<const N: usize>() {
    const { assert!(N >= 1 && N <= MAX_WIDTH, "width must be in [1, 32]") }
}

/// All-ones mask covering the low `width` bits.
pub const fn mask(width: usize) -> Word {
    if width >= MAX_WIDTH { Word::MAX } else { (1 << width) - 1 }
}

/// Reduce `value` modulo 2^width.
pub const fn truncate(value: Word, width: usize) -> Word {
    value & mask(width)
}

/// Interpret the low `width` bits of `value` as signed and widen to a word.
pub const fn sign_extend_word(value: Word, width: usize) -> SignedWord {
    let shift = (MAX_WIDTH - width) as u32;
    ((value << shift) as SignedWord) >> shift
}

/// Number of bits needed to represent `value` (zero needs one bit).
pub const fn bits_needed(value: Word) -> usize {
    if value == 0 { 1 } else { (Word::BITS - value.leading_zeros()) as usize }
}

/// A group of width-typed parts that concatenate into one wider value.
///
/// The first part of a tuple lands in the most significant bits.
pub trait BitPack {
    /// Sum of the parts' widths.
    const WIDTH: usize;

    fn pack(self) -> Word;
}

impl<const N: usize> BitPack for Bits<N> {
    const WIDTH: usize = N;

    fn pack(self) -> Word {
        self.value()
    }
}

macro_rules! tuple_pack {
    ($($part:ident $var:ident),+) => {
        impl<$($part: BitPack),+> BitPack for ($($part,)+) {
            const WIDTH: usize = 0 $(+ $part::WIDTH)+;

            fn pack(self) -> Word {
                let ($($var,)+) = self;
                let mut acc: u64 = 0;
                $(
                    acc = acc.checked_shl($part::WIDTH as u32).unwrap_or(0)
                        | u64::from($var.pack());
                )+
                acc as Word
            }
        }
    };
}

tuple_pack!(A a);
tuple_pack!(A a, B b);
tuple_pack!(A a, B b, C c);
tuple_pack!(A a, B b, C c, D d);
tuple_pack!(A a, B b, C c, D d, E e);
tuple_pack!(A a, B b, C c, D d, E e, F f);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_edges() {
        assert_eq!(mask(1), 1);
        assert_eq!(mask(5), 0b11111);
        assert_eq!(mask(31), 0x7fff_ffff);
        assert_eq!(mask(32), u32::MAX);
    }

    #[test]
    fn test_sign_extend_word() {
        assert_eq!(sign_extend_word(0b1, 1), -1);
        assert_eq!(sign_extend_word(0b0111, 4), 7);
        assert_eq!(sign_extend_word(0b1000, 4), -8);
        assert_eq!(sign_extend_word(0x8000_0000, 32), i32::MIN);
    }

    #[test]
    fn test_bits_needed() {
        assert_eq!(bits_needed(0), 1);
        assert_eq!(bits_needed(1), 1);
        assert_eq!(bits_needed(255), 8);
        assert_eq!(bits_needed(256), 9);
        assert_eq!(bits_needed(u32::MAX), 32);
    }

    #[test]
    fn test_pack_orders_most_significant_first() {
        let parts = (Bits::<4>::new(0xa), Bits::<8>::new(0xbc), Bits::<4>::new(0xd));
        assert_eq!(<(Bits<4>, Bits<8>, Bits<4>) as BitPack>::WIDTH, 16);
        assert_eq!(parts.pack(), 0xabcd);
    }
}
