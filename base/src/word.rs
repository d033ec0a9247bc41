//! Fixed-width unsigned quantities of the SIC/XE machine.
//!
//! SIC/XE memory is byte-addressed and a word is three bytes (24
//! bits), stored most-significant byte first.  Format 4 instructions
//! carry a full 20-bit address; format 3 instructions carry a 12-bit
//! displacement which is relative to PC or B unless it is used
//! directly (for example as an immediate operand).

use std::fmt::{self, Debug, Display, Formatter, UpperHex};

use super::error::ConversionFailed;


/// This macro implements the base functionality of the unsigned
/// types.  `SelfT` is the name of the type we are defining and
/// `BITS` is its bit width.  The bits are always stored in a `u32`.
macro_rules! unsigned_word_impl {
    ($SelfT:ident, $BITS:expr) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $SelfT {
            bits: u32,
        }

        impl $SelfT {
            pub const MAX: Self = Self {
                bits: (1 << $BITS) - 1,
            };
            pub const ZERO: Self = Self { bits: 0 };

            #[must_use]
            pub const fn bits(&self) -> u32 {
                self.bits
            }
        }

        impl TryFrom<u32> for $SelfT {
            type Error = ConversionFailed;
            fn try_from(n: u32) -> Result<Self, ConversionFailed> {
                if n > Self::MAX.bits {
                    Err(ConversionFailed::TooLarge)
                } else {
                    Ok(Self { bits: n })
                }
            }
        }

        impl From<$SelfT> for u32 {
            fn from(n: $SelfT) -> u32 {
                n.bits
            }
        }

        impl Display for $SelfT {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                UpperHex::fmt(&self.bits, f)
            }
        }

        impl UpperHex for $SelfT {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                UpperHex::fmt(&self.bits, f)
            }
        }

        impl Debug for $SelfT {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($SelfT), "{{bits: {:#X}}}"), self.bits)
            }
        }
    };
}

unsigned_word_impl!(Unsigned12Bit, 12);
unsigned_word_impl!(Unsigned20Bit, 20);
unsigned_word_impl!(Unsigned24Bit, 24);

/// The largest value a (non-floating-point) register or memory word
/// can hold.
pub const MAX_WORD: Unsigned24Bit = Unsigned24Bit::MAX;

/// The largest address a format 4 instruction can name.
pub const MAX_ADDRESS: Unsigned20Bit = Unsigned20Bit::MAX;

/// The largest displacement a format 3 instruction can carry.
pub const MAX_DISPLACEMENT: Unsigned12Bit = Unsigned12Bit::MAX;

impl Unsigned24Bit {
    /// Returns the three bytes of the word in memory order.
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 3] {
        let [_, hi, mid, lo] = self.bits.to_be_bytes();
        [hi, mid, lo]
    }

    #[must_use]
    pub fn from_be_bytes(bytes: [u8; 3]) -> Unsigned24Bit {
        let [hi, mid, lo] = bytes;
        Unsigned24Bit {
            bits: u32::from_be_bytes([0, hi, mid, lo]),
        }
    }
}
