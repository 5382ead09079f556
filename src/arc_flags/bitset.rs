//! Fixed-width arc-flag bitsets (§3 "Bitset<K>"). The source templates
//! this over an arbitrary compile-time `K`; here `K` is fixed to one of a
//! handful of concrete widths instead, since the reduction algorithm's
//! hash/equality/popcount all reduce to native integer ops this way. 64
//! bits ([`Bitset64`], aliased as [`Bitset`]) is the default used
//! throughout preprocessing and tests.

use serde::{Deserialize, Serialize};

macro_rules! bitset {
    ($name:ident, $int:ty, $bits:literal) => {
        #[doc = concat!("A ", stringify!($bits), "-bit arc-flag vector.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub struct $name($int);

        impl $name {
            pub const BITS: u32 = $bits;

            pub fn empty() -> Self {
                Self(0)
            }

            pub fn all() -> Self {
                Self(<$int>::MAX)
            }

            #[inline]
            pub fn get(&self, i: usize) -> bool {
                debug_assert!(i < Self::BITS as usize, "bit {i} out of range for {}", stringify!($name));
                (self.0 >> i) & 1 == 1
            }

            #[inline]
            pub fn set(&mut self, i: usize, on: bool) {
                debug_assert!(i < Self::BITS as usize, "bit {i} out of range for {}", stringify!($name));
                if on {
                    self.0 |= 1 << i;
                } else {
                    self.0 &= !(1 << i);
                }
            }

            pub fn popcount(&self) -> u32 {
                self.0.count_ones()
            }

            pub fn union(&self, other: Self) -> Self {
                Self(self.0 | other.0)
            }

            /// True iff every bit set in `other` is also set in `self` —
            /// the correctness invariant flag reduction must preserve
            /// (§4.7.4: `replacement ⊇ original`).
            pub fn is_superset_of(&self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub fn bits(&self) -> impl Iterator<Item = usize> + '_ {
                (0..Self::BITS as usize).filter(move |&i| self.get(i))
            }
        }
    };
}

bitset!(Bitset8, u8, 8);
bitset!(Bitset16, u16, 16);
bitset!(Bitset32, u32, 32);
bitset!(Bitset64, u64, 64);
bitset!(Bitset128, u128, 128);

/// The width used throughout the engine unless a caller has a specific
/// reason to pick a different one.
pub type Bitset = Bitset64;
