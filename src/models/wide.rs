//! Arbitrary-precision unsigned integer.
//!
//! [`Wide`] holds host addresses, netmasks and network sizes. Native `u128` cannot
//! represent `2^128` (the size of `::/0`) and shifting it by 128 is undefined, so every
//! address calculation goes through this type instead.
//!
//! Values are immutable: every operation returns a new [`Wide`].

use crate::error::{AddrError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, Mul, Shl, Shr};
use std::str::FromStr;

const LIMB_BITS: usize = 32;

/// Unsigned integer of unbounded magnitude.
///
/// Limbs are little-endian (`limbs[0]` is least significant) and normalized so that
/// the most significant limb is never zero. Zero is the empty limb vector.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Wide {
    limbs: Vec<u32>,
}

/// Add with carry: (sum, carry) = a + b + carry_in
#[inline(always)]
const fn adc(a: u32, b: u32, carry: u32) -> (u32, u32) {
    let tmp = a as u64 + b as u64 + carry as u64;
    (tmp as u32, (tmp >> 32) as u32)
}

/// Subtract with borrow: (diff, borrow) = a - b - borrow_in
#[inline(always)]
const fn sbb(a: u32, b: u32, borrow: u32) -> (u32, u32) {
    let tmp = (a as u64).wrapping_sub(b as u64).wrapping_sub(borrow as u64);
    (tmp as u32, (tmp >> 63) as u32)
}

impl Wide {
    pub fn zero() -> Wide {
        Wide { limbs: Vec::new() }
    }

    pub fn one() -> Wide {
        Wide { limbs: vec![1] }
    }

    fn from_limbs(mut limbs: Vec<u32>) -> Wide {
        while limbs.last() == Some(&0) {
            limbs.pop();
        }
        Wide { limbs }
    }

    /// `2^exp`
    pub fn pow2(exp: usize) -> Wide {
        Wide::one().shl_bits(exp)
    }

    /// `2^bits - 1`, i.e. the lowest `bits` bits set.
    pub fn all_ones(bits: usize) -> Wide {
        let mut limbs = vec![u32::MAX; bits / LIMB_BITS];
        let rest = bits % LIMB_BITS;
        if rest != 0 {
            limbs.push(u32::MAX >> (LIMB_BITS - rest));
        }
        Wide::from_limbs(limbs)
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Number of significant bits (0 for zero).
    pub fn bit_len(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(top) => (self.limbs.len() - 1) * LIMB_BITS + (32 - top.leading_zeros() as usize),
        }
    }

    /// Value of bit `index` (bit 0 is least significant).
    pub fn bit(&self, index: usize) -> bool {
        self.limbs
            .get(index / LIMB_BITS)
            .is_some_and(|limb| (limb >> (index % LIMB_BITS)) & 1 == 1)
    }

    /// Number of trailing zero bits, `None` for zero.
    pub fn trailing_zeros(&self) -> Option<usize> {
        self.limbs
            .iter()
            .position(|&limb| limb != 0)
            .map(|i| i * LIMB_BITS + self.limbs[i].trailing_zeros() as usize)
    }

    /// The least significant 32 bits.
    pub fn low_u32(&self) -> u32 {
        self.limbs.first().copied().unwrap_or(0)
    }

    /// Converts to `u128`, `None` when the value needs more than 128 bits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.limbs.len() > 4 {
            return None;
        }
        Some(
            self.limbs
                .iter()
                .rev()
                .fold(0u128, |acc, &limb| (acc << LIMB_BITS) | limb as u128),
        )
    }

    fn add_wide(&self, other: &Wide) -> Wide {
        let (long, short) = if self.limbs.len() >= other.limbs.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut limbs = Vec::with_capacity(long.limbs.len() + 1);
        let mut carry = 0;
        for (i, &a) in long.limbs.iter().enumerate() {
            let b = short.limbs.get(i).copied().unwrap_or(0);
            let (sum, c) = adc(a, b, carry);
            limbs.push(sum);
            carry = c;
        }
        if carry != 0 {
            limbs.push(carry);
        }
        Wide::from_limbs(limbs)
    }

    /// `self - other`, failing with [`AddrError::Underflow`] when `other > self`.
    pub fn checked_sub(&self, other: &Wide) -> Result<Wide> {
        if *self < *other {
            return Err(AddrError::Underflow);
        }
        let mut limbs = Vec::with_capacity(self.limbs.len());
        let mut borrow = 0;
        for (i, &a) in self.limbs.iter().enumerate() {
            let b = other.limbs.get(i).copied().unwrap_or(0);
            let (diff, br) = sbb(a, b, borrow);
            limbs.push(diff);
            borrow = br;
        }
        Ok(Wide::from_limbs(limbs))
    }

    /// `max(self, other) - min(self, other)`; never fails.
    pub fn abs_diff(&self, other: &Wide) -> Wide {
        let (hi, lo) = if self >= other {
            (self, other)
        } else {
            (other, self)
        };
        // hi >= lo, so the subtraction cannot underflow
        hi.checked_sub(lo).unwrap_or_default()
    }

    fn shl_bits(&self, n: usize) -> Wide {
        if self.is_zero() {
            return Wide::zero();
        }
        let limb_shift = n / LIMB_BITS;
        let bit_shift = (n % LIMB_BITS) as u32;
        let mut limbs = vec![0u32; limb_shift];
        if bit_shift == 0 {
            limbs.extend_from_slice(&self.limbs);
        } else {
            let mut carry = 0u32;
            for &limb in &self.limbs {
                limbs.push((limb << bit_shift) | carry);
                carry = limb >> (32 - bit_shift);
            }
            if carry != 0 {
                limbs.push(carry);
            }
        }
        Wide::from_limbs(limbs)
    }

    fn shr_bits(&self, n: usize) -> Wide {
        let limb_shift = n / LIMB_BITS;
        if limb_shift >= self.limbs.len() {
            return Wide::zero();
        }
        let bit_shift = (n % LIMB_BITS) as u32;
        let src = &self.limbs[limb_shift..];
        let limbs = if bit_shift == 0 {
            src.to_vec()
        } else {
            src.iter()
                .enumerate()
                .map(|(i, &limb)| {
                    let hi = src.get(i + 1).copied().unwrap_or(0);
                    (limb >> bit_shift) | (hi << (32 - bit_shift))
                })
                .collect()
        };
        Wide::from_limbs(limbs)
    }

    fn div_rem_small(&self, divisor: u32) -> (Wide, u32) {
        let divisor = divisor as u64;
        let mut quotient = vec![0u32; self.limbs.len()];
        let mut rem = 0u64;
        for (i, &limb) in self.limbs.iter().enumerate().rev() {
            let cur = (rem << LIMB_BITS) | limb as u64;
            quotient[i] = (cur / divisor) as u32;
            rem = cur % divisor;
        }
        (Wide::from_limbs(quotient), rem as u32)
    }

    fn mul_add_small(&self, mul: u32, add: u32) -> Wide {
        let mut limbs = Vec::with_capacity(self.limbs.len() + 1);
        let mut carry = add as u64;
        for &limb in &self.limbs {
            let tmp = limb as u64 * mul as u64 + carry;
            limbs.push(tmp as u32);
            carry = tmp >> LIMB_BITS;
        }
        if carry != 0 {
            limbs.push(carry as u32);
        }
        Wide::from_limbs(limbs)
    }

    /// Truncating division with remainder.
    pub fn div_rem(&self, divisor: &Wide) -> Result<(Wide, Wide)> {
        if divisor.is_zero() {
            return Err(AddrError::DivisionByZero);
        }
        if *self < *divisor {
            return Ok((Wide::zero(), self.clone()));
        }
        if divisor.limbs.len() == 1 {
            let (q, r) = self.div_rem_small(divisor.limbs[0]);
            return Ok((q, Wide::from(r)));
        }
        // shift-subtract long division, one quotient bit per step
        let mut quotient = vec![0u32; self.limbs.len()];
        let mut rem = Wide::zero();
        for i in (0..self.bit_len()).rev() {
            rem = rem.shl_bits(1);
            if self.bit(i) {
                rem = rem.add_wide(&Wide::one());
            }
            if rem >= *divisor {
                rem = rem.checked_sub(divisor)?;
                quotient[i / LIMB_BITS] |= 1 << (i % LIMB_BITS);
            }
        }
        Ok((Wide::from_limbs(quotient), rem))
    }

    pub fn checked_div(&self, divisor: &Wide) -> Result<Wide> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    /// `self mod modulus`.
    pub fn modulo(&self, modulus: &Wide) -> Result<Wide> {
        self.div_rem(modulus).map(|(_, r)| r)
    }

    /// Parses digits in `radix` (2..=36). No sign, prefix or separators are accepted.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Wide> {
        if !(2..=36).contains(&radix) {
            return Err(AddrError::InvalidRadix(radix));
        }
        if s.is_empty() {
            return Err(AddrError::InvalidNumber(s.to_string()));
        }
        s.chars().try_fold(Wide::zero(), |acc, c| {
            c.to_digit(radix)
                .map(|digit| acc.mul_add_small(radix, digit))
                .ok_or_else(|| AddrError::InvalidNumber(s.to_string()))
        })
    }

    /// Renders the value in `radix` (2..=36) with lowercase digits.
    pub fn to_str_radix(&self, radix: u32) -> Result<String> {
        if !(2..=36).contains(&radix) {
            return Err(AddrError::InvalidRadix(radix));
        }
        Ok(self.digits(radix))
    }

    fn digits(&self, radix: u32) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut out = Vec::new();
        let mut n = self.clone();
        while !n.is_zero() {
            let (q, r) = n.div_rem_small(radix);
            out.push(char::from_digit(r, radix).unwrap_or('?'));
            n = q;
        }
        out.iter().rev().collect()
    }
}

impl Ord for Wide {
    fn cmp(&self, other: &Wide) -> Ordering {
        self.limbs
            .len()
            .cmp(&other.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
    }
}

impl PartialOrd for Wide {
    fn partial_cmp(&self, other: &Wide) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> Add<&'a Wide> for &'a Wide {
    type Output = Wide;

    fn add(self, rhs: &'a Wide) -> Wide {
        self.add_wide(rhs)
    }
}

impl Add<u32> for &Wide {
    type Output = Wide;

    fn add(self, rhs: u32) -> Wide {
        self.mul_add_small(1, rhs)
    }
}

impl Mul<u32> for &Wide {
    type Output = Wide;

    fn mul(self, rhs: u32) -> Wide {
        self.mul_add_small(rhs, 0)
    }
}

impl Shl<usize> for &Wide {
    type Output = Wide;

    fn shl(self, n: usize) -> Wide {
        self.shl_bits(n)
    }
}

impl Shr<usize> for &Wide {
    type Output = Wide;

    fn shr(self, n: usize) -> Wide {
        self.shr_bits(n)
    }
}

impl<'a> BitAnd<&'a Wide> for &'a Wide {
    type Output = Wide;

    fn bitand(self, rhs: &'a Wide) -> Wide {
        Wide::from_limbs(
            self.limbs
                .iter()
                .zip(rhs.limbs.iter())
                .map(|(a, b)| a & b)
                .collect(),
        )
    }
}

impl<'a> BitOr<&'a Wide> for &'a Wide {
    type Output = Wide;

    fn bitor(self, rhs: &'a Wide) -> Wide {
        let len = self.limbs.len().max(rhs.limbs.len());
        Wide::from_limbs(
            (0..len)
                .map(|i| {
                    self.limbs.get(i).copied().unwrap_or(0) | rhs.limbs.get(i).copied().unwrap_or(0)
                })
                .collect(),
        )
    }
}

impl From<u32> for Wide {
    fn from(value: u32) -> Wide {
        Wide::from_limbs(vec![value])
    }
}

impl From<u64> for Wide {
    fn from(value: u64) -> Wide {
        Wide::from(value as u128)
    }
}

impl From<usize> for Wide {
    fn from(value: usize) -> Wide {
        Wide::from(value as u128)
    }
}

impl From<u128> for Wide {
    fn from(mut value: u128) -> Wide {
        let mut limbs = Vec::with_capacity(4);
        while value != 0 {
            limbs.push(value as u32);
            value >>= LIMB_BITS;
        }
        Wide { limbs }
    }
}

impl FromStr for Wide {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Wide> {
        Wide::from_str_radix(s, 10)
    }
}

impl fmt::Display for Wide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad_integral(true, "", &self.digits(10))
    }
}

impl fmt::LowerHex for Wide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad_integral(true, "0x", &self.digits(16))
    }
}

impl fmt::Binary for Wide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad_integral(true, "0b", &self.digits(2))
    }
}

impl fmt::Debug for Wide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Wide({:#x})", self)
    }
}
