//! Long division and the polynomial extended Euclidean algorithm.

use crate::error::{Error, Result};
use crate::polynomial::DensePolynomial;
use ark_ff::{FftField, Field};
use ark_std::vec::Vec;
use core::mem;
use core::ops::Div;

impl<F: Field> DensePolynomial<F> {
    /// Classical long division from the highest coefficient down, filling
    /// quotient terms and subtracting `divisor * q * x^diff` from a working
    /// copy of `self`. Returns `(quotient, remainder_buffer)`.
    fn long_division(&self, divisor: &Self) -> Result<(Vec<F>, Vec<F>)> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        // deg(divisor) must not exceed deg(self); the mathematically
        // permissive answer (0, self) is deliberately not produced.
        if divisor.coeffs.len() > self.coeffs.len() {
            return Err(Error::LengthMismatch);
        }
        let mut remainder = self.coeffs.clone();
        let b_pos = divisor.coeffs.len() - 1;
        let lead_inv = divisor
            .leading_coefficient()
            .inverse()
            .ok_or(Error::DivisionByZero)?;
        let mut quotient = vec![F::zero(); remainder.len() - divisor.coeffs.len() + 1];
        for diff in (0..quotient.len()).rev() {
            let q = remainder[diff + b_pos] * lead_inv;
            quotient[diff] = q;
            for i in 0..=b_pos {
                let t = divisor.coeffs[i] * q;
                remainder[diff + i] -= t;
            }
        }
        Ok((quotient, remainder))
    }

    /// Divide `self` by `divisor`, returning the quotient only.
    ///
    /// Errors with [`Error::DivisionByZero`] on a zero divisor and with
    /// [`Error::LengthMismatch`] when the divisor is longer than `self`.
    pub fn long_div(&self, divisor: &Self) -> Result<Self> {
        let (quotient, _) = self.long_division(divisor)?;
        Ok(Self::from_condensed(quotient))
    }

    /// Divide `self` by `divisor`, returning `(quotient, remainder)` with
    /// `self = quotient * divisor + remainder` and
    /// `deg(remainder) < deg(divisor)` (or a zero remainder).
    ///
    /// Same failure modes as [`Self::long_div`].
    pub fn divide_with_q_and_r(&self, divisor: &Self) -> Result<(Self, Self)> {
        let (quotient, remainder) = self.long_division(divisor)?;
        Ok((
            Self::from_condensed(quotient),
            Self::from_condensed(remainder),
        ))
    }
}

impl<'a, 'b, F: Field> Div<&'a DensePolynomial<F>> for &'b DensePolynomial<F> {
    type Output = DensePolynomial<F>;

    #[inline]
    fn div(self, divisor: &'a DensePolynomial<F>) -> DensePolynomial<F> {
        self.divide_with_q_and_r(divisor).expect("division failed").0
    }
}

impl<F: FftField> DensePolynomial<F> {
    /// Computes `(g, u, v)` such that `a * u + b * v = g` with `g` an
    /// associate of `gcd(a, b)`.
    ///
    /// The result is undefined when both inputs are zero.
    pub fn xgcd(a: &Self, b: &Self) -> Result<(Self, Self, Self)> {
        Self::xgcd_half(a, b)
    }

    /// Extended Euclidean algorithm maintaining both Bezout coefficient
    /// sequences `(old_s, s)` and `(old_t, t)` across iterations.
    pub fn xgcd_full(a: &Self, b: &Self) -> Result<(Self, Self, Self)> {
        if b.coeffs.len() > a.coeffs.len() {
            let (g, v, u) = Self::xgcd_full(b, a)?;
            return Ok((g, u, v));
        }

        let (mut old_r, mut r) = (a.clone(), b.clone());
        let (mut old_s, mut s) = (Self::one(), Self::zero());
        let (mut old_t, mut t) = (Self::zero(), Self::one());

        while !r.is_zero() {
            let (quotient, remainder) = old_r.divide_with_q_and_r(&r)?;
            old_r = mem::replace(&mut r, remainder);
            let next_s = &old_s - &quotient.mul(&s)?;
            old_s = mem::replace(&mut s, next_s);
            let next_t = &old_t - &quotient.mul(&t)?;
            old_t = mem::replace(&mut t, next_t);
        }

        Ok((old_r, old_s, old_t))
    }

    /// Extended Euclidean algorithm maintaining only the `(old_s, s)`
    /// sequence; the second Bezout coefficient is recovered at the end as
    /// `v = (g - u * a) / b` when `b` is non-zero.
    pub fn xgcd_half(a: &Self, b: &Self) -> Result<(Self, Self, Self)> {
        if b.coeffs.len() > a.coeffs.len() {
            let (g, v, u) = Self::xgcd_half(b, a)?;
            return Ok((g, u, v));
        }

        let (mut old_r, mut r) = (a.clone(), b.clone());
        let (mut old_s, mut s) = (Self::one(), Self::zero());

        while !r.is_zero() {
            let (quotient, remainder) = old_r.divide_with_q_and_r(&r)?;
            old_r = mem::replace(&mut r, remainder);
            let next_s = &old_s - &quotient.mul(&s)?;
            old_s = mem::replace(&mut s, next_s);
        }

        let bezout_t = if !b.is_zero() {
            let numerator = &old_r - &old_s.mul(a)?;
            numerator.divide_with_q_and_r(b)?.0
        } else {
            Self::zero()
        };

        Ok((old_r, old_s, bezout_t))
    }
}
