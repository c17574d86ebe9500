//! This module defines [`Radix2Domain`], a precomputed evaluation domain
//! for performing radix-2 (I)FFTs over prime fields with a large
//! power-of-two multiplicative subgroup.
//!
//! The domain owns the fully-expanded forward and reverse roots-of-unity
//! tables; the butterfly kernel reads its twiddle factors out of those
//! tables with a stride that halves at each level. This also gives every
//! power-of-two subgroup of the domain for free: the order-`N/s` subgroup
//! is the table subsampled at stride `s`.

use crate::error::{Error, Result};
use ark_ff::{FftField, Field};
use ark_std::vec::Vec;
use core::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Defines a domain over which finite field (I)FFTs can be performed.
/// Works only for fields that have a large multiplicative subgroup of size
/// that is a power-of-2.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Radix2Domain<F: FftField> {
    /// The size of the domain.
    pub size: u64,
    /// `log_2(self.size)`.
    pub log_size_of_group: u32,
    /// Inverse of the size in the field.
    pub size_inv: F,
    /// A generator of the subgroup.
    pub group_gen: F,
    /// Inverse of the generator of the subgroup.
    pub group_gen_inv: F,
    /// `[1, g, g^2, ..., g^(N-1)]` for the subgroup generator `g`.
    pub roots_of_unity: Vec<F>,
    /// `[1, g^-1, g^-2, ..., g^-(N-1)]`.
    pub inv_roots_of_unity: Vec<F>,
}

impl<F: FftField> fmt::Debug for Radix2Domain<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Radix-2 multiplicative subgroup of size {}", self.size)
    }
}

impl<F: FftField> Radix2Domain<F> {
    /// Construct the domain of size `2^log_size`.
    ///
    /// Errors with [`Error::InvalidDomain`] unless
    /// `1 <= log_size <= F::TWO_ADICITY`.
    pub fn new(log_size: u32) -> Result<Self> {
        if log_size == 0 || log_size > F::TWO_ADICITY {
            return Err(Error::InvalidDomain);
        }
        let size = 1u64 << log_size;

        // The generator should be the 2^(log_size) root of unity.
        let group_gen = F::get_root_of_unity(size).ok_or(Error::InvalidDomain)?;
        // Check that it is indeed of that order.
        debug_assert_eq!(group_gen.pow([size]), F::one());
        let group_gen_inv = group_gen.inverse().ok_or(Error::InvalidDomain)?;
        let size_inv = F::from(size).inverse().ok_or(Error::InvalidDomain)?;

        let size = usize::try_from(size).map_err(|_| Error::InvalidDomain)?;
        let mut roots_of_unity = Vec::with_capacity(size);
        roots_of_unity.push(F::one());
        for i in 1..size {
            let prev = roots_of_unity[i - 1];
            roots_of_unity.push(prev * group_gen);
        }
        let mut inv_roots_of_unity = Vec::with_capacity(size);
        inv_roots_of_unity.push(F::one());
        for i in 1..size {
            let prev = inv_roots_of_unity[i - 1];
            inv_roots_of_unity.push(prev * group_gen_inv);
        }

        Ok(Radix2Domain {
            size: size as u64,
            log_size_of_group: log_size,
            size_inv,
            group_gen,
            group_gen_inv,
            roots_of_unity,
            inv_roots_of_unity,
        })
    }

    /// Construct a domain that is large enough for evaluations of a
    /// polynomial having `num_coeffs` coefficients.
    pub fn for_num_coeffs(num_coeffs: usize) -> Result<Self> {
        let size = num_coeffs.next_power_of_two();
        Self::new(size.trailing_zeros())
    }

    /// Return the size of `self`.
    #[inline]
    pub fn size(&self) -> usize {
        usize::try_from(self.size).unwrap()
    }

    /// Compute a FFT.
    #[inline]
    pub fn fft(&self, coeffs: &[F]) -> Result<Vec<F>> {
        let mut coeffs = coeffs.to_vec();
        self.fft_in_place(&mut coeffs)?;
        Ok(coeffs)
    }

    /// Compute a FFT, modifying the buffer in place.
    ///
    /// The output at index `i` is `sum_j buf[j] * g^(i*j)`. Errors with
    /// [`Error::LengthMismatch`] unless the buffer length equals the domain
    /// size; padding is the caller's responsibility.
    pub fn fft_in_place(&self, coeffs: &mut [F]) -> Result<()> {
        if coeffs.len() != self.size() {
            return Err(Error::LengthMismatch);
        }
        serial_radix2_fft(coeffs, &self.roots_of_unity, 1);
        Ok(())
    }

    /// Compute a IFFT.
    #[inline]
    pub fn ifft(&self, evals: &[F]) -> Result<Vec<F>> {
        let mut evals = evals.to_vec();
        self.ifft_in_place(&mut evals)?;
        Ok(evals)
    }

    /// Compute a IFFT, modifying the buffer in place.
    ///
    /// Runs the butterfly kernel over the reverse roots table, then scales
    /// by `1/N`. Mutual inverse of [`Self::fft_in_place`] up to exact
    /// equality.
    pub fn ifft_in_place(&self, evals: &mut [F]) -> Result<()> {
        if evals.len() != self.size() {
            return Err(Error::LengthMismatch);
        }
        serial_radix2_fft(evals, &self.inv_roots_of_unity, 1);
        let size_inv = self.size_inv;
        cfg_iter_mut!(evals).for_each(|val| *val *= size_inv);
        Ok(())
    }

    /// Transform a buffer of length `N/stride` over the order-`N/stride`
    /// subgroup whose elements are the roots table subsampled at `stride`.
    pub(crate) fn subgroup_fft_in_place(
        &self,
        buf: &mut [F],
        stride: usize,
        inverse: bool,
    ) -> Result<()> {
        if stride == 0 || buf.len() * stride != self.size() {
            return Err(Error::LengthMismatch);
        }
        if inverse {
            serial_radix2_fft(buf, &self.inv_roots_of_unity, stride);
            let m_inv = F::from(buf.len() as u64)
                .inverse()
                .ok_or(Error::InvalidDomain)?;
            for val in buf.iter_mut() {
                *val *= m_inv;
            }
        } else {
            serial_radix2_fft(buf, &self.roots_of_unity, stride);
        }
        Ok(())
    }

    /// Distribute the powers of `g` among the `coeffs`, i.e. map the
    /// polynomial `p(x)` to `p(g*x)`.
    pub fn distribute_powers(coeffs: &mut [F], g: F) {
        let mut pow = F::one();
        coeffs.iter_mut().for_each(|c| {
            *c *= pow;
            pow *= &g;
        })
    }

    /// Perform O(n) multiplication of two polynomials that are presented by
    /// their evaluations in the domain.
    #[must_use]
    pub fn mul_polynomials_in_evaluation_domain(&self, self_evals: &[F], other_evals: &[F]) -> Vec<F> {
        assert_eq!(self_evals.len(), other_evals.len());
        let mut result = self_evals.to_vec();
        cfg_iter_mut!(result)
            .zip(other_evals)
            .for_each(|(a, b)| *a *= b);
        result
    }

    /// This evaluates the vanishing polynomial for this domain at tau.
    /// For multiplicative subgroups, this polynomial is
    /// `z(X) = X^self.size - 1`.
    pub fn evaluate_vanishing_polynomial(&self, tau: F) -> F {
        tau.pow([self.size]) - F::one()
    }

    /// Return an iterator over the elements of the domain.
    pub fn elements(&self) -> Elements<F> {
        Elements {
            cur_elem: F::one(),
            cur_pow: 0,
            size: self.size,
            group_gen: self.group_gen,
        }
    }
}

/// An iterator over the elements of a [`Radix2Domain`].
pub struct Elements<F: FftField> {
    cur_elem: F,
    cur_pow: u64,
    size: u64,
    group_gen: F,
}

impl<F: FftField> Iterator for Elements<F> {
    type Item = F;

    fn next(&mut self) -> Option<F> {
        if self.cur_pow == self.size {
            None
        } else {
            let cur_elem = self.cur_elem;
            self.cur_elem *= &self.group_gen;
            self.cur_pow += 1;
            Some(cur_elem)
        }
    }
}

#[inline]
fn bitreverse(mut n: usize, l: u32) -> usize {
    let mut r = 0;
    for _ in 0..l {
        r = (r << 1) | (n & 1);
        n >>= 1;
    }
    r
}

/// In-place decimation-in-time butterflies over a power-of-two buffer.
///
/// The j-th twiddle at a level with half-size `m` is
/// `roots[j * (n / (2m)) * stride]`, so a `stride > 1` runs the transform
/// over the corresponding subsampled subgroup of the full table.
pub(crate) fn serial_radix2_fft<F: Field>(a: &mut [F], roots: &[F], stride: usize) {
    let n = a.len();
    debug_assert!(n.is_power_of_two());
    debug_assert_eq!(n * stride, roots.len());
    if n == 1 {
        return;
    }
    let log_n = n.trailing_zeros();

    for k in 0..n {
        let rk = bitreverse(k, log_n);
        if k < rk {
            a.swap(rk, k);
        }
    }

    let mut m = 1;
    for _ in 0..log_n {
        let level_stride = (n / (2 * m)) * stride;
        let mut k = 0;
        while k < n {
            for j in 0..m {
                let mut t = a[k + j + m];
                t *= roots[j * level_stride];
                let mut tmp = a[k + j];
                tmp -= t;
                a[k + j + m] = tmp;
                a[k + j] += t;
            }
            k += 2 * m;
        }
        m *= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{One, UniformRand, Zero};
    use ark_std::test_rng;
    use ark_test_curves::bls12_381::Fr;

    #[test]
    fn construction_rejects_out_of_range_scales() {
        assert_eq!(Radix2Domain::<Fr>::new(0).unwrap_err(), Error::InvalidDomain);
        assert_eq!(
            Radix2Domain::<Fr>::new(Fr::TWO_ADICITY + 1).unwrap_err(),
            Error::InvalidDomain
        );
        assert!(Radix2Domain::<Fr>::new(Fr::TWO_ADICITY).is_ok());
    }

    #[test]
    fn roots_table_consistency() {
        for log_size in 1..=8 {
            let domain = Radix2Domain::<Fr>::new(log_size).unwrap();
            let n = domain.size();
            for i in 0..n {
                assert!((domain.roots_of_unity[i] * domain.inv_roots_of_unity[i]).is_one());
            }
            assert_eq!(domain.roots_of_unity[n / 2], -Fr::one());
            for i in 0..n {
                for j in [0, 1, n / 2, n - 1] {
                    assert_eq!(
                        domain.roots_of_unity[i] * domain.roots_of_unity[j],
                        domain.roots_of_unity[(i + j) % n]
                    );
                }
            }
        }
    }

    #[test]
    fn subgroup_stride_yields_smaller_subgroup() {
        let domain = Radix2Domain::<Fr>::new(6).unwrap();
        for log_sub in 1..=6u32 {
            let sub = Radix2Domain::<Fr>::new(log_sub).unwrap();
            let stride = domain.size() / sub.size();
            for (i, root) in sub.roots_of_unity.iter().enumerate() {
                assert_eq!(*root, domain.roots_of_unity[i * stride]);
            }
        }
    }

    #[test]
    fn elements_contents() {
        for log_size in 1..=6 {
            let domain = Radix2Domain::<Fr>::new(log_size).unwrap();
            for (i, element) in domain.elements().enumerate() {
                assert_eq!(element, domain.group_gen.pow([i as u64]));
                assert_eq!(element, domain.roots_of_unity[i]);
            }
            assert_eq!(domain.elements().count(), domain.size());
        }
    }

    #[test]
    fn fft_matches_naive_dft() {
        let rng = &mut test_rng();
        for log_size in 1..=6 {
            let domain = Radix2Domain::<Fr>::new(log_size).unwrap();
            let n = domain.size();
            let coeffs: Vec<Fr> = (0..n).map(|_| Fr::rand(rng)).collect();
            let evals = domain.fft(&coeffs).unwrap();
            for (i, eval) in evals.iter().enumerate() {
                let mut acc = Fr::zero();
                for (j, coeff) in coeffs.iter().enumerate() {
                    acc += *coeff * domain.roots_of_unity[(i * j) % n];
                }
                assert_eq!(*eval, acc);
            }
        }
    }

    #[test]
    fn fft_ifft_roundtrip() {
        let rng = &mut test_rng();
        for log_size in 1..=12 {
            let domain = Radix2Domain::<Fr>::new(log_size).unwrap();
            let coeffs: Vec<Fr> = (0..domain.size()).map(|_| Fr::rand(rng)).collect();
            let evals = domain.fft(&coeffs).unwrap();
            assert_eq!(domain.ifft(&evals).unwrap(), coeffs);
            let interp = domain.ifft(&coeffs).unwrap();
            assert_eq!(domain.fft(&interp).unwrap(), coeffs);
        }
    }

    #[test]
    fn fft_linearity() {
        let rng = &mut test_rng();
        let domain = Radix2Domain::<Fr>::new(7).unwrap();
        let n = domain.size();
        let a: Vec<Fr> = (0..n).map(|_| Fr::rand(rng)).collect();
        let b: Vec<Fr> = (0..n).map(|_| Fr::rand(rng)).collect();
        let alpha = Fr::rand(rng);
        let beta = Fr::rand(rng);

        let combined: Vec<Fr> = a
            .iter()
            .zip(&b)
            .map(|(a, b)| alpha * a + beta * b)
            .collect();
        let lhs = domain.fft(&combined).unwrap();

        let fft_a = domain.fft(&a).unwrap();
        let fft_b = domain.fft(&b).unwrap();
        for i in 0..n {
            assert_eq!(lhs[i], alpha * fft_a[i] + beta * fft_b[i]);
        }
    }

    #[test]
    fn impulse_transforms() {
        // N = 4: FFT of the unit impulse is all-ones, and FFT of x is the
        // roots table itself [1, w, w^2 = -1, w^3].
        let domain = Radix2Domain::<Fr>::new(2).unwrap();
        let one = Fr::one();
        let zero = Fr::zero();

        let evals = domain.fft(&[one, zero, zero, zero]).unwrap();
        assert_eq!(evals, vec![one, one, one, one]);

        let evals = domain.fft(&[zero, one, zero, zero]).unwrap();
        let w = domain.group_gen;
        assert_eq!(evals, vec![one, w, -one, w * w * w]);
    }

    #[test]
    fn fft_rejects_wrong_length() {
        let domain = Radix2Domain::<Fr>::new(3).unwrap();
        let short = vec![Fr::one(); 4];
        assert_eq!(domain.fft(&short).unwrap_err(), Error::LengthMismatch);
        assert_eq!(domain.ifft(&short).unwrap_err(), Error::LengthMismatch);
    }

    #[test]
    fn subgroup_fft_matches_dedicated_domain() {
        let rng = &mut test_rng();
        let domain = Radix2Domain::<Fr>::new(5).unwrap();
        for log_sub in 1..=5u32 {
            let sub = Radix2Domain::<Fr>::new(log_sub).unwrap();
            let stride = domain.size() / sub.size();
            let coeffs: Vec<Fr> = (0..sub.size()).map(|_| Fr::rand(rng)).collect();

            let mut forward = coeffs.clone();
            domain
                .subgroup_fft_in_place(&mut forward, stride, false)
                .unwrap();
            assert_eq!(forward, sub.fft(&coeffs).unwrap());

            let mut backward = forward;
            domain
                .subgroup_fft_in_place(&mut backward, stride, true)
                .unwrap();
            assert_eq!(backward, coeffs);
        }
    }
}
