//! Erasure-code recovery of evaluation vectors.
//!
//! Given the evaluations of a low-degree polynomial over the domain with
//! some entries missing, the full vector is reconstructed by multiplying
//! with the polynomial Z that vanishes exactly at the missing points and
//! dividing it back out on a shifted copy of the domain, where neither
//! factor has a zero.

use crate::domain::Radix2Domain;
use crate::error::{Error, Result};
use ark_ff::{batch_inversion, FftField};
use ark_std::vec::Vec;
use itertools::{Either, Itertools};

/// How many rejected shift values erasure recovery tolerates before giving
/// up with [`Error::RecoveryExhausted`].
pub const MAX_RECOVERY_ATTEMPTS: u32 = 10;

impl<F: FftField> Radix2Domain<F> {
    /// Reconstruct the full evaluation vector of an unknown polynomial
    /// from a partially-erased copy.
    ///
    /// `vals` must have the domain's length; `None` marks a missing entry.
    /// The known entries must be evaluations, over the domain, of a
    /// polynomial of low enough degree that `deg(p) + missing < N`. On
    /// success the output agrees with every known entry. A vector with no
    /// missing entries is returned unchanged.
    #[tracing::instrument(level = "debug", skip_all, fields(size = self.size))]
    pub fn recover_evaluations(&self, vals: &[Option<F>]) -> Result<Vec<F>> {
        if vals.len() != self.size() {
            return Err(Error::LengthMismatch);
        }
        let positions: Vec<u64> = vals
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(|(i, _)| i as u64)
            .collect();
        if positions.is_empty() {
            return Ok(vals.iter().copied().flatten().collect());
        }

        // Z vanishes exactly at the roots of unity indexed by `positions`.
        let mut z = self.zero_poly(&positions, 1)?;
        if z.len() > self.size() {
            return Err(Error::LengthMismatch);
        }
        z.resize(self.size(), F::zero());
        let z_vals = self.fft(&z)?;

        // Pointwise-multiply (vals filling in zero at missing spots) * z.
        // By construction this equals p * z everywhere on the domain.
        let p_times_z_vals: Vec<F> = vals
            .iter()
            .zip(&z_vals)
            .map(|(v, z_i)| v.map_or(F::zero(), |v| v * z_i))
            .collect();
        let p_times_z = self.ifft(&p_times_z_vals)?;

        // Dividing p*z by z on the domain itself would divide by zero at
        // the missing points, so both are evaluated at k*x instead for a
        // small k outside the domain.
        let mut attempts = 0;
        let mut k = 2u64;
        while attempts < MAX_RECOVERY_ATTEMPTS {
            let shift = F::from(k);
            k += 1;
            if self.evaluate_vanishing_polynomial(shift).is_zero() {
                tracing::debug!(k = k - 1, "shift value lies in the domain; skipping");
                continue;
            }
            let shift_inv = shift.inverse().ok_or(Error::DivisionByZero)?;

            let mut p_times_z_of_kx = p_times_z.clone();
            Self::distribute_powers(&mut p_times_z_of_kx, shift);
            self.fft_in_place(&mut p_times_z_of_kx)?;

            let mut z_of_kx = z.clone();
            Self::distribute_powers(&mut z_of_kx, shift);
            self.fft_in_place(&mut z_of_kx)?;
            // All non-zero, since k*w^i stays outside the domain.
            batch_inversion(&mut z_of_kx);

            let p_of_kx_vals =
                self.mul_polynomials_in_evaluation_domain(&p_times_z_of_kx, &z_of_kx);
            let mut p_of_x = self.ifft(&p_of_kx_vals)?;
            Self::distribute_powers(&mut p_of_x, shift_inv);
            let output = self.fft(&p_of_x)?;

            let matches = vals
                .iter()
                .zip(&output)
                .all(|(v, out)| v.map_or(true, |v| v == *out));
            if matches {
                return Ok(output);
            }
            attempts += 1;
            tracing::debug!(
                attempts,
                "reconstructed evaluations disagree with known values; retrying"
            );
        }
        Err(Error::RecoveryExhausted)
    }

    /// Return the coefficients of
    /// `(x - w^(positions[0] * stride)) * (x - w^(positions[1] * stride)) * ...`,
    /// possibly with a constant factor offset, working over the subgroup of
    /// size `N / stride`.
    pub(crate) fn zero_poly(&self, positions: &[u64], stride: usize) -> Result<Vec<F>> {
        // Up to 4 roots the quadratic expansion beats the FFT recursion.
        if positions.len() <= 4 {
            let mut root = vec![F::zero(); positions.len() + 1];
            root[0] = F::one();
            for (i, &pos) in positions.iter().enumerate() {
                let x = self.roots_of_unity[pos as usize * stride];
                for j in (1..=i + 1).rev() {
                    let t = root[j - 1] * x;
                    root[j] -= t;
                }
            }
            // The expansion above keeps the highest coefficient first.
            root.reverse();
            return Ok(root);
        }

        // Split by parity, solve each half over the doubled-stride
        // subgroup, then shift the odd half onto its coset and combine.
        let (even, odd): (Vec<u64>, Vec<u64>) = positions.iter().partition_map(|&p| {
            if p & 1 == 0 {
                Either::Left(p >> 1)
            } else {
                Either::Right(p >> 1)
            }
        });
        let left = self.zero_poly(&even, stride << 1)?;
        let mut right = self.zero_poly(&odd, stride << 1)?;
        Self::distribute_powers(&mut right, self.inv_roots_of_unity[stride]);
        let mut out = self.mul_polys_in_subgroup(&left, &right, stride)?;

        // A full subgroup of roots aliases to zero modulo x^m - 1; the
        // actual product is x^m - 1 itself, written out explicitly.
        if out.iter().all(|c| c.is_zero()) {
            out[0] = F::one();
            out.push(-F::one());
        }
        Ok(out)
    }

    /// FFT-multiply two coefficient vectors over the subgroup of size
    /// `N / stride`, reducing the product modulo `x^(N/stride) - 1`.
    fn mul_polys_in_subgroup(&self, a: &[F], b: &[F], stride: usize) -> Result<Vec<F>> {
        let m = self.size() / stride;
        if a.len() > m || b.len() > m {
            return Err(Error::LengthMismatch);
        }
        let mut a_evals = a.to_vec();
        a_evals.resize(m, F::zero());
        self.subgroup_fft_in_place(&mut a_evals, stride, false)?;

        let mut b_evals = b.to_vec();
        b_evals.resize(m, F::zero());
        self.subgroup_fft_in_place(&mut b_evals, stride, false)?;

        let mut product = self.mul_polynomials_in_evaluation_domain(&a_evals, &b_evals);
        self.subgroup_fft_in_place(&mut product, stride, true)?;
        Ok(product)
    }
}
