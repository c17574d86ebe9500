//! A polynomial represented in coefficient form.

use crate::domain::Radix2Domain;
use crate::error::Error;
use ark_ff::{FftField, Field};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::Rng;
use ark_std::{vec::Vec, UniformRand};
use core::{
    fmt,
    ops::{Add, AddAssign, Deref, Mul, Neg, Sub, SubAssign},
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Stores a polynomial in coefficient form.
///
/// The coefficient vector is never empty, and past length one it carries no
/// trailing zero coefficients; the zero polynomial is canonically `[0]`.
#[derive(Clone, PartialEq, Eq, Hash, CanonicalSerialize, CanonicalDeserialize)]
pub struct DensePolynomial<F: Field> {
    /// The coefficient of `x^i` is stored at location `i` in `self.coeffs`.
    pub coeffs: Vec<F>,
}

impl<F: Field> fmt::Debug for DensePolynomial<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coeff) in self.coeffs.iter().enumerate().filter(|(_, c)| !c.is_zero()) {
            if i == 0 {
                write!(f, "\n{:?}", coeff)?;
            } else if i == 1 {
                write!(f, " + \n{:?} * x", coeff)?;
            } else {
                write!(f, " + \n{:?} * x^{}", coeff, i)?;
            }
        }
        Ok(())
    }
}

impl<F: Field> Default for DensePolynomial<F> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<F: Field> Deref for DensePolynomial<F> {
    type Target = [F];

    fn deref(&self) -> &[F] {
        &self.coeffs
    }
}

impl<F: Field> DensePolynomial<F> {
    /// Returns the zero polynomial, `[0]`.
    pub fn zero() -> Self {
        Self {
            coeffs: vec![F::zero()],
        }
    }

    /// Returns the constant polynomial `1`.
    pub fn one() -> Self {
        Self {
            coeffs: vec![F::one()],
        }
    }

    /// Checks if the given polynomial is zero.
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|coeff| coeff.is_zero())
    }

    /// Constructs a new polynomial from a list of coefficients.
    ///
    /// Errors with [`Error::EmptyInput`] on a zero-length list; trailing
    /// zero coefficients are stripped down to length one.
    pub fn from_coefficients_slice(coeffs: &[F]) -> crate::error::Result<Self> {
        Self::from_coefficients_vec(coeffs.to_vec())
    }

    /// Constructs a new polynomial from a list of coefficients.
    pub fn from_coefficients_vec(coeffs: Vec<F>) -> crate::error::Result<Self> {
        if coeffs.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self::from_condensed(coeffs))
    }

    /// Constructor for internal callers that already hold a non-empty
    /// buffer.
    pub(crate) fn from_condensed(coeffs: Vec<F>) -> Self {
        debug_assert!(!coeffs.is_empty());
        let mut result = Self { coeffs };
        result.truncate_leading_zeros();
        result
    }

    /// Returns the degree of the polynomial. The zero polynomial has
    /// degree zero.
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    fn truncate_leading_zeros(&mut self) {
        while self.coeffs.len() > 1 && self.coeffs.last().map_or(false, |c| c.is_zero()) {
            self.coeffs.pop();
        }
    }

    /// The highest-order coefficient; non-zero unless `self` is zero.
    pub fn leading_coefficient(&self) -> F {
        self.coeffs[self.coeffs.len() - 1]
    }

    /// Evaluates `self` at the given `point` in the field.
    pub fn evaluate(&self, point: F) -> F {
        if self.is_zero() {
            return F::zero();
        }
        let mut powers_of_point = vec![F::one()];
        let mut cur = point;
        for _ in 0..self.degree() {
            powers_of_point.push(cur);
            cur *= &point;
        }
        cfg_into_iter!(powers_of_point)
            .zip(&self.coeffs)
            .map(|(power, coeff)| power * coeff)
            .sum()
    }

    /// Perform a naive n^2 multiplication of `self` by `other`.
    pub fn naive_mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            DensePolynomial::zero()
        } else {
            let mut result = vec![F::zero(); self.degree() + other.degree() + 1];
            for (i, self_coeff) in self.coeffs.iter().enumerate() {
                for (j, other_coeff) in other.coeffs.iter().enumerate() {
                    result[i + j] += &(*self_coeff * other_coeff);
                }
            }
            DensePolynomial::from_condensed(result)
        }
    }

    /// Returns the formal derivative of `self`.
    pub fn differentiate(&self) -> Self {
        if self.coeffs.len() == 1 {
            return Self::zero();
        }
        let mut result = Vec::with_capacity(self.coeffs.len() - 1);
        for (i, coeff) in self.coeffs.iter().enumerate().skip(1) {
            result.push(F::from(i as u64) * coeff);
        }
        Self::from_condensed(result)
    }

    /// Outputs a polynomial of degree `d` where each coefficient is sampled
    /// uniformly at random from the field `F`.
    pub fn rand<R: Rng>(d: usize, rng: &mut R) -> Self {
        let mut random_coeffs = Vec::new();
        for _ in 0..=d {
            random_coeffs.push(F::rand(rng));
        }
        Self::from_condensed(random_coeffs)
    }
}

impl<F: FftField> DensePolynomial<F> {
    /// Multiply `self` by `other` by evaluating both over a fresh domain of
    /// the smallest power-of-two size at least `2 * max(len)`, multiplying
    /// pointwise, and interpolating back.
    pub fn mul(&self, other: &Self) -> crate::error::Result<Self> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero());
        }
        if self.coeffs.len() == 1 && other.coeffs.len() == 1 {
            return Ok(Self::from_condensed(vec![self.coeffs[0] * other.coeffs[0]]));
        }
        let result_len = self.coeffs.len() + other.coeffs.len() - 1;
        let domain = Radix2Domain::for_num_coeffs(2 * self.coeffs.len().max(other.coeffs.len()))?;

        let mut self_evals = self.coeffs.clone();
        self_evals.resize(domain.size(), F::zero());
        domain.fft_in_place(&mut self_evals)?;

        let mut other_evals = other.coeffs.clone();
        other_evals.resize(domain.size(), F::zero());
        domain.fft_in_place(&mut other_evals)?;

        let evals = domain.mul_polynomials_in_evaluation_domain(&self_evals, &other_evals);
        let mut result = domain.ifft(&evals)?;
        result.truncate(result_len);
        Ok(Self::from_condensed(result))
    }
}

impl<'a, 'b, F: Field> Add<&'a DensePolynomial<F>> for &'b DensePolynomial<F> {
    type Output = DensePolynomial<F>;

    fn add(self, other: &'a DensePolynomial<F>) -> DensePolynomial<F> {
        let mut result = if self.is_zero() {
            other.clone()
        } else if other.is_zero() {
            self.clone()
        } else if self.coeffs.len() >= other.coeffs.len() {
            let mut result = self.clone();
            for (a, b) in result.coeffs.iter_mut().zip(&other.coeffs) {
                *a += b;
            }
            result
        } else {
            let mut result = other.clone();
            for (a, b) in result.coeffs.iter_mut().zip(&self.coeffs) {
                *a += b;
            }
            result
        };
        result.truncate_leading_zeros();
        result
    }
}

impl<'a, F: Field> AddAssign<&'a DensePolynomial<F>> for DensePolynomial<F> {
    fn add_assign(&mut self, other: &'a DensePolynomial<F>) {
        if self.is_zero() {
            self.coeffs.clear();
            self.coeffs.extend_from_slice(&other.coeffs);
        } else if other.is_zero() {
        } else {
            if self.coeffs.len() < other.coeffs.len() {
                self.coeffs.resize(other.coeffs.len(), F::zero());
            }
            for (a, b) in self.coeffs.iter_mut().zip(&other.coeffs) {
                *a += b;
            }
        }
        self.truncate_leading_zeros();
    }
}

impl<F: Field> Neg for DensePolynomial<F> {
    type Output = DensePolynomial<F>;

    #[inline]
    fn neg(mut self) -> DensePolynomial<F> {
        for coeff in &mut self.coeffs {
            *coeff = -*coeff;
        }
        self
    }
}

impl<'a, 'b, F: Field> Sub<&'a DensePolynomial<F>> for &'b DensePolynomial<F> {
    type Output = DensePolynomial<F>;

    #[inline]
    fn sub(self, other: &'a DensePolynomial<F>) -> DensePolynomial<F> {
        let mut result = if self.is_zero() {
            let mut result = other.clone();
            for coeff in &mut result.coeffs {
                *coeff = -(*coeff);
            }
            result
        } else if other.is_zero() {
            self.clone()
        } else if self.coeffs.len() >= other.coeffs.len() {
            let mut result = self.clone();
            for (a, b) in result.coeffs.iter_mut().zip(&other.coeffs) {
                *a -= b;
            }
            result
        } else {
            let mut result = self.clone();
            result.coeffs.resize(other.coeffs.len(), F::zero());
            for (a, b) in result.coeffs.iter_mut().zip(&other.coeffs) {
                *a -= b;
            }
            result
        };
        result.truncate_leading_zeros();
        result
    }
}

impl<'a, F: Field> SubAssign<&'a DensePolynomial<F>> for DensePolynomial<F> {
    #[inline]
    fn sub_assign(&mut self, other: &'a DensePolynomial<F>) {
        if other.is_zero() {
            return;
        }
        if self.coeffs.len() < other.coeffs.len() {
            self.coeffs.resize(other.coeffs.len(), F::zero());
        }
        for (a, b) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *a -= b;
        }
        self.truncate_leading_zeros();
    }
}

/// Performs O(nlogn) multiplication of polynomials if F is smooth.
impl<'a, 'b, F: FftField> Mul<&'a DensePolynomial<F>> for &'b DensePolynomial<F> {
    type Output = DensePolynomial<F>;

    #[inline]
    fn mul(self, other: &'a DensePolynomial<F>) -> DensePolynomial<F> {
        DensePolynomial::mul(self, other).expect("field is not smooth enough to construct domain")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{One, Zero};
    use ark_std::test_rng;
    use ark_test_curves::bls12_381::Fr;

    #[test]
    fn empty_coefficients_are_rejected() {
        assert_eq!(
            DensePolynomial::<Fr>::from_coefficients_vec(Vec::new()).unwrap_err(),
            Error::EmptyInput
        );
    }

    #[test]
    fn condensation_keeps_canonical_zero() {
        let p = DensePolynomial::from_coefficients_slice(&[
            Fr::zero(),
            Fr::one(),
            Fr::from(2u64),
            Fr::zero(),
            Fr::zero(),
        ])
        .unwrap();
        assert_eq!(p.coeffs.len(), 3);
        assert_eq!(p.degree(), 2);
        assert_eq!(p[2], Fr::from(2u64));
        assert_eq!(p.leading_coefficient(), Fr::from(2u64));

        let z = DensePolynomial::from_coefficients_slice(&[Fr::zero(); 5]).unwrap();
        assert_eq!(z.coeffs, vec![Fr::zero()]);
        assert!(z.is_zero());
        assert_eq!(z.degree(), 0);
        assert_eq!(z, DensePolynomial::zero());
    }

    #[test]
    fn double_polynomials_random() {
        let rng = &mut test_rng();
        for degree in 0..40 {
            let p = DensePolynomial::<Fr>::rand(degree, rng);
            let p_double = &p + &p;
            let p_quad = &p_double + &p_double;
            assert_eq!(&(&(&p + &p) + &p) + &p, p_quad);
        }
    }

    #[test]
    fn add_polynomials() {
        let rng = &mut test_rng();
        for a_degree in 0..40 {
            for b_degree in 0..40 {
                let p1 = DensePolynomial::<Fr>::rand(a_degree, rng);
                let p2 = DensePolynomial::<Fr>::rand(b_degree, rng);
                let res1 = &p1 + &p2;
                let res2 = &p2 + &p1;
                assert_eq!(res1, res2);

                let mut res3 = p1.clone();
                res3 += &p2;
                assert_eq!(res1, res3);
            }
        }
    }

    #[test]
    fn sub_polynomials() {
        let rng = &mut test_rng();
        let p1 = DensePolynomial::<Fr>::rand(5, rng);
        let p2 = DensePolynomial::<Fr>::rand(3, rng);
        let res1 = &p1 - &p2;
        let res2 = &p2 - &p1;
        assert_eq!(&res1 + &p2, p1, "Subtraction should be inverse of addition!");
        assert_eq!(res1, -res2, "p2 - p1 = -(p1 - p2)");

        let mut res3 = p1.clone();
        res3 -= &p2;
        assert_eq!(res1, res3);

        let cancelled = &p1 - &p1;
        assert!(cancelled.is_zero());
        assert_eq!(cancelled.coeffs, vec![Fr::zero()]);
    }

    #[test]
    fn mul_polynomials_random() {
        let rng = &mut test_rng();
        for a_degree in 0..32 {
            for b_degree in 0..32 {
                let a = DensePolynomial::<Fr>::rand(a_degree, rng);
                let b = DensePolynomial::<Fr>::rand(b_degree, rng);
                assert_eq!(&a * &b, a.naive_mul(&b));
            }
        }
    }

    #[test]
    fn mul_polynomials_large() {
        let rng = &mut test_rng();
        let a = DensePolynomial::<Fr>::rand(1023, rng);
        let b = DensePolynomial::<Fr>::rand(1023, rng);
        assert_eq!(&a * &b, a.naive_mul(&b));
    }

    #[test]
    fn mul_polynomials_fixed() {
        // (x + 1) * (x - 1) = x^2 - 1
        let a = DensePolynomial::from_coefficients_slice(&[Fr::one(), Fr::one()]).unwrap();
        let b = DensePolynomial::from_coefficients_slice(&[-Fr::one(), Fr::one()]).unwrap();
        let product = &a * &b;
        assert_eq!(
            product.coeffs,
            vec![-Fr::one(), Fr::zero(), Fr::one()]
        );
    }

    #[test]
    fn mul_by_zero_and_constants() {
        let rng = &mut test_rng();
        let a = DensePolynomial::<Fr>::rand(10, rng);
        let zero = DensePolynomial::zero();
        assert_eq!(a.mul(&zero).unwrap(), zero);
        assert_eq!(zero.mul(&a).unwrap(), zero);

        let c1 = DensePolynomial::from_coefficients_slice(&[Fr::from(3u64)]).unwrap();
        let c2 = DensePolynomial::from_coefficients_slice(&[Fr::from(5u64)]).unwrap();
        assert_eq!(
            c1.mul(&c2).unwrap().coeffs,
            vec![Fr::from(15u64)]
        );
    }

    #[test]
    fn evaluate_polynomials() {
        let rng = &mut test_rng();
        for a_degree in 0..40 {
            let p = DensePolynomial::rand(a_degree, rng);
            let point: Fr = Fr::from(10u64);
            let mut total = Fr::zero();
            for (i, coeff) in p.coeffs.iter().enumerate() {
                total += point.pow([i as u64]) * coeff;
            }
            assert_eq!(p.evaluate(point), total);
        }
    }

    #[test]
    fn differentiate_polynomials() {
        // d/dx (1 + 3x + 5x^3) = 3 + 15x^2
        let p = DensePolynomial::from_coefficients_slice(&[
            Fr::one(),
            Fr::from(3u64),
            Fr::zero(),
            Fr::from(5u64),
        ])
        .unwrap();
        assert_eq!(
            p.differentiate().coeffs,
            vec![Fr::from(3u64), Fr::zero(), Fr::from(15u64)]
        );

        assert!(DensePolynomial::<Fr>::zero().differentiate().is_zero());
        let constant = DensePolynomial::from_coefficients_slice(&[Fr::from(7u64)]).unwrap();
        assert!(constant.differentiate().is_zero());

        // Derivative of a product obeys the Leibniz rule.
        let rng = &mut test_rng();
        let a = DensePolynomial::<Fr>::rand(6, rng);
        let b = DensePolynomial::<Fr>::rand(9, rng);
        let lhs = (&a * &b).differentiate();
        let rhs = &(&a.differentiate() * &b) + &(&a * &b.differentiate());
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn serialization_roundtrip() {
        let rng = &mut test_rng();
        let p = DensePolynomial::<Fr>::rand(16, rng);
        let mut bytes = Vec::new();
        p.serialize_compressed(&mut bytes).unwrap();
        let q = DensePolynomial::<Fr>::deserialize_compressed(&*bytes).unwrap();
        assert_eq!(p, q);
    }
}
