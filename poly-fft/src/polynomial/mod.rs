//! Univariate polynomials in coefficient form.

mod dense;
mod euclidean;

pub use dense::DensePolynomial;
