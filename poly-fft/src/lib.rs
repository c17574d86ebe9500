//! This crate implements functions for manipulating univariate polynomials
//! over FFT-friendly prime fields: radix-2 (I)FFTs over precomputed
//! roots-of-unity domains, FFT-based polynomial multiplication, subproduct
//! trees with fast multi-point evaluation, Euclidean division and extended
//! GCD, and erasure-code recovery of partially-known evaluation vectors.
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(
    unused,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_docs
)]
#![deny(unsafe_code)]

#[macro_use]
extern crate ark_std;

pub mod domain;
pub mod error;
pub mod polynomial;
pub mod subproduct;

mod recovery;

pub use domain::Radix2Domain;
pub use error::{Error, Result};
pub use polynomial::DensePolynomial;
pub use recovery::MAX_RECOVERY_ATTEMPTS;
pub use subproduct::{product_from_roots, vector_product, SubproductTree};
