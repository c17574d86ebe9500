//! Subproduct trees over sets of evaluation points, and the fast
//! multi-point evaluation that walks them.
//!
//! Level 0 of a tree holds the linear factors `(x - a_j)`; each higher
//! level multiplies adjacent pairs, so the top node is the vanishing
//! polynomial of the whole point set.

use crate::error::{Error, Result};
use crate::polynomial::DensePolynomial;
use ark_ff::FftField;
use ark_std::vec::Vec;

/// A balanced tree of partial products of `(x - a_j)` factors.
///
/// `levels[0]` has `n` degree-1 factors; `levels[i]` has `n / 2^i` nodes,
/// each the product of its two children at `levels[i - 1]`. Immutable once
/// built.
#[derive(Clone, Debug)]
pub struct SubproductTree<F: FftField> {
    /// The tree levels, leaves first.
    pub levels: Vec<Vec<DensePolynomial<F>>>,
}

impl<F: FftField> SubproductTree<F> {
    /// Build the tree over `points`, whose length must be a power of two.
    pub fn new(points: &[F]) -> Result<Self> {
        let n = points.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if !n.is_power_of_two() {
            return Err(Error::NotPowerOfTwo);
        }

        let height = n.trailing_zeros() as usize;
        let mut levels = Vec::with_capacity(height + 1);
        levels.push(linear_factors(points));
        for i in 1..=height {
            let level = {
                let prev = &levels[i - 1];
                let mut level = Vec::with_capacity(prev.len() / 2);
                for pair in prev.chunks(2) {
                    level.push(pair[0].mul(&pair[1])?);
                }
                level
            };
            levels.push(level);
        }

        Ok(Self { levels })
    }

    /// The number of pairwise-multiplication levels, `log2(n)`.
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    /// The top-level node: the vanishing polynomial of the points.
    pub fn root(&self) -> &DensePolynomial<F> {
        &self.levels[self.height()][0]
    }

    /// Evaluate `f` at every point the tree was built over, by reducing it
    /// modulo the two children of each node on the way down.
    ///
    /// Errors with [`Error::LengthMismatch`] when the tree is too shallow
    /// for `f`, i.e. `2^height < f.coeffs.len()`. Division against a child
    /// node inherits the strict length requirement of
    /// [`DensePolynomial::divide_with_q_and_r`], so `f` must reach down to
    /// the leaves: any `f` with `deg f < n` and `deg f >= n/2` (the usual
    /// shape), or a constant, works.
    pub fn multi_evaluate(&self, f: &DensePolynomial<F>) -> Result<Vec<F>> {
        if (1usize << self.height()) < f.coeffs.len() {
            return Err(Error::LengthMismatch);
        }
        let mut out = Vec::with_capacity(self.levels[0].len());
        self.evaluate_node(f, self.height(), 0, &mut out)?;
        Ok(out)
    }

    /// Recursive descent for [`Self::multi_evaluate`]. The left and right
    /// subtrees of node `(level, index)` are addressed by index arithmetic
    /// rather than by slicing out copies.
    fn evaluate_node(
        &self,
        f: &DensePolynomial<F>,
        level: usize,
        index: usize,
        out: &mut Vec<F>,
    ) -> Result<()> {
        if f.coeffs.len() == 1 {
            out.push(f.coeffs[0]);
            return Ok(());
        }
        let (_, left_rem) = f.divide_with_q_and_r(&self.levels[level - 1][2 * index])?;
        let (_, right_rem) = f.divide_with_q_and_r(&self.levels[level - 1][2 * index + 1])?;
        self.evaluate_node(&left_rem, level - 1, 2 * index, out)?;
        self.evaluate_node(&right_rem, level - 1, 2 * index + 1, out)
    }
}

fn linear_factors<F: FftField>(points: &[F]) -> Vec<DensePolynomial<F>> {
    points
        .iter()
        .map(|a| DensePolynomial::from_condensed(vec![-*a, F::one()]))
        .collect()
}

/// Build `prod_j (x - a_j)` from its roots. The count need not be a power
/// of two; the factor list is padded with unit polynomials, which leave the
/// product unchanged, and folded pairwise like a tree.
pub fn product_from_roots<F: FftField>(points: &[F]) -> Result<DensePolynomial<F>> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }
    fold_balanced(linear_factors(points))
}

/// Multiply out a list of polynomials. The list need not have power-of-two
/// length; it is padded with unit polynomials and folded pairwise.
pub fn vector_product<F: FftField>(polys: &[DensePolynomial<F>]) -> Result<DensePolynomial<F>> {
    if polys.is_empty() {
        return Err(Error::EmptyInput);
    }
    fold_balanced(polys.to_vec())
}

fn fold_balanced<F: FftField>(mut nodes: Vec<DensePolynomial<F>>) -> Result<DensePolynomial<F>> {
    nodes.resize(nodes.len().next_power_of_two(), DensePolynomial::one());
    while nodes.len() > 1 {
        let mut next = Vec::with_capacity(nodes.len() / 2);
        for pair in nodes.chunks(2) {
            next.push(pair[0].mul(&pair[1])?);
        }
        nodes = next;
    }
    Ok(nodes.swap_remove(0))
}
