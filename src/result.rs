//! Caller-facing result types and the policies that shape them.

/// Order of indices in a [`Selection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexOrder {
    /// Increasing input position.
    #[default]
    Ascending,
    /// Order in which the backtracker found them: most recently added weight
    /// first, i.e. strictly decreasing positions.
    Reconstruction,
}

/// What a solve call reports when no non-empty subset fits.
///
/// A call is infeasible when the capacity is positive, the input is not
/// empty, and every weight exceeds `capacity + slack`. Empty inputs and a
/// zero capacity always succeed with an empty selection.
///
/// Infeasibility is decided before the deadline clock starts, so an
/// infeasible call reports it even under a zero deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InfeasiblePolicy {
    /// Fail with [`SolveError::Infeasible`](crate::SolveError::Infeasible).
    #[default]
    Error,
    /// Succeed with an empty selection.
    Empty,
}

/// Chosen subset: weight indices and the sum they form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    indices: Vec<usize>,
    selected_sum: u64,
}

impl Selection {
    pub(crate) fn new(indices: Vec<usize>, selected_sum: u64) -> Self {
        Self {
            indices,
            selected_sum,
        }
    }

    /// Indices of the chosen weights.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Sum of the chosen weights in the integral domain the solver used.
    pub fn selected_sum(&self) -> u64 {
        self.selected_sum
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    /// Sum the caller's own weights at the chosen indices.
    ///
    /// Useful with float inputs, where [`selected_sum`](Self::selected_sum)
    /// is over rounded-up values.
    ///
    /// # Panics
    /// Panics if `weights` is shorter than the sequence this selection was
    /// computed from.
    pub fn total_of<T>(&self, weights: &[T]) -> T
    where
        T: Copy + std::iter::Sum<T>,
    {
        self.indices.iter().map(|&i| weights[i]).sum()
    }
}
