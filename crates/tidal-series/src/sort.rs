//! Tidal Series Sorting
//!
//! Reordering of a series in place. Sorting by value keeps each timestamp
//! paired with its value; sorting by index keeps each value paired with its
//! timestamp. NaN values sort after every number.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::float::{nan_last_cmp, Real};
use crate::series::Series;

/// Reorder `items` so that `items[k]` becomes the old `items[perm[k]]`.
/// A sequence the permutation does not cover (a missing index, or values
/// when ordering a bare vector by index) is left untouched.
fn permute<V: Copy>(items: &mut Vec<V>, perm: &[usize]) {
    if items.len() != perm.len() {
        return;
    }
    let reordered: Vec<V> = perm.iter().map(|&i| items[i]).collect();
    *items = reordered;
}

impl<T: Real> Series<T> {
    fn apply_permutation(&mut self, perm: &[usize]) {
        permute(self.index_vec_mut(), perm);
        permute(self.values_vec_mut(), perm);
    }

    fn value_order(&self, stable: bool) -> Vec<usize> {
        let values = self.values();
        let mut perm: Vec<usize> = (0..values.len()).collect();
        let cmp = |a: &usize, b: &usize| nan_last_cmp(&values[*a], &values[*b]);
        if stable {
            perm.sort_by(cmp);
        } else {
            perm.sort_unstable_by(cmp);
        }
        perm
    }

    fn index_order(&self, stable: bool) -> Vec<usize> {
        let index = self.index();
        let mut perm: Vec<usize> = (0..index.len()).collect();
        if stable {
            perm.sort_by_key(|&i| index[i]);
        } else {
            perm.sort_unstable_by_key(|&i| index[i]);
        }
        perm
    }

    /// Sort by value, NaN last.
    pub fn sort(&mut self) -> &mut Self {
        let perm = self.value_order(false);
        self.apply_permutation(&perm);
        self
    }

    /// Sort by value, NaN last, keeping equal values in their current order.
    pub fn sort_stable(&mut self) -> &mut Self {
        let perm = self.value_order(true);
        self.apply_permutation(&perm);
        self
    }

    /// Sort by timestamp. A bare value vector is left unchanged.
    pub fn argsort(&mut self) -> &mut Self {
        let perm = self.index_order(false);
        self.apply_permutation(&perm);
        self
    }

    /// Sort by timestamp, keeping equal timestamps in their current order.
    pub fn argsort_stable(&mut self) -> &mut Self {
        let perm = self.index_order(true);
        self.apply_permutation(&perm);
        self
    }

    /// Reverse both the index and the values.
    pub fn reverse(&mut self) -> &mut Self {
        self.index_vec_mut().reverse();
        self.values_vec_mut().reverse();
        self
    }

    /// Reverse the index only.
    pub fn arg_reverse(&mut self) -> &mut Self {
        self.index_vec_mut().reverse();
        self
    }

    /// Reverse the values only.
    pub fn data_reverse(&mut self) -> &mut Self {
        self.values_vec_mut().reverse();
        self
    }
}
