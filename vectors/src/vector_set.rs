use asapcat_toolkit::Error;

use crate::sparse::SparseVector;

/// Single-allocation pooled storage for `capacity` dense vectors of common
/// length `dim`. Logical row count starts at zero and grows through
/// [`emplace_back`](Self::emplace_back); [`trim_number`](Self::trim_number)
/// can only shrink it.
#[derive(Debug, Clone)]
pub struct DenseVectorSet {
    backing: Vec<f64>,
    dim: usize,
    capacity: usize,
    logical_count: usize,
}

impl DenseVectorSet {
    pub fn new(capacity: usize, dim: usize) -> Self {
        Self {
            backing: vec![0.0; capacity * dim],
            dim,
            capacity,
            logical_count: 0,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.logical_count
    }

    pub fn is_empty(&self) -> bool {
        self.logical_count == 0
    }

    /// Appends one logical row of `dim` values, advancing the cursor.
    pub fn emplace_back(&mut self) -> Result<usize, Error> {
        if self.logical_count >= self.capacity {
            return Err(Error::resource_exhausted(format!(
                "dense vector set capacity ({}) exceeded",
                self.capacity
            )));
        }
        let row = self.logical_count;
        self.logical_count += 1;
        Ok(row)
    }

    pub fn trim_number(&mut self, n: usize) {
        debug_assert!(n <= self.logical_count);
        self.logical_count = n;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.backing[row * self.dim..(row + 1) * self.dim]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.backing[row * self.dim..(row + 1) * self.dim]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.logical_count).map(move |r| self.row(r))
    }
}

/// Single-allocation pooled storage for sparse vectors sharing a logical
/// length `dim`, with a total nonzero budget fixed at construction.
#[derive(Debug)]
pub struct SparseVectorSet {
    values: Vec<f64>,
    indices: Vec<u32>,
    row_offsets: Vec<(u32, u32)>,
    dim: u32,
    budget: usize,
    cursor: usize,
    logical_count: usize,
}

impl SparseVectorSet {
    pub fn new(num_rows_hint: usize, dim: u32, total_nonzero_budget: usize) -> Self {
        Self {
            values: vec![0.0; total_nonzero_budget],
            indices: vec![0; total_nonzero_budget],
            row_offsets: Vec::with_capacity(num_rows_hint),
            dim,
            budget: total_nonzero_budget,
            cursor: 0,
            logical_count: 0,
        }
    }

    pub fn dim(&self) -> u32 {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.logical_count
    }

    pub fn is_empty(&self) -> bool {
        self.logical_count == 0
    }

    /// Appends one logical row with `nonzeros` entries, advancing the
    /// internal cursor into the shared backing arrays.
    pub fn emplace_back(&mut self, nonzeros: usize) -> Result<usize, Error> {
        if self.cursor + nonzeros > self.budget {
            return Err(Error::resource_exhausted(format!(
                "sparse vector set nonzero budget ({}) exceeded",
                self.budget
            )));
        }
        let row = self.row_offsets.len();
        self.row_offsets.push((self.cursor as u32, nonzeros as u32));
        self.cursor += nonzeros;
        self.logical_count += 1;
        Ok(row)
    }

    pub fn trim_number(&mut self, n: usize) {
        debug_assert!(n <= self.logical_count);
        self.logical_count = n;
    }

    pub fn row_mut(&mut self, row: usize) -> (&mut [f64], &mut [u32]) {
        let (start, len) = self.row_offsets[row];
        let range = start as usize..(start + len) as usize;
        (&mut self.values[range.clone()], &mut self.indices[range])
    }

    pub fn row_values(&self, row: usize) -> &[f64] {
        let (start, len) = self.row_offsets[row];
        &self.values[start as usize..(start + len) as usize]
    }

    pub fn row_indices(&self, row: usize) -> &[u32] {
        let (start, len) = self.row_offsets[row];
        &self.indices[start as usize..(start + len) as usize]
    }

    /// Copies a row out as an owned [`SparseVector`].
    pub fn row_vector(&self, row: usize) -> SparseVector {
        let mut v = SparseVector::new(self.dim);
        for (&idx, &val) in self.row_indices(row).iter().zip(self.row_values(row)) {
            v.push(idx, val);
        }
        v
    }

    /// Sorts row `row`'s entries by index in place (used by the TF-IDF
    /// builders after concurrent/out-of-order assembly).
    pub fn sort_row(&mut self, row: usize) {
        let (values, indices) = self.row_mut(row);
        let mut order: Vec<usize> = (0..indices.len()).collect();
        order.sort_unstable_by_key(|&i| indices[i]);
        let sorted_values: Vec<f64> = order.iter().map(|&i| values[i]).collect();
        let sorted_indices: Vec<u32> = order.iter().map(|&i| indices[i]).collect();
        values.copy_from_slice(&sorted_values);
        indices.copy_from_slice(&sorted_indices);
    }

    pub fn total_nonzeros(&self) -> usize {
        self.cursor
    }
}
