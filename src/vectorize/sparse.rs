// Sparse feature vectors and cosine similarity over them.
//
// TF-IDF rows are mostly zeros, so each row stores only its non-zero
// (column, weight) pairs, sorted by column.

/// One row of a sparse feature matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from (column, weight) pairs in any order.
    ///
    /// Duplicate columns are summed and zero weights dropped.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|&(col, _)| col);
        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(pairs.len());
        for (col, weight) in pairs {
            match entries.last_mut() {
                Some(last) if last.0 == col => last.1 += weight,
                _ => entries.push((col, weight)),
            }
        }
        entries.retain(|&(_, w)| w != 0.0);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight at a column (0.0 when absent).
    pub fn get(&self, col: usize) -> f64 {
        self.entries
            .binary_search_by_key(&col, |&(c, _)| c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ca, wa) = self.entries[i];
            let (cb, wb) = other.entries[j];
            if ca == cb {
                sum += wa * wb;
                i += 1;
                j += 1;
            } else if ca < cb {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }

    pub fn l2_norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn l1_norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w.abs()).sum()
    }

    /// Divide every weight by `norm`; a zero norm leaves the vector as is.
    pub fn scale_by(&mut self, norm: f64) {
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Cosine similarity between two sparse rows.
///
/// A zero row has similarity 0.0 with everything, matching the usual
/// pairwise-cosine convention of normalizing zero rows to zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.l2_norm() * b.l2_norm();
    if denom < f64::EPSILON {
        0.0
    } else {
        a.dot(b) / denom
    }
}

/// Similarity of one query row against every candidate row, in order.
pub fn cosine_against(query: &SparseVector, candidates: &[SparseVector]) -> Vec<f64> {
    candidates
        .iter()
        .map(|c| cosine_similarity(query, c))
        .collect()
}

/// Index of the first maximum. `None` for an empty slice.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
