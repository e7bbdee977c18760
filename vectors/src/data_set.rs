use asapcat_toolkit::Error;
use asapcat_wordbank::WordList;

use crate::vector_set::{DenseVectorSet, SparseVectorSet};

/// Either backing store a [`DataSet`] can hold.
#[derive(Debug)]
pub enum VectorSetKind {
    Dense(DenseVectorSet),
    Sparse(SparseVectorSet),
}

impl VectorSetKind {
    pub fn len(&self) -> usize {
        match self {
            VectorSetKind::Dense(d) => d.len(),
            VectorSetKind::Sparse(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dim(&self) -> usize {
        match self {
            VectorSetKind::Dense(d) => d.dim(),
            VectorSetKind::Sparse(s) => s.dim() as usize,
        }
    }
}

/// A named matrix: a relation name, a column (attribute) index, an optional
/// row (document) index, the vector data itself, and an orientation flag.
///
/// Column names are interned through a [`WordList`] rather than kept as
/// plain `String`s, matching how every other word-keyed container in this
/// workspace stores its keys.
#[derive(Debug)]
pub struct DataSet {
    relation_name: String,
    columns: WordList<()>,
    row_names: Option<Vec<String>>,
    vectors: VectorSetKind,
    is_transposed: bool,
}

impl DataSet {
    pub fn new(
        relation_name: impl Into<String>,
        columns: WordList<()>,
        row_names: Option<Vec<String>>,
        vectors: VectorSetKind,
        is_transposed: bool,
    ) -> Result<Self, Error> {
        let set = Self {
            relation_name: relation_name.into(),
            columns,
            row_names,
            vectors,
            is_transposed,
        };
        set.validate()?;
        Ok(set)
    }

    /// Checks the size invariants binding column index, row index, and
    /// vector set dimensions together.
    pub fn validate(&self) -> Result<(), Error> {
        if self.vectors.dim() != self.columns.size() {
            return Err(Error::invariant(format!(
                "vector dimension {} does not match column index size {}",
                self.vectors.dim(),
                self.columns.size()
            )));
        }
        if let Some(row_names) = &self.row_names {
            let expected = if self.is_transposed {
                self.columns.size()
            } else {
                self.vectors.len()
            };
            if row_names.len() != expected {
                return Err(Error::invariant(format!(
                    "row index size {} does not match expected row count {}",
                    row_names.len(),
                    expected
                )));
            }
        }
        Ok(())
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn columns(&self) -> &WordList<()> {
        &self.columns
    }

    pub fn row_names(&self) -> Option<&[String]> {
        self.row_names.as_deref()
    }

    pub fn vectors(&self) -> &VectorSetKind {
        &self.vectors
    }

    pub fn vectors_mut(&mut self) -> &mut VectorSetKind {
        &mut self.vectors
    }

    pub fn is_transposed(&self) -> bool {
        self.is_transposed
    }

    pub fn num_rows(&self) -> usize {
        self.vectors.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.size()
    }
}
