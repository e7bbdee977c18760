use std::fmt::Write as _;

use asapcat_vectors::{DataSet, VectorSetKind};

use crate::reader::Mode;

/// Serialises a [`DataSet`] back to ARFF/array syntax. Chosen to round-trip
/// with [`crate::reader::read`] rather than copying the upstream writer
/// verbatim — that writer wraps dense rows in the *sparse* record's braces
/// and is only ever fed back into the array-mode IMR reader this crate does
/// not implement (see the design notes for that scope cut).
pub fn write(data_set: &DataSet, mode: Mode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "@relation {}", data_set.relation_name());
    out.push('\n');
    for (handle, _) in data_set.columns().iter() {
        let name = String::from_utf8_lossy(data_set.columns().resolve(handle));
        let _ = writeln!(out, "@attribute {name} numeric");
    }
    out.push_str("\n@data\n");

    match data_set.vectors() {
        VectorSetKind::Dense(d) => {
            for row in d.rows() {
                write_dense_row(&mut out, row, mode);
                out.push('\n');
            }
        }
        VectorSetKind::Sparse(s) => {
            for r in 0..s.len() {
                write_sparse_row(&mut out, s.row_indices(r), s.row_values(r), mode);
                out.push('\n');
            }
        }
    }

    out
}

fn write_dense_row(out: &mut String, row: &[f64], mode: Mode) {
    if mode == Mode::Array {
        out.push('[');
    }
    for (i, v) in row.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{v}");
    }
    if mode == Mode::Array {
        out.push(']');
    }
}

fn write_sparse_row(out: &mut String, indices: &[u32], values: &[f64], mode: Mode) {
    let (open, close) = match mode {
        Mode::Arff => ('{', '}'),
        Mode::Array => ('(', ')'),
    };
    out.push(open);
    for (i, (&idx, &v)) in indices.iter().zip(values).enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{idx} {v}");
    }
    out.push(close);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read;

    #[test]
    fn dense_round_trips_through_arff_syntax() {
        let original = "\
@relation rt
@attribute a numeric
@attribute b numeric
@data
1, 2
3, 4
";
        let ds = read(original, Mode::Arff).unwrap();
        let text = write(&ds, Mode::Arff);
        let ds2 = read(&text, Mode::Arff).unwrap();
        assert_eq!(ds2.num_rows(), 2);
        assert_eq!(ds2.num_columns(), 2);
        if let VectorSetKind::Dense(d) = ds2.vectors() {
            assert_eq!(d.row(0), &[1.0, 2.0]);
            assert_eq!(d.row(1), &[3.0, 4.0]);
        } else {
            unreachable!()
        }
    }

    #[test]
    fn sparse_round_trips_through_array_syntax() {
        let original = "\
@relation rt
@attribute a numeric
@attribute b numeric
@attribute c numeric
@data
(0 1.5, 2 2.5)
";
        let ds = read(original, Mode::Array).unwrap();
        let text = write(&ds, Mode::Array);
        let ds2 = read(&text, Mode::Array).unwrap();
        if let VectorSetKind::Sparse(s) = ds2.vectors() {
            assert_eq!(s.row_indices(0), &[0, 2]);
        } else {
            unreachable!()
        }
    }
}
