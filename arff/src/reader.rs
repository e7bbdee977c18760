use std::str;

use asapcat_vectors::{DataSet, DenseVectorSet, SparseVectorSet, VectorSetKind};
use asapcat_wordbank::{WordBank, WordList};

use crate::error::Error;

/// Bracket syntax for array-mode records differs from classic ARFF: dense
/// rows are `[v, v, v]` rather than bare comma-separated values, and sparse
/// rows are `(idx val, idx val)` rather than `{idx val, idx val}`. Resolves
/// the near-duplicate `arff`/`array` readers into one parser parameterised
/// on bracket choice, per the Open Question recorded in the design notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Arff,
    Array,
}

impl Mode {
    fn sparse_brackets(self) -> (u8, u8) {
        match self {
            Mode::Arff => (b'{', b'}'),
            Mode::Array => (b'(', b')'),
        }
    }
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Skips runs of whitespace (including newlines) and `%`-to-end-of-line
    /// comments, alternating between the two until neither applies.
    fn skip_blank_lines(&mut self) {
        loop {
            while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
                self.pos += 1;
            }
            if self.peek() == Some(b'%') {
                while !matches!(self.peek(), Some(b'\n') | None) {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn skip_ws_not_newline(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace() && b != b'\n') {
            self.pos += 1;
        }
    }

    fn read_token(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if !b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        str::from_utf8(&self.bytes[start..self.pos]).expect("input is valid UTF-8")
    }

    fn read_number(&mut self) -> Result<f64, Error> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        {
            self.pos += 1;
        }
        let text = str::from_utf8(&self.bytes[start..self.pos]).expect("input is valid UTF-8");
        text.parse::<f64>()
            .map_err(|_| Error::parse(format!("invalid numeric literal '{text}'")))
    }

    fn read_index(&mut self) -> Result<u32, Error> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        let text = str::from_utf8(&self.bytes[start..self.pos]).expect("input is valid UTF-8");
        text.parse::<u32>()
            .map_err(|_| Error::parse(format!("invalid sparse index '{text}'")))
    }
}

fn read_relation_name(sc: &mut Scanner) -> Result<String, Error> {
    if sc.peek() == Some(b'\'') {
        sc.bump();
        let start = sc.pos;
        loop {
            match sc.bump() {
                Some(b'\\') => {
                    sc.bump();
                }
                Some(b'\'') => break,
                Some(_) => {}
                None => return Err(Error::parse("unterminated quoted relation name")),
            }
        }
        let end = sc.pos - 1;
        Ok(String::from_utf8_lossy(&sc.bytes[start..end]).into_owned())
    } else {
        Ok(sc.read_token().to_string())
    }
}

enum Record {
    Dense(Vec<f64>),
    Sparse(Vec<(u32, f64)>),
}

fn read_dense_record(sc: &mut Scanner, mode: Mode) -> Result<Vec<f64>, Error> {
    if mode == Mode::Array {
        sc.skip_ws_not_newline();
        if sc.bump() != Some(b'[') {
            return Err(Error::parse("expected '[' to start an array-mode dense record"));
        }
    }
    let mut values = Vec::new();
    loop {
        sc.skip_ws_not_newline();
        if sc.peek() == Some(b'?') {
            return Err(Error::parse("missing data ('?') is not supported"));
        }
        values.push(sc.read_number()?);
        sc.skip_ws_not_newline();
        match sc.peek() {
            Some(b',') => {
                sc.bump();
            }
            Some(b']') if mode == Mode::Array => {
                sc.bump();
                break;
            }
            _ => break,
        }
    }
    Ok(values)
}

fn read_sparse_record(sc: &mut Scanner, mode: Mode) -> Result<Vec<(u32, f64)>, Error> {
    let (_, close) = mode.sparse_brackets();
    sc.bump();
    let mut entries = Vec::new();
    sc.skip_ws_not_newline();
    if sc.peek() == Some(close) {
        sc.bump();
        return Ok(entries);
    }
    loop {
        let idx = sc.read_index()?;
        sc.skip_ws_not_newline();
        if sc.peek() == Some(b'?') {
            return Err(Error::parse("missing data ('?') is not supported"));
        }
        let val = sc.read_number()?;
        entries.push((idx, val));
        sc.skip_ws_not_newline();
        match sc.bump() {
            Some(b',') => {
                sc.skip_ws_not_newline();
            }
            Some(b) if b == close => break,
            _ => return Err(Error::UnterminatedSparseRecord),
        }
    }
    Ok(entries)
}

fn read_record(sc: &mut Scanner, mode: Mode) -> Result<Option<Record>, Error> {
    sc.skip_blank_lines();
    if sc.at_end() {
        return Ok(None);
    }
    let (open, _) = mode.sparse_brackets();
    if sc.peek() == Some(open) {
        Ok(Some(Record::Sparse(read_sparse_record(sc, mode)?)))
    } else {
        Ok(Some(Record::Dense(read_dense_record(sc, mode)?)))
    }
}

/// Parses a complete ARFF/array-syntax document into a [`DataSet`].
///
/// Whether the result is stored densely or sparsely is decided once, from
/// the first data record's bracket — every record in a well-formed file
/// agrees, so later records are coerced to match rather than re-deciding
/// per row.
pub fn read(input: &str, mode: Mode) -> Result<DataSet, Error> {
    let mut sc = Scanner::new(input);
    let mut relation: Option<String> = None;
    let mut attribute_names: Vec<String> = Vec::new();

    loop {
        sc.skip_blank_lines();
        if sc.at_end() {
            return Err(Error::parse("file ended before an '@data' section"));
        }
        if sc.bump() != Some(b'@') {
            return Err(Error::parse("expected '@' to start a header line"));
        }
        let keyword = sc.read_token().to_ascii_lowercase();
        match keyword.as_str() {
            "relation" => {
                sc.skip_ws_not_newline();
                relation = Some(read_relation_name(&mut sc)?);
            }
            "attribute" => {
                sc.skip_ws_not_newline();
                let name = sc.read_token().to_string();
                sc.skip_ws_not_newline();
                let ty = sc.read_token().to_string();
                if !ty.eq_ignore_ascii_case("numeric") {
                    log::warn!("treating non-numeric attribute '{name}' of type '{ty}' as numeric");
                }
                attribute_names.push(name);
            }
            "data" => break,
            other => return Err(Error::parse(format!("unknown header keyword '@{other}'"))),
        }
    }

    let relation = relation.ok_or(Error::MissingRelation)?;
    if attribute_names.is_empty() {
        return Err(Error::MissingAttribute);
    }
    let dim = attribute_names.len();

    let mut records = Vec::new();
    while let Some(record) = read_record(&mut sc, mode)? {
        records.push(record);
    }

    let is_sparse = records.iter().any(|r| matches!(r, Record::Sparse(_)));

    let vectors = if is_sparse {
        let total_nnz: usize = records
            .iter()
            .map(|r| match r {
                Record::Sparse(e) => e.len(),
                Record::Dense(v) => v.iter().filter(|&&x| x != 0.0).count(),
            })
            .sum();
        let mut set = SparseVectorSet::new(records.len(), dim as u32, total_nnz);
        for record in &records {
            let entries: Vec<(u32, f64)> = match record {
                Record::Sparse(e) => e.clone(),
                Record::Dense(v) => v
                    .iter()
                    .enumerate()
                    .filter(|(_, &x)| x != 0.0)
                    .map(|(i, &x)| (i as u32, x))
                    .collect(),
            };
            let row = set.emplace_back(entries.len())?;
            let (values, indices) = set.row_mut(row);
            for (i, &(idx, val)) in entries.iter().enumerate() {
                indices[i] = idx;
                values[i] = val;
            }
        }
        VectorSetKind::Sparse(set)
    } else {
        let mut set = DenseVectorSet::new(records.len(), dim);
        for record in &records {
            let row = set.emplace_back()?;
            if let Record::Dense(values) = record {
                if values.len() != dim {
                    return Err(Error::parse(
                        "dense record width does not match the number of declared attributes",
                    ));
                }
                set.row_mut(row).copy_from_slice(values);
            }
        }
        VectorSetKind::Dense(set)
    };

    let mut bank = WordBank::managed();
    let mut columns = Vec::with_capacity(dim);
    for name in &attribute_names {
        columns.push(bank.store(name.as_bytes())?);
    }
    let mut column_list = WordList::new(bank);
    for handle in columns {
        column_list.push(handle, ());
    }

    Ok(DataSet::new(relation, column_list, None, vectors, false)?)
}
