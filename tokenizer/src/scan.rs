/// Folds ASCII lowercase letters to uppercase in place. Non-ASCII bytes and
/// everything outside `a..=z` are left untouched, matching the byte-wise
/// `toupper` pass the catalogue builder runs before word extraction.
pub fn uppercase_ascii_in_place(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        if b.is_ascii_lowercase() {
            *b = b.to_ascii_uppercase();
        }
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b == b'\''
}

/// Extracts maximal runs of `[A-Z']` from an already-uppercased buffer.
/// Everything else acts as a separator; empty runs are never yielded.
pub struct WordScanner<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WordScanner<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }
}

impl<'a> Iterator for WordScanner<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let len = self.buf.len();
        while self.pos < len && !is_word_byte(self.buf[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= len {
            return None;
        }
        let start = self.pos;
        while self.pos < len && is_word_byte(self.buf[self.pos]) {
            self.pos += 1;
        }
        Some(&self.buf[start..self.pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercase_leaves_non_lowercase_untouched() {
        let mut buf = b"Hello, World! 123".to_vec();
        uppercase_ascii_in_place(&mut buf);
        assert_eq!(&buf, b"HELLO, WORLD! 123");
    }

    #[test]
    fn scanner_extracts_runs_of_letters_and_apostrophes() {
        let mut buf = b"don't panic, it's 42 fine.".to_vec();
        uppercase_ascii_in_place(&mut buf);
        let words: Vec<&[u8]> = WordScanner::new(&buf).collect();
        assert_eq!(
            words,
            vec![
                b"DON'T".as_slice(),
                b"PANIC".as_slice(),
                b"IT'S".as_slice(),
                b"FINE".as_slice(),
            ]
        );
    }

    #[test]
    fn scanner_on_empty_or_separator_only_input_yields_nothing() {
        assert_eq!(WordScanner::new(b"   \t\r\n ").count(), 0);
        assert_eq!(WordScanner::new(b"").count(), 0);
    }
}
