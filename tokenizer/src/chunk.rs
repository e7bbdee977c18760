/// Splits `data` into chunks of roughly `chunk_size` bytes, pushing each
/// boundary forward to the next whitespace byte so a chunk never ends in
/// the middle of a word. Word boundaries are unaffected by ASCII case
/// folding, so this can run before or after [`crate::scan::uppercase_ascii_in_place`].
pub fn chunk_boundaries(data: &[u8], chunk_size: usize) -> Vec<(usize, usize)> {
    let mut boundaries = Vec::new();
    let mut start = 0usize;
    while start != data.len() {
        let mut end = (start + chunk_size).min(data.len());
        while end != data.len() && !is_chunk_separator(data[end]) {
            end += 1;
        }
        boundaries.push((start, end));
        start = end;
    }
    boundaries
}

fn is_chunk_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_chunks() {
        assert!(chunk_boundaries(b"", 4).is_empty());
    }

    #[test]
    fn chunk_boundary_extends_to_next_whitespace() {
        let data = b"aaaa bbbb cccc";
        let boundaries = chunk_boundaries(data, 3);
        assert_eq!(boundaries, vec![(0, 4), (4, 9), (9, 14)]);
        for (start, end) in &boundaries {
            assert!(*end == data.len() || is_chunk_separator(data[*end]));
        }
    }

    #[test]
    fn chunk_size_larger_than_input_yields_single_chunk() {
        let data = b"short text";
        assert_eq!(chunk_boundaries(data, 4096), vec![(0, data.len())]);
    }
}
