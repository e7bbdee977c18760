/// Smoothed TF-IDF weight: `tf * log10((N+1)/(df+1))`, confirmed against the
/// upstream driver's formula. The `+1` in both numerator and denominator
/// keeps a term that appears in every document from collapsing to a weight
/// of zero, and keeps `df == 0` from dividing by zero.
pub fn tfidf_weight(term_frequency: usize, num_documents: usize, doc_frequency: u32) -> f64 {
    let idf = ((num_documents as f64 + 1.0) / (doc_frequency as f64 + 1.0)).log10();
    term_frequency as f64 * idf
}
