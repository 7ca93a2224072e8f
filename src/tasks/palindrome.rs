/// True if `word` reads the same forwards and backwards.
///
/// Compares characters, not grapheme clusters. The empty string and any
/// single character are palindromes.
pub fn check(word: &str) -> bool {
    word.chars().eq(word.chars().rev())
}
