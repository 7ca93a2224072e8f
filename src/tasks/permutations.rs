/// Every ordering of the characters of `word`.
///
/// Backtracking over a growing prefix and a shrinking suffix, always picking
/// the remaining positions left to right. Yields exactly `n!` strings for a
/// word of `n` characters, repeats included: `"aab"` produces six strings
/// with duplicates, and `""` produces one empty string.
///
/// Output grows factorially with the word length and no limit is applied.
pub fn generate(word: &str) -> Vec<String> {
    let suffix: Vec<char> = word.chars().collect();
    let mut results = Vec::new();
    let mut prefix = String::with_capacity(word.len());
    permute(&mut prefix, &suffix, &mut results);
    results
}

fn permute(prefix: &mut String, suffix: &[char], results: &mut Vec<String>) {
    if suffix.is_empty() {
        results.push(prefix.clone());
        return;
    }

    for i in 0..suffix.len() {
        let mut rest = Vec::with_capacity(suffix.len() - 1);
        rest.extend_from_slice(&suffix[..i]);
        rest.extend_from_slice(&suffix[i + 1..]);

        prefix.push(suffix[i]);
        permute(prefix, &rest, results);
        prefix.pop();
    }
}

/// `n!`, or `None` if it overflows `usize`.
pub fn factorial(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}
