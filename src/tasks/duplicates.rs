use std::collections::HashMap;

/// Describe every character that occurs more than once in `word`.
///
/// One entry per repeated character. The order of entries follows the
/// iteration order of a `HashMap` and is not stable between runs; compare
/// the output as a set.
pub fn count(word: &str) -> Vec<String> {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for ch in word.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(ch, n)| describe(ch, n))
        .collect()
}

fn describe(ch: char, n: usize) -> String {
    format!("there are {} of letter {}", n, ch)
}
