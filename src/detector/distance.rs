//! Levenshtein edit distance

/// Minimum number of single-character insertions, deletions or substitutions
/// turning `a` into `b`. Unit cost for every edit.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows of the DP table are enough
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1)      // deletion
                .min(curr[j] + 1)                // insertion
                .min(prev[j] + cost);            // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
