//! Text metrics shared by the cleaner, scoring engine and title resolver.
//!
//! Length is measured in a script-aware unit: space-separated scripts count
//! words, while CJK, kana and Arabic count characters. This keeps a single
//! threshold such as `min_text_length = 25` meaningful across languages.

/// Whether `c` is counted individually rather than as part of a word.
///
/// Covers CJK ideographs (including extension A and compatibility blocks),
/// hiragana, katakana, and the Arabic blocks.
#[must_use]
pub fn is_counted_per_char(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}' // Katakana
        | '\u{31F0}'..='\u{31FF}' // Katakana phonetic extensions
        | '\u{3400}'..='\u{4DBF}' // CJK extension A
        | '\u{4E00}'..='\u{9FFF}' // CJK unified ideographs
        | '\u{F900}'..='\u{FAFF}' // CJK compatibility ideographs
        | '\u{FF66}'..='\u{FF9F}' // Half-width katakana
        | '\u{0600}'..='\u{06FF}' // Arabic
        | '\u{0750}'..='\u{077F}' // Arabic supplement
        | '\u{08A0}'..='\u{08FF}' // Arabic extended-A
        | '\u{FB50}'..='\u{FDFF}' // Arabic presentation forms-A
        | '\u{FE70}'..='\u{FEFF}' // Arabic presentation forms-B
    )
}

/// Script-aware length of `s`.
///
/// Each CJK ideograph, kana and Arabic character counts as one; everything
/// else counts one per whitespace-delimited word. A per-character script
/// character also ends the word before it, so `abc世def` is three.
///
/// # Example
///
/// ```rust
/// use rs_distill::text_metrics::text_length;
///
/// assert_eq!(text_length("hello brave new world"), 4);
/// assert_eq!(text_length("你好 world"), 3);
/// ```
#[must_use]
pub fn text_length(s: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in s.chars() {
        if is_counted_per_char(c) {
            count += 1;
            in_word = false;
        } else if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            count += 1;
            in_word = true;
        }
    }

    count
}

/// Levenshtein similarity ratio in `[0, 1]`.
///
/// `1 - distance / max(len)` over chars. Symmetric and deterministic;
/// `0.0` when either side is empty, `1.0` for identical non-empty strings.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let distance = levenshtein(&a, &b);
    let longest = a.len().max(b.len());
    1.0 - distance as f64 / longest as f64
}

/// Edit distance with a rolling two-row table.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Longest common contiguous substring of `a` and `b`.
///
/// On ties the match ending earliest in `a` wins.
#[must_use]
pub fn longest_common_substring(a: &str, b: &str) -> String {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best_len = 0;
    let mut best_end = 0;

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            curr[j] = if a[i - 1] == b[j - 1] { prev[j - 1] + 1 } else { 0 };
            // Strictly greater keeps the earliest end index in `a`.
            if curr[j] > best_len {
                best_len = curr[j];
                best_end = i;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    a[best_end - best_len..best_end].iter().collect()
}

/// Longest common subsequence of `a` and `b`.
///
/// The backtrack prefers dropping characters of `b`, which keeps the chosen
/// characters of `a` as early as possible.
#[must_use]
pub fn longest_common_subsequence(a: &str, b: &str) -> String {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (n, m) = (a.len(), b.len());

    // table[i][j] = LCS length of a[i..] and b[j..]
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if a[i] == b[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut out = String::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            out.push(a[i]);
            i += 1;
            j += 1;
        } else if table[i][j + 1] >= table[i + 1][j] {
            j += 1;
        } else {
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_length_counts_latin_words() {
        assert_eq!(text_length(""), 0);
        assert_eq!(text_length("   "), 0);
        assert_eq!(text_length("one two  three\nfour"), 4);
    }

    #[test]
    fn test_text_length_counts_cjk_kana_arabic_chars() {
        assert_eq!(text_length("中文内容"), 4);
        assert_eq!(text_length("ひらがなカタカナ"), 8);
        assert_eq!(text_length("مرحبا"), 5);
        assert_eq!(text_length("Rust 语言 rocks"), 4);
        assert_eq!(text_length("abc世def"), 3);
    }

    #[test]
    fn test_text_length_monotonic_under_concatenation() {
        let samples = ["alpha beta", "gamma", " delta", "中文", "内容"];
        for a in samples {
            for b in samples {
                let joined = format!("{a}{b}");
                assert!(text_length(&joined) >= text_length(a), "{a:?} + {b:?}");
            }
        }
    }

    #[test]
    fn test_similarity_identity_empty_symmetry() {
        assert!((similarity("kitten", "kitten") - 1.0).abs() < f64::EPSILON);
        assert!(similarity("kitten", "").abs() < f64::EPSILON);
        assert!(similarity("", "kitten").abs() < f64::EPSILON);
        assert!((similarity("kitten", "sitting") - similarity("sitting", "kitten")).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_ratio_value() {
        // distance 3 over max length 7
        let expected = 1.0 - 3.0 / 7.0;
        assert!((similarity("kitten", "sitting") - expected).abs() < 1e-9);
    }

    #[test]
    fn test_longest_common_substring() {
        assert_eq!(longest_common_substring("Post Title | Site", "Post Title"), "Post Title");
        assert_eq!(longest_common_substring("abc", "xyz"), "");
        assert_eq!(longest_common_substring("", "xyz"), "");
    }

    #[test]
    fn test_longest_common_substring_tie_prefers_earliest_end_in_a() {
        // "ab" and "cd" are both length 2; "ab" ends first in `a`.
        assert_eq!(longest_common_substring("ab-cd", "cd-ab"), "ab");
    }

    #[test]
    fn test_longest_common_subsequence() {
        assert_eq!(longest_common_subsequence("ABCBDAB", "BDCABA").chars().count(), 4);
        assert_eq!(longest_common_subsequence("Markets Rally", "Markets — Rally"), "Markets Rally");
        assert_eq!(longest_common_subsequence("abc", ""), "");
    }
}
