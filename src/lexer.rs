//! The lexical normalizer.
//!
//! Strips whitespace and inserts the explicit concatenation operator `.` between operands that
//! are adjacent only implicitly in the surface syntax.

/// Removes whitespace from `regex` and inserts `.` between every adjacent pair of tokens that
/// stand in implicit concatenation.
///
/// A `.` is inserted between `x` and `y` iff the two-character pattern formed by classifying each
/// of `x`, `y` as `A` (alphanumeric) or itself is one of `AA`, `A(`, `*A`, `*(`, `)(`, `)A`. No
/// other rewriting happens here; invalid characters pass through untouched and are caught by the
/// later stages.
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`, since the output contains no whitespace
/// and every implicit-concatenation pair has already been made explicit.
pub fn normalize(regex: &str) -> String {
    let span = tracing::debug_span!("normalize", input_len = regex.len());
    let _enter = span.enter();

    let chars: Vec<char> = regex.chars().filter(|c| !c.is_whitespace()).collect();
    let mut result = String::with_capacity(chars.len() * 2);

    for (i, &ch) in chars.iter().enumerate() {
        result.push(ch);
        if i + 1 == chars.len() {
            break;
        }
        let class = |c: char| if c.is_ascii_alphanumeric() { 'A' } else { c };
        let pattern = [class(ch), class(chars[i + 1])];
        const CONCAT_PATTERNS: [[char; 2]; 6] =
            [['A', 'A'], ['A', '('], ['*', 'A'], ['*', '('], [')', '('], [')', 'A']];
        if CONCAT_PATTERNS.contains(&pattern) {
            result.push('.');
        }
    }

    tracing::trace!(output_len = result.len(), "normalized");
    result
}
