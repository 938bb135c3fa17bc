//! Split method names into word tokens.
//!
//! Tokens are the words of a CamelCase identifier: `FindByAgeLessThan` → `Find`, `By`, `Age`, `Less`, `Than`.
//! A new token starts at an upper-case letter that follows a lower-case letter or a digit, and at the last capital
//! of an acronym run that is followed by a lower-case letter (`UserIDIn` → `User`, `ID`, `In`). Digits stay with the
//! word before them, so `Top5` is a single token.
//!
//! Tokenization is total: it never fails, has no side effects, and the tokens are borrowed slices of the input whose
//! concatenation is exactly the input.

/// Split an identifier into its word tokens.
///
/// ## Examples
///
/// ```rust
/// use repogen::frontend::tokenizer::tokenize;
///
/// assert_eq!(tokenize("FindTop5ByUserIDIn"), vec!["Find", "Top5", "By", "User", "ID", "In"]);
/// assert!(tokenize("").is_empty());
/// ```
pub fn tokenize(ident: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = ident.char_indices().collect();
    let mut tokens = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let (offset, c) = chars[i];
        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, n)| n);

        let boundary = c.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next.is_some_and(char::is_lowercase)));

        if boundary {
            tokens.push(&ident[start..offset]);
            start = offset;
        }
    }

    if start < ident.len() {
        tokens.push(&ident[start..]);
    }
    tokens
}
