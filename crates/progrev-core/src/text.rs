/// Maximum length of a Telegram text message, in characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Split `text` into consecutive parts of at most `limit` characters.
///
/// Lengths are counted in Unicode scalar values, so a part never ends in
/// the middle of a character. Empty input yields no parts.
///
/// Panics if `limit` is zero.
pub fn split_message(text: &str, limit: usize) -> Vec<&str> {
    assert!(limit > 0, "split limit must be positive");

    let mut parts = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(limit)
            .map_or(rest.len(), |(idx, _)| idx);
        let (head, tail) = rest.split_at(cut);
        parts.push(head);
        rest = tail;
    }
    parts
}
