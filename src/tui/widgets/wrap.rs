//! Greedy word wrapping for fixed-width terminal rows.

/// Wrap `text` into rows no wider than `width` columns.
///
/// Explicit newlines start a new row; words longer than a row are split.
/// Always returns at least one row.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.split('\n') {
        let mut row = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            loop {
                let needed = if row.is_empty() {
                    width(&word)
                } else {
                    width(&row) + 1 + width(&word)
                };
                if needed <= max_width {
                    if !row.is_empty() {
                        row.push(' ');
                    }
                    row.push_str(&word);
                    break;
                }
                if !row.is_empty() {
                    rows.push(std::mem::take(&mut row));
                    continue;
                }
                // Word alone is too wide: hard split.
                let split_at = word
                    .char_indices()
                    .nth(max_width)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                rows.push(word[..split_at].to_string());
                word = word[split_at..].to_string();
                if word.is_empty() {
                    break;
                }
            }
        }
        rows.push(row);
    }

    rows
}

/// Column width, counting one column per char.
fn width(s: &str) -> usize {
    s.chars().count()
}
