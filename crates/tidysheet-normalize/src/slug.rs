//! Header slugification: free header text to stable column identifiers.

/// The closed diacritic fold table: the lowercase Czech letters mapped to
/// their unaccented ASCII equivalents. Lowercasing runs before the fold, so
/// uppercase forms go through the same table.
const DIACRITIC_FOLDS: [(char, char); 14] = [
    ('á', 'a'),
    ('č', 'c'),
    ('ď', 'd'),
    ('é', 'e'),
    ('ě', 'e'),
    ('í', 'i'),
    ('ň', 'n'),
    ('ó', 'o'),
    ('ř', 'r'),
    ('š', 's'),
    ('ť', 't'),
    ('ú', 'u'),
    ('ů', 'u'),
    ('ž', 'z'),
];

fn fold_diacritic(ch: char) -> char {
    DIACRITIC_FOLDS
        .iter()
        .find(|(accented, _)| *accented == ch)
        .map_or(ch, |(_, plain)| *plain)
}

/// Converts arbitrary header text into a canonical identifier: trimmed,
/// lowercased, diacritics folded, non-word characters dropped, whitespace
/// collapsed to single underscores, underscore runs collapsed.
///
/// Pure and total: unmappable characters are dropped, never an error. The
/// result may be empty (blank or all-symbol input); `clean_columns` supplies
/// the positional fallback. Idempotent by construction.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for ch in raw.trim().chars().flat_map(char::to_lowercase) {
        let ch = fold_diacritic(ch);
        if ch.is_whitespace() || ch == '_' {
            if !slug.ends_with('_') {
                slug.push('_');
            }
        } else if ch.is_ascii_alphanumeric() || ch == '-' {
            slug.push(ch);
        }
        // everything else (punctuation, unfoldable non-ASCII) is dropped
    }
    slug
}

/// Slugifies a full header row. Columns whose slug comes out empty get the
/// positional fallback `col_<i>`; duplicate slugs get `_2`, `_3`, … suffixes
/// so every source column keeps its own identifier.
pub fn clean_columns(headers: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(headers.len());
    for (index, header) in headers.iter().enumerate() {
        let slug = slugify(header);
        let base = if slug.is_empty() {
            format!("col_{index}")
        } else {
            slug
        };
        let mut candidate = base.clone();
        let mut suffix = 2usize;
        while columns.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        columns.push(candidate);
    }
    columns
}
