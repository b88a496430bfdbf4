//! Semantic schema mapping: assigns each role to at most one column.
//!
//! Resolution is an ordered list of pure rules, evaluated in a fixed
//! sequence so the priority is independently testable:
//! 1. keyword pass, once per role in priority order (`name` falls back to
//!    the first column within its own step);
//! 2. numeric-shape fallback for `hourly_rate`;
//! 3. first-column fallback for `id`;
//! 4. `unnamed`/`popis` scan for `description`.
//!
//! A column claimed by an earlier role's keyword match is excluded from the
//! keyword scans of later roles: the availability keywords are short (`od`,
//! `do`) and would otherwise re-claim columns like `cenahod`. Fallback
//! bindings do share columns (a one-column table is both `id` and `name`).

use std::collections::BTreeSet;

use tidysheet_model::{
    CleanedTable, MatchReason, PipelineOptions, RoleMap, SemanticRole,
};
use tracing::debug;

/// Computes the role-to-column mapping for a cleaned table. Total: every
/// outcome is either a binding or a role left unresolved, never an error.
pub fn map_schema(table: &CleanedTable, options: &PipelineOptions) -> RoleMap {
    let mut map = RoleMap::new();
    let mut claimed: BTreeSet<String> = BTreeSet::new();

    // Pass 1: keywords, in fixed role priority order.
    for role in SemanticRole::PRIORITY {
        if let Some((column, keyword)) =
            find_by_keywords(&table.columns, options.keywords.for_role(role), &claimed)
        {
            claimed.insert(column.clone());
            map.bind(role, column, MatchReason::Keyword(keyword));
        } else if role == SemanticRole::Name
            && let Some(first) = table.columns.first()
        {
            // Every table is assumed to carry a name-bearing column.
            map.bind(role, first.clone(), MatchReason::FirstColumn);
        }
    }

    // Pass 2: a column that is mostly plain numbers is probably the rate.
    if !map.is_resolved(SemanticRole::HourlyRate)
        && let Some(column) = find_numeric_shaped(table, options.numeric_ratio_threshold)
    {
        map.bind(SemanticRole::HourlyRate, column, MatchReason::NumericShape);
    }

    // Pass 3: id falls back to the first column.
    if !map.is_resolved(SemanticRole::Id)
        && let Some(first) = table.columns.first()
    {
        map.bind(SemanticRole::Id, first.clone(), MatchReason::FirstColumn);
    }

    // Pass 4: description may come from an unnamed/popis column, or stay
    // unresolved. It is the only role allowed to end without a binding on a
    // non-empty table.
    if !map.is_resolved(SemanticRole::Description)
        && let Some(column) = table.columns.iter().find(|column| {
            let lower = column.to_lowercase();
            lower.contains("unnamed") || lower.contains("popis")
        })
    {
        map.bind(
            SemanticRole::Description,
            column.clone(),
            MatchReason::UnnamedScan,
        );
    }

    let unmapped: Vec<String> = table
        .columns
        .iter()
        .filter(|column| {
            !map.bindings()
                .iter()
                .any(|binding| binding.column == **column)
        })
        .cloned()
        .collect();
    map.set_unmapped(unmapped);

    for binding in map.bindings() {
        debug!(role = %binding.role, column = %binding.column, reason = %binding.reason, "role bound");
    }
    map
}

/// First unclaimed column (left to right) whose lowercased identifier
/// contains any of the keywords, together with the keyword that hit.
fn find_by_keywords(
    columns: &[String],
    keywords: &[String],
    claimed: &BTreeSet<String>,
) -> Option<(String, String)> {
    for column in columns {
        if claimed.contains(column) {
            continue;
        }
        let lower = column.to_lowercase();
        for keyword in keywords {
            if lower.contains(&keyword.to_lowercase()) {
                return Some((column.clone(), keyword.clone()));
            }
        }
    }
    None
}

/// First column where the share of non-null samples matching the
/// plain-number pattern exceeds the threshold.
fn find_numeric_shaped(table: &CleanedTable, threshold: f64) -> Option<String> {
    for (index, column) in table.columns.iter().enumerate() {
        let samples: Vec<String> = table
            .column_values(index)
            .map(|cell| cell.as_display_text())
            .collect();
        if samples.is_empty() {
            continue;
        }
        let matching = samples
            .iter()
            .filter(|sample| is_plain_number(sample.trim()))
            .count();
        let ratio = matching as f64 / samples.len() as f64;
        if ratio > threshold {
            debug!(column = %column, ratio, "numeric-shaped column found");
            return Some(column.clone());
        }
    }
    None
}

/// Strict plain-number shape: digits, then optionally a single `.` or `,`
/// followed by one or two digits. No sign, no grouping, no exponent.
pub fn is_plain_number(value: &str) -> bool {
    let (integral, fraction) = match value.find(['.', ',']) {
        Some(position) => (&value[..position], Some(&value[position + 1..])),
        None => (value, None),
    };
    if integral.is_empty() || !integral.bytes().all(|byte| byte.is_ascii_digit()) {
        return false;
    }
    match fraction {
        None => true,
        Some(digits) => {
            (1..=2).contains(&digits.len())
                && digits.bytes().all(|byte| byte.is_ascii_digit())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidysheet_model::CellValue;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> CleanedTable {
        CleanedTable::new(columns.iter().map(|c| (*c).to_string()).collect(), rows)
    }

    #[test]
    fn keyword_beats_numeric_shape() {
        // `cena` matches by keyword even though another column is numeric.
        let table = table(
            &["cena_za_den", "mnozstvi"],
            vec![
                vec![text("abc"), text("10")],
                vec![text("def"), text("20")],
            ],
        );
        let map = map_schema(&table, &PipelineOptions::default());
        let binding = map.binding_for(SemanticRole::HourlyRate).unwrap();
        assert_eq!(binding.column, "cena_za_den");
        assert_eq!(binding.reason, MatchReason::Keyword("cena".into()));
    }

    #[test]
    fn numeric_shape_fallback_binds_rate() {
        let table = table(
            &["stroj", "sloupec"],
            vec![
                vec![text("Bagr"), text("350")],
                vec![text("Vrtačka"), text("125,50")],
                vec![text("Jeřáb"), text("n/a")],
            ],
        );
        let map = map_schema(&table, &PipelineOptions::default());
        let binding = map.binding_for(SemanticRole::HourlyRate).unwrap();
        assert_eq!(binding.column, "sloupec");
        assert_eq!(binding.reason, MatchReason::NumericShape);
    }

    #[test]
    fn shape_fallback_respects_threshold() {
        // Exactly 50% plain numbers does not exceed the 0.6 threshold.
        let table = table(
            &["stroj", "sloupec"],
            vec![
                vec![text("a"), text("350")],
                vec![text("b"), text("n/a")],
            ],
        );
        let map = map_schema(&table, &PipelineOptions::default());
        assert!(!map.is_resolved(SemanticRole::HourlyRate));
    }

    #[test]
    fn name_and_id_always_resolve() {
        let table = table(&["sloupec"], vec![vec![text("x")]]);
        let map = map_schema(&table, &PipelineOptions::default());
        assert_eq!(map.column_for(SemanticRole::Name), Some("sloupec"));
        assert_eq!(map.column_for(SemanticRole::Id), Some("sloupec"));
    }

    #[test]
    fn description_may_stay_unresolved() {
        let table = table(&["nazev", "cena"], vec![vec![text("a"), text("1")]]);
        let map = map_schema(&table, &PipelineOptions::default());
        assert!(!map.is_resolved(SemanticRole::Description));
    }

    #[test]
    fn description_unnamed_scan() {
        let table = table(
            &["nazev", "col_1", "unnamed_2"],
            vec![vec![text("a"), text("b"), text("c")]],
        );
        let map = map_schema(&table, &PipelineOptions::default());
        let binding = map.binding_for(SemanticRole::Description).unwrap();
        assert_eq!(binding.column, "unnamed_2");
        assert_eq!(binding.reason, MatchReason::UnnamedScan);
    }

    #[test]
    fn first_keyword_match_wins_left_to_right() {
        let table = table(
            &["kod", "id_stroje"],
            vec![vec![text("a"), text("b")]],
        );
        let map = map_schema(&table, &PipelineOptions::default());
        // `kod` contains `id`? No - but it contains `kod`; both columns match
        // an id keyword, the leftmost wins.
        assert_eq!(map.column_for(SemanticRole::Id), Some("kod"));
    }

    #[test]
    fn keyword_claims_are_exclusive_across_roles() {
        // `cenahod` contains the availability keyword `od`, but hourly_rate
        // sits earlier in the priority order and claims the column first.
        let table = table(
            &["id", "nazev_stroje", "cenahod"],
            vec![vec![text("1"), text("Bagr"), text("350")]],
        );
        let map = map_schema(&table, &PipelineOptions::default());
        assert_eq!(map.column_for(SemanticRole::HourlyRate), Some("cenahod"));
        assert!(!map.is_resolved(SemanticRole::AvailableFrom));
        assert!(!map.is_resolved(SemanticRole::AvailableTo));
    }

    #[test]
    fn unmapped_columns_are_reported() {
        let table = table(
            &["nazev", "cena", "barva"],
            vec![vec![text("a"), text("1"), text("b")]],
        );
        let map = map_schema(&table, &PipelineOptions::default());
        assert!(map.unmapped_columns.contains(&"barva".to_string()));
    }

    #[test]
    fn plain_number_pattern() {
        assert!(is_plain_number("999"));
        assert!(is_plain_number("1200.50"));
        assert!(is_plain_number("1200,5"));
        assert!(!is_plain_number("1200.505"));
        assert!(!is_plain_number("1.200,50"));
        assert!(!is_plain_number("-5"));
        assert!(!is_plain_number(""));
        assert!(!is_plain_number("12a"));
    }
}
