use std::collections::HashMap;

/// Parses the loosely formatted `combo` column of a product into component
/// product ids.
///
/// Legacy rows store anything from `"1,2,3"` to `"[1,2,3]"` to the literal
/// string `null`. The rules mirror what the data actually contains: trim,
/// treat empty/`null` as no combo, wrap in brackets unless already
/// bracketed, then JSON-parse. Any parse failure means "not a combo",
/// never an error.
pub fn parse_combo_field(raw: Option<&str>) -> Option<Vec<i64>> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return None;
    }

    let candidate = if raw.starts_with('[') {
        raw.to_string()
    } else {
        format!("[{raw}]")
    };

    match serde_json::from_str::<Vec<i64>>(&candidate) {
        Ok(ids) if !ids.is_empty() => Some(ids),
        _ => None,
    }
}

/// Mints combo-group identifiers within a single transaction build.
///
/// Each purchase instance of a combo product gets its own group id,
/// `combo_{product_id}_{n}`, with `n` counted per combo product id. Buying
/// the same combo twice in one order therefore yields two distinct ids.
#[derive(Debug, Default)]
pub struct ComboSequence {
    counters: HashMap<i64, u32>,
}

impl ComboSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_group_id(&mut self, combo_product_id: i64) -> String {
        let counter = self.counters.entry(combo_product_id).or_insert(0);
        *counter += 1;
        format!("combo_{combo_product_id}_{counter}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bracketed_list() {
        assert_eq!(parse_combo_field(Some("[10,20]")), Some(vec![10, 20]));
    }

    #[test]
    fn test_parse_bare_list_gets_wrapped() {
        assert_eq!(parse_combo_field(Some("10, 20, 30")), Some(vec![10, 20, 30]));
        assert_eq!(parse_combo_field(Some(" 7 ")), Some(vec![7]));
    }

    #[test]
    fn test_empty_and_null_are_not_combos() {
        assert_eq!(parse_combo_field(None), None);
        assert_eq!(parse_combo_field(Some("")), None);
        assert_eq!(parse_combo_field(Some("   ")), None);
        assert_eq!(parse_combo_field(Some("null")), None);
        assert_eq!(parse_combo_field(Some("NULL")), None);
    }

    #[test]
    fn test_garbage_is_swallowed() {
        assert_eq!(parse_combo_field(Some("not json")), None);
        assert_eq!(parse_combo_field(Some("[1,2")), None);
        assert_eq!(parse_combo_field(Some("[]")), None);
        assert_eq!(parse_combo_field(Some("[\"a\",\"b\"]")), None);
    }

    #[test]
    fn test_group_ids_count_per_product() {
        let mut seq = ComboSequence::new();
        assert_eq!(seq.next_group_id(100), "combo_100_1");
        assert_eq!(seq.next_group_id(100), "combo_100_2");
        assert_eq!(seq.next_group_id(200), "combo_200_1");
        assert_eq!(seq.next_group_id(100), "combo_100_3");
    }
}
