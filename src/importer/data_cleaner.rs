// ==========================================
// O&M Readiness Tracker - Scheme Row Cleaning
// ==========================================
// - TW-2 marker detection and stripping (case-insensitive)
// - serial number parsing ("12", "12.0")
// ==========================================

const SECONDARY_SITE_MARKER: &str = "tw-2";

pub struct DataCleaner;

impl DataCleaner {
    /// Returns (display name, has secondary site)
    pub fn clean_scheme_name(&self, raw: &str) -> (String, bool) {
        let lower = raw.to_ascii_lowercase();
        if !lower.contains(SECONDARY_SITE_MARKER) {
            return (collapse_spaces(raw), false);
        }

        // ascii lowering keeps byte offsets aligned with `raw`
        let mut cleaned = String::with_capacity(raw.len());
        let mut rest = 0;
        for (idx, _) in lower.match_indices(SECONDARY_SITE_MARKER) {
            cleaned.push_str(&raw[rest..idx]);
            rest = idx + SECONDARY_SITE_MARKER.len();
        }
        cleaned.push_str(&raw[rest..]);

        (collapse_spaces(&cleaned), true)
    }

    /// Spreadsheet serials often arrive as floats
    pub fn parse_sr_no(&self, raw: &str) -> Option<i64> {
        let v = raw.trim();
        if let Ok(n) = v.parse::<i64>() {
            return Some(n);
        }
        match v.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
            _ => None,
        }
    }

    /// Scheme ids exported as numbers lose nothing, but "1234.0" must read as "1234"
    pub fn clean_scheme_id(&self, raw: &str) -> String {
        let v = raw.trim();
        match v.strip_suffix(".0") {
            Some(int_part) if !int_part.is_empty() && int_part.chars().all(|c| c.is_ascii_digit()) => {
                int_part.to_string()
            }
            _ => v.to_string(),
        }
    }
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
