//! Plane letter-code lookup
//!
//! Field sheets and geo layers identify the four discontinuity sets either by
//! integer id or by the letter codes A-D. Both loaders resolve letters
//! through this single table.

/// Plane id for readings that could not be classified
pub const UNCLASSIFIED: i8 = 0;

/// The four discontinuity-set identifiers
pub const PLANE_IDS: [i8; 4] = [1, 2, 3, 4];

/// Letter code to plane id mapping shared by the survey and geo loaders
pub const PLANE_CODES: [(&str, i8); 4] = [("A", 1), ("B", 2), ("C", 3), ("D", 4)];

/// Resolve a raw plane cell to a plane id.
///
/// Accepts the letter codes (case-insensitive), integer ids, or numeric
/// strings; anything else coerces to [`UNCLASSIFIED`].
pub fn plane_from_code(raw: &str) -> i8 {
    let trimmed = raw.trim();
    for (code, id) in PLANE_CODES {
        if trimmed.eq_ignore_ascii_case(code) {
            return id;
        }
    }
    if let Ok(v) = trimmed.parse::<i8>() {
        return v;
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        if v.is_finite() && v >= i8::MIN as f64 && v <= i8::MAX as f64 {
            return v as i8;
        }
    }
    UNCLASSIFIED
}
