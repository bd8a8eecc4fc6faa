use once_cell::sync::Lazy;
use regex::Regex;

/// `OT` optionally followed by hours, e.g. `OT`, `OT2`, `OT 2.5`, `OT.5`.
static OT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"OT\s*(\d*\.?\d+)?").expect("OT pattern is valid"));

/// Attendance signal carried by a single day cell.
///
/// `present`, `absent` and `weekoff` are mutually exclusive; `ot` is
/// extracted independently and may accompany any of them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Classification {
    pub present: u32,
    pub absent: u32,
    pub weekoff: u32,
    pub ot: f64,
}

/// Trimmed, upper-cased form of a raw cell value.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Overtime hours written in an already normalized code; `0` when the code
/// has no `OT` token or the token has no number.
pub fn extract_ot(code: &str) -> f64 {
    OT_PATTERN
        .captures(code)
        .and_then(|caps| caps.get(1))
        .and_then(|hours| hours.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn is_present(code: &str) -> bool {
    matches!(code, "P" | "PR" | "PRESENT") || code.starts_with("P/")
}

fn is_absent(code: &str) -> bool {
    matches!(code, "A" | "ABSENT")
}

fn is_weekoff(code: &str) -> bool {
    matches!(code, "WO" | "W/O" | "WEEKOFF" | "WEEK OFF")
}

/// Classifies one raw cell. Total: unknown codes classify as nothing.
pub fn classify(raw: &str) -> Classification {
    let code = normalize_code(raw);
    if code.is_empty() {
        return Classification::default();
    }

    let mut result = Classification {
        ot: extract_ot(&code),
        ..Classification::default()
    };

    // Checked against the whole code, so "P OT2" is not present.
    if is_present(&code) {
        result.present = 1;
    } else if is_absent(&code) {
        result.absent = 1;
    } else if is_weekoff(&code) {
        result.weekoff = 1;
    }

    result
}
