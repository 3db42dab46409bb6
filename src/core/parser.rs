// OilLog - core/parser.rs
//
// Line-oriented scanner turning a free-form maintenance log into oil change
// records. Core layer: accepts text, never touches the filesystem.
//
// Parsing is best-effort. Lines that match nothing are skipped silently;
// the only failure mode (unreadable input) belongs to the caller.

use crate::core::model::{OilChangeRecord, VehicleLog};
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// Result of parsing one maintenance log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Vehicle identifier and extracted oil changes.
    pub log: VehicleLog,
    /// Total lines in the input.
    pub lines_processed: usize,
    /// `<mileage> miles : ...` lines seen, oil changes or not.
    pub mileage_lines: usize,
    /// Mileage lines dropped because they describe some other service.
    pub skipped_events: usize,
}

/// Scanner state. The first non-blank line is the vehicle identifier;
/// everything after it is body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    ExpectVehicle,
    ExpectBody,
}

/// Classification of a single trimmed body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    /// `<Month> <yyyy>` heading; carries the whole trimmed line.
    Date(&'a str),
    /// `<digits> miles : <description>`.
    Mileage {
        digits: &'a str,
        description: &'a str,
    },
    /// Free text that is neither of the above.
    Other,
}

impl LineKind<'_> {
    /// Lines that may be folded into the preceding mileage line.
    fn is_continuation(&self) -> bool {
        matches!(self, LineKind::Blank | LineKind::Other)
    }
}

// =============================================================================
// Patterns
// =============================================================================

struct Patterns {
    date: Regex,
    mileage: Regex,
    oil_change: Regex,
    oil_type: Regex,
    paren_group: Regex,
    filter_code: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        // Patterns are fixed and covered by the unit tests below, so a typo
        // shows up as a failing test rather than a runtime panic.
        fn re(pat: &str) -> Regex {
            Regex::new(pat).expect("parser: invalid regex")
        }

        Patterns {
            date: re(&format!(
                r"^(?:{})\s+[0-9]{{4}}$",
                constants::MONTH_NAMES.join("|")
            )),
            mileage: re(r"(?i)^([0-9]+)\s*miles\s*:\s*(.*)$"),
            oil_change: re(r"(?i)oil\s*and\s*filter\s*change"),
            oil_type: re(r"(?i)\(([0-9]W-[0-9]+)\)"),
            paren_group: re(r"\(([^()]+)\)"),
            filter_code: re(r"[A-Za-z][0-9]"),
        }
    })
}

fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    let p = patterns();
    if p.date.is_match(line) {
        return LineKind::Date(line);
    }
    if let Some(caps) = p.mileage.captures(line) {
        if let (Some(digits), Some(description)) = (caps.get(1), caps.get(2)) {
            return LineKind::Mileage {
                digits: digits.as_str(),
                description: description.as_str(),
            };
        }
    }
    LineKind::Other
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse a maintenance log.
///
/// Scans top to bottom. The first non-blank line names the vehicle. Date
/// headings move the current-date cursor; a mileage line becomes a record
/// when its description (plus at most one following free-text line) says
/// "oil and filter change".
pub fn parse_content(content: &str) -> ParseResult {
    let lines: Vec<&str> = content.lines().collect();

    let mut state = ScanState::ExpectVehicle;
    let mut vehicle = String::new();
    let mut current_date: Option<&str> = None;
    let mut records = Vec::new();
    let mut mileage_lines = 0;
    let mut skipped_events = 0;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        i += 1;

        if state == ScanState::ExpectVehicle {
            if !line.is_empty() {
                vehicle = line.to_string();
                state = ScanState::ExpectBody;
            }
            continue;
        }

        match classify(line) {
            LineKind::Blank | LineKind::Other => {}
            LineKind::Date(heading) => current_date = Some(heading),
            LineKind::Mileage {
                digits,
                description,
            } => {
                mileage_lines += 1;

                // Single-line lookahead: fold one free-text line into the
                // description and consume it.
                let mut full_description = description.to_string();
                if let Some(next) = lines.get(i).map(|l| l.trim()) {
                    if classify(next).is_continuation() {
                        if !next.is_empty() {
                            full_description.push(' ');
                            full_description.push_str(next);
                        }
                        i += 1;
                    }
                }

                if !is_oil_change(&full_description) {
                    skipped_events += 1;
                    tracing::trace!(
                        line = i,
                        description = %preview(&full_description),
                        "Mileage line is not an oil change"
                    );
                    continue;
                }

                let Ok(mileage) = digits.parse::<u64>() else {
                    skipped_events += 1;
                    tracing::debug!(line = i, digits, "Mileage out of range; line skipped");
                    continue;
                };

                let oil_type = extract_oil_type(&full_description);
                let filter_type = extract_filter_type(&full_description, oil_type.as_deref());

                records.push(OilChangeRecord {
                    mileage,
                    date: current_date.map(str::to_string),
                    oil_type,
                    filter_type,
                });
            }
        }
    }

    tracing::debug!(
        vehicle = %vehicle,
        records = records.len(),
        mileage_lines,
        skipped_events,
        lines = lines.len(),
        "Parsing complete"
    );

    ParseResult {
        log: VehicleLog { vehicle, records },
        lines_processed: lines.len(),
        mileage_lines,
        skipped_events,
    }
}

/// Does the description mention an oil and filter change?
fn is_oil_change(description: &str) -> bool {
    patterns().oil_change.is_match(description)
}

/// First parenthesised `<digit>W-<digits>` token, verbatim.
fn extract_oil_type(description: &str) -> Option<String> {
    patterns()
        .oil_type
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First parenthesised group, other than the oil type, that looks like a
/// part code (a letter immediately followed by a digit).
fn extract_filter_type(description: &str, oil_type: Option<&str>) -> Option<String> {
    let p = patterns();
    p.paren_group
        .captures_iter(description)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim()))
        .filter(|group| !oil_type.is_some_and(|oil| group.eq_ignore_ascii_case(oil)))
        .find(|group| p.filter_code.is_match(group))
        .map(str::to_string)
}

/// Truncate text for debug output.
fn preview(text: &str) -> &str {
    match text.char_indices().nth(constants::DEBUG_MAX_LINE_PREVIEW) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
