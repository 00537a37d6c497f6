pub mod trace_ctx;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// ISO 8601 text for response bodies.
pub fn rfc3339(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}
