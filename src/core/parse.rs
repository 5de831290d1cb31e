use crate::domain::model::{ParsedLine, Record};

/// Turns one raw input line into a record.
///
/// Format: `account,group1,group2,...`. Blank lines and `#` comments are
/// skipped; every field is trimmed; empty group fields (doubled or trailing
/// commas) are dropped. No name-format validation happens here, that is the
/// reconciler's job, so parsing stays pure and independent of system state.
pub fn parse_line(raw: &str) -> ParsedLine {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return ParsedLine::Skip;
    }

    let mut fields = trimmed.split(',');
    let name = fields.next().unwrap_or("").trim();
    if name.is_empty() {
        return ParsedLine::MissingName;
    }

    let groups = fields
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect();

    ParsedLine::Record(Record {
        name: name.to_string(),
        groups,
    })
}
