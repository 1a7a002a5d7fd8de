/// Parses one data cell as a cumulative count.
///
/// Returns `None` for blank or non-integer cells; callers treat that as zero.
pub fn parse_count(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}
