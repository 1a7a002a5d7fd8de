use chrono::NaiveDate;

/// Parses a header date in `M/D/YY` form (`3/9/23`, `12/31/21`).
///
/// Month and day take one or two digits, the year exactly two and is read
/// as `20YY`. Anything else, including impossible dates, is `None`.
pub fn parse_header_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().split('/');
    let month = parts.next()?;
    let day = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if !is_digits(month, 1..=2) || !is_digits(day, 1..=2) || !is_digits(year, 2..=2) {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

fn is_digits(value: &str, width: std::ops::RangeInclusive<usize>) -> bool {
    width.contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_short_and_padded_forms() {
        assert_eq!(parse_header_date("3/9/23"), Some(date(2023, 3, 9)));
        assert_eq!(parse_header_date("12/31/21"), Some(date(2021, 12, 31)));
        assert_eq!(parse_header_date("01/22/20"), Some(date(2020, 1, 22)));
        assert_eq!(parse_header_date(" 1/22/20 "), Some(date(2020, 1, 22)));
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(parse_header_date("2023-03-09"), None);
        assert_eq!(parse_header_date("3/9/2023"), None);
        assert_eq!(parse_header_date("3/9"), None);
        assert_eq!(parse_header_date("3/9/23/1"), None);
        assert_eq!(parse_header_date("Lat"), None);
        assert_eq!(parse_header_date("-3/9/23"), None);
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse_header_date("2/30/23"), None);
        assert_eq!(parse_header_date("13/1/23"), None);
        assert_eq!(parse_header_date("2/29/24"), Some(date(2024, 2, 29)));
    }
}
