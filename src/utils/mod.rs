use chrono::DateTime;

/// Groups digits in threes using `.` as the separator, e.g. `1234567` -> `"1.234.567"`.
pub fn format_number(num: u64) -> String {
    let num_str = num.to_string();
    let chars: Vec<char> = num_str.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i).is_multiple_of(3) {
            result.push('.');
        }
        result.push(*c);
    }

    result
}

/// Renders epoch seconds as a long English date in UTC,
/// e.g. `"Tuesday, November 14, 2023 at 10:13:20 PM"`.
pub fn format_date(epoch_secs: i64) -> Option<String> {
    let datetime = DateTime::from_timestamp(epoch_secs, 0)?;
    Some(datetime.format("%A, %B %-d, %Y at %-I:%M:%S %p").to_string())
}
