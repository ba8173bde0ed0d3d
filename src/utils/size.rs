const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count for humans: binary multiples, thousands separators,
/// at most one decimal digit.
///
/// # Examples
///
/// ```
/// use pchr_parser::readable_file_size;
///
/// assert_eq!(readable_file_size(0), "0");
/// assert_eq!(readable_file_size(1536), "1.5 KB");
/// assert_eq!(readable_file_size(1023), "1,023 B");
/// ```
pub fn readable_file_size(size: u64) -> String {
    if size == 0 {
        return "0".to_string();
    }

    let mut group = 0;
    let mut divisor = 1u64;
    while group < UNITS.len() - 1 && size / divisor >= 1024 {
        divisor *= 1024;
        group += 1;
    }

    let tenths = (size as f64 / divisor as f64 * 10.0).round() as u64;
    let whole = group_thousands(tenths / 10);
    match tenths % 10 {
        0 => format!("{} {}", whole, UNITS[group]),
        fraction => format!("{}.{} {}", whole, fraction, UNITS[group]),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes() {
        assert_eq!(readable_file_size(1), "1 B");
        assert_eq!(readable_file_size(999), "999 B");
        assert_eq!(readable_file_size(1023), "1,023 B");
    }

    #[test]
    fn test_binary_multiples() {
        assert_eq!(readable_file_size(1024), "1 KB");
        assert_eq!(readable_file_size(1024 * 1024), "1 MB");
        assert_eq!(readable_file_size(5 * 1024 * 1024 * 1024 + 512 * 1024 * 1024), "5.5 GB");
    }

    #[test]
    fn test_terabytes_do_not_overflow_units() {
        let pb = 1024u64.pow(5);
        assert_eq!(readable_file_size(pb), "1,024 TB");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
