//! CPF normalization and check-digit validation
//!
//! Operators are identified by CPF. Display formats like
//! `123.456.789-09` are normalized to the bare 11-digit sequence before
//! any validation or storage.

/// Strip every non-digit character from `raw`
///
/// Performs no length or checksum validation; callers run
/// [`is_valid_cpf`] on the result before persisting. Idempotent:
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Check that `digits` is a structurally valid CPF
///
/// Requires exactly 11 ASCII digits, rejects the all-same-digit
/// sequences (they satisfy the arithmetic but are not valid CPFs), and
/// verifies both modulo-11 check digits.
pub fn is_valid_cpf(digits: &str) -> bool {
    let d: Vec<u32> = match digits
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    {
        Some(d) if d.len() == 11 => d,
        _ => return false,
    };

    if d.iter().all(|&x| x == d[0]) {
        return false;
    }

    check_digit(&d[..9]) == d[9] && check_digit(&d[..10]) == d[10]
}

/// Modulo-11 check digit over a digit prefix
///
/// Weights run from `len + 1` down to 2; a remainder below 2 yields 0.
fn check_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=digits.len() as u32 + 1).rev())
        .map(|(d, w)| d * w)
        .sum();
    let rem = sum % 11;
    if rem < 2 {
        0
    } else {
        11 - rem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_formatting() {
        assert_eq!(normalize("123.456.789-09"), "12345678909");
        assert_eq!(normalize("12345678909"), "12345678909");
        assert_eq!(normalize("abc"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize("123.456.789-09");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_valid_cpf() {
        assert!(is_valid_cpf("12345678909"));
        assert!(is_valid_cpf("52998224725"));
    }

    #[test]
    fn test_invalid_check_digits() {
        assert!(!is_valid_cpf("12345678900"));
        assert!(!is_valid_cpf("12345678919"));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("1234567890"));
        assert!(!is_valid_cpf("123456789090"));
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(!is_valid_cpf("123.456.789"));
        assert!(!is_valid_cpf("1234567890a"));
    }

    #[test]
    fn test_rejects_repeated_digits() {
        for d in 0..=9 {
            let cpf: String = std::iter::repeat(char::from_digit(d, 10).unwrap())
                .take(11)
                .collect();
            assert!(!is_valid_cpf(&cpf), "{cpf} should be rejected");
        }
    }
}
