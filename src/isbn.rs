//! ISBN normalization and check digits

/// Keep only the significant characters of an ISBN
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// EAN-13 check digit (weights 1, 3 alternating)
pub fn is_valid_ean13(code: &str) -> bool {
    let digits: Vec<u32> = match code.chars().map(|c| c.to_digit(10)).collect() {
        Some(digits) => digits,
        None => return false,
    };
    if digits.len() != 13 {
        return false;
    }

    let sum: u32 = digits[..12]
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    (10 - sum % 10) % 10 == digits[12]
}

/// ISBN-10 check digit (mod 11, `X` stands for 10)
pub fn is_valid_isbn10(code: &str) -> bool {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != 10 {
        return false;
    }

    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let value = match (i, c) {
            (9, 'X' | 'x') => 10,
            (_, c) => match c.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += value * (10 - i as u32);
    }
    sum % 11 == 0
}

/// Valid ISBN-13 (978/979 EAN) or ISBN-10, separators ignored
pub fn is_valid_isbn(code: &str) -> bool {
    let normalized = normalize_isbn(code);
    match normalized.len() {
        13 => {
            (normalized.starts_with("978") || normalized.starts_with("979"))
                && is_valid_ean13(&normalized)
        }
        10 => is_valid_isbn10(&normalized),
        _ => false,
    }
}
