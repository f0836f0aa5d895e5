//! English number words (short scale).

const ONES: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const ORDINAL_ONES: [&str; 20] = [
    "", "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
    "tenth", "eleventh", "twelfth", "thirteenth", "fourteenth", "fifteenth", "sixteenth",
    "seventeenth", "eighteenth", "nineteenth",
];

const ORDINAL_TENS: [&str; 10] = [
    "", "", "twentieth", "thirtieth", "fortieth", "fiftieth", "sixtieth", "seventieth",
    "eightieth", "ninetieth",
];

const SCALES: [&str; 6] = [
    "thousand", "million", "billion", "trillion", "quadrillion", "quintillion",
];

/// Words for `1..=999`, with "and" between the hundreds and the rest.
fn hundreds(n: u32) -> String {
    let mut out = String::new();
    if n >= 100 {
        out.push_str(ONES[(n / 100) as usize]);
        out.push_str(" hundred");
        if n % 100 != 0 {
            out.push_str(" and ");
        }
    }
    let rem = (n % 100) as usize;
    if rem >= 20 {
        out.push_str(TENS[rem / 10]);
        if rem % 10 != 0 {
            out.push(' ');
            out.push_str(ONES[rem % 10]);
        }
    } else {
        out.push_str(ONES[rem]);
    }
    out
}

fn cardinal_abs(mut n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }
    let mut groups = Vec::new();
    while n > 0 {
        groups.push((n % 1000) as u32);
        n /= 1000;
    }

    let mut parts = Vec::new();
    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        let words = hundreds(group);
        match scale.checked_sub(1).and_then(|i| SCALES.get(i)) {
            Some(name) => parts.push(format!("{} {}", words, name)),
            None => parts.push(words),
        }
    }
    parts.join(" ")
}

/// Cardinal words: `1234` -> "one thousand two hundred and thirty four".
pub fn cardinal(n: i64) -> String {
    if n < 0 {
        format!("minus {}", cardinal_abs(n.unsigned_abs()))
    } else {
        cardinal_abs(n as u64)
    }
}

/// Ordinal words: `21` -> "twenty first", `1000` -> "one thousandth".
///
/// Every group but the last non-zero one stays cardinal.
pub fn ordinal(n: i64) -> String {
    if n < 0 {
        format!("minus {}", ordinal_abs(n.unsigned_abs()))
    } else {
        ordinal_abs(n as u64)
    }
}

fn ordinal_abs(n: u64) -> String {
    if n == 0 {
        return "zeroth".to_string();
    }
    let words = cardinal_abs(n);
    match words.rsplit_once(' ') {
        Some((head, last)) => format!("{} {}", head, ordinal_word(last)),
        None => ordinal_word(&words),
    }
}

fn ordinal_word(word: &str) -> String {
    if let Some(i) = ONES.iter().skip(1).position(|&w| w == word) {
        return ORDINAL_ONES[i + 1].to_string();
    }
    if let Some(i) = TENS.iter().skip(2).position(|&w| w == word) {
        return ORDINAL_TENS[i + 2].to_string();
    }
    // hundred, thousand, million, ...
    format!("{}th", word)
}

/// Spoken form of a single digit.
pub fn digit(c: char) -> &'static str {
    match c {
        '0' => "zero",
        '1' => "one",
        '2' => "two",
        '3' => "three",
        '4' => "four",
        '5' => "five",
        '6' => "six",
        '7' => "seven",
        '8' => "eight",
        '9' => "nine",
        _ => "",
    }
}

/// Decimal words: integer part as a cardinal, fraction digit by digit.
///
/// `int_part` may carry a leading `-`. Returns `None` when the integer part
/// does not fit in an `i64`.
pub fn decimal(int_part: &str, frac_part: &str) -> Option<String> {
    let (negative, digits) = match int_part.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, int_part),
    };
    let value: i64 = digits.parse().ok()?;
    let int_words = cardinal(value);
    let frac_words: Vec<&str> = frac_part.chars().map(digit).filter(|w| !w.is_empty()).collect();

    let mut out = String::new();
    if negative {
        out.push_str("minus ");
    }
    out.push_str(&int_words);
    out.push_str(" point ");
    out.push_str(&frac_words.join(" "));
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_small() {
        assert_eq!(cardinal(0), "zero");
        assert_eq!(cardinal(7), "seven");
        assert_eq!(cardinal(13), "thirteen");
        assert_eq!(cardinal(20), "twenty");
        assert_eq!(cardinal(42), "forty two");
        assert_eq!(cardinal(100), "one hundred");
        assert_eq!(cardinal(105), "one hundred and five");
        assert_eq!(cardinal(999), "nine hundred and ninety nine");
    }

    #[test]
    fn test_cardinal_scales() {
        assert_eq!(cardinal(1234), "one thousand two hundred and thirty four");
        assert_eq!(cardinal(1000), "one thousand");
        assert_eq!(cardinal(1_000_001), "one million one");
        assert_eq!(cardinal(2_000_300_000), "two billion three hundred thousand");
        assert_eq!(
            cardinal(i64::MAX),
            "nine quintillion two hundred and twenty three quadrillion three hundred and \
             seventy two trillion thirty six billion eight hundred and fifty four million \
             seven hundred and seventy five thousand eight hundred and seven"
        );
    }

    #[test]
    fn test_cardinal_negative() {
        assert_eq!(cardinal(-5), "minus five");
        assert_eq!(cardinal(-1200), "minus one thousand two hundred");
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(0), "zeroth");
        assert_eq!(ordinal(1), "first");
        assert_eq!(ordinal(2), "second");
        assert_eq!(ordinal(3), "third");
        assert_eq!(ordinal(12), "twelfth");
        assert_eq!(ordinal(20), "twentieth");
        assert_eq!(ordinal(21), "twenty first");
        assert_eq!(ordinal(100), "one hundredth");
        assert_eq!(ordinal(101), "one hundred and first");
        assert_eq!(ordinal(1000), "one thousandth");
        assert_eq!(ordinal(1234), "one thousand two hundred and thirty fourth");
        assert_eq!(ordinal(2_000_001), "two million first");
        assert_eq!(ordinal(-3), "minus third");
    }

    #[test]
    fn test_decimal() {
        assert_eq!(decimal("3", "14").as_deref(), Some("three point one four"));
        assert_eq!(decimal("-0", "5").as_deref(), Some("minus zero point five"));
        assert_eq!(decimal("1000", "05").as_deref(), Some("one thousand point zero five"));
        assert_eq!(decimal("99999999999999999999", "1"), None);
    }
}
