pub mod qgram;

//
// A note on fn names:
// - Functions that determine the type of a string should be prefixed with `is_`
// - Functions that operate on Strings should be prefixed with `str_`
//

pub use self::qgram::{QGram, QGramCache, Q};

use regex::Regex;

///
/// Lower case, trim and split an address on runs of whitespace, commas and hyphens
/// returning a vector of component tokens
///
pub fn tokenize(text: &str) -> Vec<String> {
    lazy_static! {
        static ref SPLIT: Regex = Regex::new(r"[,\s-]+").unwrap();
    }

    let normalized = text.trim().to_lowercase();

    SPLIT.split(&normalized)
        .filter(|token| {
            // Remove Empty Tokens (Leading/Trailing Separators)
            !token.is_empty()
        })
        .map(String::from)
        .collect()
}

///
/// Is the token a house number, ie: 12, 007, 12a, 12/b
/// Returns the numeric prefix
///
pub fn is_number(token: &str) -> Option<&str> {
    lazy_static! {
        static ref NUMBER: Regex = Regex::new(r"^(?P<number>[0-9]+)").unwrap();
    }

    NUMBER.captures(token)
        .and_then(|capture| capture.name("number"))
        .map(|number| number.as_str())
}

///
/// Is the token an abbreviated name, ie: `a.` for `alcide`
/// Returns the letters of the abbreviation
///
pub fn is_short_name(token: &str) -> Option<&str> {
    lazy_static! {
        static ref SHORT: Regex = Regex::new(r"^(?P<name>[a-zA-Z]+)\.$").unwrap();
    }

    SHORT.captures(token)
        .and_then(|capture| capture.name("name"))
        .map(|name| name.as_str())
}

///
/// Strip the leading zeros of the numeric prefix of a house number,
/// keeping any suffix as is: `007A` => `7A`, `000` => `0`
///
/// Returns None if the token doesn't start with a digit
///
pub fn str_normalize_number(token: &str) -> Option<String> {
    let number = is_number(token)?;

    let mut digits = number.trim_start_matches('0');
    if digits.is_empty() {
        digits = "0";
    }

    Some(format!("{}{}", digits, &token[number.len()..]))
}
