// Simplified percent encoding based on RFC 3986

use std::fmt::Write;

/// Percent-encode a string according to RFC 3986.
/// Encodes all non-alphanumeric characters except: - _ . ~
pub fn encode(input: &str) -> String {
    let mut result = String::with_capacity(input.len());

    for byte in input.bytes() {
        match byte {
            // Unreserved characters (ALPHA / DIGIT / "-" / "." / "_" / "~")
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                let _ = write!(result, "%{byte:02X}");
            }
        }
    }

    result
}

/// Joins `key=value` pairs with `&`, percent-encoding both sides.
///
/// Usable both as an `application/x-www-form-urlencoded` body and as a query string.
pub fn encode_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use macros::test_all;

    use super::{encode, encode_pairs};

    #[cfg(feature = "browser-tests")]
    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[test_all]
    fn test_encode() {
        assert_eq!(encode("MARY-ANN"), "MARY-ANN");
        assert_eq!(encode("J. R."), "J.%20R.");
        assert_eq!(encode("A/B&C=D"), "A%2FB%26C%3DD");
        assert_eq!(encode("\u{3000}"), "%E3%80%80");
    }

    #[test_all]
    fn test_encode_pairs() {
        assert_eq!(
            encode_pairs([("firstName", "TARO"), ("lastName", "DE LA CRUZ")]),
            "firstName=TARO&lastName=DE%20LA%20CRUZ"
        );
        assert_eq!(encode_pairs([]), "");
    }
}
