//! Lexical tokenization shared by every scoring component

use regex::Regex;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+").expect("Invalid URL regex"));

static DISALLOWED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s+#]").expect("Invalid character filter regex"));

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w+#]{2,}").expect("Invalid token regex"));

/// Split text into lowercase tokens.
///
/// URL-like runs (`http…`, `www…`) are removed first, then every character
/// other than word characters, whitespace, `+` and `#` is stripped. What is
/// left is emitted as maximal runs of at least two characters, so technology
/// names such as `c++` and `c#` survive intact.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let without_urls = URL_REGEX.replace_all(&lowered, "");
    let cleaned = DISALLOWED_REGEX.replace_all(&without_urls, "");

    TOKEN_REGEX
        .find_iter(&cleaned)
        .map(|m| m.as_str().to_string())
        .collect()
}
