use std::collections::HashMap;

use crate::http::parser::ParseError;

/// Parses raw header lines into a name → value map.
///
/// Parsing stops at the first empty line. Names are trimmed and lowercased,
/// values are trimmed of surrounding whitespace and stray CR/LF. A repeated
/// name overwrites the earlier value.
pub fn parse_headers<'a, I>(lines: I) -> Result<HashMap<String, String>, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            break;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or(ParseError::InvalidHeader)?;

        headers.insert(
            key.trim().to_ascii_lowercase(),
            value.trim().replace("\r\n", ""),
        );
    }

    Ok(headers)
}
