//! Best-effort email address parsing
//!
//! Header fields arrive as free text: `"Name <addr>"`, bare `addr`, or a
//! comma/semicolon-separated list of either. Parsing never fails: a token
//! matching neither shape degrades to a name-only record with no address,
//! so a single bad header cannot abort a conversion.

/// Outcome of parsing one address token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    /// Display name, or the raw token when no address could be extracted
    pub name: Option<String>,

    /// The email address, when one was recognized
    pub address: Option<String>,
}

impl ParsedAddress {
    /// Whether an address was recognized in the token
    pub fn is_parsed(&self) -> bool {
        self.address.is_some()
    }
}

/// Split an address header into individual tokens
///
/// Splits on commas and semicolons, except inside double-quoted display
/// names (`"Last, First" <a@x.com>` stays one token). Empty tokens are
/// dropped.
pub fn split_address_list(field: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in field.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' | ';' if !in_quotes => {
                tokens.push(current);
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    tokens.push(current);

    tokens
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parse one token into a name/address pair
///
/// Recognizes `Name <addr>`, `<addr>`, and bare `addr`. Anything else is
/// kept as a name-only record with the raw token preserved.
pub fn parse_address_token(token: &str) -> ParsedAddress {
    let token = token.trim();

    // Angle-bracket form: optional display name, then <addr>
    if let (Some(open), Some(close)) = (token.find('<'), token.rfind('>')) {
        if open < close {
            let candidate = token[open + 1..close].trim();
            if is_valid_email(candidate) {
                let name = token[..open].trim().trim_matches(|c| c == '"' || c == '\'').trim();
                return ParsedAddress {
                    name: (!name.is_empty()).then(|| name.to_string()),
                    address: Some(candidate.to_string()),
                };
            }
        }
    }

    // Bare address form
    if is_valid_email(token) {
        return ParsedAddress {
            name: None,
            address: Some(token.to_string()),
        };
    }

    // Malformed: keep the raw token as the name
    ParsedAddress {
        name: (!token.is_empty()).then(|| token.to_string()),
        address: None,
    }
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain
fn is_valid_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !candidate.contains(char::is_whitespace)
}
