//! RFC 2822 `addr-spec` recognition.
//!
//! ```text
//! addr-spec     = local-part "@" domain
//! local-part    = dot-atom / quoted-string
//! domain        = dot-atom / domain-literal
//! ```
//!
//! Bytes at or above 0x80 are accepted wherever `atext`, `qtext` or `dtext`
//! is, as RFC 6532 allows. Encodings are not checked.

/// True if `input` is exactly one `addr-spec`.
pub fn is_addr_spec(input: &[u8]) -> bool {
    let Some(rest) = local_part(input) else {
        return false;
    };
    let Some(domain) = rest.strip_prefix(b"@") else {
        return false;
    };
    is_dot_atom(domain) || is_domain_literal(domain)
}

/// Consume a local-part, returning what follows it.
fn local_part(input: &[u8]) -> Option<&[u8]> {
    if input.first() == Some(&b'"') {
        return quoted_string(input);
    }
    let at = input.iter().position(|&b| b == b'@')?;
    is_dot_atom(&input[..at]).then_some(&input[at..])
}

/// Consume a non-empty quoted-string, returning what follows the closing quote.
fn quoted_string(input: &[u8]) -> Option<&[u8]> {
    let mut i = 1;
    while i < input.len() {
        match input[i] {
            b'"' if i == 1 => return None,
            b'"' => return Some(&input[i + 1..]),
            b'\\' => {
                let escaped = *input.get(i + 1)?;
                if !(is_vchar(escaped) || escaped == b' ' || escaped == b'\t') {
                    return None;
                }
                i += 2;
            }
            b if is_qtext(b) => i += 1,
            _ => return None,
        }
    }
    None
}

fn is_dot_atom(input: &[u8]) -> bool {
    !input.is_empty()
        && input
            .split(|&b| b == b'.')
            .all(|atom| !atom.is_empty() && atom.iter().all(|&b| is_atext(b)))
}

fn is_domain_literal(input: &[u8]) -> bool {
    match input {
        [b'[', inner @ .., b']'] => !inner.is_empty() && inner.iter().all(|&b| is_dtext(b)),
        _ => false,
    }
}

fn is_atext(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-/=?^_`{|}~".contains(&b) || b >= 0x80
}

fn is_qtext(b: u8) -> bool {
    matches!(b, 33 | 35..=91 | 93..=126) || b >= 0x80
}

fn is_dtext(b: u8) -> bool {
    matches!(b, 33..=90 | 94..=126) || b >= 0x80
}

fn is_vchar(b: u8) -> bool {
    (0x21..=0x7e).contains(&b) || b >= 0x80
}
