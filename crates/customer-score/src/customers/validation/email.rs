//! Single-mailbox email syntax.
//!
//! An address is accepted when it parses as exactly one `local@domain` mailbox and rendering
//! the parsed mailbox back produces the input unchanged. Display names, angle brackets,
//! surrounding whitespace, address lists and redundant quoting all fail that round trip.

#[derive(Debug, PartialEq, Eq)]
enum LocalPart<'a> {
    DotAtom(&'a str),
    /// Unescaped content of a quoted string.
    Quoted(String),
}

#[derive(Debug, PartialEq, Eq)]
enum Domain<'a> {
    DotAtom(&'a str),
    Literal(&'a str),
}

#[derive(Debug, PartialEq, Eq)]
struct Mailbox<'a> {
    local: LocalPart<'a>,
    domain: Domain<'a>,
}

impl Mailbox<'_> {
    fn render(&self) -> String {
        let mut out = String::new();
        match &self.local {
            LocalPart::DotAtom(atom) => out.push_str(atom),
            LocalPart::Quoted(content) if is_dot_atom(content) => out.push_str(content),
            LocalPart::Quoted(content) => {
                out.push('"');
                for ch in content.chars() {
                    if ch == '"' || ch == '\\' {
                        out.push('\\');
                    }
                    out.push(ch);
                }
                out.push('"');
            }
        }
        out.push('@');
        match self.domain {
            Domain::DotAtom(name) => out.push_str(name),
            Domain::Literal(literal) => {
                out.push('[');
                out.push_str(literal);
                out.push(']');
            }
        }
        out
    }
}

/// Non-ASCII text allowed in atoms and quoted strings. Unicode spaces and controls are not text.
fn is_extended_text(ch: char) -> bool {
    !ch.is_ascii() && !ch.is_whitespace() && !ch.is_control()
}

fn is_atext(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(ch) || is_extended_text(ch)
}

fn is_dot_atom(value: &str) -> bool {
    !value.is_empty()
        && value
            .split('.')
            .all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

fn is_qtext(ch: char) -> bool {
    (ch == ' ' || ch.is_ascii_graphic() || is_extended_text(ch)) && ch != '"' && ch != '\\'
}

fn is_dtext(ch: char) -> bool {
    ch.is_ascii_graphic() && !matches!(ch, '[' | ']' | '\\')
}

/// Returns the unescaped content and the remainder after the closing quote.
fn parse_quoted(input: &str) -> Option<(String, &str)> {
    let body = input.strip_prefix('"')?;
    let mut content = String::new();
    let mut chars = body.char_indices();

    while let Some((index, ch)) = chars.next() {
        match ch {
            '"' => return Some((content, &body[index + 1..])),
            '\\' => {
                let (_, escaped) = chars.next()?;
                if escaped != ' ' && !escaped.is_ascii_graphic() {
                    return None;
                }
                content.push(escaped);
            }
            ch if is_qtext(ch) => content.push(ch),
            _ => return None,
        }
    }

    None
}

fn parse_domain(input: &str) -> Option<Domain<'_>> {
    if let Some(inner) = input.strip_prefix('[') {
        let literal = inner.strip_suffix(']')?;
        if literal.is_empty() || !literal.chars().all(is_dtext) {
            return None;
        }
        return Some(Domain::Literal(literal));
    }

    is_dot_atom(input).then_some(Domain::DotAtom(input))
}

fn parse_mailbox(input: &str) -> Option<Mailbox<'_>> {
    let (local, rest) = if input.starts_with('"') {
        let (content, rest) = parse_quoted(input)?;
        (LocalPart::Quoted(content), rest.strip_prefix('@')?)
    } else {
        let (atom, rest) = input.split_once('@')?;
        if !is_dot_atom(atom) {
            return None;
        }
        (LocalPart::DotAtom(atom), rest)
    };

    let domain = parse_domain(rest)?;
    Some(Mailbox { local, domain })
}

pub fn is_valid_email(raw: &str) -> bool {
    match parse_mailbox(raw) {
        Some(mailbox) => mailbox.render() == raw,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("teste@teste.com"));
        assert!(is_valid_email("first.last+tag@mail.example.com.br"));
        assert!(is_valid_email("o'neil@example.org"));
        assert!(is_valid_email("user@localhost"));
    }

    #[test]
    fn rejects_missing_or_repeated_at_sign() {
        assert!(!is_valid_email("teste"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn rejects_surrounding_whitespace_and_display_names() {
        assert!(!is_valid_email(" teste@teste.com"));
        assert!(!is_valid_email("teste@teste.com "));
        assert!(!is_valid_email("Teste <teste@teste.com>"));
        assert!(!is_valid_email("<teste@teste.com>"));
    }

    #[test]
    fn rejects_unicode_whitespace_and_controls() {
        assert!(!is_valid_email("teste@teste.com\u{00A0}"));
        assert!(!is_valid_email("\u{2003}teste@teste.com"));
        assert!(!is_valid_email("teste@teste.com\u{0085}"));
        assert!(!is_valid_email("tes\u{2028}te@teste.com"));
        assert!(!is_valid_email("\"tes\u{00A0}te\"@teste.com"));
        assert!(is_valid_email("jos\u{00E9}@exemplo.com"));
    }

    #[test]
    fn rejects_address_lists_and_trailing_garbage() {
        assert!(!is_valid_email("a@b.com, c@d.com"));
        assert!(!is_valid_email("a@b.com;"));
        assert!(!is_valid_email("a@b.com (work)"));
    }

    #[test]
    fn rejects_malformed_dots() {
        assert!(!is_valid_email(".user@example.com"));
        assert!(!is_valid_email("user.@example.com"));
        assert!(!is_valid_email("us..er@example.com"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("user@.example.com"));
    }

    #[test]
    fn quoted_local_parts_must_be_canonical() {
        assert!(is_valid_email("\"john doe\"@example.com"));
        assert!(is_valid_email("\"a\\\"b\"@example.com"));
        assert!(!is_valid_email("\"john\"@example.com"));
        assert!(!is_valid_email("\"unterminated@example.com"));
    }

    #[test]
    fn domain_literals() {
        assert!(is_valid_email("user@[192.168.0.1]"));
        assert!(!is_valid_email("user@[]"));
        assert!(!is_valid_email("user@[1.2.3.4"));
    }

    #[test]
    fn render_round_trips_parsed_mailbox() {
        let mailbox = parse_mailbox("teste@teste.com").expect("parses");
        assert_eq!(
            mailbox,
            Mailbox {
                local: LocalPart::DotAtom("teste"),
                domain: Domain::DotAtom("teste.com"),
            }
        );
        assert_eq!(mailbox.render(), "teste@teste.com");
    }
}
