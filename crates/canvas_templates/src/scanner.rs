//! Single-pass tag scanner.
//!
//! Recognised tags are `{{name}}`, `{{#name}}` and `{{/name}}` where `name`
//! matches `[A-Za-z_][A-Za-z0-9_]*`. Anything else starting with `{{` is
//! ordinary text.

/// One lexical piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Text(&'a str),
    Scalar(Tag<'a>),
    Open(Tag<'a>),
    Close(Tag<'a>),
}

/// A recognised tag with its source text and byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tag<'a> {
    pub name: &'a str,
    pub raw: &'a str,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Scalar,
    Open,
    Close,
}

/// Split a template into text and tag tokens.
pub(crate) fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(found) = template[cursor..].find("{{") {
        let start = cursor + found;
        match parse_tag(&template[start..]) {
            Some((len, kind, name)) => {
                if start > text_start {
                    tokens.push(Token::Text(&template[text_start..start]));
                }
                let tag = Tag {
                    name,
                    raw: &template[start..start + len],
                    offset: start,
                };
                tokens.push(match kind {
                    TagKind::Scalar => Token::Scalar(tag),
                    TagKind::Open => Token::Open(tag),
                    TagKind::Close => Token::Close(tag),
                });
                cursor = start + len;
                text_start = cursor;
            }
            // `{{{name}}}` retries one byte later and finds the inner tag
            None => cursor = start + 1,
        }
    }

    if text_start < template.len() {
        tokens.push(Token::Text(&template[text_start..]));
    }

    tokens
}

/// Parse a tag at the start of `s`, which begins with `{{`.
fn parse_tag(s: &str) -> Option<(usize, TagKind, &str)> {
    let inner = &s[2..];
    let (kind, body) = match inner.as_bytes().first() {
        Some(b'#') => (TagKind::Open, &inner[1..]),
        Some(b'/') => (TagKind::Close, &inner[1..]),
        _ => (TagKind::Scalar, inner),
    };

    let ident = identifier_len(body);
    if ident == 0 || !body[ident..].starts_with("}}") {
        return None;
    }

    let sigil = usize::from(kind != TagKind::Scalar);
    Some((2 + sigil + ident + 2, kind, &body[..ident]))
}

fn identifier_len(s: &str) -> usize {
    let mut len = 0;
    for (i, c) in s.char_indices() {
        let valid = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if !valid {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tokens: &[Token<'_>]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| match t {
                Token::Text(s) => format!("text:{}", s),
                Token::Scalar(tag) => format!("var:{}", tag.name),
                Token::Open(tag) => format!("open:{}", tag.name),
                Token::Close(tag) => format!("close:{}", tag.name),
            })
            .collect()
    }

    #[test]
    fn test_tokenize_mixed() {
        let tokens = tokenize("a {{x}} {{#b}}c{{/b}}");
        assert_eq!(
            names(&tokens),
            vec!["text:a ", "var:x", "text: ", "open:b", "text:c", "close:b"]
        );
    }

    #[test]
    fn test_hcl_interpolation_is_text() {
        let tokens = tokenize("name = \"${var.environment}-{{name}}\"");
        assert_eq!(
            names(&tokens),
            vec!["text:name = \"${var.environment}-", "var:name", "text:\""]
        );
    }

    #[test]
    fn test_invalid_tags_are_text() {
        let tokens = tokenize("{{ spaced }} {{1abc}} {{@index}} {{#}}");
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_triple_brace_finds_inner_tag() {
        let tokens = tokenize("{{{name}}}");
        assert_eq!(names(&tokens), vec!["text:{", "var:name", "text:}"]);
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("ab{{#c}}");
        match tokens[1] {
            Token::Open(tag) => {
                assert_eq!(tag.offset, 2);
                assert_eq!(tag.raw, "{{#c}}");
            }
            other => panic!("unexpected token {:?}", other),
        }
    }
}
