use super::types::*;

/// Parse a template string into a reusable AST.
///
/// Top-level text becomes [`Segment::Literal`]. Each balanced `{...}` becomes a
/// [`Segment::Group`], except `{{...}}` whose inner group is the whole body:
/// that is an escaped literal and never collapses.
pub fn parse_template(source: &str) -> Result<ParsedTemplate, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while let Some(c) = source[pos..].chars().next() {
        match c {
            '{' => {
                let close =
                    find_matching_close(source, pos).ok_or_else(|| TemplateError::UnclosedGroup {
                        template: source.to_string(),
                        offset: pos,
                    })?;

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(parse_group(&source[pos + 1..close]));
                pos = close + 1;
            }
            '}' => {
                return Err(TemplateError::UnexpectedClose {
                    template: source.to_string(),
                    offset: pos,
                });
            }
            _ => {
                literal.push(c);
                pos += c.len_utf8();
            }
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(ParsedTemplate {
        source: source.to_string(),
        segments,
    })
}

/// Byte index of the `}` closing the `{` found at `open`
fn find_matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_group(inner: &str) -> Segment {
    if inner.starts_with('{') && find_matching_close(inner, 0) == Some(inner.len() - 1) {
        return Segment::Literal(inner[1..inner.len() - 1].to_string());
    }

    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut default = None;
    let mut pos = 0;

    while let Some(c) = inner[pos..].chars().next() {
        match c {
            '\\' if inner[pos + 1..].starts_with('&') => {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::EscapedAmpersand);
                pos += 2;
            }
            '&' => {
                flush_word(&mut word, &mut tokens);
                pos += 1;
            }
            '|' => {
                flush_word(&mut word, &mut tokens);
                default = Some(inner[pos + 1..].to_string());
                break;
            }
            '{' => {
                flush_word(&mut word, &mut tokens);
                // Balanced by construction, the fallback only guards malformed input
                let close = find_matching_close(inner, pos).unwrap_or(inner.len());
                let end = close.min(inner.len());
                tokens.push(Token::Literal(inner[pos + 1..end].to_string()));
                pos = (close + 1).min(inner.len());
            }
            c if c.is_whitespace() => {
                flush_word(&mut word, &mut tokens);
                let run_end = inner[pos..]
                    .find(|ch: char| !ch.is_whitespace())
                    .map_or(inner.len(), |i| pos + i);
                tokens.push(Token::Literal(inner[pos..run_end].to_string()));
                pos = run_end;
            }
            _ => {
                word.push(c);
                pos += c.len_utf8();
            }
        }
    }

    flush_word(&mut word, &mut tokens);

    Segment::Group(Group { tokens, default })
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if word.is_empty() {
        return;
    }
    let word = std::mem::take(word);
    tokens.push(match Placeholder::from_key(&word) {
        Some(p) => Token::Placeholder(p),
        None => Token::Literal(word),
    });
}
