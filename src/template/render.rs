use super::context::{RenderContext, Value};
use super::types::*;

impl Group {
    /// Evaluate the group, collapsing to the default on the first absent field
    pub fn evaluate(&self, ctx: &RenderContext) -> String {
        let mut out = String::new();

        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::EscapedAmpersand => out.push('&'),
                Token::Placeholder(p) => match ctx.get(*p) {
                    Value::Present(value) => out.push_str(value),
                    Value::Absent => return self.default.clone().unwrap_or_default(),
                },
            }
        }

        out
    }
}

impl ParsedTemplate {
    /// Render the template into a filesystem-safe name.
    ///
    /// Pure: identical template and context always yield identical output.
    pub fn render(&self, ctx: &RenderContext) -> String {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Group(group) => out.push_str(&group.evaluate(ctx)),
            }
        }

        let sanitized = sanitize_name(&out);
        if sanitized.is_empty() {
            FALLBACK_NAME.to_string()
        } else {
            sanitized
        }
    }
}

/// Make a rendered name safe for use as a file or directory name.
///
/// `:` and `" / \ < > ? |` become spaces, runs of spaces collapse to one and
/// the result is trimmed.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_space = false;

    for c in name.chars() {
        let c = match c {
            ':' | '"' | '/' | '\\' | '<' | '>' | '?' | '|' => ' ',
            c => c,
        };

        if c == ' ' {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }

    out.trim().to_string()
}
