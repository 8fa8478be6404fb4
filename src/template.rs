use std::fmt;

/// A placeholder recognised inside a `${...}` span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `${home}`
    Home,
    /// `${folder:PATH}`; the argument is itself a template.
    Folder(Template),
    /// `${project_path:FILE}`; the argument is taken literally.
    ProjectPath(String),
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Token(Token),
    /// Body of a balanced `${...}` span with no known meaning. Rendered back verbatim.
    Unknown(String),
}

/// Parsed working-directory template.
///
/// Parsing never fails: unterminated spans and unknown token names are kept as
/// text so that rendering an unresolvable template gives back its source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(src: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = src;

        while let Some(start) = rest.find("${") {
            let body_start = start + 2;
            let Some(len) = closing_brace(&rest[body_start..]) else {
                // unterminated: the remainder is plain text
                break;
            };
            literal.push_str(&rest[..start]);
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(classify(&rest[body_start..body_start + len]));
            rest = &rest[body_start + len + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when nothing in the template would be substituted.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| !matches!(s, Segment::Token(_)))
    }
}

fn classify(body: &str) -> Segment {
    if body == "home" {
        return Segment::Token(Token::Home);
    }
    match body.split_once(':') {
        Some(("folder", arg)) => Segment::Token(Token::Folder(Template::parse(arg))),
        Some(("project_path", arg)) => Segment::Token(Token::ProjectPath(arg.to_string())),
        _ => Segment::Unknown(body.to_string()),
    }
}

/// Byte offset of the `}` closing a span whose body starts at `s[0]`.
/// Nested `${` openers must be closed first.
fn closing_brace(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                depth += 1;
                i += 2;
                continue;
            }
            b'}' if depth == 0 => return Some(i),
            b'}' => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    None
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Home => write!(f, "${{home}}"),
            Token::Folder(inner) => write!(f, "${{folder:{}}}", inner),
            Token::ProjectPath(name) => write!(f, "${{project_path:{}}}", name),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => f.write_str(s)?,
                Segment::Token(t) => write!(f, "{}", t)?,
                Segment::Unknown(body) => write!(f, "${{{}}}", body)?,
            }
        }
        Ok(())
    }
}
