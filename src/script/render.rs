//! Turns a Mustache-style template plus a [`ConfigurationRecord`] into script text.
//!
//! Only the subset the setup scripts need is understood: variables, sections,
//! inverted sections and comments. Values are inserted as-is. There is no
//! HTML or shell escaping, so a field containing `; rm -rf /` ends up in the
//! script exactly like that.

use crate::script::error::ScriptError;
use crate::utils::config::ConfigurationRecord;
use log::{debug, error};
use std::fs;
use std::path::Path;

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Text(&'a str),
    Var(&'a str),
    Section {
        name: &'a str,
        inverted: bool,
        children: Vec<Token<'a>>,
    },
}

pub fn load_template<P: AsRef<Path>>(path: P) -> Result<String, ScriptError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| {
        error!("Failed to read template {}: {}", path.display(), e);
        ScriptError::TemplateUnavailable(format!("{}: {}", path.display(), e))
    })
}

pub fn render(template: &str, record: &ConfigurationRecord) -> Result<String, ScriptError> {
    let tokens = parse(template)?;
    let mut out = String::with_capacity(template.len());
    render_tokens(&tokens, record, &mut out);
    Ok(out)
}

pub fn render_file<P: AsRef<Path>>(
    path: P,
    record: &ConfigurationRecord,
) -> Result<String, ScriptError> {
    let template = load_template(&path)?;
    let script = render(&template, record)?;
    debug!(
        "Rendered {} ({} bytes)",
        path.as_ref().display(),
        script.len()
    );
    Ok(script)
}

fn render_tokens(tokens: &[Token], record: &ConfigurationRecord, out: &mut String) {
    for token in tokens {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Var(name) => out.push_str(record.get(name).unwrap_or_default()),
            Token::Section {
                name,
                inverted,
                children,
            } => {
                if record.is_truthy(name) != *inverted {
                    render_tokens(children, record, out);
                }
            }
        }
    }
}

fn parse(template: &str) -> Result<Vec<Token>, ScriptError> {
    // open sections: (name, inverted, tokens collected so far)
    let mut stack: Vec<(&str, bool, Vec<Token>)> = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        if start > 0 {
            current.push(Token::Text(&rest[..start]));
        }
        let after = &rest[start..];
        let (tag, unescaped, consumed) = if let Some(body) = after.strip_prefix("{{{") {
            let end = body.find("}}}").ok_or_else(|| unclosed(template, rest, start))?;
            (body[..end].trim(), true, end + 6)
        } else {
            let body = &after[2..];
            let end = body.find("}}").ok_or_else(|| unclosed(template, rest, start))?;
            let inner = body[..end].trim();
            match inner.strip_prefix('&') {
                Some(name) => (name.trim(), true, end + 4),
                None => (inner, false, end + 4),
            }
        };
        rest = &after[consumed..];

        // {{{x}}} and {{&x}} mean the same as {{x}} here since nothing is escaped
        if unescaped {
            current.push(Token::Var(tag));
            continue;
        }
        match tag.chars().next() {
            Some('!') => {}
            Some('#') | Some('^') => {
                let name = tag[1..].trim();
                stack.push((name, tag.starts_with('^'), std::mem::take(&mut current)));
            }
            Some('/') => {
                let name = tag[1..].trim();
                let (open, inverted, parent) = stack.pop().ok_or_else(|| {
                    ScriptError::TemplateUnavailable(format!(
                        "closing tag {{{{/{}}}}} without an open section",
                        name
                    ))
                })?;
                if open != name {
                    return Err(ScriptError::TemplateUnavailable(format!(
                        "section {} closed by {{{{/{}}}}}",
                        open, name
                    )));
                }
                let children = std::mem::replace(&mut current, parent);
                current.push(Token::Section {
                    name,
                    inverted,
                    children,
                });
            }
            Some('>') | Some('=') => {
                return Err(ScriptError::TemplateUnavailable(format!(
                    "unsupported tag {{{{{}}}}}",
                    tag
                )));
            }
            _ => current.push(Token::Var(tag)),
        }
    }
    if !rest.is_empty() {
        current.push(Token::Text(rest));
    }
    if let Some((open, _, _)) = stack.last() {
        return Err(ScriptError::TemplateUnavailable(format!(
            "section {} is never closed",
            open
        )));
    }
    Ok(current)
}

fn unclosed(template: &str, rest: &str, start: usize) -> ScriptError {
    let offset = template.len() - rest.len() + start;
    ScriptError::TemplateUnavailable(format!("unclosed tag at byte {}", offset))
}
