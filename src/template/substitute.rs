//! Placeholder substitution

use std::collections::BTreeMap;

use super::error::TemplateError;
use super::lexer::{lex, line_column, Token};

/// Substitution values keyed by placeholder name
pub type Bindings = BTreeMap<String, String>;

/// Replace every placeholder in `template` with its binding.
///
/// `$$` becomes `$`. Fails on the first placeholder without a binding and on
/// any `$` that does not start a placeholder.
pub fn substitute(template: &str, bindings: &Bindings) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());

    for (token, span) in lex(template) {
        match token {
            Token::Text => out.push_str(&template[span]),
            Token::Escape => out.push('$'),
            Token::Named(key) | Token::Braced(key) => match bindings.get(&key) {
                Some(value) => out.push_str(value),
                None => return Err(TemplateError::missing_key(key, span)),
            },
            Token::Stray => {
                let (line, column) = line_column(template, span.start);
                return Err(TemplateError::InvalidPlaceholder { span, line, column });
            }
        }
    }

    Ok(out)
}

/// Placeholder names in order of first appearance
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (token, _) in lex(template) {
        if let Some(name) = token.placeholder() {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}
