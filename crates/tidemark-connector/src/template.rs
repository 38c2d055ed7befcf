//! Template variable replacement
//!
//! Substitutes `${name}` placeholders in URL, path, and body templates.
//!
//! Two contracts matter here:
//!
//! - Unmatched tokens are left untouched, never replaced with an empty
//!   string: a missing variable stays visible in the produced URL instead of
//!   silently corrupting it.
//! - Replacement must happen **before** URL parsing. Parsing a templated URL
//!   and substituting inside the re-encoded string corrupts values that
//!   contain reserved characters (`$`, spaces, `&`).

use std::collections::HashMap;

/// Named variables for template substitution.
#[derive(Debug, Clone, Default)]
pub struct TemplateVariables {
    values: HashMap<String, String>,
}

impl TemplateVariables {
    /// Create an empty variable set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Add a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a variable value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replace every `${name}` token in `template` with its value.
    ///
    /// Tokens without a matching variable, and a trailing `${` without a
    /// closing brace, are emitted verbatim.
    pub fn apply(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            match after.find('}') {
                Some(end) => {
                    let name = &after[..end];
                    match self.values.get(name) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("${");
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    return out;
                }
            }
        }

        out.push_str(rest);
        out
    }
}
