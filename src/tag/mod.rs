//! Struct tag parsing and serialization.
//!
//! By convention, tag strings are a concatenation of optionally
//! space-separated `key:"value"` pairs. Each key is a non-empty string of
//! non-control characters other than space, quote and colon. Each value is
//! a double-quoted string; its content splits on `,` into a name and
//! options (`json:"name,omitempty"`).

mod quote;

use crate::error::{AsterError, AsterResult};
use std::fmt;
use std::str::FromStr;

pub(crate) use quote::{quote, unquote};

/// One `key:"name,opt,..."` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub name: String,
    pub options: Vec<String>,
}

impl Tag {
    pub fn new(key: &str, name: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            options: Vec::new(),
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.extend(options.into_iter().map(Into::into));
        self
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// The unquoted value: name followed by the options, comma separated.
    pub fn value(&self) -> String {
        if self.options.is_empty() {
            self.name.clone()
        } else {
            format!("{},{}", self.name, self.options.join(","))
        }
    }

    /// Rejects tags that would not survive a serialize/parse round trip.
    pub fn validate(&self) -> AsterResult<()> {
        if self.key.is_empty() {
            return Err(AsterError::TagKeyNotSet);
        }
        if !self.key.bytes().all(is_key_byte) {
            return Err(AsterError::TagKeySyntax);
        }
        let stray_comma = self.name.contains(',') || self.options.iter().any(|o| o.contains(','));
        if stray_comma {
            return Err(AsterError::TagValueSyntax);
        }
        Ok(())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, quote(&self.value()))
    }
}

fn is_key_byte(b: u8) -> bool {
    b > b' ' && b != b':' && b != b'"' && b != 0x7f
}

/// An ordered set of tags, at most one per key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    tags: Vec<Tag>,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the content of a tag literal (without back-quotes).
    pub fn parse(text: &str) -> AsterResult<Tags> {
        let mut tags = Vec::new();
        let mut rest = text;

        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            let bytes = rest.as_bytes();

            let key_len = bytes.iter().take_while(|b| is_key_byte(**b)).count();
            if key_len == 0 {
                return Err(AsterError::TagKeySyntax);
            }
            if key_len + 1 >= bytes.len() || bytes[key_len] != b':' {
                return Err(AsterError::TagSyntax);
            }
            if bytes[key_len + 1] != b'"' {
                return Err(AsterError::TagValueSyntax);
            }
            let key = &rest[..key_len];
            rest = &rest[key_len + 1..];

            // Scan the quoted value, honouring backslash escapes.
            let bytes = rest.as_bytes();
            let mut i = 1;
            while i < bytes.len() && bytes[i] != b'"' {
                if bytes[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            if i >= bytes.len() {
                return Err(AsterError::TagValueSyntax);
            }
            let quoted = &rest[..=i];
            rest = &rest[i + 1..];

            let value = unquote(quoted).ok_or(AsterError::TagValueSyntax)?;
            let mut parts = value.split(',');
            let name = parts.next().unwrap_or_default().to_string();
            let options = parts.map(str::to_string).collect();
            tags.push(Tag {
                key: key.to_string(),
                name,
                options,
            });
        }

        Ok(Tags { tags })
    }

    /// Tag registered under `key`.
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.key == key)
    }

    /// Inserts `tag`, replacing an existing tag with the same key.
    pub fn set(&mut self, tag: Tag) -> AsterResult<()> {
        tag.validate()?;
        match self.tags.iter_mut().find(|t| t.key == tag.key) {
            Some(existing) => *existing = tag,
            None => self.tags.push(tag),
        }
        Ok(())
    }

    /// Adds options to the tag under `key`, skipping ones already present.
    /// Missing keys are left alone.
    pub fn add_options(&mut self, key: &str, options: &[&str]) {
        for tag in self.tags.iter_mut().filter(|t| t.key == key) {
            for option in options {
                if !tag.has_option(option) {
                    tag.options.push(option.to_string());
                }
            }
        }
    }

    /// Removes the tags under every key in `keys`.
    pub fn delete(&mut self, keys: &[&str]) {
        self.tags.retain(|t| !keys.contains(&t.key.as_str()));
    }

    /// Removes the given options from the tag under `key`.
    pub fn delete_options(&mut self, key: &str, options: &[&str]) {
        for tag in self.tags.iter_mut().filter(|t| t.key == key) {
            tag.options.retain(|o| !options.contains(&o.as_str()));
        }
    }

    pub fn keys(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.key.as_str()).collect()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Sorts by key.
    pub fn sort(&mut self) {
        self.tags.sort_by(|a, b| a.key.cmp(&b.key));
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}

impl FromStr for Tags {
    type Err = AsterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tags::parse(s)
    }
}

/// Extracts the tag text from a raw literal: back-quoted, double-quoted or
/// bare.
pub(crate) fn literal_content(raw: &str) -> AsterResult<String> {
    if raw.len() >= 2 && raw.starts_with('`') && raw.ends_with('`') {
        return Ok(raw[1..raw.len() - 1].to_string());
    }
    if raw.starts_with('"') {
        return unquote(raw).ok_or(AsterError::TagSyntax);
    }
    Ok(raw.to_string())
}

/// Renders tag text as a literal, back-quoted unless it contains a
/// back-quote itself.
pub(crate) fn literal(text: &str) -> String {
    if text.contains('`') {
        quote(text)
    } else {
        format!("`{text}`")
    }
}
