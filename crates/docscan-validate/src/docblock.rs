//! Doc-Block Parsing
//!
//! Splits an attached `/** ... */` block into description lines and tag
//! entries. Every line keeps its original text so that a merge can re-emit
//! untouched parts byte for byte.

use crate::constants::PLACEHOLDER_TAG;

/// One content line of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLine {
    /// Line as it appears in the file
    pub raw: String,
    /// Text after the ` * ` gutter (or after `/**` / before `*/`)
    pub content: String,
    /// Line to emit when the block is rewritten. Equal to `raw` for gutter
    /// lines; normalized for content that shared a line with the delimiters.
    pub rendered: String,
}

/// Kind of a block tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    Param { name: String },
    Returns,
    Other,
}

/// A tag and its continuation lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    /// Tag name including `@`
    pub tag: String,
    pub kind: TagKind,
    pub lines: Vec<DocLine>,
}

impl TagEntry {
    /// Text after the tag (and after the parameter name for `@param`),
    /// continuation lines joined with spaces
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        for (i, line) in self.lines.iter().enumerate() {
            let content = if i == 0 {
                strip_tag_head(&line.content, &self.kind)
            } else {
                line.content.trim()
            };
            if !content.is_empty() {
                parts.push(content);
            }
        }
        parts.join(" ")
    }
}

/// Parsed doc block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    pub raw_lines: Vec<String>,
    /// Leading whitespace of the opener line
    pub indent: String,
    /// Opener line when it carries nothing but `/**`
    pub opener: Option<String>,
    /// Closer line when it carries nothing but `*/`
    pub closer: Option<String>,
    pub description: Vec<DocLine>,
    pub tags: Vec<TagEntry>,
    pub is_generic_placeholder: bool,
}

impl DocBlock {
    /// Parse the lines of a located block, opener to closer inclusive
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let raw_lines: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
        let first = raw_lines.first().map_or("", String::as_str);
        let indent = first[..first.len() - first.trim_start().len()].to_string();
        let last_index = raw_lines.len().saturating_sub(1);

        let mut opener = None;
        let mut closer = None;
        let mut contents = Vec::new();
        for (i, raw) in raw_lines.iter().enumerate() {
            let mut text = raw.trim();
            let is_opener = i == 0;
            let is_closer = i == last_index;
            if is_opener {
                text = text.strip_prefix("/**").unwrap_or(text);
            }
            if is_closer {
                text = text.strip_suffix("*/").unwrap_or(text);
            }
            if !is_opener {
                text = strip_gutter(text);
            }
            let content = text.trim();

            if content.is_empty() && (is_opener || is_closer) {
                // An empty one-line `/** */` keeps neither delimiter
                if raw_lines.len() > 1 {
                    if is_opener {
                        opener = Some(raw.clone());
                    } else {
                        closer = Some(raw.clone());
                    }
                }
                continue;
            }

            let rendered = if is_opener || is_closer {
                gutter_line(&indent, content)
            } else {
                raw.clone()
            };
            contents.push(DocLine {
                raw: raw.clone(),
                content: content.to_string(),
                rendered,
            });
        }

        let mut description = Vec::new();
        let mut tags: Vec<TagEntry> = Vec::new();
        for line in contents {
            if line.content.starts_with('@') {
                let tag = line
                    .content
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string();
                let kind = tag_kind(&tag, &line.content);
                tags.push(TagEntry {
                    tag,
                    kind,
                    lines: vec![line],
                });
            } else if let Some(entry) = tags.last_mut() {
                entry.lines.push(line);
            } else {
                description.push(line);
            }
        }

        let is_generic_placeholder = tags.iter().any(|t| t.tag == PLACEHOLDER_TAG);
        Self {
            raw_lines,
            indent,
            opener,
            closer,
            description,
            tags,
            is_generic_placeholder,
        }
    }

    /// `@param` names with their text, in order of first appearance
    pub fn param_descriptions(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = Vec::new();
        for entry in &self.tags {
            if let TagKind::Param { name } = &entry.kind {
                if !out.iter().any(|(n, _)| n == name) {
                    out.push((name.clone(), entry.text()));
                }
            }
        }
        out
    }

    /// Text of the first `@returns`/`@return` tag
    pub fn return_description(&self) -> Option<String> {
        self.tags
            .iter()
            .find(|t| t.kind == TagKind::Returns)
            .map(TagEntry::text)
    }

    pub fn has_returns(&self) -> bool {
        self.tags.iter().any(|t| t.kind == TagKind::Returns)
    }

    /// Last description line carries text
    pub fn description_ends_with_text(&self) -> bool {
        self.description
            .last()
            .is_some_and(|line| !line.content.is_empty())
    }
}

/// ` * text` line at `indent`
pub fn gutter_line(indent: &str, content: &str) -> String {
    if content.is_empty() {
        format!("{indent} *")
    } else {
        format!("{indent} * {content}")
    }
}

fn strip_gutter(text: &str) -> &str {
    text.strip_prefix('*')
        .map_or(text, |rest| rest.strip_prefix(' ').unwrap_or(rest))
}

fn tag_kind(tag: &str, content: &str) -> TagKind {
    match tag {
        "@param" | "@arg" | "@argument" => param_token(content)
            .map_or(TagKind::Other, |name| TagKind::Param { name }),
        "@returns" | "@return" => TagKind::Returns,
        _ => TagKind::Other,
    }
}

/// Parameter token of a `@param` line: `{Type}` skipped, `[name=default]` unwrapped
fn param_token(content: &str) -> Option<String> {
    let mut rest = content.split_once(char::is_whitespace)?.1.trim_start();
    if rest.starts_with('{') {
        rest = rest[rest.find('}')? + 1..].trim_start();
    }
    let token = rest.split_whitespace().next()?;
    let token = token.trim_start_matches('[');
    let token = token.split(['=', ']']).next().unwrap_or(token);
    let token = token.trim_end_matches('-');
    (!token.is_empty()).then(|| token.to_string())
}

/// Content of the first tag line without the tag head
fn strip_tag_head<'a>(content: &'a str, kind: &TagKind) -> &'a str {
    let Some((_, mut rest)) = content.split_once(char::is_whitespace) else {
        return "";
    };
    rest = rest.trim_start();
    if let TagKind::Param { .. } = kind {
        if rest.starts_with('{') {
            rest = rest.find('}').map_or(rest, |end| rest[end + 1..].trim_start());
        }
        rest = rest.split_once(char::is_whitespace).map_or("", |(_, r)| r);
        rest = rest.trim_start();
        rest = rest.strip_prefix('-').map_or(rest, str::trim_start);
    }
    rest.trim()
}
