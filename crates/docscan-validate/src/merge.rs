//! Doc Merging
//!
//! Brings an existing doc block up to date with its declaration without
//! discarding anything a human wrote. Missing `@param` entries are added in
//! signature order, stale ones are kept after the matched ones, and a
//! missing `@returns` is appended. Blocks that need nothing are left alone.

use crate::docblock::{DocBlock, TagEntry, TagKind, gutter_line};
use crate::params::Parameter;
use crate::scanner::Declaration;
use crate::synth::{DocSynthesizer, SynthesizedDoc};

/// Stateless merger
pub struct DocMerger;

impl DocMerger {
    /// New block lines for `block`, or `None` when it is already complete
    pub fn merge(
        block: &DocBlock,
        declaration: &Declaration,
        params: &[Parameter],
    ) -> Option<Vec<String>> {
        let synthesized = DocSynthesizer::synthesize(declaration, params);
        if block.is_generic_placeholder {
            return Self::replace_placeholder(block, &synthesized);
        }

        let matched = Self::match_params(block, params);
        let missing = matched.iter().any(Option::is_none);
        let needs_returns = synthesized.returns.is_some() && !block.has_returns();
        if !missing && !needs_returns {
            return None;
        }

        let indent = block.indent.as_str();
        let mut lines = Vec::with_capacity(block.raw_lines.len() + params.len() + 2);
        lines.push(
            block
                .opener
                .clone()
                .unwrap_or_else(|| format!("{indent}/**")),
        );
        lines.extend(block.description.iter().map(|l| l.rendered.clone()));

        let first_new_tag = lines.len();
        let param_section = if missing {
            Self::param_section(block, &synthesized, &matched)
        } else {
            Vec::new()
        };
        let first_param = block
            .tags
            .iter()
            .position(|t| matches!(t.kind, TagKind::Param { .. }));
        let section_at = if missing {
            first_param
                .or_else(|| block.tags.iter().position(|t| t.kind == TagKind::Returns))
                .unwrap_or(block.tags.len())
        } else {
            usize::MAX
        };

        for (index, entry) in block.tags.iter().enumerate() {
            if index == section_at {
                lines.extend(param_section.iter().cloned());
            }
            let is_param = matches!(entry.kind, TagKind::Param { .. });
            if missing && is_param {
                continue;
            }
            lines.extend(rendered(entry));
        }
        if section_at == block.tags.len() {
            lines.extend(param_section);
        }
        if needs_returns {
            if let Some(returns) = &synthesized.returns {
                lines.push(DocSynthesizer::returns_line(indent, returns));
            }
        }

        if block.tags.is_empty() && block.description_ends_with_text() {
            lines.insert(first_new_tag, gutter_line(indent, ""));
        }
        lines.push(
            block
                .closer
                .clone()
                .unwrap_or_else(|| format!("{indent} */")),
        );
        Some(lines)
    }

    /// Discard a placeholder in favour of a fresh synthesis
    fn replace_placeholder(block: &DocBlock, synthesized: &SynthesizedDoc) -> Option<Vec<String>> {
        let fresh = synthesized.render(&block.indent);
        (fresh != block.raw_lines).then_some(fresh)
    }

    /// For each parameter, the index of the tag documenting it
    fn match_params(block: &DocBlock, params: &[Parameter]) -> Vec<Option<usize>> {
        let mut used = vec![false; block.tags.len()];
        let mut matched = Vec::with_capacity(params.len());
        for param in params {
            let found = Self::find_tag(block, &used, |name| name == param.name).or_else(|| {
                Self::find_tag(block, &used, |name| {
                    name.rsplit_once('.').is_some_and(|(_, last)| last == param.name)
                })
            });
            if let Some(index) = found {
                used[index] = true;
            }
            matched.push(found);
        }
        matched
    }

    fn find_tag(block: &DocBlock, used: &[bool], accepts: impl Fn(&str) -> bool) -> Option<usize> {
        block.tags.iter().enumerate().position(|(index, entry)| {
            !used[index] && matches!(&entry.kind, TagKind::Param { name } if accepts(name))
        })
    }

    /// Matched or synthesized entries in signature order, then stale entries
    fn param_section(
        block: &DocBlock,
        synthesized: &SynthesizedDoc,
        matched: &[Option<usize>],
    ) -> Vec<String> {
        let mut section = Vec::new();
        for ((name, text), found) in synthesized.params.iter().zip(matched) {
            match found {
                Some(index) => section.extend(rendered(&block.tags[*index])),
                None => section.push(DocSynthesizer::param_line(&block.indent, name, text)),
            }
        }
        for (index, entry) in block.tags.iter().enumerate() {
            let stale = matches!(entry.kind, TagKind::Param { .. }) && !matched.contains(&Some(index));
            if stale {
                section.extend(rendered(entry));
            }
        }
        section
    }
}

fn rendered(entry: &TagEntry) -> impl Iterator<Item = String> + '_ {
    entry.lines.iter().map(|l| l.rendered.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::DeclarationKind;

    fn function(name: &str) -> Declaration {
        Declaration {
            name: name.to_string(),
            kind: DeclarationKind::Function,
            start_line: 0,
            raw_parameter_text: Some(String::new()),
        }
    }

    #[test]
    fn test_complete_block_is_untouched() {
        let block = DocBlock::parse(&["/**", " * Adds.", " * @param a - x", " * @returns y", " */"]);
        assert_eq!(
            DocMerger::merge(&block, &function("add"), &[Parameter::new("a")]),
            None
        );
    }

    #[test]
    fn test_dotted_token_matches_last_segment() {
        let block = DocBlock::parse(&["/**", " * Renders.", " * @param props.id - x", " */"]);
        let mut declaration = function("Row");
        declaration.kind = DeclarationKind::Component;
        let merged = DocMerger::merge(&block, &declaration, &[Parameter::new("id")]).unwrap();
        assert_eq!(
            merged,
            vec![
                "/**",
                " * Renders.",
                " * @param props.id - x",
                " * @returns The rendered component.",
                " */",
            ]
        );
    }

    #[test]
    fn test_separator_added_before_first_tag() {
        let block = DocBlock::parse(&["/** Adds. */"]);
        let merged = DocMerger::merge(&block, &function("add"), &[Parameter::new("a")]).unwrap();
        assert_eq!(
            merged,
            vec![
                "/**",
                " * Adds.",
                " *",
                " * @param a - The a parameter.",
                " * @returns The result of add.",
                " */",
            ]
        );
    }
}
