//! Doc Synthesis
//!
//! Produces a baseline doc block from a declaration's name, kind and
//! parameters. The wording comes from small naming tables: verb prefixes for
//! the summary line, common parameter names for `@param` text.

use crate::constants::PLACEHOLDER_TAG;
use crate::docblock::gutter_line;
use crate::params::Parameter;
use crate::scanner::{Declaration, DeclarationKind};

/// Verb prefixes and the sentence head they produce
const VERB_PREFIXES: &[(&str, &str)] = &[
    ("create", "Creates a new"),
    ("get", "Gets the"),
    ("set", "Sets the"),
    ("update", "Updates the"),
    ("delete", "Deletes the"),
    ("validate", "Validates the"),
    ("use", "Uses the"),
];

/// A synthesized doc block before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedDoc {
    pub description: String,
    /// `(parameter, text)` in declaration order
    pub params: Vec<(String, String)>,
    pub returns: Option<String>,
    /// No parameters, only the canned return line
    pub is_generic_placeholder: bool,
}

impl SynthesizedDoc {
    /// Render as block lines at `indent`
    pub fn render(&self, indent: &str) -> Vec<String> {
        let mut lines = vec![format!("{indent}/**"), gutter_line(indent, &self.description)];
        let has_tags = !self.params.is_empty() || self.returns.is_some();
        if has_tags {
            lines.push(gutter_line(indent, ""));
        }
        for (name, text) in &self.params {
            lines.push(DocSynthesizer::param_line(indent, name, text));
        }
        if let Some(returns) = &self.returns {
            lines.push(DocSynthesizer::returns_line(indent, returns));
        }
        if self.is_generic_placeholder {
            lines.push(gutter_line(indent, PLACEHOLDER_TAG));
        }
        lines.push(format!("{indent} */"));
        lines
    }
}

/// Stateless doc synthesizer
pub struct DocSynthesizer;

impl DocSynthesizer {
    pub fn synthesize(declaration: &Declaration, params: &[Parameter]) -> SynthesizedDoc {
        let params: Vec<(String, String)> = params
            .iter()
            .map(|p| (p.name.clone(), Self::describe_parameter(&p.name)))
            .collect();
        let returns = Self::describe_return(declaration);
        let is_generic_placeholder = params.is_empty() && returns.is_some();
        SynthesizedDoc {
            description: Self::describe_symbol(&declaration.name, declaration.kind),
            params,
            returns,
            is_generic_placeholder,
        }
    }

    /// Summary sentence for a symbol
    pub fn describe_symbol(name: &str, kind: DeclarationKind) -> String {
        match kind {
            DeclarationKind::Component => return format!("{name} component."),
            DeclarationKind::Hook => return format!("Hook to {}.", words(name)),
            _ => {}
        }
        for (prefix, head) in VERB_PREFIXES {
            if let Some(rest) = verb_rest(name, prefix) {
                return format!("{head} {}.", words(rest));
            }
        }
        format!("The {}.", words(name))
    }

    /// `@param` text for a parameter name, matched case-insensitively
    pub fn describe_parameter(name: &str) -> String {
        let lower = name.to_lowercase();
        match lower.as_str() {
            "id" => return "The unique identifier.".to_string(),
            "name" => return "The name.".to_string(),
            "children" => return "The child elements to render.".to_string(),
            "classname" => return "Additional CSS class names to apply.".to_string(),
            "callback" | "cb" => return "The callback function to invoke.".to_string(),
            "props" => return "The component props.".to_string(),
            "options" | "opts" => return "The configuration options.".to_string(),
            _ => {}
        }
        if let Some(owner) = identifier_owner(name) {
            return format!("The identifier of the {}.", words(owner));
        }
        if lower.len() > "name".len() && lower.ends_with("name") {
            return format!("The {}.", words(name));
        }
        if lower.contains("callback") {
            return "The callback function to invoke.".to_string();
        }
        if let Some(event) = event_handler(name, &lower) {
            return format!("Callback invoked on {}.", words(event));
        }
        format!("The {name} parameter.")
    }

    /// `@returns` text; `None` for non-callables and setters
    pub fn describe_return(declaration: &Declaration) -> Option<String> {
        match declaration.kind {
            DeclarationKind::Component => Some("The rendered component.".to_string()),
            DeclarationKind::Function | DeclarationKind::Hook => {
                if verb_rest(&declaration.name, "set").is_some() {
                    None
                } else {
                    Some(format!("The result of {}.", declaration.name))
                }
            }
            _ => None,
        }
    }

    pub fn param_line(indent: &str, name: &str, text: &str) -> String {
        gutter_line(indent, &format!("@param {name} - {text}"))
    }

    pub fn returns_line(indent: &str, text: &str) -> String {
        gutter_line(indent, &format!("@returns {text}"))
    }
}

/// Remainder after `prefix` when it is followed by an uppercase letter or digit
fn verb_rest<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix).filter(|rest| {
        rest.chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    })
}

/// DOM event names recognised after a lower-case `on` prefix
const EVENT_NAMES: &[&str] = &[
    "blur", "change", "click", "close", "dblclick", "drag", "drop", "error", "focus", "input",
    "keydown", "keypress", "keyup", "load", "mousedown", "mouseenter", "mouseleave", "mouseup",
    "open", "reset", "resize", "scroll", "select", "submit",
];

/// Owner part of an `*Id` / `*ID` parameter (`userID` -> `user`)
fn identifier_owner(name: &str) -> Option<&str> {
    name.strip_suffix("Id")
        .or_else(|| name.strip_suffix("ID"))
        .filter(|owner| !owner.is_empty())
}

/// Event part of an `on<Event>` parameter: `onValueChange`, or `onclick`
/// when the remainder is a known DOM event
fn event_handler<'a>(name: &'a str, lower: &str) -> Option<&'a str> {
    verb_rest(name, "on").or_else(|| {
        let event = lower.strip_prefix("on")?;
        EVENT_NAMES
            .contains(&event)
            .then(|| &name["on".len()..])
    })
}

/// Split an identifier on camel case, acronyms and underscores
pub fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '$' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let lower_or_digit_before = prev.is_lowercase() || prev.is_ascii_digit();
            if lower_or_digit_before || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

fn words(name: &str) -> String {
    split_words(name).join(" ")
}
