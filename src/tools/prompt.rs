//! Prompt template rendering.
//!
//! Templates use `{name}` placeholders where `name` is one or more ASCII
//! alphanumerics or underscores. Rendering is a single left-to-right pass:
//! substituted values are never rescanned, and brace text that is not a
//! placeholder is copied through untouched.

use crate::types::{Inputs, ToolDescriptor};
use tracing::debug;

/// A piece of a parsed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Split a template into literal text and placeholder names.
fn segments(template: &str) -> Vec<Segment<'_>> {
    let bytes = template.as_bytes();
    let mut out = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' {
            let name_start = i + 1;
            let mut j = name_start;
            while j < bytes.len() && is_name_byte(bytes[j]) {
                j += 1;
            }
            if j > name_start && j < bytes.len() && bytes[j] == b'}' {
                if literal_start < i {
                    out.push(Segment::Literal(&template[literal_start..i]));
                }
                out.push(Segment::Placeholder(&template[name_start..j]));
                i = j + 1;
                literal_start = i;
                continue;
            }
        }
        i += 1;
    }

    if literal_start < bytes.len() {
        out.push(Segment::Literal(&template[literal_start..]));
    }
    out
}

/// Placeholder names referenced by a template, in first-use order, without duplicates.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for seg in segments(template) {
        if let Segment::Placeholder(name) = seg {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Substitute `values` into `template`. Missing names render as empty strings.
pub fn render(template: &str, values: &Inputs) -> String {
    let mut out = String::with_capacity(template.len());
    for seg in segments(template) {
        match seg {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) => {
                if let Some(value) = values.get(name) {
                    out.push_str(value);
                }
            }
        }
    }
    out
}

/// Build the user prompt for a tool from caller inputs.
pub fn build_prompt(tool: &ToolDescriptor, inputs: &Inputs) -> String {
    let prompt = render(&tool.prompt_template, inputs);
    debug!("Built prompt for {}: {} chars", tool.id, prompt.len());
    prompt
}
