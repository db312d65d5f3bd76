//! Utilities for extracting structured data from LLM responses.
//!
//! Model answers often wrap JSON in markdown fences, surround it with
//! commentary, or break it in small ways (trailing commas, typographic
//! quotes, `//` comments). The helpers here recover what they can;
//! [`parse_object`] never fails, so a generation stage can always fall back
//! to a default record.

use novelist_error::{JsonError, NovelistResult};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static TRAILING_COMMA: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").ok());

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ``` or a bare ``` fence
/// 2. The first balanced `{ ... }` or `[ ... ]`, whichever opens first
///
/// A fence without a closing marker (a truncated response) yields
/// everything after the opening fence.
///
/// # Errors
///
/// Returns an error if no JSON-looking text is found in the response.
///
/// # Examples
///
/// ```
/// use novelist_pipeline::extract_json;
///
/// let response = "Here is the world:\n\
///     \n\
///     ```json\n\
///     {\"name\": \"Aurelia\"}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"name\": \"Aurelia\"}");
/// ```
pub fn extract_json(response: &str) -> NovelistResult<String> {
    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    let extracted = match (bracket_pos, brace_pos) {
        (Some(b_pos), Some(c_pos)) if b_pos < c_pos => extract_balanced(response, '[', ']')
            .or_else(|| extract_balanced(response, '{', '}')),
        (Some(_), None) => extract_balanced(response, '[', ']'),
        _ => extract_balanced(response, '{', '}')
            .or_else(|| extract_balanced(response, '[', ']')),
    };

    extracted.ok_or_else(|| {
        tracing::debug!(
            response_length = response.len(),
            "No JSON found in LLM response"
        );
        JsonError::new(format!(
            "No JSON found in response (length: {})",
            response.len()
        ))
        .into()
    })
}

/// Extract content from markdown code blocks.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        return Some(fenced_body(&response[content_start..]));
    }

    let start = response.find("```")?;
    let content_start = start + 3;
    // Skip the rest of the fence line (an unexpected language tag)
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);
    Some(fenced_body(&response[skip_to..]))
}

/// Text up to the closing fence, or all of it when the fence never closes.
fn fenced_body(rest: &str) -> String {
    match rest.find("```") {
        Some(end) => rest[..end].trim().to_string(),
        None => rest.trim().to_string(),
    }
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and extracts content up to the
/// matching `close`, ignoring delimiters inside string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

fn replace_all(pattern: &LazyLock<Option<Regex>>, text: &str, with: &str) -> String {
    match pattern.as_ref() {
        Some(re) => re.replace_all(text, with).into_owned(),
        None => text.to_string(),
    }
}

/// Fix the small syntax slips models make when writing JSON.
///
/// - trailing commas before `}` or `]` are removed
/// - typographic quotes used as string delimiters become `"`
/// - `//` line comments are dropped
///
/// String literals are copied untouched, so quotes, commas and `//` inside
/// prose survive.
///
/// ```
/// use novelist_pipeline::repair_json;
///
/// let broken = "{\n  // the world\n  \"name\": \"Aurelia\",\n  \"regions\": [\"North\",],\n}";
/// let fixed = repair_json(broken);
/// let value: serde_json::Value = serde_json::from_str(&fixed).unwrap();
/// assert_eq!(value["regions"][0], "North");
/// ```
pub fn repair_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    // Text between string literals, cleaned of trailing commas on flush
    let mut structure = String::new();
    // Some(true) while inside a string opened by a typographic quote
    let mut string: Option<bool> = None;
    let mut escape_next = false;
    let mut chars = json.chars().peekable();

    while let Some(ch) = chars.next() {
        match string {
            Some(smart) => {
                if escape_next {
                    escape_next = false;
                    out.push(ch);
                    continue;
                }
                match ch {
                    '\\' => {
                        escape_next = true;
                        out.push(ch);
                    }
                    '"' => {
                        out.push('"');
                        string = None;
                    }
                    '“' | '”' if smart && closes_string(chars.clone()) => {
                        out.push('"');
                        string = None;
                    }
                    _ => out.push(ch),
                }
            }
            None => match ch {
                '"' | '“' | '”' => {
                    flush_structure(&mut structure, &mut out);
                    out.push('"');
                    string = Some(ch != '"');
                }
                '/' if chars.peek() == Some(&'/') => {
                    while chars.next_if(|c| *c != '\n').is_some() {}
                }
                _ => structure.push(ch),
            },
        }
    }

    flush_structure(&mut structure, &mut out);
    out
}

/// Whether a typographic quote ends its string: only whitespace stands
/// between it and a `:`, `,`, `}`, `]` or the end of the text.
fn closes_string(rest: impl Iterator<Item = char>) -> bool {
    rest.skip_while(|c| c.is_whitespace())
        .next()
        .is_none_or(|c| matches!(c, ':' | ',' | '}' | ']'))
}

fn flush_structure(structure: &mut String, out: &mut String) {
    out.push_str(&replace_all(&TRAILING_COMMA, structure, "$1"));
    structure.clear();
}

/// Parse the first JSON object found in a model response.
///
/// Candidates are tried in order: the extracted JSON, its repaired form,
/// then the span from the first `{` to the last `}` (raw and repaired).
/// Returns `None` when nothing parses to an object.
///
/// ```
/// use novelist_pipeline::parse_object;
///
/// let map = parse_object("Sure! {\"title\": \"Tides\",}").unwrap();
/// assert_eq!(map["title"], "Tides");
///
/// assert!(parse_object("no json here").is_none());
/// ```
pub fn parse_object(response: &str) -> Option<Map<String, Value>> {
    let mut candidates = Vec::new();
    if let Ok(extracted) = extract_json(response) {
        candidates.push(repair_json(&extracted));
        candidates.insert(0, extracted);
    }
    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if start < end {
            let span = &response[start..=end];
            candidates.push(span.to_string());
            candidates.push(repair_json(span));
        }
    }

    for candidate in &candidates {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(candidate) {
            return Some(map);
        }
    }

    tracing::debug!(
        response_length = response.len(),
        candidates = candidates.len(),
        "Response did not contain a parsable JSON object"
    );
    None
}

/// Parse and validate JSON, returning a specific type.
///
/// # Errors
///
/// Returns an error if the JSON string cannot be parsed into type `T`.
///
/// # Examples
///
/// ```
/// use novelist_pipeline::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Scene {
///     description: String,
/// }
///
/// let scene: Scene = parse_json(r#"{"description": "A market at dusk"}"#).unwrap();
/// assert_eq!(scene.description, "A market at dusk");
/// ```
pub fn parse_json<T>(json_str: &str) -> NovelistResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        JsonError::new(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview)).into()
    })
}
