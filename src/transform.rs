//! Substitution pass applied to raw bodies before storage.
//!
//! Lets authors type plain text with normal line returns and tabs; the stored
//! content is what the rendering layer serves verbatim.

/// Applied in order. Metadata markers are untouched, so extraction keeps
/// working on transformed content.
const TRANSFORMATIONS: &[(&str, &str)] = &[
    ("\t", "&nbsp&nbsp&nbsp&nbsp&nbsp&nbsp&nbsp&nbsp"),
    ("\n\n", "<br>"),
];

pub fn apply(text: &str) -> String {
    TRANSFORMATIONS
        .iter()
        .fold(text.to_string(), |body, (pattern, replacement)| {
            body.replace(pattern, replacement)
        })
}
