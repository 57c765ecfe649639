use super::char_class::{is_blank, is_digit, is_word_char};

pub type FieldName = String;

pub const FALLBACK_FIELD_NAME: &str = "field";

pub fn sanitize_field_name(raw_name: &str) -> FieldName {
    let mut name: String = raw_name
        .trim_matches(is_blank)
        .chars()
        .map(|ch| if is_word_char(ch) || ch == '_' { ch } else { '_' })
        .collect();

    if name.is_empty() {
        name = FALLBACK_FIELD_NAME.to_string();
    }
    if name.starts_with(is_digit) {
        name.insert(0, '_');
    }
    name
}

pub fn sanitize_field_names(raw_names: &[String]) -> Vec<FieldName> {
    raw_names
        .iter()
        .map(|raw_name| sanitize_field_name(raw_name))
        .collect()
}
