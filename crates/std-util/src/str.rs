//! Inflection helpers shared by the schema layer.

use heck::ToUpperCamelCase;

/// Singular form of an English noun, e.g. `puppies` -> `puppy`.
pub fn singularize(word: &str) -> String {
    pluralizer::pluralize(word, 1, false)
}

pub fn upper_camel_case(src: &str) -> String {
    src.to_upper_camel_case()
}

/// True for strings that carry no content once whitespace is trimmed.
pub fn is_blank(src: &str) -> bool {
    src.trim().is_empty()
}
