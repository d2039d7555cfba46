//! Capitalization rules for breed names.
//!
//! Two rules live here and they are not interchangeable:
//!
//! - `capitalize_first_letter` is applied to raw API keys when building the
//!   breed list. It only swaps the first character when its upper-case form
//!   is a single character, so `"ßeta"` stays `"ßeta"`.
//! - `capitalize_display` builds the detail screen title and uses the full
//!   upper-case mapping of the leading character (`"ßeta"` becomes
//!   `"SSeta"`).
//!
//! Neither touches anything past the first character.

pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    let replacement = match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => first,
    };

    let mut out = String::with_capacity(s.len());
    out.push(replacement);
    out.push_str(chars.as_str());
    out
}

pub fn capitalize_display(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_letter_of_non_empty_string_is_capitalized() {
        assert_eq!(capitalize_first_letter("string"), "String");
    }

    #[test]
    fn empty_string_stays_empty() {
        assert_eq!(capitalize_first_letter(""), "");
        assert_eq!(capitalize_display(""), "");
    }

    #[test]
    fn already_capitalized_is_unchanged() {
        assert_eq!(capitalize_first_letter("String"), "String");
        assert_eq!(capitalize_display("Beagle"), "Beagle");
    }

    #[test]
    fn rest_of_string_is_left_alone() {
        assert_eq!(capitalize_first_letter("germanShepherd"), "GermanShepherd");
        assert_eq!(capitalize_first_letter("st. bernard"), "St. bernard");
        assert_eq!(capitalize_display("bULLDOG"), "BULLDOG");
    }

    #[test]
    fn non_letters_pass_through() {
        assert_eq!(capitalize_first_letter("1breed"), "1breed");
        assert_eq!(capitalize_display("-x"), "-x");
    }

    #[test]
    fn multi_char_upper_case_only_applies_to_display() {
        assert_eq!(capitalize_first_letter("ßeta"), "ßeta");
        assert_eq!(capitalize_display("ßeta"), "SSeta");
    }

    #[test]
    fn non_ascii_single_char_mapping() {
        assert_eq!(capitalize_first_letter("éclair"), "Éclair");
        assert_eq!(capitalize_display("éclair"), "Éclair");
    }
}
