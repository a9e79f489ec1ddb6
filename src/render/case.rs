//! Case-convention transforms used by the template helpers.
//!
//! Words are split on any non-alphanumeric character, on a lowercase letter
//! or digit followed by an uppercase letter (`myName` -> `my`, `Name`), and
//! at the end of an acronym (`HTTPServer` -> `HTTP`, `Server`). Consecutive
//! separators collapse, leading and trailing separators are dropped. Digits
//! stay attached to the word they follow, so a leading digit starts the
//! first word (`3dModel` -> `3d`, `Model`).
//!
//! `kebab_case` is idempotent. `camel_case` and `pascal_case` are idempotent
//! once their input has been through them once, and leave input that is
//! already in the target case unchanged.

/// Uppercase the first character and leave the rest untouched.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn kebab_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn pascal_case(input: &str) -> String {
    split_words(input).iter().map(|w| capitalize(w)).collect()
}

pub fn camel_case(input: &str) -> String {
    let words = split_words(input);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Split an identifier-ish string into its words.
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("hello", "Hello")]
    #[case("hELLO", "HELLO")]
    #[case("élan", "Élan")]
    #[case("1st", "1st")]
    fn test_capitalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(capitalize(input), expected);
    }

    #[rstest]
    #[case("MyProjectName", "my-project-name")]
    #[case("my-project-name", "my-project-name")]
    #[case("my_project name", "my-project-name")]
    #[case("my--project__name", "my-project-name")]
    #[case("-leading-and-trailing-", "leading-and-trailing")]
    #[case("HTTPServer", "http-server")]
    #[case("v2Api", "v2-api")]
    #[case("3dModel", "3d-model")]
    #[case("", "")]
    fn test_kebab_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(kebab_case(input), expected);
    }

    #[rstest]
    #[case("my-project", "MyProject")]
    #[case("MyProject", "MyProject")]
    #[case("my_project name", "MyProjectName")]
    #[case("myProject", "MyProject")]
    #[case("XMLHttp", "XMLHttp")]
    #[case("", "")]
    fn test_pascal_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(pascal_case(input), expected);
    }

    #[rstest]
    #[case("my-project", "myProject")]
    #[case("myProject", "myProject")]
    #[case("MyProject", "myProject")]
    #[case("XMLHttp request", "xmlHttpRequest")]
    #[case("", "")]
    fn test_camel_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(camel_case(input), expected);
    }

    #[rstest]
    #[case("Some Mixed_input-value")]
    #[case("HTTPServerV2")]
    #[case("already-kebab")]
    fn test_transforms_are_idempotent(#[case] input: &str) {
        let kebab = kebab_case(input);
        assert_eq!(kebab_case(&kebab), kebab);

        let pascal = pascal_case(input);
        assert_eq!(pascal_case(&pascal), pascal);

        let camel = camel_case(input);
        assert_eq!(camel_case(&camel), camel);
    }
}
