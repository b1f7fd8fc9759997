use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub(crate) fn hash_input(prompt: &str, model: &str) -> String {
    let combined = format!("{}::{}", model, prompt);
    hash_value(&combined)
}

pub(crate) fn hash_value(value: &str) -> String {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    format!("{:x}", hasher.finish())
}

pub(crate) fn normalize_language(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "português (Brasil)".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_input("prompt", "model"), hash_input("prompt", "model"));
        assert_ne!(hash_input("prompt", "model"), hash_input("prompt", "outro"));
    }

    #[test]
    fn test_normalize_language_defaults() {
        assert_eq!(normalize_language("  "), "português (Brasil)");
        assert_eq!(normalize_language("English"), "English");
    }
}
