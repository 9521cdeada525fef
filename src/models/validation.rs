//! Field-keyed validation messages shared by every form payload.

use std::collections::BTreeMap;

/// Validation messages grouped by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record `message` for `field` when `value` is shorter than `min` characters.
    pub fn min_chars(&mut self, field: &str, value: &str, min: usize, message: &str) {
        if value.trim().chars().count() < min {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(|v| v.as_slice())
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// `Ok(())` when nothing was recorded, the collected errors otherwise.
    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Loose e-mail shape check: one `@`, non-empty local part, dotted domain.
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_chars_counts_characters_not_bytes() {
        let mut errors = FieldErrors::default();
        errors.min_chars("name", "Añá", 3, "too short");
        assert!(errors.is_empty());

        errors.min_chars("name", "  ab  ", 3, "too short");
        assert_eq!(errors.get("name"), Some(&["too short".to_string()][..]));
    }

    #[test]
    fn test_finish() {
        assert!(FieldErrors::default().finish().is_ok());

        let mut errors = FieldErrors::default();
        errors.add("a", "one");
        errors.add("a", "two");
        let err = errors.finish().unwrap_err();
        assert_eq!(err.get("a").map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("tecnico@crucianelli.com"));
        assert!(!looks_like_email("tecnico"));
        assert!(!looks_like_email("@crucianelli.com"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("a b@c.com"));
    }
}
