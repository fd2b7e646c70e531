#![forbid(unsafe_code)]

pub mod names {
    /// Name of a persisted set. Doubles as the first half of the
    /// `PersistentSets` composite key, so the charset is kept narrow.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct SetName(String);

    impl SetName {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, SetNameError> {
            let value = value.into();
            validate_set_name(&value)?;
            Ok(Self(value))
        }
    }

    impl std::fmt::Display for SetName {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum SetNameError {
        Empty,
        TooLong,
        InvalidFirstChar,
        InvalidChar { ch: char, index: usize },
    }

    impl std::fmt::Display for SetNameError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Empty => write!(f, "set name is empty"),
                Self::TooLong => write!(f, "set name exceeds 128 bytes"),
                Self::InvalidFirstChar => {
                    write!(f, "set name must start with an ASCII alphanumeric")
                }
                Self::InvalidChar { ch, index } => {
                    write!(f, "set name contains {ch:?} at char {index}")
                }
            }
        }
    }

    impl std::error::Error for SetNameError {}

    fn validate_set_name(value: &str) -> Result<(), SetNameError> {
        if value.is_empty() {
            return Err(SetNameError::Empty);
        }
        if value.len() > 128 {
            return Err(SetNameError::TooLong);
        }
        let mut chars = value.chars();
        let Some(first) = chars.next() else {
            return Err(SetNameError::Empty);
        };
        if !first.is_ascii_alphanumeric() {
            return Err(SetNameError::InvalidFirstChar);
        }
        for (index, ch) in value.chars().enumerate() {
            if index == 0 {
                continue;
            }
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '/' | '-') {
                continue;
            }
            return Err(SetNameError::InvalidChar { ch, index });
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::{SetName, SetNameError};

        #[test]
        fn accepts_the_original_set_names() {
            for name in ["downloaded", "invalid"] {
                assert_eq!(SetName::try_new(name).expect("valid").as_str(), name);
            }
        }

        #[test]
        fn accepts_separator_chars_after_the_first() {
            assert!(SetName::try_new("a.b_c/d-e").is_ok());
        }

        #[test]
        fn rejects_empty_and_oversized() {
            assert_eq!(SetName::try_new(""), Err(SetNameError::Empty));
            assert_eq!(
                SetName::try_new("x".repeat(129)),
                Err(SetNameError::TooLong)
            );
        }

        #[test]
        fn rejects_bad_first_char_and_bad_chars() {
            assert_eq!(
                SetName::try_new("-leading"),
                Err(SetNameError::InvalidFirstChar)
            );
            assert_eq!(
                SetName::try_new("has space"),
                Err(SetNameError::InvalidChar { ch: ' ', index: 3 })
            );
        }

        #[test]
        fn invalid_char_display_reports_a_char_index() {
            // The validator enumerates chars, not bytes; the message says so.
            let err = SetName::try_new("naïve").expect_err("non-ascii is invalid");
            assert_eq!(err, SetNameError::InvalidChar { ch: 'ï', index: 2 });
            assert_eq!(format!("{err}"), "set name contains 'ï' at char 2");
        }
    }
}

pub mod urls {
    /// URL stored as a set member. The store treats it as opaque text keyed
    /// with the set name; validation only rules out values that could never
    /// be a URL (whitespace, control characters, empty after trim).
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct UrlText(String);

    const MAX_URL_BYTES: usize = 2048;

    impl UrlText {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, UrlTextError> {
            let value = value.into();
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(UrlTextError::Empty);
            }
            if trimmed.len() > MAX_URL_BYTES {
                return Err(UrlTextError::TooLong);
            }
            for (index, ch) in trimmed.chars().enumerate() {
                if ch.is_whitespace() || ch.is_control() {
                    return Err(UrlTextError::InvalidChar { ch, index });
                }
            }
            Ok(Self(trimmed.to_string()))
        }
    }

    impl std::fmt::Display for UrlText {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum UrlTextError {
        Empty,
        TooLong,
        InvalidChar { ch: char, index: usize },
    }

    impl std::fmt::Display for UrlTextError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Empty => write!(f, "url is empty"),
                Self::TooLong => write!(f, "url exceeds 2048 bytes"),
                Self::InvalidChar { ch, index } => {
                    write!(f, "url contains {ch:?} at char {index}")
                }
            }
        }
    }

    impl std::error::Error for UrlTextError {}

    #[cfg(test)]
    mod tests {
        use super::{UrlText, UrlTextError};

        #[test]
        fn trims_and_accepts_ordinary_urls() {
            let url = UrlText::try_new("  https://i.redd.it/abc123.png \n").expect("valid");
            assert_eq!(url.as_str(), "https://i.redd.it/abc123.png");
        }

        #[test]
        fn rejects_empty_after_trim() {
            assert_eq!(UrlText::try_new("   "), Err(UrlTextError::Empty));
        }

        #[test]
        fn rejects_interior_whitespace() {
            assert_eq!(
                UrlText::try_new("https://a b"),
                Err(UrlTextError::InvalidChar { ch: ' ', index: 9 })
            );
        }

        #[test]
        fn rejects_oversized() {
            let long = format!("https://example.com/{}", "x".repeat(2048));
            assert_eq!(UrlText::try_new(long), Err(UrlTextError::TooLong));
        }
    }
}
