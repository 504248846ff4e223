//! String↔enum conversion for choice-constrained arguments.

use armature_log::LogLevel;
use thiserror::Error;

/// An enum usable as a choice-constrained argument.
///
/// Implementors list their variants and give each a canonical string form;
/// parsing and choice enumeration come for free. Round trip holds by
/// construction: `from_arg(v.arg()) == v` for every variant.
///
/// # Example
///
/// ```rust
/// use armature::ArgEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Profile {
///     Debug,
///     Release,
/// }
///
/// impl ArgEnum for Profile {
///     const VARIANTS: &'static [Self] = &[Profile::Debug, Profile::Release];
///
///     fn arg(&self) -> &'static str {
///         match self {
///             Profile::Debug => "debug",
///             Profile::Release => "release",
///         }
///     }
/// }
///
/// assert_eq!(Profile::from_arg("release"), Ok(Profile::Release));
/// ```
pub trait ArgEnum: Sized + Copy + PartialEq + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// The canonical string form accepted on the command line.
    fn arg(&self) -> &'static str;

    /// Parses a canonical form back to its variant.
    fn from_arg(s: &str) -> Result<Self, InvalidChoice> {
        Self::VARIANTS
            .iter()
            .find(|variant| variant.arg() == s)
            .copied()
            .ok_or_else(|| InvalidChoice {
                value: s.to_string(),
                choices: Self::choices(),
            })
    }

    /// The canonical forms of every variant, in declaration order.
    fn choices() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|variant| variant.arg()).collect()
    }
}

/// Error for a string that matches none of an enum's canonical forms.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid choice '{value}' (choose one of: {})", .choices.join(", "))]
pub struct InvalidChoice {
    /// The rejected input.
    pub value: String,
    /// Every valid canonical form.
    pub choices: Vec<&'static str>,
}

impl ArgEnum for LogLevel {
    const VARIANTS: &'static [Self] = &[
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    fn arg(&self) -> &'static str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Fruit {
        Apple,
        Pear,
    }

    impl ArgEnum for Fruit {
        const VARIANTS: &'static [Self] = &[Fruit::Apple, Fruit::Pear];

        fn arg(&self) -> &'static str {
            match self {
                Fruit::Apple => "apple",
                Fruit::Pear => "pear",
            }
        }
    }

    #[test]
    fn test_round_trip() {
        for variant in Fruit::VARIANTS {
            assert_eq!(Fruit::from_arg(variant.arg()), Ok(*variant));
        }
    }

    #[test]
    fn test_invalid_choice_names_all_choices() {
        let err = Fruit::from_arg("banana").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid choice 'banana' (choose one of: apple, pear)"
        );
    }

    #[test]
    fn test_log_level_is_an_arg_enum() {
        assert_eq!(LogLevel::from_arg("warning"), Ok(LogLevel::Warning));
        assert_eq!(
            LogLevel::choices(),
            vec!["debug", "info", "warning", "error", "fatal"]
        );
    }
}
