//! Font-size presets cycled from the header button.

/// Ordered font-size preset. Cycles `Level1 → Level2 → Level3 → Level1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontSizeLevel {
    #[default]
    Level1,
    Level2,
    Level3,
}

impl FontSizeLevel {
    /// The preset after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Level1 => Self::Level2,
            Self::Level2 => Self::Level3,
            Self::Level3 => Self::Level1,
        }
    }

    /// CSS custom properties set on the document root.
    #[must_use]
    pub fn css_properties(self) -> [(&'static str, &'static str); 3] {
        let (base, sm, lg) = match self {
            Self::Level1 => ("16px", "14px", "18px"),
            Self::Level2 => ("18px", "16px", "20px"),
            Self::Level3 => ("20px", "18px", "22px"),
        };
        [
            ("--font-size-base", base),
            ("--font-size-sm", sm),
            ("--font-size-lg", lg),
        ]
    }

    /// Text on the font-size button.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Level1 => "Aa",
            Self::Level2 => "Aa²",
            Self::Level3 => "Aa³",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Level1 => "level1",
            Self::Level2 => "level2",
            Self::Level3 => "level3",
        }
    }

    /// `:root { ... }` rule applying this preset.
    #[must_use]
    pub fn root_style(self) -> String {
        let declarations: Vec<String> = self
            .css_properties()
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect();
        format!(":root {{ {} }}", declarations.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_length_is_three() {
        let start = FontSizeLevel::default();
        assert_eq!(start.next().next().next(), start);
        assert_ne!(start.next(), start);
        assert_ne!(start.next().next(), start);
    }

    #[test]
    fn test_level2_preset() {
        let level = FontSizeLevel::Level2;
        assert_eq!(level.label(), "Aa²");
        assert_eq!(
            level.root_style(),
            ":root { --font-size-base: 18px; --font-size-sm: 16px; --font-size-lg: 20px; }"
        );
    }
}
