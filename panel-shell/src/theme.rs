//! Persisted light/dark choice.

/// Toggle glyph shown while the dark theme is active.
pub const DARK_GLYPH: &str = "☀️";
/// Toggle glyph shown while the light theme is active.
pub const LIGHT_GLYPH: &str = "🌙";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    dark: bool,
}

impl ThemeState {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    /// A persisted choice wins over the system preference.
    pub fn resolve(persisted: Option<bool>, system_prefers_dark: bool) -> Self {
        Self::new(persisted.unwrap_or(system_prefers_dark))
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }

    /// Glyph of the theme toggle control.
    pub fn glyph(&self) -> &'static str {
        if self.dark { DARK_GLYPH } else { LIGHT_GLYPH }
    }
}

#[cfg(test)]
mod tests {
    use super::{DARK_GLYPH, LIGHT_GLYPH, ThemeState};

    #[test]
    fn given_persisted_choice_when_resolved_then_system_preference_is_ignored()
    {
        assert!(ThemeState::resolve(Some(true), false).is_dark());
        assert!(!ThemeState::resolve(Some(false), true).is_dark());
    }

    #[test]
    fn given_no_persisted_choice_when_resolved_then_system_preference_applies()
    {
        assert!(ThemeState::resolve(None, true).is_dark());
        assert!(!ThemeState::resolve(None, false).is_dark());
    }

    #[test]
    fn given_theme_when_toggled_then_glyph_follows() {
        let mut theme = ThemeState::new(false);
        assert_eq!(theme.glyph(), LIGHT_GLYPH);

        theme.set_dark(true);

        assert_eq!(theme.glyph(), DARK_GLYPH);
    }
}
