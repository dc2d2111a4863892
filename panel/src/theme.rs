use iced::theme::Palette;
use iced::{Color, Theme};

/// Colors used by panel widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct IcedColorPalette {
    pub(crate) foreground: Color,
    pub(crate) dim_foreground: Color,
    pub(crate) background: Color,
    pub(crate) sidebar: Color,
    pub(crate) overlay: Color,
    pub(crate) scrim: Color,
    pub(crate) accent: Color,
    pub(crate) dim_accent: Color,
    pub(crate) danger: Color,
}

impl IcedColorPalette {
    fn light() -> Self {
        Self {
            foreground: Color::from_rgb8(0x1F, 0x23, 0x2B),
            dim_foreground: Color::from_rgb8(0x6B, 0x72, 0x80),
            background: Color::from_rgb8(0xF7, 0xF8, 0xFA),
            sidebar: Color::from_rgb8(0xFF, 0xFF, 0xFF),
            overlay: Color::from_rgb8(0xE5, 0xE7, 0xEB),
            scrim: Color::from_rgba8(0x00, 0x00, 0x00, 0.35),
            accent: Color::from_rgb8(0x25, 0x63, 0xEB),
            dim_accent: Color::from_rgb8(0xDB, 0xEA, 0xFE),
            danger: Color::from_rgb8(0xDC, 0x26, 0x26),
        }
    }

    fn dark() -> Self {
        Self {
            foreground: Color::from_rgb8(0xC0, 0xC5, 0xCE),
            dim_foreground: Color::from_rgb8(0x6B, 0x72, 0x80),
            background: Color::from_rgb8(0x16, 0x18, 0x22),
            sidebar: Color::from_rgb8(0x0F, 0x11, 0x15),
            overlay: Color::from_rgb8(0x23, 0x25, 0x30),
            scrim: Color::from_rgba8(0x00, 0x00, 0x00, 0.55),
            accent: Color::from_rgb8(0x4F, 0xA6, 0xED),
            dim_accent: Color::from_rgb8(0x2F, 0x63, 0x8F),
            danger: Color::from_rgb8(0xE0, 0x6C, 0x75),
        }
    }
}

/// Light or dark look of the whole window.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AppTheme {
    dark: bool,
    iced_palette: IcedColorPalette,
}

impl AppTheme {
    pub(crate) fn new(dark: bool) -> Self {
        let iced_palette = if dark {
            IcedColorPalette::dark()
        } else {
            IcedColorPalette::light()
        };
        Self { dark, iced_palette }
    }

    pub(crate) fn is_dark(&self) -> bool {
        self.dark
    }

    pub(crate) fn iced_palette(&self) -> &IcedColorPalette {
        &self.iced_palette
    }
}

impl From<&AppTheme> for Theme {
    fn from(value: &AppTheme) -> Self {
        let palette = &value.iced_palette;
        let name = if value.dark { "panel-dark" } else { "panel-light" };

        Theme::custom(
            String::from(name),
            Palette {
                background: palette.background,
                text: palette.foreground,
                primary: palette.accent,
                success: palette.accent,
                danger: palette.danger,
                warning: palette.danger,
            },
        )
    }
}

/// Theme props passed from the app down to widgets.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ThemeProps<'a> {
    pub(crate) theme: &'a AppTheme,
}

impl<'a> ThemeProps<'a> {
    pub(crate) fn new(theme: &'a AppTheme) -> Self {
        Self { theme }
    }
}

#[cfg(test)]
mod tests {
    use super::AppTheme;

    #[test]
    fn given_dark_flag_when_theme_built_then_dark_palette_is_used() {
        let dark = AppTheme::new(true);
        let light = AppTheme::new(false);

        assert!(dark.is_dark());
        assert!(!light.is_dark());
        assert_ne!(
            dark.iced_palette().background,
            light.iced_palette().background
        );
    }
}
