use crate::config::{ColorValue, CustomThemeConfig};
use ratatui::style::{Color, Modifier, Style};

/// Colors used by the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub foreground: Color,
    pub heading_1: Color,
    pub heading_2: Color,
    pub heading_3: Color,
    pub bold_fg: Color,
    pub list_bullet: Color,
    pub rule: Color,
    pub title_bar_fg: Color,
    pub header_bg: Color,
    pub search_border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub muted: Color,
    pub error_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: Color::Rgb(220, 223, 228),
            heading_1: Color::Rgb(97, 175, 239),
            heading_2: Color::Rgb(198, 120, 221),
            heading_3: Color::Rgb(86, 182, 194),
            bold_fg: Color::Rgb(229, 192, 123),
            list_bullet: Color::Rgb(152, 195, 121),
            rule: Color::Rgb(92, 99, 112),
            title_bar_fg: Color::Rgb(97, 175, 239),
            header_bg: Color::Rgb(30, 30, 50),
            search_border: Color::Yellow,
            selection_bg: Color::Rgb(62, 68, 81),
            selection_fg: Color::White,
            muted: Color::DarkGray,
            error_fg: Color::LightRed,
            status_bar_bg: Color::Rgb(40, 44, 52),
            status_bar_fg: Color::Rgb(171, 178, 191),
        }
    }
}

impl Theme {
    /// Apply user overrides from the config file. Unknown color names are ignored.
    pub fn with_custom_colors(mut self, custom: &CustomThemeConfig) -> Self {
        fn apply(slot: &mut Color, value: &Option<ColorValue>) {
            if let Some(color) = value.as_ref().and_then(ColorValue::to_color) {
                *slot = color;
            }
        }

        apply(&mut self.heading_1, &custom.heading_1);
        apply(&mut self.heading_2, &custom.heading_2);
        apply(&mut self.heading_3, &custom.heading_3);
        apply(&mut self.foreground, &custom.foreground);
        apply(&mut self.bold_fg, &custom.bold_fg);
        apply(&mut self.list_bullet, &custom.list_bullet);
        apply(&mut self.rule, &custom.rule);
        apply(&mut self.search_border, &custom.search_border);
        apply(&mut self.selection_bg, &custom.selection_bg);
        apply(&mut self.status_bar_bg, &custom.status_bar_bg);
        apply(&mut self.status_bar_fg, &custom.status_bar_fg);
        self
    }

    /// Style for a heading of the given level (1-3).
    pub fn heading_style(&self, level: usize) -> Style {
        let color = match level {
            1 => self.heading_1,
            2 => self.heading_2,
            _ => self.heading_3,
        };
        let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        if level == 1 {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    pub fn bold_style(&self) -> Style {
        Style::default()
            .fg(self.bold_fg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_colors_override_defaults() {
        let custom = CustomThemeConfig {
            heading_3: Some(ColorValue::Named("red".to_string())),
            rule: Some(ColorValue::Indexed { indexed: 8 }),
            bold_fg: Some(ColorValue::Named("not-a-color".to_string())),
            ..Default::default()
        };
        let theme = Theme::default().with_custom_colors(&custom);

        assert_eq!(theme.heading_3, Color::Red);
        assert_eq!(theme.rule, Color::Indexed(8));
        assert_eq!(theme.bold_fg, Theme::default().bold_fg);
    }

    #[test]
    fn test_heading_styles() {
        let theme = Theme::default();
        assert!(theme.heading_style(1).add_modifier.contains(Modifier::UNDERLINED));
        assert!(!theme.heading_style(3).add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(theme.heading_style(2).fg, Some(theme.heading_2));
    }
}
