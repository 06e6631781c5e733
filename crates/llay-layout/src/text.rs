//! Text measurement for layout.
//!
//! The engine never shapes text itself. It asks a [`MeasureText`]
//! implementation supplied by the caller, and assumes the answer is a pure
//! function of the text, its font attributes and the wrap width.

use llay_core::{Dimensions, TextConfig, TextWrapMode};

/// Measures text for the sizing resolver.
pub trait MeasureText {
    /// Size of `text` rendered with `config`, broken into lines no wider than
    /// `max_width` when one is given. Must not have side effects.
    fn measure(&self, text: &str, config: &TextConfig, max_width: Option<f32>) -> Dimensions;
}

impl<F> MeasureText for F
where
    F: Fn(&str, &TextConfig, Option<f32>) -> Dimensions,
{
    fn measure(&self, text: &str, config: &TextConfig, max_width: Option<f32>) -> Dimensions {
        self(text, config, max_width)
    }
}

/// Fixed-advance measurement: every character is `char_width` wide (plus
/// letter spacing) and every line is `line_height` tall unless the text
/// config sets its own line height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            char_width: 10.0,
            line_height: 20.0,
        }
    }
}

impl MonospaceMeasure {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }

    fn advance(&self, config: &TextConfig) -> f32 {
        self.char_width + config.letter_spacing as f32
    }

    fn line_height(&self, config: &TextConfig) -> f32 {
        if config.line_height > 0 {
            config.line_height as f32
        } else {
            self.line_height
        }
    }

    fn run_width(&self, run: &str, config: &TextConfig) -> f32 {
        run.chars().count() as f32 * self.advance(config)
    }

    /// Widths of the lines `line` breaks into at `max_width`.
    fn wrap_line(&self, line: &str, config: &TextConfig, max_width: f32, widths: &mut Vec<f32>) {
        let space_width = self.advance(config);
        let mut current: Option<f32> = None;

        for word in line.split_whitespace() {
            let word_width = self.run_width(word, config);
            current = match current {
                None => Some(word_width),
                Some(width) if width + space_width + word_width <= max_width => {
                    Some(width + space_width + word_width)
                }
                Some(width) => {
                    widths.push(width);
                    Some(word_width)
                }
            };
        }

        widths.push(current.unwrap_or(0.0));
    }
}

impl MeasureText for MonospaceMeasure {
    fn measure(&self, text: &str, config: &TextConfig, max_width: Option<f32>) -> Dimensions {
        let line_height = self.line_height(config);

        let mut widths = Vec::new();
        match config.wrap_mode {
            TextWrapMode::None => widths.push(self.run_width(text, config)),
            TextWrapMode::Newlines => {
                widths.extend(text.split('\n').map(|line| self.run_width(line, config)))
            }
            TextWrapMode::Words => {
                for line in text.split('\n') {
                    match max_width {
                        Some(max) => self.wrap_line(line, config, max, &mut widths),
                        None => widths.push(self.run_width(line, config)),
                    }
                }
            }
        }

        let width = widths.iter().copied().fold(0.0_f32, f32::max);
        Dimensions::new(width, widths.len() as f32 * line_height)
    }
}

/// Width of the widest whitespace-separated word, the narrowest a wrapping
/// text element can become.
pub(crate) fn widest_word(measurer: &dyn MeasureText, text: &str, config: &TextConfig) -> f32 {
    text.split_whitespace()
        .map(|word| measurer.measure(word, config, None).width)
        .fold(0.0_f32, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_matches_fixed_oracle() {
        let measure = MonospaceMeasure::default();
        let size = measure.measure("Hello", &TextConfig::default(), None);
        assert_eq!(size, Dimensions::new(50.0, 20.0));
    }

    #[test]
    fn test_wraps_words_at_max_width() {
        let measure = MonospaceMeasure::default();
        // "aaa bbb" fits in 75px, "ccc" moves to a second line
        let size = measure.measure("aaa bbb ccc", &TextConfig::default(), Some(75.0));
        assert_eq!(size, Dimensions::new(70.0, 40.0));
        let narrow = measure.measure("aaa bbb ccc", &TextConfig::default(), Some(30.0));
        assert_eq!(narrow, Dimensions::new(30.0, 60.0));
    }

    #[test]
    fn test_newline_mode_ignores_width() {
        let measure = MonospaceMeasure::default();
        let config = TextConfig::default().with_wrap_mode(TextWrapMode::Newlines);
        let size = measure.measure("ab\nabcd", &config, Some(10.0));
        assert_eq!(size, Dimensions::new(40.0, 40.0));
    }

    #[test]
    fn test_config_line_height_and_spacing() {
        let measure = MonospaceMeasure::default();
        let config = TextConfig {
            letter_spacing: 2,
            line_height: 30,
            ..Default::default()
        };
        assert_eq!(measure.measure("abc", &config, None), Dimensions::new(36.0, 30.0));
    }

    #[test]
    fn test_closure_measurer() {
        let measure = |text: &str, _: &TextConfig, _: Option<f32>| {
            Dimensions::new(text.len() as f32 * 8.0, 16.0)
        };
        assert_eq!(widest_word(&measure, "a abcd ab", &TextConfig::default()), 32.0);
    }
}
