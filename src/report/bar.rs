//! Text progress bars.

/// Default number of glyphs in a bar.
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Largest accepted bar width.
pub const MAX_BAR_WIDTH: usize = 1000;

const FILLED: char = '█';
const EMPTY: char = '-';

/// Render a bar of `width` glyphs for `percent` in `[0, 100]`.
pub fn render_bar(percent: f64, width: usize) -> String {
    let filled = (width as f64 * percent / 100.0).floor();
    let filled = if filled.is_nan() || filled < 0.0 {
        0
    } else {
        (filled as usize).min(width)
    };

    std::iter::repeat(FILLED)
        .take(filled)
        .chain(std::iter::repeat(EMPTY).take(width - filled))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bar() {
        let bar = render_bar(0.0, DEFAULT_BAR_WIDTH);
        assert_eq!(bar, "-".repeat(40));
    }

    #[test]
    fn test_full_bar() {
        let bar = render_bar(100.0, DEFAULT_BAR_WIDTH);
        assert_eq!(bar, "█".repeat(40));
        assert_eq!(bar.chars().count(), 40);
    }

    #[test]
    fn test_partial_bar_floors() {
        // 40 * 33.33 / 100 = 13.33
        let bar = render_bar(100.0 / 3.0, DEFAULT_BAR_WIDTH);
        assert_eq!(bar, format!("{}{}", "█".repeat(13), "-".repeat(27)));

        let bar = render_bar(50.0, 10);
        assert_eq!(bar, "█████-----");
    }

    #[test]
    fn test_max_width_bar() {
        let bar = render_bar(50.0, MAX_BAR_WIDTH);
        assert_eq!(bar.chars().count(), MAX_BAR_WIDTH);
        assert_eq!(bar.chars().filter(|c| *c == FILLED).count(), MAX_BAR_WIDTH / 2);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(render_bar(150.0, 4), "████");
        assert_eq!(render_bar(-5.0, 4), "----");
    }
}
