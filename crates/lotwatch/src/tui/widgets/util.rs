use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

pub(super) fn truncate_with_ellipsis(input: &str, max_graphemes: usize) -> Cow<'_, str> {
    const ELLIPSIS: &str = "...";
    const ELLIPSIS_GRAPHEMES: usize = 3;

    if max_graphemes == 0 {
        return Cow::Owned(String::new());
    }

    let grapheme_count = UnicodeSegmentation::graphemes(input, true).count();
    if grapheme_count <= max_graphemes {
        return Cow::Borrowed(input);
    }

    if max_graphemes <= ELLIPSIS_GRAPHEMES {
        let truncated: String = UnicodeSegmentation::graphemes(input, true)
            .take(max_graphemes)
            .collect();
        return Cow::Owned(truncated);
    }

    let keep = max_graphemes - ELLIPSIS_GRAPHEMES;
    let mut truncated: String = UnicodeSegmentation::graphemes(input, true).take(keep).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

/// Pad or cut `input` to exactly `width` graphemes.
pub(super) fn fit(input: &str, width: usize) -> String {
    let cut = truncate_with_ellipsis(input, width);
    let len = UnicodeSegmentation::graphemes(cut.as_ref(), true).count();
    format!("{cut}{}", " ".repeat(width.saturating_sub(len)))
}

/// Text bar filled to `ratio` (clamped to `0.0..=1.0`).
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(super) fn usage_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
