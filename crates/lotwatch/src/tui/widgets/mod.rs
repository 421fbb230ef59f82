pub(super) mod error_state;
pub(super) mod events;
pub(super) mod history;
pub(super) mod lot_detail;
pub(super) mod lot_list;
pub(super) mod status_bar;
pub(super) mod util;

#[cfg(test)]
pub(super) fn truncate_with_ellipsis(input: &str, max_graphemes: usize) -> std::borrow::Cow<'_, str> {
    util::truncate_with_ellipsis(input, max_graphemes)
}

#[cfg(test)]
pub(super) fn usage_bar(ratio: f64, width: usize) -> String {
    util::usage_bar(ratio, width)
}
