/// Where an element should land inside the viewport after a scroll-to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Leave the offset alone if the element is fully visible, otherwise scroll the least.
    #[default]
    Auto,
}

/// Computes the scroll offset that shows an element spanning `start..start + size`.
///
/// The result is clamped to `0..=max(0, content_main - viewport_main)`.
pub fn scroll_to_offset(
    start: f32,
    size: f32,
    align: Align,
    current: f32,
    viewport_main: f32,
    content_main: f32,
) -> f32 {
    let end = start + size;
    let target = match align {
        Align::Start => start,
        Align::End => end - viewport_main,
        Align::Center => start + size / 2.0 - viewport_main / 2.0,
        Align::Auto => {
            if start >= current && end <= current + viewport_main {
                current
            } else if start < current {
                start
            } else {
                end - viewport_main
            }
        }
    };
    let max = (content_main - viewport_main).max(0.0);
    if target.is_finite() {
        target.clamp(0.0, max)
    } else {
        0.0
    }
}
