/// Largest size the step-down search starts from once `start_size` itself does not fit.
pub const MAX_FIT_SIZE: f32 = 1024.0;

/// Largest font size, stepping down by one from `start_size`, at which `measure` reports a
/// width within `max_width_px`.
///
/// Never fails: text that does not fit even at `min_size` gets `min_size` and is allowed to
/// overflow. The result always lies in `[min_size, start_size]` when `min_size <= start_size`;
/// if the two are inverted the floor wins. Non-finite sizes fall back to the floor.
pub fn fit_size(
    text: &str,
    max_width_px: f64,
    start_size: f32,
    min_size: f32,
    mut measure: impl FnMut(&str, f32) -> f64,
) -> f32 {
    let floor = if min_size.is_finite() {
        min_size.max(0.0)
    } else {
        1.0
    };
    if !start_size.is_finite() || start_size <= floor {
        return floor;
    }
    if text.is_empty() {
        return start_size;
    }

    if fits(measure(text, start_size), max_width_px) {
        return start_size;
    }

    // Past ~2^24 a one-unit step no longer changes an f32.
    let mut size = (start_size - 1.0).min(MAX_FIT_SIZE.max(floor));
    while size > floor {
        if fits(measure(text, size), max_width_px) {
            return size;
        }
        size -= 1.0;
    }
    floor
}

fn fits(width: f64, max_width_px: f64) -> bool {
    width.is_finite() && width <= max_width_px
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
