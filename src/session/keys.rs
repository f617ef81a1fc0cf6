//! Keystroke normalization against the closed character set.

use crate::config::ALLOWED_CHARS;

/// Lower-case `raw` and accept it only if it is in [`ALLOWED_CHARS`].
pub fn normalize(raw: char) -> Option<char> {
    let mut lowered = raw.to_lowercase();
    let c = lowered.next()?;
    if lowered.next().is_some() {
        return None;
    }
    ALLOWED_CHARS.contains(c).then_some(c)
}
