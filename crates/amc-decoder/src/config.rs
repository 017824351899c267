use amc_wire::cursor::DEFAULT_MAX_STRING_LEN;
use amc_wire::header::PAYLOAD_START;

/// Default upper bound on a movie's extras count.
pub const DEFAULT_MAX_EXTRAS: u32 = 1000;

/// Tuning knobs for the decoder.
///
/// The defaults decode every catalog the format is known to produce. The
/// two corruption guards are heuristics, not format rules, which is why
/// they are configurable:
///
/// ```text
/// ┌──────────────────┬────────────┬─────────────────────────────────────┐
/// │ Field            │ Default    │ Purpose                             │
/// ├──────────────────┼────────────┼─────────────────────────────────────┤
/// │ validate_strings │ false      │ reject binary-looking strings       │
/// │ max_string_len   │ 10_000_000 │ reject implausible length prefixes  │
/// │ max_extras       │ 1000       │ treat larger extras counts as junk  │
/// │ start_offset     │ 65         │ where the structured payload starts │
/// └──────────────────┴────────────┴─────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Fail string reads whose content is less than 70% printable
    /// (strings over 20 bytes only). A diagnostic aid for locating the
    /// point where the cursor lost sync; off for normal decoding.
    pub validate_strings: bool,

    /// Length prefixes above this are reported as
    /// [`WireError::InvalidLength`](amc_wire::WireError::InvalidLength).
    pub max_string_len: u64,

    /// Extras counts above this (or below zero) are treated as a
    /// desynchronised cursor and the movie gets no extras.
    pub max_extras: u32,

    /// Absolute offset of the first properties string.
    pub start_offset: u64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            validate_strings: false,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_extras: DEFAULT_MAX_EXTRAS,
            start_offset: PAYLOAD_START,
        }
    }
}
