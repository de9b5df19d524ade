//! Fixed design palette for space forms.
//!
//! The design step offers a closed set of background gradients and a swatch
//! of button colours plus a free-form picker. Gradients are referenced by id
//! everywhere (drafts, records, previews); arbitrary ids are never stored.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Gradients
// ---------------------------------------------------------------------------

/// A background gradient offered by the design step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub id: u8,
    /// CSS `background` value used by the form and its live preview.
    pub style: &'static str,
}

/// Gradient applied when a draft has none, or an unknown one.
pub const DEFAULT_GRADIENT_ID: u8 = 1;

/// Every gradient the design step offers, in display order.
pub const GRADIENTS: [Gradient; 8] = [
    Gradient {
        id: 1,
        style: "linear-gradient(135deg, #FDFCFB 0%, #E2D1C3 100%)",
    },
    Gradient {
        id: 2,
        style: "linear-gradient(135deg, #E0C3FC 0%, #8EC5FC 100%)",
    },
    Gradient {
        id: 3,
        style: "linear-gradient(135deg, #FBC2EB 0%, #A6C1EE 100%)",
    },
    Gradient {
        id: 4,
        style: "linear-gradient(135deg, #D4FC79 0%, #96E6A1 100%)",
    },
    Gradient {
        id: 5,
        style: "linear-gradient(135deg, #FFECD2 0%, #FCB69F 100%)",
    },
    Gradient {
        id: 6,
        style: "linear-gradient(135deg, #A1C4FD 0%, #C2E9FB 100%)",
    },
    Gradient {
        id: 7,
        style: "linear-gradient(135deg, #F6D365 0%, #FDA085 100%)",
    },
    Gradient {
        id: 8,
        style: "linear-gradient(135deg, #30CFD0 0%, #330867 100%)",
    },
];

/// Look up a gradient by id.
pub fn gradient(id: u8) -> Option<&'static Gradient> {
    GRADIENTS.iter().find(|g| g.id == id)
}

/// Whether `id` names a gradient in the palette.
pub fn is_known_gradient(id: u8) -> bool {
    gradient(id).is_some()
}

/// Map a possibly-absent, possibly-foreign gradient id onto the palette.
///
/// Persisted records store the id as a plain integer, so anything outside
/// the palette (or missing) falls back to [`DEFAULT_GRADIENT_ID`].
pub fn clamp_gradient(id: Option<i32>) -> u8 {
    id.and_then(|raw| u8::try_from(raw).ok())
        .filter(|raw| is_known_gradient(*raw))
        .unwrap_or(DEFAULT_GRADIENT_ID)
}

// ---------------------------------------------------------------------------
// Button colours
// ---------------------------------------------------------------------------

/// Button colour applied to fresh drafts.
pub const DEFAULT_BUTTON_COLOR: &str = "#71D4FF";

/// Preset button colours shown next to the free-form picker.
pub const BUTTON_SWATCHES: [&str; 5] = ["#71D4FF", "#FF71D4", "#71FF9F", "#FFD471", "#7171FF"];

const HEX_COLOR_PATTERN: &str = r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$";

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEX_COLOR_PATTERN).expect("valid regex"));

/// Whether `value` is a `#RGB` or `#RRGGBB` hex colour.
pub fn is_valid_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
