//! Design palette offered by the wizard's design step.

use axum::Json;
use serde::Serialize;

use viewus_core::space_palette::{
    Gradient, BUTTON_SWATCHES, DEFAULT_BUTTON_COLOR, DEFAULT_GRADIENT_ID, GRADIENTS,
};

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct Palette {
    pub gradients: &'static [Gradient],
    pub button_swatches: &'static [&'static str],
    pub default_gradient_id: u8,
    pub default_button_color: &'static str,
}

/// GET /palette
pub async fn get_palette() -> Json<DataResponse<Palette>> {
    Json(DataResponse {
        data: Palette {
            gradients: &GRADIENTS,
            button_swatches: &BUTTON_SWATCHES,
            default_gradient_id: DEFAULT_GRADIENT_ID,
            default_button_color: DEFAULT_BUTTON_COLOR,
        },
    })
}
