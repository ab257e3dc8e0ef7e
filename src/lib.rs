use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod movegen;
pub mod types;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::movegen::MoveGenerator;
use crate::types::{Coord, Owner, Point};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Move generator handle exposed to the host page.
#[wasm_bindgen]
pub struct CheckersEngine {
    generator: MoveGenerator,
}

#[wasm_bindgen]
impl CheckersEngine {
    /// `config` may be `undefined` for defaults; missing keys take defaults too.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CheckersEngine, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };

        Ok(Self {
            generator: MoveGenerator::new(config)?,
        })
    }

    /// Rebuilds the board from flat `[x0, y0, x1, y1, ...]` corner coordinates.
    #[wasm_bindgen(js_name = loadCorners)]
    pub fn load_corners(&mut self, coords: Vec<f32>) -> Result<(), JsError> {
        let corners = points_from_flat(&coords)?;
        self.generator.load_corners(&corners)?;
        Ok(())
    }

    /// Tags one square; `owner` is 0 (empty), 1 or 2.
    #[wasm_bindgen(js_name = setOwner)]
    pub fn set_owner(&mut self, column: char, row: u8, owner: u8) -> Result<(), JsError> {
        self.generator
            .set_owner(Coord::new(column.to_ascii_uppercase(), row), Owner::from_u8(owner))?;
        Ok(())
    }

    #[wasm_bindgen(js_name = clearOwners)]
    pub fn clear_owners(&mut self) {
        self.generator.clear_owners();
    }

    /// Move strings such as `"B2 D4 F6"` for player 1 or 2.
    #[wasm_bindgen(js_name = findMoves)]
    pub fn find_moves(&self, player: u8) -> Result<JsValue, JsError> {
        let moves = self.generator.find_move_strings(Owner::from_u8(player));
        serde_wasm_bindgen::to_value(&moves).map_err(to_js_error)
    }

    /// Current fields with owners and pixel bounds, for drawing the overlay.
    pub fn fields(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.generator.snapshot().fields()).map_err(to_js_error)
    }

    pub fn config(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.generator.config()).map_err(to_js_error)
    }
}

fn points_from_flat(coords: &[f32]) -> Result<Vec<Point>, EngineError> {
    if coords.len() % 2 != 0 {
        return Err(EngineError::OddCoordinateBuffer { len: coords.len() });
    }
    Ok(coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0] as i32, pair[1] as i32))
        .collect())
}

fn to_js_error(err: serde_wasm_bindgen::Error) -> JsError {
    JsError::new(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_coordinates_are_truncated_to_pixels() {
        let points = points_from_flat(&[1.9, 2.2, 30.5, -4.7]).unwrap();

        assert_eq!(points, vec![Point::new(1, 2), Point::new(30, -4)]);
    }

    #[test]
    fn odd_coordinate_buffer_is_rejected() {
        assert_eq!(
            points_from_flat(&[1.0, 2.0, 3.0]),
            Err(EngineError::OddCoordinateBuffer { len: 3 })
        );
    }
}
