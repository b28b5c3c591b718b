//! WebAssembly bindings for artconv

use wasm_bindgen::prelude::*;

use crate::config::{ArtConfig, Mode};
use crate::{Converter, Image};

#[wasm_bindgen]
pub struct WasmConverter {
    config: ArtConfig,
}

#[wasm_bindgen]
impl WasmConverter {
    /// Create a converter in alphabet mode with the default ramp.
    #[wasm_bindgen(constructor)]
    pub fn new(chunk_size: usize) -> WasmConverter {
        WasmConverter {
            config: ArtConfig { chunk_size, ..ArtConfig::default() },
        }
    }

    /// Create a converter from a JSON config string.
    #[wasm_bindgen]
    pub fn from_json(json: &str) -> Result<WasmConverter, JsValue> {
        let config = ArtConfig::from_json(json).map_err(to_js)?;
        Ok(WasmConverter { config })
    }

    #[wasm_bindgen]
    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        self.config.chunk_size = chunk_size;
    }

    #[wasm_bindgen]
    pub fn set_alphabet(&mut self, alphabet: String) {
        self.config.mode = Mode::Simple { alphabet };
    }

    #[wasm_bindgen]
    pub fn set_braille(&mut self, break_point: u8, edges: bool) {
        self.config.mode = Mode::Braille { break_point, edges };
    }

    #[wasm_bindgen]
    pub fn set_invert(&mut self, enabled: bool) {
        self.config.invert = enabled;
    }

    /// Convert RGBA pixel data (as delivered by a canvas) to art.
    #[wasm_bindgen]
    pub fn convert(&self, image_data: &[u8], width: usize, height: usize) -> Result<String, JsValue> {
        let image = Image::from_slice(width, height, 4, image_data).map_err(to_js)?;
        Converter::from_config(&self.config)
            .and_then(|c| c.create_art(&image))
            .map_err(to_js)
    }
}

fn to_js(err: crate::ArtError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
