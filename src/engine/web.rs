//! Browser entry points. The generated report calls these from its SVG
//! event handlers.

use wasm_bindgen::prelude::*;

use super::{Panel, PanelCommand};
use crate::error::IrisError;
use crate::model::ModelData;
use crate::options::PanelOptions;
use crate::render::dom::DomTarget;
use crate::selection::ResidueAction;

fn to_js(e: IrisError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// A [`Panel`] bound to the page's SVG document.
#[wasm_bindgen]
pub struct WebPanel {
    panel: Panel,
    target: DomTarget,
}

#[wasm_bindgen]
impl WebPanel {
    /// Build from the report's embedded model JSON and optional options
    /// TOML, then draw the initial state.
    #[wasm_bindgen(constructor)]
    pub fn new(
        model_json: &str,
        options_toml: Option<String>,
    ) -> Result<WebPanel, JsValue> {
        console_error_panic_hook::set_once();
        // Fails harmlessly if a logger is already installed.
        let _ = console_log::init_with_level(log::Level::Info);

        let data = ModelData::from_json(model_json).map_err(to_js)?;
        let options = options_toml
            .as_deref()
            .map_or_else(|| Ok(PanelOptions::default()), PanelOptions::from_toml)
            .map_err(to_js)?;
        let mut target = DomTarget::from_window().map_err(to_js)?;
        let panel = Panel::new(data, options, &target).map_err(to_js)?;
        panel.render(&mut target);
        Ok(Self { panel, target })
    }

    /// Cycle to the next model version.
    #[wasm_bindgen(js_name = toggleVersion)]
    pub fn toggle_version(&mut self) -> Result<(), JsValue> {
        self.run(PanelCommand::ToggleVersion)
    }

    /// Select a chain.
    #[wasm_bindgen(js_name = setChain)]
    pub fn set_chain(&mut self, chain: usize) -> Result<(), JsValue> {
        self.run(PanelCommand::SelectChain { chain })
    }

    /// Forward a segment pointer event (`1` begin, `2` move, `3` end).
    #[wasm_bindgen(js_name = handleSegment)]
    pub fn handle_segment(
        &mut self,
        action: u8,
        residue: usize,
    ) -> Result<(), JsValue> {
        let action = ResidueAction::from_code(action).ok_or_else(|| {
            to_js(IrisError::InvalidCommand(format!(
                "unknown segment action {action}"
            )))
        })?;
        self.run(PanelCommand::Residue { action, residue })
    }

    /// Current selection as JSON.
    pub fn selection(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.panel.selection())
            .map_err(|e| to_js(e.into()))
    }

    fn run(&mut self, command: PanelCommand) -> Result<(), JsValue> {
        let _ = self
            .panel
            .execute(command, &mut self.target)
            .map_err(to_js)?;
        Ok(())
    }
}
