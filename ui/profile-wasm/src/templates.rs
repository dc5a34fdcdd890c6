//! Bridge to the page's lodash templates.
//!
//! Each slot is compiled once from its `<script type="text/template">`
//! element with `_.template`; inputs cross as plain JS objects.

use crate::dom;
use ep_profile_core::{TemplateEngine, TemplateError, TemplateInput, TemplateSlot};
use js_sys::{Function, Reflect};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub struct LodashTemplates {
    compiled: HashMap<TemplateSlot, Function>,
}

impl LodashTemplates {
    pub fn bind() -> Result<Self, JsValue> {
        let window = dom::window()?;
        let lodash = Reflect::get(&window, &JsValue::from_str("_"))?;
        let compile: Function = Reflect::get(&lodash, &JsValue::from_str("template"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("lodash `_.template` is not available"))?;

        let mut compiled = HashMap::new();
        for slot in TemplateSlot::ALL {
            let Some(source) = dom::by_id(slot.element_id()) else {
                warn!(%slot, id = slot.element_id(), "template element missing");
                continue;
            };
            let template: Function = compile
                .call1(&lodash, &JsValue::from_str(&source.inner_html()))?
                .dyn_into()
                .map_err(|_| JsValue::from_str(&format!("template {slot} did not compile")))?;
            compiled.insert(slot, template);
        }
        Ok(Self { compiled })
    }
}

impl TemplateEngine for LodashTemplates {
    fn render(&self, slot: TemplateSlot, input: &TemplateInput) -> Result<String, TemplateError> {
        let template = self.compiled.get(&slot).ok_or(TemplateError::Missing(slot))?;
        let render_err = |reason: String| TemplateError::Render { slot, reason };

        // Plain objects, not `Map`s, so templates can read fields by name.
        let data = input
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| render_err(err.to_string()))?;
        template
            .call1(&JsValue::NULL, &data)
            .map_err(|err| render_err(format!("{err:?}")))?
            .as_string()
            .ok_or_else(|| render_err("template returned a non-string".to_owned()))
    }
}
