use crate::config::{CrtConfig, IndicatorConfig, Mount, WaveConfig};
use crate::controller::{Controller, ControllerState};
use crate::core::ParamValue;
use crate::renderers::{CrtReveal, Renderer, StandingWave, SteppedIndicator};
use instant::Instant;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

mod dom;
use dom::DomHost;

type Shared<R> = Rc<RefCell<Controller<DomHost, R>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("canvas-motion loaded");
    Ok(())
}

fn decode<C: DeserializeOwned + Default>(config: JsValue) -> anyhow::Result<C> {
    if config.is_undefined() || config.is_null() {
        return Ok(C::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| anyhow::anyhow!("invalid config: {}", e))
}

/// Wire the host callbacks to a controller they only hold weakly, so a
/// dropped handle is never called back into.
fn mount<R: Renderer + 'static>(selector: &str, parts: Mount<R>) -> anyhow::Result<Shared<R>> {
    let target: Rc<RefCell<Weak<RefCell<Controller<DomHost, R>>>>> =
        Rc::new(RefCell::new(Weak::new()));

    let epoch = Instant::now();
    let frame_target = target.clone();
    let on_frame = Closure::wrap(Box::new(move || {
        let controller = frame_target.borrow().upgrade();
        if let Some(c) = controller {
            c.borrow_mut().on_frame(epoch.elapsed().as_secs_f64() * 1000.0);
        }
    }) as Box<dyn FnMut()>);

    let resize_target = target.clone();
    let on_resize = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
        let controller = resize_target.borrow().upgrade();
        if let Some(c) = controller {
            c.borrow_mut().on_resize();
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let host = DomHost::query(selector, on_frame, on_resize)?;
    let controller = Controller::attach(host, parts.renderer, parts.params, parts.autoplay)?;
    let shared = Rc::new(RefCell::new(controller));
    *target.borrow_mut() = Rc::downgrade(&shared);
    Ok(shared)
}

fn param_value(value: &JsValue) -> Option<ParamValue> {
    if let Some(n) = value.as_f64() {
        Some(ParamValue::Number(n))
    } else if let Some(b) = value.as_bool() {
        Some(ParamValue::Flag(b))
    } else {
        value.as_string().map(ParamValue::Text)
    }
}

/// JS-facing handle around one controller. Operations never throw; they
/// return `false` when the call was rejected (the reason is logged).
macro_rules! controller_handle {
    ($handle:ident, $renderer:ty, $config:ty, $mount_fn:ident, $js_name:literal) => {
        #[wasm_bindgen]
        pub struct $handle {
            inner: Shared<$renderer>,
        }

        #[wasm_bindgen]
        impl $handle {
            pub fn play(&self) -> bool {
                self.inner.borrow_mut().play().is_ok()
            }

            pub fn pause(&self) -> bool {
                self.inner.borrow_mut().pause().is_ok()
            }

            #[wasm_bindgen(js_name = resetPhase)]
            pub fn reset_phase(&self) -> bool {
                self.inner.borrow_mut().reset_phase().is_ok()
            }

            #[wasm_bindgen(js_name = updateParameter)]
            pub fn update_parameter(&self, name: &str, value: JsValue) -> bool {
                match param_value(&value) {
                    Some(v) => self.inner.borrow_mut().update_parameter(name, v).is_ok(),
                    None => {
                        log::warn!("[params] `{}` ignored: unsupported value {:?}", name, value);
                        false
                    }
                }
            }

            #[wasm_bindgen(js_name = setMode)]
            pub fn set_mode(&self, name: &str) -> bool {
                self.inner.borrow_mut().set_mode(name).is_ok()
            }

            pub fn destroy(&self) -> bool {
                self.inner.borrow_mut().destroy().is_ok()
            }

            #[wasm_bindgen(getter)]
            pub fn state(&self) -> String {
                self.inner.borrow().state().to_string()
            }
        }

        // `free()` from JS lands here; a queued frame must not outlive the closure it calls.
        impl Drop for $handle {
            fn drop(&mut self) {
                let mut controller = self.inner.borrow_mut();
                if controller.state() != ControllerState::Destroyed {
                    _ = controller.destroy();
                }
            }
        }

        /// Mount under the first element matching `selector`. Returns
        /// `undefined` when the element is missing or the config is invalid.
        #[wasm_bindgen(js_name = $js_name)]
        pub fn $mount_fn(selector: &str, config: JsValue) -> Option<$handle> {
            let mounted = decode::<$config>(config)
                .and_then(|c| c.build().map_err(anyhow::Error::from))
                .and_then(|m| mount(selector, m));
            match mounted {
                Ok(inner) => Some($handle { inner }),
                Err(e) => {
                    log::warn!("{} not mounted: {:#}", selector, e);
                    None
                }
            }
        }
    };
}

controller_handle!(WaveHandle, StandingWave, WaveConfig, mount_wave, "mountWave");
controller_handle!(IndicatorHandle, SteppedIndicator, IndicatorConfig, mount_indicator, "mountIndicator");
controller_handle!(CrtHandle, CrtReveal, CrtConfig, mount_crt, "mountCrt");
