//! Animated particle landing page.
//!
//! The platform-neutral core (particle field, camera, stats, tweens, buttons)
//! builds everywhere and is driven by [`session::Session`]. The browser glue
//! lives in [`wasm`] and only compiles for `wasm32`; the host side adds a
//! single-document static [`server`].

pub mod burst;
pub mod choreography;
pub mod clock;
pub mod config;
pub mod controls;
pub mod error;
pub mod field;
pub mod lifecycle;
pub mod motion;
pub mod session;
pub mod stats;
pub mod surface;
pub mod tween;
pub mod viewport;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;

pub use error::{LandingError, Result};
pub use session::{Session, UiEvent};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    pub mod dom;
    pub mod render;
    pub mod runtime;

    thread_local! {
        static RUNTIME: RefCell<Option<runtime::Runtime>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("landing page module loaded");
        Ok(())
    }

    /// Wire the page up. Called by the page once the DOM is ready.
    #[wasm_bindgen]
    pub fn mount() -> Result<(), JsValue> {
        teardown();
        let runtime = runtime::Runtime::start().map_err(|error| {
            log::error!("startup failed: {error}");
            JsValue::from(error)
        })?;
        RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime));
        log::info!("landing page fully loaded");
        Ok(())
    }

    /// Stop the frame loop and stats timer and unhook every listener.
    #[wasm_bindgen]
    pub fn teardown() {
        if let Some(runtime) = RUNTIME.with(|slot| slot.borrow_mut().take()) {
            runtime.stop();
        }
    }
}
