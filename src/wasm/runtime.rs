use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Event, EventTarget, MouseEvent, Performance, Window};

use super::dom::{centre_of, DomSurface};
use super::render::WebGlPoints;
use crate::choreography::Control;
use crate::clock::Clock;
use crate::config::{LandingConfig, DEFAULT_PORT};
use crate::error::{LandingError, Result};
use crate::lifecycle::StopToken;
use crate::session::{Session, UiEvent};

type LandingSession = Session<WebGlPoints, DomSurface>;
type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct PerformanceClock {
    performance: Performance,
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }
}

/// An event listener that can be unhooked again.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    fn detach(&self) {
        self.target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
            .ok();
    }
}

/// The running page: frame loop, stats timer and listeners, all feeding one
/// session.
pub struct Runtime {
    window: Window,
    session: Rc<RefCell<LandingSession>>,
    stop: StopToken,
    frame: FrameSlot,
    frame_request: Rc<Cell<Option<i32>>>,
    stats_interval: i32,
    _stats_tick: Closure<dyn FnMut()>,
    listeners: Vec<Listener>,
}

impl Runtime {
    pub fn start() -> Result<Self> {
        let window = window().ok_or_else(|| LandingError::Js("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| LandingError::Js("no document".into()))?;
        let clock = Rc::new(PerformanceClock {
            performance: window
                .performance()
                .ok_or_else(|| LandingError::Js("no performance timer".into()))?,
        });

        let surface = DomSurface::locate(&document)?;
        surface.show_port(&port_label(&window));
        let layout = surface.layout();
        let cards = surface.cards().to_vec();
        let pause_button = surface.control(Control::Pause).clone();
        let theme_button = surface.control(Control::Theme).clone();
        let burst_button = surface.control(Control::Burst).clone();

        let config = LandingConfig::default();
        let stats_interval_ms = config.stats.interval_ms;
        let renderer = surface
            .canvas()
            .and_then(|canvas| WebGlPoints::new(canvas, &config));
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let session = Rc::new(RefCell::new(Session::start(
            config,
            renderer,
            surface,
            layout,
            inner_size(&window)?,
            clock.now_ms(),
            seed,
        )));
        let stop = StopToken::new();

        let mut listeners = Vec::new();

        let send = dispatcher(&session, &clock);
        listeners.push(Listener::attach(&document, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                send(UiEvent::PointerMoved {
                    x: f64::from(mouse.client_x()),
                    y: f64::from(mouse.client_y()),
                });
            }
        })?);

        let send = dispatcher(&session, &clock);
        let resized = window.clone();
        listeners.push(Listener::attach(&window, "resize", move |_| {
            match inner_size(&resized) {
                Ok((width, height)) => send(UiEvent::Resized { width, height }),
                Err(error) => log::warn!("resize ignored: {error}"),
            }
        })?);

        let send = dispatcher(&session, &clock);
        listeners.push(Listener::attach(&pause_button, "click", move |_| {
            send(UiEvent::TogglePause)
        })?);

        let send = dispatcher(&session, &clock);
        listeners.push(Listener::attach(&theme_button, "click", move |_| {
            send(UiEvent::ToggleTheme)
        })?);

        let send = dispatcher(&session, &clock);
        let origin = burst_button.clone();
        listeners.push(Listener::attach(&burst_button, "click", move |_| {
            let (x, y) = centre_of(&origin);
            send(UiEvent::Burst { x, y });
        })?);

        for (index, card) in cards.iter().enumerate() {
            for (kind, entered) in [("mouseenter", true), ("mouseleave", false)] {
                let send = dispatcher(&session, &clock);
                listeners.push(Listener::attach(card, kind, move |_| {
                    send(UiEvent::CardHover { index, entered })
                })?);
            }
        }

        let stats_tick = {
            let session = Rc::clone(&session);
            let clock = Rc::clone(&clock);
            let stop = stop.clone();
            Closure::wrap(Box::new(move || {
                stop.run(|| {
                    session.borrow_mut().sample_stats(clock.now_ms());
                });
            }) as Box<dyn FnMut()>)
        };
        let stats_interval = window.set_interval_with_callback_and_timeout_and_arguments_0(
            stats_tick.as_ref().unchecked_ref(),
            stats_interval_ms,
        )?;

        let frame: FrameSlot = Rc::new(RefCell::new(None));
        let frame_request = Rc::new(Cell::new(None));
        {
            // The closure reschedules itself through `next`, so it must live in
            // the shared slot before the first request goes out.
            let next = Rc::clone(&frame);
            let session = Rc::clone(&session);
            let stop = stop.clone();
            let request = Rc::clone(&frame_request);
            let window = window.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
                request.set(None);
                let again = stop.run(|| session.borrow_mut().frame(timestamp));
                if !again {
                    return;
                }
                match request_frame(&window, &next) {
                    Ok(id) => request.set(Some(id)),
                    Err(error) => log::error!("could not schedule next frame: {error}"),
                }
            }) as Box<dyn FnMut(f64)>));
        }
        frame_request.set(Some(request_frame(&window, &frame)?));

        log::info!("frame loop, stats timer and {} listeners installed", listeners.len());
        Ok(Self {
            window,
            session,
            stop,
            frame,
            frame_request,
            stats_interval,
            _stats_tick: stats_tick,
            listeners,
        })
    }

    /// Cancel every scheduled callback, unhook the listeners and release the
    /// renderer.
    pub fn stop(self) {
        self.stop.stop();
        if let Some(id) = self.frame_request.take() {
            self.window.cancel_animation_frame(id).ok();
        }
        self.window.clear_interval_with_handle(self.stats_interval);
        for listener in &self.listeners {
            listener.detach();
        }
        // Breaks the closure's reference to its own slot.
        self.frame.borrow_mut().take();
        self.session.borrow_mut().teardown();
    }
}

fn dispatcher(
    session: &Rc<RefCell<LandingSession>>,
    clock: &Rc<PerformanceClock>,
) -> impl Fn(UiEvent) + 'static {
    let session = Rc::clone(session);
    let clock = Rc::clone(clock);
    move |event| session.borrow_mut().dispatch(event, clock.now_ms())
}

fn request_frame(window: &Window, slot: &FrameSlot) -> Result<i32> {
    let slot = slot.borrow();
    let callback = slot
        .as_ref()
        .ok_or_else(|| LandingError::Js("frame callback released".into()))?;
    Ok(window.request_animation_frame(callback.as_ref().unchecked_ref())?)
}

fn inner_size(window: &Window) -> Result<(f64, f64)> {
    let width = window.inner_width()?.as_f64().unwrap_or_default();
    let height = window.inner_height()?.as_f64().unwrap_or_default();
    Ok((width, height))
}

fn port_label(window: &Window) -> String {
    window
        .location()
        .port()
        .ok()
        .filter(|port| !port.is_empty())
        .unwrap_or_else(|| DEFAULT_PORT.to_string())
}
