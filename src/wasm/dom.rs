use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

use crate::burst::{BurstFrame, BurstId};
use crate::choreography::{Control, Layout, Target};
use crate::controls::{pause_button_html, Theme, FALLBACK_BACKGROUND};
use crate::error::{LandingError, Result};
use crate::motion::Transform;
use crate::surface::{Stat, UiSurface};

pub const CANVAS_ID: &str = "bgCanvas";
const FPS_ID: &str = "fps";
const TIME_ID: &str = "time";
const PARTICLES_ID: &str = "particles";
const PORT_ID: &str = "portDisplay";
const PAUSE_ID: &str = "toggleAnim";
const THEME_ID: &str = "changeTheme";
const BURST_ID: &str = "explodeBtn";

const BURST_PARTICLE_CSS: &str = "position: fixed; width: 10px; height: 10px; \
    background: linear-gradient(45deg, #ff0080, #00ffcc); border-radius: 50%; \
    pointer-events: none; z-index: 1000;";

/// The page's elements, looked up once at startup.
pub struct DomSurface {
    document: Document,
    body: HtmlElement,
    canvas: HtmlElement,
    fps: Element,
    time: Element,
    particles: Element,
    port: Option<Element>,
    pause_button: HtmlElement,
    theme_button: HtmlElement,
    burst_button: HtmlElement,
    header: Option<HtmlElement>,
    cards: Vec<HtmlElement>,
    icons: Vec<Option<HtmlElement>>,
    buttons: Vec<HtmlElement>,
    cubes: Vec<HtmlElement>,
    bursts: HashMap<BurstId, HtmlElement>,
}

impl DomSurface {
    /// Fails with [`LandingError::MissingElement`] if the stats panel, the
    /// canvas or any of the three control buttons is absent.
    pub fn locate(document: &Document) -> Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| LandingError::MissingElement("body".into()))?;
        let cards = select_all(document, ".card")?;
        let icons = cards
            .iter()
            .map(|card| {
                card.query_selector(".card-icon")
                    .ok()
                    .flatten()
                    .and_then(|icon| icon.dyn_into::<HtmlElement>().ok())
            })
            .collect();
        let header = document
            .query_selector(".floating-header")?
            .and_then(|header| header.dyn_into::<HtmlElement>().ok());

        Ok(Self {
            canvas: required_html(document, CANVAS_ID)?,
            fps: required(document, FPS_ID)?,
            time: required(document, TIME_ID)?,
            particles: required(document, PARTICLES_ID)?,
            port: document.get_element_by_id(PORT_ID),
            pause_button: required_html(document, PAUSE_ID)?,
            theme_button: required_html(document, THEME_ID)?,
            burst_button: required_html(document, BURST_ID)?,
            buttons: select_all(document, ".btn")?,
            cubes: select_all(document, ".cube")?,
            document: document.clone(),
            header,
            cards,
            icons,
            body,
            bursts: HashMap::new(),
        })
    }

    pub fn layout(&self) -> Layout {
        let index_of = |button: &HtmlElement| self.buttons.iter().position(|b| b == button);
        Layout {
            header: self.header.is_some(),
            cards: self.cards.len(),
            buttons: self.buttons.len(),
            cubes: self.cubes.len(),
            pause_button: index_of(&self.pause_button),
            theme_button: index_of(&self.theme_button),
            burst_button: index_of(&self.burst_button),
        }
    }

    pub fn canvas(&self) -> Result<HtmlCanvasElement> {
        self.canvas
            .clone()
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| LandingError::RendererUnavailable(format!("#{CANVAS_ID} is not a canvas")))
    }

    pub fn control(&self, control: Control) -> &HtmlElement {
        match control {
            Control::Pause => &self.pause_button,
            Control::Theme => &self.theme_button,
            Control::Burst => &self.burst_button,
        }
    }

    pub fn cards(&self) -> &[HtmlElement] {
        &self.cards
    }

    pub fn show_port(&self, port: &str) {
        if let Some(element) = &self.port {
            element.set_text_content(Some(port));
        }
    }

    fn element(&self, target: Target) -> Option<&HtmlElement> {
        match target {
            Target::Body => Some(&self.body),
            Target::Header => self.header.as_ref(),
            Target::Card(i) => self.cards.get(i),
            Target::CardIcon(i) => self.icons.get(i).and_then(Option::as_ref),
            Target::Button(i) => self.buttons.get(i),
            Target::Cube(i) => self.cubes.get(i),
        }
    }
}

impl UiSurface for DomSurface {
    fn set_stat(&mut self, stat: Stat, text: &str) {
        let element = match stat {
            Stat::Fps => &self.fps,
            Stat::Elapsed => &self.time,
            Stat::Particles => &self.particles,
        };
        element.set_text_content(Some(text));
    }

    fn apply_theme(&mut self, theme: Theme) {
        set_style(&self.body, "background", theme.background());
        self.theme_button.set_inner_html(theme.button_html());
    }

    fn set_paused(&mut self, paused: bool) {
        self.pause_button.set_inner_html(pause_button_html(paused));
    }

    fn apply_transform(&mut self, target: Target, transform: &Transform) {
        let Some(element) = self.element(target) else {
            return;
        };
        if target == Target::Body {
            set_style(element, "background-position", &transform.css_background_position());
            return;
        }
        set_style(element, "transform", &transform.css_transform());
        set_style(element, "opacity", &format!("{:.3}", transform.opacity));
        if matches!(target, Target::Card(_)) {
            set_style(element, "box-shadow", &transform.css_box_shadow());
        }
    }

    fn spawn_burst(&mut self, id: BurstId, frame: &BurstFrame) {
        let particle = match self
            .document
            .create_element("div")
            .map_err(LandingError::from)
            .and_then(|el| {
                el.dyn_into::<HtmlElement>()
                    .map_err(|_| LandingError::Js("not an element".into()))
            }) {
            Ok(particle) => particle,
            Err(error) => {
                log::warn!("could not create burst particle: {error}");
                return;
            }
        };
        particle.set_class_name("explosion-particle");
        particle.style().set_css_text(&format!(
            "{BURST_PARTICLE_CSS} left: {:.1}px; top: {:.1}px;",
            frame.position.x, frame.position.y
        ));
        if let Err(error) = self.body.append_child(&particle) {
            log::warn!("could not attach burst particle: {error:?}");
            return;
        }
        self.bursts.insert(id, particle);
    }

    fn place_burst(&mut self, id: BurstId, frame: &BurstFrame) {
        if let Some(particle) = self.bursts.get(&id) {
            set_style(
                particle,
                "transform",
                &format!(
                    "translate({:.2}px, {:.2}px) scale({:.4})",
                    frame.translate.x, frame.translate.y, frame.scale
                ),
            );
            set_style(particle, "opacity", &format!("{:.3}", frame.opacity));
        }
    }

    fn remove_burst(&mut self, id: BurstId) {
        if let Some(particle) = self.bursts.remove(&id) {
            particle.remove();
        }
    }

    fn show_fallback_background(&mut self) {
        set_style(&self.canvas, "background", FALLBACK_BACKGROUND);
    }
}

/// Centre of an element's box in client coordinates.
pub fn centre_of(element: &Element) -> (f64, f64) {
    let rect = element.get_bounding_client_rect();
    (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0)
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(error) = element.style().set_property(property, value) {
        log::debug!("could not set {property}: {error:?}");
    }
}

fn required(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| LandingError::MissingElement(format!("#{id}")))
}

fn required_html(document: &Document, id: &str) -> Result<HtmlElement> {
    required(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| LandingError::MissingElement(format!("#{id} (not an HTML element)")))
}

fn select_all(document: &Document, selector: &str) -> Result<Vec<HtmlElement>> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}
