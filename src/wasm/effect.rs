use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, HtmlElement, MouseEvent};

use crate::config::EffectConfig;
use crate::error::{EffectError, Result};
use crate::frame::{self, CancelToken, Counter};
use crate::layout::BitmapSize;
use crate::pointer::{normalize, Point, PointerState, SurfaceRect};
use crate::viewport::Viewport;

use super::render::Renderer;
use super::{document, window};

/// A mounted effect. Everything is mutated from the UI thread only. The
/// pending animation frame holds a strong reference, so the effect keeps
/// running until [`Effect::destroy`] no matter what happens to the JS
/// handle; event listeners hold weak references.
pub struct Effect {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    /// Removed together with the canvas when the effect created it.
    owned_container: bool,
    config: EffectConfig,
    renderer: RefCell<Option<Renderer>>,
    pointer: RefCell<PointerState>,
    cancel: CancelToken,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
    frames_drawn: Counter,
    resize_events: Counter,
}

impl Effect {
    pub fn mount(
        container: HtmlElement,
        config: EffectConfig,
        owned_container: bool,
    ) -> Result<Rc<Self>> {
        let canvas = document()?
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| EffectError::Create("canvas"))?;
        let style = canvas.style();
        style.set_property("display", "block")?;
        style.set_property("width", "100%")?;
        style.set_property("height", "100%")?;
        container.append_child(&canvas)?;

        let viewport = surface_viewport(&container);
        let renderer = match Renderer::new(canvas.clone(), viewport, &config) {
            Ok(renderer) => renderer,
            Err(err) => {
                canvas.remove();
                return Err(err);
            }
        };
        log::info!(
            "pixel text mounted: {:?} on {}x{} surface",
            config.text,
            viewport.width,
            viewport.height
        );

        let effect = Rc::new(Effect {
            container,
            canvas,
            owned_container,
            config,
            renderer: RefCell::new(Some(renderer)),
            pointer: RefCell::new(PointerState::default()),
            cancel: CancelToken::new(),
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            frames_drawn: Counter::default(),
            resize_events: Counter::default(),
        });
        if let Err(err) = effect.install_listeners() {
            effect.destroy();
            return Err(err);
        }
        effect.schedule();
        Ok(effect)
    }

    fn install_listeners(self: &Rc<Self>) -> Result<()> {
        let mut listeners = Vec::with_capacity(4);

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(
            &self.container,
            "mousemove",
            move |event: &Event| {
                let (Some(effect), Some(event)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>())
                else {
                    return;
                };
                let p = effect.event_point(event);
                effect.pointer.borrow_mut().on_move(p);
            },
        ));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(
            &self.container,
            "mouseenter",
            move |event: &Event| {
                let (Some(effect), Some(event)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>())
                else {
                    return;
                };
                let p = effect.event_point(event);
                effect.pointer.borrow_mut().on_enter(p);
            },
        ));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(
            &self.container,
            "mouseleave",
            move |_event: &Event| {
                if let Some(effect) = weak.upgrade() {
                    effect.pointer.borrow_mut().on_leave();
                }
            },
        ));

        let window = window()?;
        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "resize", move |_event: &Event| {
            if let Some(effect) = weak.upgrade() {
                effect.resize_events.bump();
                effect.resize();
            }
        }));

        *self.listeners.borrow_mut() = listeners;
        Ok(())
    }

    fn event_point(&self, event: &MouseEvent) -> Point {
        let rect = self.container.get_bounding_client_rect();
        let rect = SurfaceRect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        };
        normalize(event.client_x() as f64, event.client_y() as f64, &rect)
    }

    /// Queues the next frame. The token is checked both here and when the
    /// frame fires, so a cancel between the two drops the pending tick.
    /// `destroy` drops the queued frame, which releases its reference.
    fn schedule(self: &Rc<Self>) {
        if self.cancel.is_cancelled() {
            return;
        }
        let effect = Rc::clone(self);
        let handle = request_animation_frame(move |_timestamp| {
            effect.frame.borrow_mut().take();
            if effect.cancel.is_cancelled() {
                return;
            }
            effect.render_frame();
            effect.schedule();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn render_frame(&self) {
        let uniforms = frame::tick(&mut self.pointer.borrow_mut());
        if let Some(renderer) = self.renderer.borrow().as_ref() {
            renderer.draw(&uniforms);
            self.frames_drawn.bump();
        }
    }

    fn resize(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        let viewport = surface_viewport(&self.container);
        let mut renderer = self.renderer.borrow_mut();
        let Some(renderer) = renderer.as_mut() else {
            return;
        };
        log::debug!("resize to {}x{}", viewport.width, viewport.height);
        if let Err(err) = renderer.resize(viewport, &self.config) {
            log::error!("texture regeneration failed: {err}");
        }
    }

    /// Stops the frame task, detaches listeners, removes the canvas and
    /// frees the GL context. Safe to call more than once.
    pub fn destroy(&self) {
        if !self.cancel.cancel() {
            return;
        }
        self.frame.borrow_mut().take();
        self.listeners.borrow_mut().clear();
        if let Some(renderer) = self.renderer.borrow_mut().take() {
            renderer.release();
        }
        self.canvas.remove();
        if self.owned_container {
            self.container.remove();
        }
        log::info!("pixel text destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn pointer(&self) -> PointerState {
        *self.pointer.borrow()
    }

    pub fn frames_drawn(&self) -> u32 {
        self.frames_drawn.get()
    }

    /// Window resize events received while mounted.
    pub fn resize_events(&self) -> u32 {
        self.resize_events.get()
    }

    pub fn texture_size(&self) -> Option<BitmapSize> {
        self.renderer.borrow().as_ref().map(Renderer::texture_size)
    }

    /// `(texture generations, projection updates)` so far.
    pub fn regenerations(&self) -> (u32, u32) {
        self.renderer
            .borrow()
            .as_ref()
            .map(|r| (r.texture_generations, r.projection_updates))
            .unwrap_or_default()
    }
}

fn surface_viewport(container: &HtmlElement) -> Viewport {
    Viewport::new(
        container.client_width().max(0) as u32,
        container.client_height().max(0) as u32,
    )
}
