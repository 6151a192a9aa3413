#![cfg(target_arch = "wasm32")]

use js_sys::Promise;
use pixel_text_wasm::layout::BitmapSize;
use pixel_text_wasm::pointer::Point;
use pixel_text_wasm::wasm::{apply_pixel_text, fragment_source, rasterize_text, PixelText, PixelTextOptions};
use pixel_text_wasm::EffectConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn host(id: &str, width: u32, height: u32, text: &str) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    el.set_id(id);
    el.set_text_content(Some(text));
    let style = el.style();
    style.set_property("width", &format!("{width}px")).unwrap();
    style.set_property("height", &format!("{height}px")).unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

async fn next_frame() {
    let promise = Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn mouse(kind: &str, x: f64, y: f64) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_client_x(x as i32);
    init.set_client_y(y as i32);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

#[wasm_bindgen_test]
fn missing_selector_yields_none() {
    let result = apply_pixel_text("#does-not-exist", None).unwrap();
    assert!(result.is_none());
}

#[wasm_bindgen_test]
fn selector_mounts_overlay_on_positioned_target() {
    let target = host("apply-target", 320, 120, "  HELLO  ");
    let fx = apply_pixel_text("#apply-target", None).unwrap().unwrap();

    assert_eq!(target.style().get_property_value("position").unwrap(), "relative");
    assert_eq!(fx.config().text, "HELLO");
    let overlay = fx.canvas().parent_element().unwrap();
    assert_eq!(overlay.parent_element().unwrap(), *target);
    assert_eq!(fx.texture_size(), Some(BitmapSize { width: 640, height: 240 }));

    fx.destroy();
    assert!(target.query_selector("canvas").unwrap().is_none());
    target.remove();
}

#[wasm_bindgen_test]
fn explicit_text_overrides_element_text() {
    let target = host("override-target", 200, 100, "ignored");
    let mut options = PixelTextOptions::new();
    options.text = Some("WORLD".to_string());
    let fx = apply_pixel_text("#override-target", Some(options)).unwrap().unwrap();
    assert_eq!(fx.config().text, "WORLD");
    fx.destroy();
    target.remove();
}

#[wasm_bindgen_test]
fn texture_generation_is_deterministic() {
    let cfg = EffectConfig::default().with_text("HELLO");
    let size = BitmapSize::for_surface(250, 100);
    let pixels = |canvas: web_sys::HtmlCanvasElement| {
        let ctx = canvas
            .get_context("2d")
            .unwrap()
            .unwrap()
            .dyn_into::<CanvasRenderingContext2d>()
            .unwrap();
        ctx.get_image_data(0.0, 0.0, size.width as f64, size.height as f64)
            .unwrap()
            .data()
            .0
    };
    let a = rasterize_text(&cfg, size).unwrap();
    let b = rasterize_text(&cfg, size).unwrap();
    assert_eq!(a.width(), size.width);
    assert_eq!(a.height(), size.height);
    assert!(pixels(a) == pixels(b));
}

#[wasm_bindgen_test]
fn fragment_shader_uses_distortion_constants() {
    let src = fragment_source();
    assert!(src.contains("floor(v_uv * 40.0) / 40.0"));
    assert!(src.contains("smoothstep(0.300, 0.0, dist)"));
    assert!(src.contains("-moveDir * 0.400"));
}

#[wasm_bindgen_test]
fn resize_regenerates_once_at_new_size() {
    let container = host("resize-target", 400, 300, "");
    let fx = PixelText::new(container.clone(), None).unwrap();
    assert_eq!(fx.regenerations(), (1, 1));

    container.style().set_property("width", "800px").unwrap();
    container.style().set_property("height", "600px").unwrap();
    let window = web_sys::window().unwrap();
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();

    assert_eq!(fx.regenerations(), (2, 2));
    assert_eq!(fx.texture_width(), 1600);
    assert_eq!(fx.texture_height(), 1200);
    fx.destroy();
    container.remove();
}

#[wasm_bindgen_test]
fn pointer_events_drive_state() {
    let container = host("pointer-target", 200, 100, "");
    let style = container.style();
    style.set_property("position", "fixed").unwrap();
    style.set_property("left", "0px").unwrap();
    style.set_property("top", "0px").unwrap();
    let fx = PixelText::new(container.clone(), None).unwrap();
    let rect = container.get_bounding_client_rect();
    let (l, t) = (rect.left(), rect.top());

    container
        .dispatch_event(&mouse("mouseenter", l + 80.0, t + 60.0))
        .unwrap();
    let p = fx.pointer();
    assert_eq!(p.current, Point::new(0.4, 0.6));
    assert_eq!(p.target, Point::new(0.4, 0.6));

    container.dispatch_event(&mouse("mousemove", l + 40.0, t + 30.0)).unwrap();
    container.dispatch_event(&mouse("mousemove", l + 100.0, t + 50.0)).unwrap();
    container.dispatch_event(&mouse("mouseleave", l, t)).unwrap();
    assert_eq!(fx.pointer().target, Point::new(0.2, 0.3));

    fx.destroy();
    container.remove();
}

#[wasm_bindgen_test(async)]
async fn destroy_stops_drawing_and_detaches() {
    let container = host("destroy-target", 120, 80, "");
    let fx = PixelText::new(container.clone(), None).unwrap();
    next_frame().await;
    next_frame().await;
    assert!(fx.frames_drawn() > 0);

    fx.destroy();
    let drawn = fx.frames_drawn();
    assert!(fx.destroyed());
    assert!(fx.canvas().parent_node().is_none());
    assert_eq!(fx.texture_width(), 0);

    next_frame().await;
    next_frame().await;
    assert_eq!(fx.frames_drawn(), drawn);

    // second destroy is a no-op
    fx.destroy();
    assert!(fx.destroyed());
    container.remove();
}

#[wasm_bindgen_test]
fn destroy_detaches_listeners() {
    let container = host("detach-target", 200, 100, "");
    let style = container.style();
    style.set_property("position", "fixed").unwrap();
    style.set_property("left", "0px").unwrap();
    style.set_property("top", "0px").unwrap();
    let fx = PixelText::new(container.clone(), None).unwrap();
    let window = web_sys::window().unwrap();

    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    assert_eq!(fx.resize_events(), 1);
    container.dispatch_event(&mouse("mouseenter", 80.0, 60.0)).unwrap();
    let before = fx.pointer();
    assert_eq!(before.target, Point::new(0.4, 0.6));

    fx.destroy();
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    container.dispatch_event(&mouse("mouseenter", 20.0, 10.0)).unwrap();
    container.dispatch_event(&mouse("mousemove", 180.0, 90.0)).unwrap();
    container.dispatch_event(&mouse("mouseleave", 0.0, 0.0)).unwrap();

    assert_eq!(fx.resize_events(), 1);
    assert_eq!(fx.pointer(), before);
    container.remove();
}

#[wasm_bindgen_test(async)]
async fn effect_outlives_its_handle() {
    let container = host("orphan-target", 120, 80, "");
    let fx = PixelText::new(container.clone(), None).unwrap();
    let canvas = fx.canvas();
    drop(fx);

    next_frame().await;
    next_frame().await;
    let parent: web_sys::Node = container.clone().into();
    assert_eq!(canvas.parent_node(), Some(parent));
    assert!(canvas.width() > 0);
    container.remove();
}
