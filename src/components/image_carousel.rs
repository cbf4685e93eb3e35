use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    HtmlElement, HtmlImageElement, KeyboardEvent, PointerEvent, ResizeObserver, ResizeObserverEntry,
};
use yew::prelude::*;

use super::app::AppContext;
use super::carousel_controls::CarouselControls;
use crate::gesture::Size;
use crate::model::ImageSet;
use crate::state::{CarouselKey, CarouselState, FrameTransform, InputResponse, PointerSample};
use crate::util::{now_ms, prefers_reduced_motion, selection_haptic};

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x400?text=Wine+Bottle";

#[derive(Properties, PartialEq, Clone)]
pub struct ImageCarouselProps {
    pub images: ImageSet,
    pub alt: AttrValue,
    /// Shown instead of the carousel when there are no images.
    #[prop_or_default]
    pub fallback: AttrValue,
}

// Handles shared by every input callback of one carousel.
#[derive(Clone)]
struct Wiring {
    state: Rc<RefCell<CarouselState>>,
    pending_spring: Rc<RefCell<Option<Timeout>>>,
    active: UseStateHandle<usize>,
}

impl Wiring {
    fn apply(&self, response: InputResponse) {
        if response.cancel_spring_back {
            // Dropping a gloo Timeout clears it.
            self.pending_spring.borrow_mut().take();
        }
        if let Some(sb) = response.spring_back {
            let state = self.state.clone();
            let timeout = Timeout::new(sb.delay_ms, move || {
                if state.borrow_mut().spring_back(sb.token, now_ms()) {
                    log::debug!("carousel: zoom reset");
                }
            });
            *self.pending_spring.borrow_mut() = Some(timeout);
        }
        if let Some(index) = response.navigated_to {
            selection_haptic();
            self.active.set(index);
        }
    }
}

fn sample_of(e: &PointerEvent, root: &NodeRef) -> Option<PointerSample> {
    let el = root.cast::<HtmlElement>()?;
    let rect = el.get_bounding_client_rect();
    Some(PointerSample::new(
        e.pointer_id(),
        e.client_x() as f64 - rect.left(),
        e.client_y() as f64 - rect.top(),
        e.time_stamp(),
    ))
}

fn slide_image(track: &HtmlElement, index: usize) -> Option<HtmlElement> {
    track
        .children()
        .item(index as u32)?
        .first_element_child()?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Writes frame transforms straight to the DOM, skipping unchanged values.
#[derive(Default)]
struct Painter {
    track_css: String,
    zoom_index: Option<usize>,
    zoom_css: String,
}

impl Painter {
    fn paint(&mut self, track: &HtmlElement, frame: &FrameTransform) {
        let track_css = frame.track_css();
        if track_css != self.track_css {
            let _ = track.style().set_property("transform", &track_css);
            self.track_css = track_css;
        }
        if self.zoom_index != Some(frame.index) {
            if let Some(prev) = self.zoom_index.and_then(|i| slide_image(track, i)) {
                let _ = prev.style().remove_property("transform");
            }
            self.zoom_index = Some(frame.index);
            self.zoom_css.clear();
        }
        let zoom_css = frame.zoom.css();
        if zoom_css != self.zoom_css {
            if let Some(img) = slide_image(track, frame.index) {
                let _ = img.style().set_property("transform", &zoom_css);
            }
            self.zoom_css = zoom_css;
        }
    }
}

#[function_component]
pub fn ImageCarousel(props: &ImageCarouselProps) -> Html {
    let config = use_context::<AppContext>()
        .map(|ctx| ctx.config.carousel.clone())
        .unwrap_or_default();
    let len = props.images.len();
    let root_ref = use_node_ref();
    let track_ref = use_node_ref();
    let state = use_mut_ref(|| CarouselState::new(len, config));
    let pending_spring = use_mut_ref(|| None::<Timeout>);
    let active = use_state(|| 0_usize);

    let wiring = Wiring {
        state: state.clone(),
        pending_spring: pending_spring.clone(),
        active: active.clone(),
    };

    // Effect: keep the index valid when the image set changes size
    {
        let state = state.clone();
        let active = active.clone();
        use_effect_with(len, move |len| {
            let index = {
                let mut s = state.borrow_mut();
                s.set_len(*len);
                s.index()
            };
            if *active != index {
                active.set(index);
            }
            || ()
        });
    }

    // Sizing: observe the carousel element itself. Keyed on emptiness so the
    // observer attaches once the element is actually rendered.
    {
        let root_ref = root_ref.clone();
        let state = state.clone();
        use_effect_with(props.images.is_empty(), move |empty| {
            let mut observer = None;
            let mut on_resize = None;
            if let (false, Some(el)) = (*empty, root_ref.cast::<HtmlElement>()) {
                let rect = el.get_bounding_client_rect();
                state
                    .borrow_mut()
                    .set_container(Size::new(rect.width(), rect.height()));
                let cb = {
                    let state = state.clone();
                    Closure::wrap(Box::new(move |entries: js_sys::Array, _obs: ResizeObserver| {
                        let Some(entry) = entries
                            .iter()
                            .last()
                            .and_then(|e| e.dyn_into::<ResizeObserverEntry>().ok())
                        else {
                            return;
                        };
                        let rect = entry.content_rect();
                        state
                            .borrow_mut()
                            .set_container(Size::new(rect.width(), rect.height()));
                    }) as Box<dyn FnMut(js_sys::Array, ResizeObserver)>)
                };
                match ResizeObserver::new(cb.as_ref().unchecked_ref()) {
                    Ok(obs) => {
                        obs.observe(&el);
                        observer = Some(obs);
                    }
                    Err(_) => log::warn!("carousel: ResizeObserver unavailable"),
                }
                on_resize = Some(cb);
            }
            move || {
                if let Some(obs) = observer {
                    obs.disconnect();
                }
                drop(on_resize);
            }
        });
    }

    // Mount effect: motion preference, frame loop
    {
        let track_ref = track_ref.clone();
        let state = state.clone();
        let pending_spring = pending_spring.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            state
                .borrow_mut()
                .set_reduced_motion(prefers_reduced_motion());

            // RAF loop: input handlers only mutate state, this paints it
            let raf_id = Rc::new(RefCell::new(None::<i32>));
            let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                Rc::new(RefCell::new(None));
            {
                let raf_id_clone = raf_id.clone();
                let closure_cell_clone = closure_cell.clone();
                let track_ref = track_ref.clone();
                let state = state.clone();
                let mut painter = Painter::default();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
                    let frame = state.borrow_mut().frame(ts);
                    if let Some(track) = track_ref.cast::<HtmlElement>() {
                        painter.paint(&track, &frame);
                    }
                    let Some(win) = web_sys::window() else {
                        return;
                    };
                    if let Some(cb) = closure_cell_clone.borrow().as_ref() {
                        if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            *raf_id_clone.borrow_mut() = Some(id);
                        }
                    }
                })
                    as Box<dyn FnMut(f64)>));
            }
            if let (Some(win), Some(cb)) = (&window, closure_cell.borrow().as_ref()) {
                if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }

            // Cleanup
            move || {
                if let (Some(win), Some(id)) = (&window, *raf_id.borrow()) {
                    let _ = win.cancel_animation_frame(id);
                }
                // Breaks the closure's self-reference.
                closure_cell.borrow_mut().take();
                pending_spring.borrow_mut().take();
            }
        });
    }

    let onpointerdown = {
        let wiring = wiring.clone();
        let root_ref = root_ref.clone();
        Callback::from(move |e: PointerEvent| {
            if e.pointer_type() == "mouse" && e.button() != 0 {
                return;
            }
            let Some(sample) = sample_of(&e, &root_ref) else {
                return;
            };
            let response = wiring.state.borrow_mut().pointer_down(sample);
            if response.consumed {
                if let Some(el) = root_ref.cast::<HtmlElement>() {
                    let _ = el.set_pointer_capture(e.pointer_id());
                }
            }
            wiring.apply(response);
        })
    };
    let onpointermove = {
        let wiring = wiring.clone();
        let root_ref = root_ref.clone();
        Callback::from(move |e: PointerEvent| {
            let Some(sample) = sample_of(&e, &root_ref) else {
                return;
            };
            let response = wiring.state.borrow_mut().pointer_move(sample);
            if response.consumed {
                e.prevent_default();
            }
            wiring.apply(response);
        })
    };
    // Up and cancel end the gesture the same way.
    let onpointerup = {
        let wiring = wiring.clone();
        Callback::from(move |e: PointerEvent| {
            let response = wiring
                .state
                .borrow_mut()
                .pointer_up(e.pointer_id(), e.time_stamp());
            wiring.apply(response);
        })
    };
    let onpointercancel = onpointerup.clone();
    let onkeydown = {
        let wiring = wiring.clone();
        let root_ref = root_ref.clone();
        Callback::from(move |e: KeyboardEvent| {
            // Keys pressed on a dot or arrow belong to that button.
            let on_root = match (e.target_dyn_into::<HtmlElement>(), root_ref.cast::<HtmlElement>()) {
                (Some(target), Some(root)) => target == root,
                _ => false,
            };
            if !on_root {
                return;
            }
            let Some(key) = CarouselKey::from_key(&e.key()) else {
                return;
            };
            let response = wiring.state.borrow_mut().key(key, now_ms());
            if response.consumed {
                e.prevent_default();
            }
            wiring.apply(response);
        })
    };
    let on_select = {
        let wiring = wiring.clone();
        Callback::from(move |index: usize| {
            let response = wiring.state.borrow_mut().select(index, now_ms());
            wiring.apply(response);
        })
    };
    let onerror = Callback::from(|e: Event| {
        if let Some(img) = e.target_dyn_into::<HtmlImageElement>() {
            if img.src() != PLACEHOLDER_IMAGE {
                img.set_src(PLACEHOLDER_IMAGE);
            }
        }
    });

    if props.images.is_empty() {
        return html! {
            <div class="carousel carousel-empty" style="width:100%; height:100%; display:flex; align-items:center; justify-content:center; font-size:64px;">
                { props.fallback.clone() }
            </div>
        };
    }

    let current = *active;
    html! {
        <div
            ref={root_ref}
            class="carousel"
            tabindex="0"
            role="region"
            aria-roledescription="carousel"
            aria-label={props.alt.clone()}
            style="position:relative; overflow:hidden; width:100%; height:100%; touch-action:pan-y; user-select:none;"
            {onpointerdown}
            {onpointermove}
            {onpointerup}
            {onpointercancel}
            {onkeydown}
        >
            <div ref={track_ref} style="display:flex; width:100%; height:100%; will-change:transform;">
                { for props.images.iter().enumerate().map(|(i, url)| html! {
                    <div key={i} style="flex:0 0 100%; width:100%; height:100%; overflow:hidden;" aria-hidden={(i != current).to_string()}>
                        <img
                            src={url.to_owned()}
                            alt={format!("{} ({}/{})", props.alt, i + 1, len)}
                            draggable="false"
                            loading="lazy"
                            onerror={onerror.clone()}
                            style="width:100%; height:100%; object-fit:cover; transform-origin:50% 50%; pointer-events:none;"
                        />
                    </div>
                }) }
            </div>
            <CarouselControls index={current} len={len} on_select={on_select} />
        </div>
    }
}
