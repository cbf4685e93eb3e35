use web_sys::PointerEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CarouselControlsProps {
    pub index: usize,
    pub len: usize,
    pub on_select: Callback<usize>,
}

fn dot_style(active: bool) -> &'static str {
    if active {
        "width:8px; height:8px; padding:0; border:none; border-radius:50%; background:#fff; cursor:pointer;"
    } else {
        "width:8px; height:8px; padding:0; border:none; border-radius:50%; background:rgba(255,255,255,0.5); cursor:pointer;"
    }
}

const ARROW: &str = "position:absolute; top:50%; transform:translateY(-50%); width:32px; height:32px; border:none; border-radius:50%; background:rgba(0,0,0,0.4); color:#fff; font-size:20px; line-height:32px; cursor:pointer;";

#[function_component(CarouselControls)]
pub fn carousel_controls(props: &CarouselControlsProps) -> Html {
    if props.len < 2 {
        return html! {};
    }
    // A press on a control must not start a swipe on the carousel.
    let stop = Callback::from(|e: PointerEvent| e.stop_propagation());
    let prev = {
        let cb = props.on_select.clone();
        let i = props.index;
        Callback::from(move |_| cb.emit(i.saturating_sub(1)))
    };
    let next = {
        let cb = props.on_select.clone();
        let i = props.index;
        Callback::from(move |_| cb.emit(i + 1))
    };
    let has_prev = props.index > 0;
    let has_next = props.index + 1 < props.len;
    html! {<>
        if has_prev {
            <button aria-label="Vorige afbeelding" onpointerdown={stop.clone()} onclick={prev} style={format!("{ARROW} left:8px;")}> {"‹"} </button>
        }
        if has_next {
            <button aria-label="Volgende afbeelding" onpointerdown={stop.clone()} onclick={next} style={format!("{ARROW} right:8px;")}> {"›"} </button>
        }
        <div style="position:absolute; left:0; right:0; bottom:8px; display:flex; justify-content:center; gap:6px;">
            { for (0..props.len).map(|i| {
                let cb = props.on_select.clone();
                html! {
                    <button
                        key={i}
                        aria-label={format!("Afbeelding {}", i + 1)}
                        aria-current={(i == props.index).to_string()}
                        onpointerdown={stop.clone()}
                        onclick={Callback::from(move |_| cb.emit(i))}
                        style={dot_style(i == props.index)}
                    />
                }
            }) }
        </div>
    </>}
}
