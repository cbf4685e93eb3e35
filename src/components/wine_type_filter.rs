use crate::model::WineType;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct WineTypeFilterProps {
    pub selected: Option<WineType>,
    pub on_change: Callback<Option<WineType>>,
}

#[function_component(WineTypeFilter)]
pub fn wine_type_filter(props: &WineTypeFilterProps) -> Html {
    let option = |value: Option<WineType>, label: String| {
        let active = props.selected == value;
        let cb = props.on_change.clone();
        let style = if active {
            "padding:4px 10px; border:none; border-bottom:2px solid #7b1e3a; background:none; color:#7b1e3a; font-weight:600; cursor:pointer;"
        } else {
            "padding:4px 10px; border:none; border-bottom:2px solid transparent; background:none; color:#665; cursor:pointer;"
        };
        html! {
            <button aria-pressed={active.to_string()} {style} onclick={Callback::from(move |_| cb.emit(value))}>
                { label }
            </button>
        }
    };
    html! {
        <div role="group" aria-label="Soort wijn" style="display:flex; gap:4px; margin-top:8px;">
            { option(None, "Alles".to_owned()) }
            { for WineType::FILTERABLE.iter().map(|t| option(Some(*t), format!("{} {}", t.emoji(), t.label()))) }
        </div>
    }
}
