use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SupermarketSelectorProps {
    pub supermarkets: Vec<String>,
    pub selected: Option<String>,
    pub on_change: Callback<Option<String>>,
    #[prop_or_default]
    pub loading: bool,
}

fn chip_style(active: bool) -> &'static str {
    if active {
        "padding:6px 12px; border-radius:16px; border:1px solid #7b1e3a; background:#7b1e3a; color:#fff; cursor:pointer;"
    } else {
        "padding:6px 12px; border-radius:16px; border:1px solid #d0c4c8; background:#fff; color:#3a2a30; cursor:pointer;"
    }
}

#[function_component(SupermarketSelector)]
pub fn supermarket_selector(props: &SupermarketSelectorProps) -> Html {
    if props.loading {
        return html! { <div style="height:34px; color:#998;">{"Supermarkten laden..."}</div> };
    }
    let all = {
        let cb = props.on_change.clone();
        Callback::from(move |_| cb.emit(None))
    };
    html! {
        <div role="group" aria-label="Supermarkt" style="display:flex; gap:8px; overflow-x:auto; padding-bottom:4px;">
            <button onclick={all} aria-pressed={props.selected.is_none().to_string()} style={chip_style(props.selected.is_none())}>{"Alle"}</button>
            { for props.supermarkets.iter().map(|name| {
                let active = props.selected.as_deref() == Some(name.as_str());
                let cb = props.on_change.clone();
                let value = name.clone();
                html! {
                    <button key={name.clone()} aria-pressed={active.to_string()} style={chip_style(active)}
                        onclick={Callback::from(move |_| cb.emit(Some(value.clone())))}>
                        { name.clone() }
                    </button>
                }
            }) }
        </div>
    }
}
