use super::wine_card::WineCard;
use crate::model::Wine;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct WineGridProps {
    pub wines: Vec<Wine>,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
}

const GRID: &str = "display:grid; grid-template-columns:repeat(auto-fill, minmax(240px, 1fr)); gap:16px;";

#[function_component(WineGrid)]
pub fn wine_grid(props: &WineGridProps) -> Html {
    if props.loading {
        return html! {
            <div style={GRID} aria-busy="true">
                { for (0..6).map(|i| html! {
                    <div key={i} style="height:420px; border-radius:12px; background:#efe9eb;"></div>
                }) }
            </div>
        };
    }
    if let Some(err) = &props.error {
        return html! { <p role="alert" style="color:#a33; text-align:center; padding:32px 0;">{ err.clone() }</p> };
    }
    if props.wines.is_empty() {
        return html! {
            <div style="text-align:center; padding:48px 0; color:#776;">
                <div style="font-size:48px;">{"🍷"}</div>
                <p>{"Geen wijnen gevonden voor deze selectie."}</p>
            </div>
        };
    }
    html! {
        <div style={GRID}>
            { for props.wines.iter().map(|w| html! { <WineCard key={w.id.clone()} wine={w.clone()} /> }) }
        </div>
    }
}
