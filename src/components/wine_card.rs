use super::image_carousel::ImageCarousel;
use crate::model::Wine;
use crate::util::format_date;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct WineCardProps {
    pub wine: Wine,
}

#[function_component(WineCard)]
pub fn wine_card(props: &WineCardProps) -> Html {
    let w = &props.wine;
    let stock = match w.in_stock {
        Some(true) => html! { <span style="position:absolute; top:8px; right:8px; z-index:1; padding:2px 8px; border-radius:8px; background:#2e7d32; color:#fff; font-size:12px;">{"Op voorraad"}</span> },
        Some(false) => html! { <span style="position:absolute; top:8px; right:8px; z-index:1; padding:2px 8px; border-radius:8px; background:#9e9e9e; color:#fff; font-size:12px;">{"Uitverkocht"}</span> },
        None => html! {},
    };
    let price = w.price.map(|p| format!("€ {:.2}", p).replace('.', ","));
    html! {
        <article style="background:#fff; border-radius:12px; overflow:hidden; box-shadow:0 1px 4px rgba(0,0,0,0.1); display:flex; flex-direction:column;">
            <div style="position:relative; height:280px; background:#f6f1f2;">
                { stock }
                <ImageCarousel images={w.image_set()} alt={w.name.clone()} fallback={w.wine_type.emoji()} />
            </div>
            <div style="padding:12px; display:flex; flex-direction:column; gap:6px;">
                <div style="display:flex; justify-content:space-between; font-size:12px; color:#776;">
                    <span style="font-weight:600; color:#7b1e3a;">{ w.supermarket.clone() }</span>
                    <span>{ format!("{} {}", w.wine_type.emoji(), w.wine_type.label()) }</span>
                </div>
                <h3 style="margin:0; font-size:16px;">{ w.name.clone() }</h3>
                <div style="display:flex; gap:8px; align-items:baseline;">
                    if let Some(price) = price {
                        <span style="font-weight:600;">{ price }</span>
                    }
                    if let Some(rating) = &w.rating {
                        <span style="color:#b8860b;">{ format!("★ {rating}") }</span>
                    }
                </div>
                if let Some(desc) = &w.description {
                    <p style="margin:0; font-size:14px; color:#443;">{ desc.clone() }</p>
                }
                <div style="display:flex; justify-content:space-between; font-size:12px; color:#998;">
                    if let Some(source) = &w.influencer_source {
                        <span>{ format!("@{source}") }</span>
                    }
                    if let Some(date) = &w.date_found {
                        <span>{ format_date(date) }</span>
                    }
                </div>
                if let Some(url) = &w.post_url {
                    <a href={url.clone()} target="_blank" rel="noopener noreferrer" style="font-size:13px; color:#7b1e3a;">{"Bekijk post"}</a>
                }
            </div>
        </article>
    }
}
