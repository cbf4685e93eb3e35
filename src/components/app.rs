use super::{supermarket_selector::SupermarketSelector, wine_grid::WineGrid, wine_type_filter::WineTypeFilter};
use crate::config::AppConfig;
use crate::model::{CatalogAction, CatalogState, WineType, parse_catalog};
use std::rc::Rc;
use yew::prelude::*;

const CATALOG_SNAPSHOT: &str = include_str!("../../static/wines.json");

// Read-only settings for components below the root (carousel tuning etc.)
#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub config: Rc<AppConfig>,
}

#[derive(Properties, PartialEq, Clone, Default)]
pub struct AppProps {
    #[prop_or_default]
    pub config: Rc<AppConfig>,
}

fn results_label(n: usize) -> String {
    format!("{n} {} gevonden", if n == 1 { "wijn" } else { "wijnen" })
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let catalog = use_reducer(CatalogState::loading);

    // Load the bundled snapshot once
    {
        let catalog = catalog.clone();
        use_effect_with((), move |_| {
            match parse_catalog(CATALOG_SNAPSHOT) {
                Ok(wines) => {
                    log::info!("catalog: {} wines loaded", wines.len());
                    catalog.dispatch(CatalogAction::Loaded(wines));
                }
                Err(err) => {
                    log::error!("{err}");
                    catalog.dispatch(CatalogAction::Failed(
                        "De wijnen konden niet worden geladen.".into(),
                    ));
                }
            }
            || ()
        });
    }

    let on_supermarket = {
        let catalog = catalog.clone();
        Callback::from(move |s: Option<String>| catalog.dispatch(CatalogAction::SelectSupermarket(s)))
    };
    let on_type = {
        let catalog = catalog.clone();
        Callback::from(move |t: Option<WineType>| catalog.dispatch(CatalogAction::SelectType(t)))
    };

    let context = AppContext {
        config: props.config.clone(),
    };
    let visible = catalog.visible();
    html! {
        <ContextProvider<AppContext> {context}>
            <div style="max-width:1200px; margin:0 auto; padding:16px; font-family:system-ui, sans-serif; color:#2a1d22;">
                <header style="display:flex; align-items:center; gap:8px;">
                    <span style="font-size:28px;">{"🍷"}</span>
                    <h1 style="margin:0; font-size:24px; color:#7b1e3a;">{"Vinly"}</h1>
                </header>
                <p style="margin:4px 0 16px; color:#776;">{"Wijntips van influencers, per supermarkt."}</p>
                <section style="margin-bottom:16px;">
                    <SupermarketSelector
                        supermarkets={catalog.supermarkets()}
                        selected={catalog.filter.supermarket.clone()}
                        on_change={on_supermarket}
                        loading={catalog.loading}
                    />
                    <WineTypeFilter selected={catalog.filter.wine_type} on_change={on_type} />
                </section>
                if !catalog.loading && catalog.error.is_none() {
                    <p style="font-size:14px; color:#776;">{ results_label(visible.len()) }</p>
                }
                <WineGrid wines={visible} loading={catalog.loading} error={catalog.error.clone()} />
            </div>
        </ContextProvider<AppContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_label_is_singular_for_one() {
        assert_eq!(results_label(1), "1 wijn gevonden");
        assert_eq!(results_label(0), "0 wijnen gevonden");
        assert_eq!(results_label(7), "7 wijnen gevonden");
    }

    #[test]
    fn bundled_snapshot_parses() {
        let wines = parse_catalog(CATALOG_SNAPSHOT).unwrap();
        assert!(!wines.is_empty());
        assert!(wines.iter().any(|w| w.image_set().len() > 1));
    }
}
