pub mod app;
pub mod carousel_controls;
pub mod image_carousel;
pub mod supermarket_selector;
pub mod wine_card;
pub mod wine_grid;
pub mod wine_type_filter;
