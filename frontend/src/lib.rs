//! Behaviour layer of the MedEquip Pro landing page, compiled to WebAssembly.

pub mod config;
pub mod dom;
pub mod error;
pub mod page;
pub mod timing;
pub mod visibility;

pub mod components {
    pub mod cursor;
    pub mod notification;
}
pub mod effects {
    pub mod hero_stats;
    pub mod magnetic;
    pub mod navigation;
    pub mod parallax;
    pub mod preloader;
    pub mod product_filter;
    pub mod scroll_animations;
    pub mod scroll_effects;
}
pub mod testimonials {
    pub mod carousel;
    pub mod slider;
    pub mod slot;
    mod desktop;
    mod mobile;
}
pub mod contact {
    pub mod form;
    pub mod submission;
    pub mod validation;
}

pub use page::{start, LandingPage};
