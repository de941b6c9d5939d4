use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::{Document, HtmlElement};

use crate::config::FilterConfig;
use crate::dom;
use crate::error::MountError;

const FILTERS: &str = ".products__filter[data-filter]";
const CARDS: &str = ".product__card";
const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    All,
    Named(String),
}

impl Category {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            ALL => Category::All,
            name => Category::Named(name.to_string()),
        }
    }

    pub fn matches(&self, card_category: Option<&str>) -> bool {
        match self {
            Category::All => true,
            Category::Named(name) => card_category.map(str::trim) == Some(name.as_str()),
        }
    }
}

/// Which cards end up visible for `filter`, in card order.
pub fn visibility_plan(filter: &Category, cards: &[Option<String>]) -> Vec<bool> {
    cards
        .iter()
        .map(|category| filter.matches(category.as_deref()))
        .collect()
}

pub struct ProductFilter {
    inner: Rc<FilterInner>,
    _listeners: Vec<EventListener>,
}

struct FilterInner {
    filters: Vec<HtmlElement>,
    cards: Vec<HtmlElement>,
    /// One slot per card; replacing a slot cancels that card's previous transition.
    pending: RefCell<Vec<Option<Timeout>>>,
    current: RefCell<Category>,
    config: FilterConfig,
}

impl ProductFilter {
    pub fn mount(document: &Document, config: &FilterConfig) -> Result<Self, MountError> {
        let filters = dom::query_all(document, FILTERS);
        if filters.is_empty() {
            return Err(MountError::missing(FILTERS));
        }
        let cards = dom::query_all(document, CARDS);
        let pending = cards.iter().map(|_| None).collect();

        let inner = Rc::new(FilterInner {
            filters,
            cards,
            pending: RefCell::new(pending),
            current: RefCell::new(Category::All),
            config: config.clone(),
        });

        let listeners = inner
            .filters
            .iter()
            .enumerate()
            .map(|(index, filter)| {
                let weak = Rc::downgrade(&inner);
                EventListener::new(filter, "click", move |_| {
                    if let Some(inner) = weak.upgrade() {
                        inner.select(index);
                    }
                })
            })
            .collect();

        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    pub fn current(&self) -> Category {
        self.inner.current.borrow().clone()
    }

    /// Applies `category` as if its filter button had been clicked.
    pub fn apply(&self, category: Category) {
        self.inner.apply(category);
    }
}

impl FilterInner {
    fn select(&self, index: usize) {
        let Some(filter) = self.filters.get(index) else {
            return;
        };
        for other in &self.filters {
            dom::remove_class(other, "active");
        }
        dom::add_class(filter, "active");
        let raw = dom::data_attr(filter, "filter").unwrap_or_else(|| ALL.to_string());
        self.apply(Category::parse(&raw));
    }

    fn apply(&self, category: Category) {
        debug!("filtering products by {:?}", category);
        let categories: Vec<Option<String>> = self
            .cards
            .iter()
            .map(|card| dom::data_attr(card, "category"))
            .collect();
        let plan = visibility_plan(&category, &categories);

        let mut pending = self.pending.borrow_mut();
        for ((card, visible), slot) in self.cards.iter().zip(plan).zip(pending.iter_mut()) {
            let card = card.clone();
            let timer = if visible {
                dom::clear_style(&card, "display");
                Timeout::new(self.config.show_delay_ms, move || {
                    dom::set_style(&card, "opacity", "1");
                    dom::set_style(&card, "transform", "translateY(0)");
                })
            } else {
                dom::set_style(&card, "opacity", "0");
                dom::set_style(&card, "transform", "translateY(20px)");
                Timeout::new(self.config.hide_delay_ms, move || {
                    dom::set_style(&card, "display", "none");
                })
            };
            // Dropping the old handle cancels the previous filter's transition.
            *slot = Some(timer);
        }
        *self.current.borrow_mut() = category;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<Option<String>> {
        ["monitoring", "surgical", "monitoring", "imaging", "laboratory"]
            .iter()
            .map(|c| Some(c.to_string()))
            .collect()
    }

    #[test]
    fn all_shows_every_card() {
        assert_eq!(visibility_plan(&Category::parse("all"), &cards()), vec![true; 5]);
    }

    #[test]
    fn named_category_keeps_only_matching_cards() {
        let plan = visibility_plan(&Category::parse("monitoring"), &cards());
        assert_eq!(plan, vec![true, false, true, false, false]);
        assert_eq!(plan.iter().filter(|v| **v).count(), 2);
    }

    #[test]
    fn plan_does_not_depend_on_previous_filter() {
        let direct = visibility_plan(&Category::parse("monitoring"), &cards());
        let _ = visibility_plan(&Category::parse("imaging"), &cards());
        let after = visibility_plan(&Category::parse("monitoring"), &cards());
        assert_eq!(direct, after);
    }

    #[test]
    fn uncategorised_cards_only_show_under_all() {
        let cards = vec![None, Some("imaging".to_string())];
        assert_eq!(visibility_plan(&Category::parse("imaging"), &cards), vec![false, true]);
        assert_eq!(visibility_plan(&Category::All, &cards), vec![true, true]);
    }
}
