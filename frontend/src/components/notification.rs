use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use stylist::Style;
use web_sys::Document;
use yew::prelude::*;
use yew::AppHandle;

use crate::config::NotificationConfig;
use crate::error::MountError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPhase {
    Shown,
    Leaving,
}

/// The single banner slot. A new notice replaces whatever is on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Banner {
    current: Option<(Notice, BannerPhase)>,
}

pub enum BannerAction {
    Show(Notice),
    Dismiss(u64),
    Remove(u64),
}

impl Banner {
    pub fn current(&self) -> Option<&(Notice, BannerPhase)> {
        self.current.as_ref()
    }

    /// Key for the dismiss timers: changes whenever the notice or its phase does.
    pub fn phase(&self) -> Option<(u64, BannerPhase)> {
        self.current.as_ref().map(|(notice, phase)| (notice.id, *phase))
    }
}

impl Reducible for Banner {
    type Action = BannerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let current_id = self.current.as_ref().map(|(notice, _)| notice.id);
        match action {
            BannerAction::Show(notice) => Rc::new(Banner {
                current: Some((notice, BannerPhase::Shown)),
            }),
            // Timers of a replaced notice may still fire; ignore them.
            BannerAction::Dismiss(id) if current_id == Some(id) => Rc::new(Banner {
                current: self
                    .current
                    .clone()
                    .map(|(notice, _)| (notice, BannerPhase::Leaving)),
            }),
            BannerAction::Remove(id) if current_id == Some(id) => Rc::new(Banner::default()),
            _ => self,
        }
    }
}

#[derive(Default)]
struct SlotState {
    listener: Option<Callback<Notice>>,
    pending: Option<Notice>,
}

/// Hand-off point between page modules and the mounted banner component.
/// Notices sent before the component connects are held (latest only).
#[derive(Clone, Default)]
pub struct NoticeSlot(Rc<RefCell<SlotState>>);

impl PartialEq for NoticeSlot {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl NoticeSlot {
    fn connect(&self, listener: Callback<Notice>) {
        let pending = {
            let mut state = self.0.borrow_mut();
            state.listener = Some(listener.clone());
            state.pending.take()
        };
        if let Some(notice) = pending {
            listener.emit(notice);
        }
    }

    fn disconnect(&self) {
        self.0.borrow_mut().listener = None;
    }

    fn deliver(&self, notice: Notice) {
        let listener = self.0.borrow().listener.clone();
        match listener {
            Some(listener) => listener.emit(notice),
            None => self.0.borrow_mut().pending = Some(notice),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationHostProps {
    pub slot: NoticeSlot,
    pub visible_ms: u32,
    pub exit_ms: u32,
}

const BANNER_CSS: &str = r#"
    position: fixed;
    top: 100px;
    left: 20px;
    padding: 1rem 1.5rem;
    color: white;
    border-radius: 0.5rem;
    box-shadow: 0 10px 40px rgba(0, 0, 0, 0.2);
    z-index: 9999;
    font-family: 'Vazirmatn', 'Tahoma', sans-serif;
    direction: rtl;
    animation: notice-slide-in 0.3s ease;
    transition: transform 0.3s ease, opacity 0.3s ease;

    &.success {
        background: var(--success);
    }
    &.error {
        background: var(--error);
    }
    &.leaving {
        transform: translateX(-100%);
        opacity: 0;
    }
"#;

#[function_component(NotificationHost)]
pub fn notification_host(props: &NotificationHostProps) -> Html {
    let banner = use_reducer(Banner::default);
    let style = use_memo(|_| Style::new(BANNER_CSS).ok(), ());

    {
        let dispatcher = banner.dispatcher();
        use_effect_with_deps(
            move |slot: &NoticeSlot| {
                slot.connect(Callback::from(move |notice| {
                    dispatcher.dispatch(BannerAction::Show(notice))
                }));
                let slot = slot.clone();
                move || slot.disconnect()
            },
            props.slot.clone(),
        );
    }

    // Re-armed whenever the notice or its phase changes; cleanup drops the old timer.
    {
        let dispatcher = banner.dispatcher();
        let (visible_ms, exit_ms) = (props.visible_ms, props.exit_ms);
        use_effect_with_deps(
            move |phase: &Option<(u64, BannerPhase)>| {
                let timer = phase.map(|(id, phase)| match phase {
                    BannerPhase::Shown => Timeout::new(visible_ms, move || {
                        dispatcher.dispatch(BannerAction::Dismiss(id))
                    }),
                    BannerPhase::Leaving => Timeout::new(exit_ms, move || {
                        dispatcher.dispatch(BannerAction::Remove(id))
                    }),
                });
                move || drop(timer)
            },
            banner.phase(),
        );
    }

    let Some((notice, phase)) = banner.current().cloned() else {
        return html! {};
    };
    let (kind_class, icon) = match notice.kind {
        NoticeKind::Success => ("success", "fas fa-check-circle"),
        NoticeKind::Error => ("error", "fas fa-exclamation-circle"),
    };
    let class = classes!(
        "notification",
        (*style).as_ref().map(|style| style.get_class_name().to_string()),
        kind_class,
        (phase == BannerPhase::Leaving).then(|| "leaving"),
    );

    html! {
        <>
            <style>
                {r#"
                    @keyframes notice-slide-in {
                        from { transform: translateX(-100%); opacity: 0; }
                        to { transform: translateX(0); opacity: 1; }
                    }
                "#}
            </style>
            <div key={notice.id.to_string()} class={class} role="status">
                <i class={icon}></i>
                {" "}
                {notice.message}
            </div>
        </>
    }
}

/// Owns the mounted banner component and numbers the notices sent to it.
pub struct NotificationCenter {
    slot: NoticeSlot,
    next_id: Cell<u64>,
    _app: AppHandle<NotificationHost>,
}

impl NotificationCenter {
    pub fn mount(document: &Document, config: &NotificationConfig) -> Result<Self, MountError> {
        let body = document.body().ok_or_else(|| MountError::missing("body"))?;
        let host = document.create_element("div")?;
        host.set_id("notification-host");
        body.append_child(&host)?;

        let slot = NoticeSlot::default();
        let app = yew::Renderer::<NotificationHost>::with_root_and_props(
            host,
            NotificationHostProps {
                slot: slot.clone(),
                visible_ms: config.visible_ms,
                exit_ms: config.exit_ms,
            },
        )
        .render();

        Ok(Self {
            slot,
            next_id: Cell::new(0),
            _app: app,
        })
    }

    pub fn show(&self, message: impl Into<String>, kind: NoticeKind) {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.slot.deliver(Notice {
            id,
            message: message.into(),
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(id: u64) -> Notice {
        Notice {
            id,
            message: format!("notice {}", id),
            kind: NoticeKind::Success,
        }
    }

    fn apply(banner: Rc<Banner>, action: BannerAction) -> Rc<Banner> {
        banner.reduce(action)
    }

    #[test]
    fn notice_goes_shown_leaving_removed() {
        let banner = apply(Rc::new(Banner::default()), BannerAction::Show(notice(1)));
        assert_eq!(banner.phase(), Some((1, BannerPhase::Shown)));
        let banner = apply(banner, BannerAction::Dismiss(1));
        assert_eq!(banner.phase(), Some((1, BannerPhase::Leaving)));
        let banner = apply(banner, BannerAction::Remove(1));
        assert_eq!(banner.phase(), None);
    }

    #[test]
    fn new_notice_replaces_and_ignores_stale_timers() {
        let banner = apply(Rc::new(Banner::default()), BannerAction::Show(notice(1)));
        let banner = apply(banner, BannerAction::Show(notice(2)));
        let banner = apply(banner, BannerAction::Dismiss(1));
        let banner = apply(banner, BannerAction::Remove(1));
        assert_eq!(banner.phase(), Some((2, BannerPhase::Shown)));
        assert_eq!(banner.current().map(|(n, _)| n.message.as_str()), Some("notice 2"));
    }

    #[test]
    fn slot_holds_latest_notice_until_connected() {
        let slot = NoticeSlot::default();
        slot.deliver(notice(1));
        slot.deliver(notice(2));

        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        slot.connect(Callback::from(move |n: Notice| sink.borrow_mut().push(n.id)));
        slot.deliver(notice(3));
        assert_eq!(*received.borrow(), vec![2, 3]);

        slot.disconnect();
        slot.deliver(notice(4));
        assert_eq!(*received.borrow(), vec![2, 3]);
    }
}
