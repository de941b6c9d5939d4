use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::future::TimeoutFuture;
use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use super::submission::{SubmissionEvent, SubmissionState};
use super::validation::{validate, FieldError, FieldKind};
use crate::components::notification::{NoticeKind, NotificationCenter};
use crate::config::FormConfig;
use crate::dom;
use crate::error::MountError;

const FORM_ID: &str = "contact-form";
const FIELDS: &str = ".form__input, .form__textarea, [required]";
const FIELD_CONTAINER: &str = ".form__field";
const ERROR_CLASS: &str = "form__error";

enum FormField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

impl FormField {
    fn from_element(element: HtmlElement) -> Option<Self> {
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Some(FormField::Input(input)),
            Err(element) => match element.dyn_into::<HtmlTextAreaElement>() {
                Ok(area) => Some(FormField::TextArea(area)),
                Err(element) => element
                    .dyn_into::<HtmlSelectElement>()
                    .ok()
                    .map(FormField::Select),
            },
        }
    }

    fn element(&self) -> &HtmlElement {
        match self {
            FormField::Input(input) => input.as_ref(),
            FormField::TextArea(area) => area.as_ref(),
            FormField::Select(select) => select.as_ref(),
        }
    }

    fn check(&self) -> Result<(), FieldError> {
        match self {
            FormField::Input(input) => validate(
                FieldKind::from_input_type(&input.type_()),
                input.required(),
                &input.value(),
            ),
            FormField::TextArea(area) => validate(FieldKind::Other, area.required(), &area.value()),
            FormField::Select(select) => {
                validate(FieldKind::Other, select.required(), &select.value())
            }
        }
    }

    /// The `.form__field` wrapper that holds this field's error message.
    fn container(&self) -> Option<Element> {
        let element = self.element();
        element
            .closest(FIELD_CONTAINER)
            .ok()
            .flatten()
            .or_else(|| element.parent_element())
    }
}

pub struct ContactForm {
    inner: Rc<FormInner>,
    _listeners: Vec<EventListener>,
}

struct FormInner {
    document: Document,
    form: HtmlFormElement,
    submit: Option<HtmlButtonElement>,
    fields: Vec<FormField>,
    state: Cell<SubmissionState>,
    idle_label: RefCell<Option<String>>,
    config: FormConfig,
    notifications: Option<Rc<NotificationCenter>>,
}

impl ContactForm {
    pub fn mount(
        document: &Document,
        config: &FormConfig,
        notifications: Option<Rc<NotificationCenter>>,
    ) -> Result<Self, MountError> {
        let form = document
            .get_element_by_id(FORM_ID)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
            .ok_or_else(|| MountError::missing(format!("#{}", FORM_ID)))?;
        let fields: Vec<FormField> = dom::query_all_in(&form, FIELDS)
            .into_iter()
            .filter_map(FormField::from_element)
            .collect();
        let submit = dom::query(&form, "button[type=\"submit\"]")
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());

        let inner = Rc::new(FormInner {
            document: document.clone(),
            form,
            submit,
            fields,
            state: Cell::new(SubmissionState::Idle),
            idle_label: RefCell::new(None),
            config: config.clone(),
            notifications,
        });

        let mut listeners = Vec::new();
        {
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new_with_options(
                &inner.form,
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    if let Some(inner) = weak.upgrade() {
                        inner.submit();
                    }
                },
            ));
        }
        for (index, field) in inner.fields.iter().enumerate() {
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new(field.element(), "blur", move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.check_field(&inner.fields[index]);
                }
            }));
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new(field.element(), "input", move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.clear_error(&inner.fields[index]);
                }
            }));
        }

        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    pub fn state(&self) -> SubmissionState {
        self.inner.state.get()
    }

    /// Runs the same path as the form's submit event.
    pub fn submit(&self) {
        self.inner.submit();
    }
}

impl FormInner {
    fn transition(&self, event: SubmissionEvent) -> SubmissionState {
        let next = self.state.get().on(event);
        self.state.set(next);
        next
    }

    fn submit(self: &Rc<Self>) {
        if self.transition(SubmissionEvent::Submit) != SubmissionState::Validating {
            return;
        }
        // Every field is checked so all errors show at once.
        let valid = self
            .fields
            .iter()
            .fold(true, |valid, field| self.check_field(field) && valid);
        if self.transition(SubmissionEvent::Validated { valid }) != SubmissionState::Submitting {
            debug!("contact form has invalid fields");
            return;
        }

        if let Some(button) = &self.submit {
            *self.idle_label.borrow_mut() = Some(button.inner_html());
            button.set_inner_html(&self.config.sending_label);
            button.set_disabled(true);
        }

        let weak = Rc::downgrade(self);
        let (send_delay, reset_delay) = (self.config.send_delay_ms, self.config.reset_delay_ms);
        spawn_local(async move {
            TimeoutFuture::new(send_delay).await;
            match weak.upgrade() {
                Some(inner) => inner.sent(),
                None => return,
            }

            TimeoutFuture::new(reset_delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.reset();
            }
        });
    }

    fn sent(&self) {
        self.transition(SubmissionEvent::Sent);
        if let Some(button) = &self.submit {
            button.set_inner_html(&self.config.sent_label);
            dom::set_style(button, "background", "var(--success)");
        }
    }

    fn reset(&self) {
        self.form.reset();
        for field in &self.fields {
            self.clear_error(field);
        }
        if let Some(button) = &self.submit {
            if let Some(label) = self.idle_label.borrow_mut().take() {
                button.set_inner_html(&label);
            }
            dom::clear_style(button, "background");
        }
        let state = self.transition(SubmissionEvent::Reset);
        if let Some(button) = &self.submit {
            button.set_disabled(!state.control_enabled());
        }
        if let Some(notifications) = &self.notifications {
            notifications.show(self.config.thanks_message.clone(), NoticeKind::Success);
        }
    }

    fn check_field(&self, field: &FormField) -> bool {
        match field.check() {
            Ok(()) => {
                self.clear_error(field);
                true
            }
            Err(error) => {
                self.show_error(field, error.message(&self.config.messages));
                false
            }
        }
    }

    fn show_error(&self, field: &FormField, message: &str) {
        dom::set_style(field.element(), "border-color", "var(--error)");
        let Some(container) = field.container() else {
            return;
        };
        remove_errors(&container);

        let Ok(error) = self.document.create_element("span") else {
            return;
        };
        dom::add_class(&error, ERROR_CLASS);
        let _ = error.set_attribute(
            "style",
            "color: var(--error); font-size: 0.75rem; margin-top: 0.25rem; display: block;",
        );
        error.set_text_content(Some(message));
        let _ = container.append_child(&error);
    }

    fn clear_error(&self, field: &FormField) {
        dom::clear_style(field.element(), "border-color");
        if let Some(container) = field.container() {
            remove_errors(&container);
        }
    }
}

fn remove_errors(container: &Element) {
    for existing in dom::query_all_in(container, &format!(".{}", ERROR_CLASS)) {
        existing.remove();
    }
}
