//! Page element handle table

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::error::SetupError;
use crate::platform::{Display, Target};

const NAME_INPUT: &str = "#userName";
const MESSAGE_SLOTS: &str = ".message";
const NOTIFICATION_ID: &str = "notification";

const BINDINGS: [(Target, &str); 16] = [
    (Target::EntryScreen, "#inputSection"),
    (Target::GreetingScreen, "#greetingSection"),
    (Target::NameText, "#nameDisplay .name-text"),
    (Target::GreetingTitle, "#greetingTitle"),
    (Target::Subtitle, "#typingText"),
    (Target::MessageIndex, ".current-message"),
    (Target::MessageTotal, ".total-messages"),
    (Target::SlideCountdown, "#countdown"),
    (Target::ProgressBar, "#progressBar"),
    (Target::Days, "#days"),
    (Target::Hours, "#hours"),
    (Target::Minutes, "#minutes"),
    (Target::Seconds, "#seconds"),
    (Target::SnowLabel, "#snowLabel"),
    (Target::MusicLabel, "#musicLabel"),
    (Target::Notification, "#notification"),
];

fn select(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Elements resolved once at startup. Targets missing from the page stay
/// unbound and every call on them does nothing.
pub struct DomDisplay {
    nodes: HashMap<Target, HtmlElement>,
    input: HtmlInputElement,
}

impl DomDisplay {
    pub fn bind(document: &Document) -> Result<Self, SetupError> {
        let input = document
            .query_selector(NAME_INPUT)?
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .ok_or(SetupError::MissingElement(NAME_INPUT))?;

        let mut nodes = HashMap::new();
        nodes.insert(Target::NameInput, input.clone().unchecked_into::<HtmlElement>());
        if let Some(body) = document.body() {
            nodes.insert(Target::Body, body);
        }

        for (target, selector) in BINDINGS {
            if let Some(el) = select(document, selector) {
                nodes.insert(target, el);
            }
        }

        if !nodes.contains_key(&Target::Notification) {
            if let Some(el) = Self::create_notification(document) {
                nodes.insert(Target::Notification, el);
            }
        }

        let slots = document.query_selector_all(MESSAGE_SLOTS)?;
        for i in 0..slots.length() {
            if let Some(el) = slots.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                nodes.insert(Target::Message(i as usize), el);
            }
        }

        log::debug!("bound {} page elements", nodes.len());
        Ok(Self { nodes, input })
    }

    fn create_notification(document: &Document) -> Option<HtmlElement> {
        let el = document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        el.set_id(NOTIFICATION_ID);
        el.set_class_name("custom-notification");
        document.body()?.append_child(&el).ok()?;
        Some(el)
    }
}

impl Display for DomDisplay {
    fn exists(&self, target: Target) -> bool {
        self.nodes.contains_key(&target)
    }

    fn set_text(&mut self, target: Target, text: &str) {
        if let Some(el) = self.nodes.get(&target) {
            el.set_text_content(Some(text));
        }
    }

    fn text(&self, target: Target) -> Option<String> {
        self.nodes.get(&target).and_then(|el| el.text_content())
    }

    fn set_class(&mut self, target: Target, class: &str, enabled: bool) {
        if let Some(el) = self.nodes.get(&target) {
            if let Err(err) = el.class_list().toggle_with_force(class, enabled) {
                log::debug!("class {class} on {target:?} rejected: {err:?}");
            }
        }
    }

    fn set_style(&mut self, target: Target, property: &str, value: &str) {
        if let Some(el) = self.nodes.get(&target) {
            if let Err(err) = el.style().set_property(property, value) {
                log::debug!("style {property} on {target:?} rejected: {err:?}");
            }
        }
    }

    fn input_value(&self) -> Option<String> {
        Some(self.input.value())
    }

    fn set_input_value(&mut self, value: &str) {
        self.input.set_value(value);
    }

    fn focus(&mut self, target: Target) {
        if let Some(el) = self.nodes.get(&target) {
            if let Err(err) = el.focus() {
                log::debug!("focus on {target:?} rejected: {err:?}");
            }
        }
    }
}
