//! Audio cues and sharing

use std::collections::HashMap;

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, HtmlAudioElement, Window};

use crate::platform::{Audio, Cue, Share, ShareOutcome, SharePayload};

const CUES: [Cue; 6] = [
    Cue::Click,
    Cue::Magic,
    Cue::Firework,
    Cue::Notification,
    Cue::Background,
    Cue::SnowAmbient,
];

/// Awaits a promise in the background and logs a rejection instead of
/// surfacing it.
fn settle(value: JsValue, what: &'static str) {
    let Ok(promise) = value.dyn_into::<Promise>() else {
        return;
    };
    spawn_local(async move {
        if let Err(err) = JsFuture::from(promise).await {
            log::debug!("{what} rejected: {err:?}");
        }
    });
}

pub struct WebAudio {
    sources: HashMap<Cue, HtmlAudioElement>,
    volume: f64,
}

impl WebAudio {
    pub fn bind(document: &Document, volume: f64) -> Self {
        let sources: HashMap<_, _> = CUES
            .into_iter()
            .filter_map(|cue| {
                document
                    .get_element_by_id(cue.element_id())
                    .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
                    .map(|el| (cue, el))
            })
            .collect();
        for el in sources.values() {
            el.set_volume(volume);
        }
        log::debug!("bound {} audio cues", sources.len());
        Self { sources, volume }
    }
}

impl Audio for WebAudio {
    fn play(&mut self, cue: Cue) {
        let Some(el) = self.sources.get(&cue) else {
            return;
        };
        el.set_current_time(0.0);
        el.set_volume(self.volume);
        match el.play() {
            Ok(promise) => settle(promise.into(), "audio playback"),
            Err(err) => log::debug!("{cue:?} playback refused: {err:?}"),
        }
    }

    fn set_looping(&mut self, cue: Cue, playing: bool) {
        let Some(el) = self.sources.get(&cue) else {
            return;
        };
        el.set_loop(true);
        if playing {
            match el.play() {
                Ok(promise) => settle(promise.into(), "audio loop"),
                Err(err) => log::debug!("{cue:?} loop refused: {err:?}"),
            }
        } else if let Err(err) = el.pause() {
            log::debug!("{cue:?} pause failed: {err:?}");
        }
    }
}

/// Native share sheet when the browser has one, clipboard otherwise.
pub struct WebShare {
    window: Window,
}

impl WebShare {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn method(target: &JsValue, name: &str) -> Option<Function> {
        Reflect::get(target, &name.into())
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
    }

    fn share_native(&self, navigator: &JsValue, payload: &SharePayload) -> bool {
        let Some(share) = Self::method(navigator, "share") else {
            return false;
        };
        let url = self.window.location().href().unwrap_or_default();
        let data = Object::new();
        for (key, value) in [
            ("title", payload.title.as_str()),
            ("text", payload.text.as_str()),
            ("url", url.as_str()),
        ] {
            let _ = Reflect::set(&data, &key.into(), &value.into());
        }
        match share.call1(navigator, &data) {
            Ok(promise) => {
                settle(promise, "native share");
                true
            }
            Err(err) => {
                log::debug!("native share refused: {err:?}");
                false
            }
        }
    }

    fn copy(&self, navigator: &JsValue, text: &str) -> bool {
        let Some(clipboard) = Reflect::get(navigator, &"clipboard".into())
            .ok()
            .filter(|c| c.is_object())
        else {
            return false;
        };
        let Some(write_text) = Self::method(&clipboard, "writeText") else {
            return false;
        };
        match write_text.call1(&clipboard, &text.into()) {
            Ok(promise) => {
                settle(promise, "clipboard write");
                true
            }
            Err(err) => {
                log::warn!("clipboard write refused: {err:?}");
                false
            }
        }
    }
}

impl Share for WebShare {
    fn share(&mut self, payload: &SharePayload) -> ShareOutcome {
        let navigator: JsValue = self.window.navigator().into();
        if self.share_native(&navigator, payload) {
            ShareOutcome::Native
        } else if self.copy(&navigator, &payload.text) {
            ShareOutcome::Copied
        } else {
            ShareOutcome::Unavailable
        }
    }
}
