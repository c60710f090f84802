use crate::{
    config::RuntimeConfiguration,
    error::RosterResult,
    maud_conveniences::render_nav,
    notify::Notifier,
    sequencer::ListSequencer,
    source::RecordSource,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::ops::Deref;

/// Swap error responses too, so the generic error message replaces the loading placeholder.
const HTMX_CONFIG: &str = r#"{"responseHandling":[{"code":"204","swap":false},{"code":"[23]..","swap":true},{"code":"[45]..","swap":true,"error":true}]}"#;

const DELETE_FAILED_LISTENER: &str = r#"document.body.addEventListener("studentDeleteFailed", () => alert("삭제에 실패했습니다."));"#;

#[derive(Clone, Debug)]
pub struct RosterState {
    source: RecordSource,
    config: RuntimeConfiguration,
    notifier: Notifier,
    sequencer: ListSequencer,
}

impl RosterState {
    pub fn new(config: RuntimeConfiguration) -> RosterResult<Self> {
        let source = RecordSource::new(config.source_config())?;
        let notifier = Notifier::new(config.toast_duration());

        Ok(Self {
            source,
            config,
            notifier,
            sequencer: ListSequencer::default(),
        })
    }

    #[allow(clippy::unused_self)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="ko" {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    meta name="htmx-config" content=(HTMX_CONFIG) {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "학생 정보 관리" }
                }
                body hx-ext="sse" sse-connect="/sse_feed" class="bg-gray-900 min-h-screen text-white" {
                    div class="max-w-4xl mx-auto p-6" {
                        (render_nav())
                        (markup)
                    }
                    div id="toast" sse-swap="toast" class="fixed left-1/2 bottom-6 -translate-x-1/2" {}
                    script { (PreEscaped(DELETE_FAILED_LISTENER)) }
                }
            }
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn sequencer(&self) -> &ListSequencer {
        &self.sequencer
    }

    pub fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }
}

impl Deref for RosterState {
    type Target = RecordSource;

    fn deref(&self) -> &Self::Target {
        &self.source
    }
}
