use crate::{notify::Toast, session::ToastClient, state::RosterState};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use maud::{Markup, html};
use std::convert::Infallible;
use tokio_stream::{Stream, StreamExt, wrappers::WatchStream};

pub fn render_toast(toast: Option<&Toast>) -> Markup {
    html! {
        @if let Some(toast) = toast {
            div class="bg-gray-700 text-white px-4 py-2 rounded-md shadow-lg opacity-90" {
                (toast.message.as_ref())
            }
        }
    }
}

/// Every change to this browser's toast slot, starting with whatever is showing right now.
pub async fn sse_feed(
    State(state): State<RosterState>,
    ToastClient(client): ToastClient,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.notifier().subscribe(client)).map(|toast| {
        Ok::<_, Infallible>(
            Event::default()
                .event("toast")
                .data(render_toast(toast.as_ref()).into_string()),
        )
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
