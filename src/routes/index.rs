use crate::{maud_conveniences::loading_placeholder, state::RosterState};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RosterState>) -> Markup {
    state.render(html! {
        div id="student_list" hx-get="/internal/students" hx-trigger="load" {
            (loading_placeholder())
        }
    })
}
