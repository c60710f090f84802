#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    routes::{
        index::get_index_route,
        sse::sse_feed,
        student_create::{get_create_page, internal_get_create_form, post_new_student},
        student_detail::{get_student_page, internal_get_student_in_detail},
        student_edit::{get_edit_page, internal_get_edit_form, post_edit_student},
        student_list::{delete_student, internal_get_students},
    },
    session::session_layer,
    state::RosterState,
};
use axum::{Router, routing::get};
use tokio::{net::TcpListener, signal};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod data;
mod error;
mod lookup;
mod maud_conveniences;
mod notify;
mod query;
mod routes;
mod sequencer;
mod session;
mod source;
mod state;
#[cfg(test)]
mod test_support;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

pub fn router(state: RosterState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/students/{id}", get(get_student_page).delete(delete_student))
        .route("/students/{id}/edit", get(get_edit_page).post(post_edit_student))
        .route("/create", get(get_create_page).post(post_new_student))
        .route("/internal/students", get(internal_get_students))
        .route("/internal/students/{id}", get(internal_get_student_in_detail))
        .route("/internal/students/{id}/edit", get(internal_get_edit_form))
        .route("/internal/create", get(internal_get_create_form))
        .route("/sse_feed", get(sse_feed))
        .layer(session_layer())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");
    if let Err(e) = dotenv {
        warn!(?e, "No .env file loaded, using the process environment");
    }

    let config = RuntimeConfiguration::new().expect("unable to create config");
    let state = RosterState::new(config).expect("unable to create state");

    let server_ip = state.config().server_ip().to_string();
    let app = router(state);

    let listener = TcpListener::bind(&server_ip)
        .await
        .expect("unable to listen on server ip");

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("unable to serve app");
}
