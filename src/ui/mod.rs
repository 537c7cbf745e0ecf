//! Browser front end.
//!
//! The page is rendered on the server and driven by htmx: the input form and
//! the header buttons post to `/widget/*` routes that return HTML fragments
//! produced by the same [`ChatWidget`](crate::widget::ChatWidget) the
//! terminal client uses.
//!
//! # Structure
//!
//! - [`page`]: HTML shell, header buttons and help modal
//! - [`fragments`]: handlers returning swap-ready fragments

pub mod fragments;
pub mod page;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

/// Page and widget routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fragments::index))
        .route("/widget/send", post(fragments::send))
        .route("/widget/new", post(fragments::new_chat))
        .route("/widget/font-size", post(fragments::font_size))
        .route("/widget/transcript", get(fragments::save_transcript))
        .route("/widget/help", get(fragments::help))
}
