//! 청년이음 policy chat widget
//!
//! A chat widget for a youth-policy advice bot, plus the small server that
//! answers it. The widget sends one question at a time to a backend, renders
//! user and bot bubbles, shows a loading placeholder while waiting, and can
//! reset the chat, cycle font sizes, export a transcript and show help.
//!
//! # Architecture
//!
//! - **Widget**: headless controller rendering through a view seam
//! - **Backend**: three endpoint/payload variants behind one async trait
//! - **Server**: Axum routes for the chat API and an htmx-driven chat page
//! - **Terminal**: the same controller driven from stdin
//!
//! # Modules
//!
//! - [`widget`]: chat widget controller, bubbles, transcript, font size, help
//! - [`backend`]: backend contract, HTTP and in-process clients
//! - [`answer`]: prompt assembly and answer generation
//! - [`session`]: guest session storage
//! - [`api`]: JSON and multipart chat routes
//! - [`ui`]: server-rendered page and htmx fragments

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod answer;
pub mod api;
pub mod backend;
pub mod config;
pub mod server;
pub mod session;
pub mod terminal;
pub mod ui;
pub mod widget;

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::answer::{AnswerService, PlaceholderRag, Responder};
use crate::backend::{BackendError, ChatBackend, HttpBackend, LocalBackend};
use crate::config::AppConfig;
use crate::session::{GUEST_COOKIE, Guest, GuestStore};
use crate::widget::FragmentView;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Global configuration.
    pub config: Arc<AppConfig>,
    /// Guest sessions.
    pub guests: GuestStore,
    /// Answers the chat routes.
    pub answers: Arc<AnswerService>,
    /// Remote backend for the page's widget; `None` answers in-process.
    /// Guests each get a [`fork`](HttpBackend::fork) of it.
    pub remote: Option<Arc<HttpBackend>>,
}

impl AppState {
    /// State answering with the placeholder responder.
    pub fn new(config: AppConfig) -> Result<Self, BackendError> {
        Self::with_responder(config, Arc::new(PlaceholderRag))
    }

    pub fn with_responder(
        config: AppConfig,
        responder: Arc<dyn Responder>,
    ) -> Result<Self, BackendError> {
        let remote = config
            .widget
            .backend_url
            .as_deref()
            .map(|url| HttpBackend::new(url, config.widget.variant).map(Arc::new))
            .transpose()?;
        let answers = Arc::new(AnswerService::new(
            responder,
            config.session.history_limit,
        ));

        Ok(Self {
            config: Arc::new(config),
            guests: GuestStore::new(),
            answers,
            remote,
        })
    }

    /// Backend the page's widget uses on behalf of `guest`.
    pub fn widget_backend(&self, guest: &Guest) -> Result<Arc<dyn ChatBackend>, BackendError> {
        match &self.remote {
            Some(remote) => {
                let backend = guest.remote_backend_or_try_init(|| remote.fork())?;
                Ok(backend as Arc<dyn ChatBackend>)
            }
            None => Ok(Arc::new(LocalBackend::new(
                self.config.widget.variant,
                Arc::clone(&self.answers),
                guest.clone(),
            ))),
        }
    }

    /// Empty fragment view using the configured avatar.
    pub fn fragment_view(&self) -> FragmentView {
        FragmentView::new(self.config.widget.avatar_path.clone())
    }

    /// Resolve the guest behind `jar`, adding the cookie for new guests.
    pub fn guest_session(&self, jar: CookieJar) -> (Guest, CookieJar) {
        let known = jar.get(GUEST_COOKIE).map(|c| c.value().to_string());
        let guest = self.guests.resolve(known.as_deref());
        if known.as_deref() == Some(guest.id()) {
            return (guest, jar);
        }
        let cookie = Cookie::build((GUEST_COOKIE, guest.id().to_string()))
            .path("/")
            .http_only(true)
            .build();
        (guest, jar.add(cookie))
    }
}
