//! Application serves the interactive screens of the flat price estimator.

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod args;
pub mod config;
pub mod error;
pub mod form;
pub mod page;

use std::sync::Arc;

use axum::{
    extract::Form,
    response::{Html, IntoResponse as _, Redirect, Response},
    Extension,
};
use service::{
    command::{self, Command as _},
    domain::{session::Screen, Inputs, Session},
    query::{self, Query as _},
};
use tokio::sync::Mutex;
// Used in binary.
use axum_client_ip as _;
use tower_http as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    error::{AsError, Error},
    form::{Fields, Submit},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::LinearModel>;

/// Estimator state shared by all the HTTP handlers.
#[derive(Clone, Debug)]
pub enum Estimator {
    /// Price model is loaded and estimates can be produced.
    Ready {
        /// [`Service`] instance.
        service: Arc<Service>,

        /// The only [`Session`] of this process.
        ///
        /// Locked for the whole interaction, so interactions never
        /// interleave.
        session: Arc<Mutex<Session>>,
    },

    /// Price model failed to load, so every screen is replaced with the
    /// blocking [`Error`].
    Unavailable(Error),
}

impl Estimator {
    /// Creates a new [`Estimator::Ready`] with a fresh [`Session`].
    #[must_use]
    pub fn new(service: Service) -> Self {
        Self::Ready {
            service: Arc::new(service),
            session: Arc::new(Mutex::new(Session::new())),
        }
    }
}

/// Shows the current [`Screen`].
pub async fn index(Extension(estimator): Extension<Estimator>) -> Response {
    let (service, session) = match &estimator {
        Estimator::Ready { service, session } => (service, session),
        Estimator::Unavailable(e) => return blocked(e),
    };
    let session = session.lock().await;

    match service.execute(query::CurrentEstimate(&session)).await {
        Ok(Some(summary)) => Html(page::results(&summary)).into_response(),
        Ok(None) => {
            Html(page::form(&Inputs::default(), None, service.config()))
                .into_response()
        }
        Err(e) => {
            let e = e.into_error();
            tracing::error!("failed to summarize the estimate: {e}");
            (e.status_code, Html(page::broken_results(&e))).into_response()
        }
    }
}

/// Handles a submission of the form [`Screen`].
///
/// [`Submit::Refresh`] re-renders the form with the submitted [`Fields`],
/// while [`Submit::Calculate`] switches to the results [`Screen`] on success
/// and keeps the submitted [`Fields`] along with an inline [`Error`]
/// otherwise.
pub async fn submit(
    Extension(estimator): Extension<Estimator>,
    Form(fields): Form<Fields>,
) -> Response {
    let (service, session) = match &estimator {
        Estimator::Ready { service, session } => (service, session),
        Estimator::Unavailable(e) => return blocked(e),
    };
    let mut session = session.lock().await;

    if session.screen() == Screen::Results {
        // Stale form left open in another tab.
        return Redirect::to("/").into_response();
    }

    let action = fields.action;
    let inputs = Inputs::from(fields).normalized();
    if action == Submit::Refresh {
        return Html(page::form(&inputs, None, service.config()))
            .into_response();
    }

    let res = match inputs.collect() {
        Ok(record) => service
            .execute(command::Calculate {
                session: &mut session,
                record,
            })
            .await
            .map(drop)
            .map_err(AsError::into_error),
        Err(e) => Err(e.into_error()),
    };
    match res {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => {
            tracing::warn!("calculation failed: {e}");
            failed(&inputs, &e, service.config())
        }
    }
}

/// Starts a new calculation from the results [`Screen`].
pub async fn reset(Extension(estimator): Extension<Estimator>) -> Response {
    let (service, session) = match &estimator {
        Estimator::Ready { service, session } => (service, session),
        Estimator::Unavailable(e) => return blocked(e),
    };
    let mut session = session.lock().await;

    match service
        .execute(command::StartNewCalculation {
            session: &mut session,
        })
        .await
    {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => {
            let e = e.into_error();
            tracing::warn!("failed to start a new calculation: {e}");
            failed(&Inputs::default(), &e, service.config())
        }
    }
}

/// Returns the [`tracing::Level`] an HTTP response with the provided
/// `status` is logged at.
///
/// Client errors are recoverable on the form [`Screen`], so only server
/// errors are logged as errors.
#[must_use]
pub fn response_level(status: http::StatusCode) -> tracing::Level {
    if status.is_server_error() {
        tracing::Level::ERROR
    } else if status.is_client_error() {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    }
}

/// Renders the form [`Screen`] with the provided inline [`Error`].
fn failed(
    inputs: &Inputs,
    error: &Error,
    config: &service::Config,
) -> Response {
    (error.status_code, Html(page::form(inputs, Some(error), config)))
        .into_response()
}

/// Renders the blocking [`Error`] instead of any [`Screen`].
fn blocked(error: &Error) -> Response {
    (error.status_code, Html(page::unavailable(error))).into_response()
}
