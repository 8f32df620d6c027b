//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    command,
    domain::{estimate::SummaryError, flat::MissingControl},
    infra::model::linear::LoadError,
};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Estimator [`Error`] shown to the user.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] with the provided `code`, `status_code` and
    /// `message`.
    #[must_use]
    pub fn new(
        code: Code,
        status_code: http::StatusCode,
        message: &impl ToString,
    ) -> Self {
        Self {
            code,
            status_code,
            message: message.to_string(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self::new(
            "INTERNAL_SERVER_ERROR",
            http::StatusCode::INTERNAL_SERVER_ERROR,
            msg,
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

define_error! {
    enum TransitionError {
        #[code = "INVALID_TRANSITION"]
        #[status = CONFLICT]
        #[message = "The action is not available on the current screen"]
        InvalidTransition,
    }
}

impl AsError for command::calculate::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Model(e) => Error::new(
                "PREDICTION_FAILED",
                http::StatusCode::UNPROCESSABLE_ENTITY,
                &format_args!("Prediction Error: {e}"),
            ),
            Self::Transition(e) => return e.try_as_error(),
            Self::UnrepresentablePrice(_) => return None,
        })
    }
}

impl AsError for command::start_new_calculation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(TransitionError::InvalidTransition.into())
    }
}

impl AsError for MissingControl {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new(
            "MISSING_CONTROL",
            http::StatusCode::BAD_REQUEST,
            &format_args!("Please fill in every field: {self}"),
        ))
    }
}

impl AsError for LoadError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new(
            "MODEL_UNAVAILABLE",
            http::StatusCode::SERVICE_UNAVAILABLE,
            self,
        ))
    }
}

impl AsError for SummaryError {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}
