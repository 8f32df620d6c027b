//! [`Session`] of the estimator: the screen being shown and the last
//! [`Prediction`].

use derive_more::{Display, Error};

use super::Prediction;

/// Screen of the estimator.
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum Screen {
    /// Input form of the flat attributes.
    #[default]
    Form,

    /// Results of the last estimation.
    Results,
}

/// Interactive estimator session.
///
/// Starts on the [`Screen::Form`] and only reaches the [`Screen::Results`]
/// with a stored [`Prediction`].
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// Currently shown [`Screen`].
    screen: Screen,

    /// Last successful [`Prediction`].
    ///
    /// Survives going back to the [`Screen::Form`], until overwritten by the
    /// next successful [`Prediction`].
    last: Option<Prediction>,
}

impl Session {
    /// Creates a new [`Session`] on the [`Screen::Form`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently shown [`Screen`].
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns the [`Prediction`] to show, which is only there on the
    /// [`Screen::Results`].
    #[must_use]
    pub fn results(&self) -> Option<&Prediction> {
        match self.screen {
            Screen::Form => None,
            Screen::Results => self.last.as_ref(),
        }
    }

    /// Returns the last successful [`Prediction`], even if hidden.
    #[must_use]
    pub fn last(&self) -> Option<&Prediction> {
        self.last.as_ref()
    }

    /// Ensures this [`Session`] is on the `expected` [`Screen`] before
    /// performing `action`.
    ///
    /// # Errors
    ///
    /// Errors if the current [`Screen`] differs from the `expected` one.
    pub fn expect(
        &self,
        expected: Screen,
        action: Action,
    ) -> Result<(), TransitionError> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(TransitionError {
                screen: self.screen,
                action,
            })
        }
    }

    /// Stores the provided [`Prediction`] and shows it.
    pub(crate) fn show(&mut self, prediction: Prediction) -> &Prediction {
        self.screen = Screen::Results;
        self.last.insert(prediction)
    }

    /// Goes back to the [`Screen::Form`], hiding the last [`Prediction`].
    pub(crate) fn hide(&mut self) {
        self.screen = Screen::Form;
    }
}

/// User action switching the [`Screen`] of a [`Session`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Action {
    /// Calculating a new estimate out of the form.
    #[display("calculate")]
    Calculate,

    /// Starting a new calculation from the results.
    #[display("start a new calculation")]
    StartNew,
}

/// Error of an [`Action`] not allowed on the current [`Screen`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display("cannot {action} on the {screen} screen")]
pub struct TransitionError {
    /// [`Screen`] the [`Action`] was attempted on.
    pub screen: Screen,

    /// Attempted [`Action`].
    pub action: Action,
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};
    use rust_decimal::Decimal;

    use super::{Action, Screen, Session, TransitionError};
    use crate::domain::{flat::Inputs, Prediction};

    fn prediction(price: i64) -> Prediction {
        Prediction {
            price: Money {
                amount: Decimal::from(price),
                currency: Currency::Rub,
            },
            record: Inputs::default().collect().unwrap(),
        }
    }

    #[test]
    fn starts_on_form() {
        let session = Session::new();

        assert_eq!(session.screen(), Screen::Form);
        assert!(session.results().is_none());
        assert!(session.last().is_none());
    }

    #[test]
    fn hides_but_keeps_last_prediction() {
        let mut session = Session::new();
        _ = session.show(prediction(1));
        assert_eq!(session.screen(), Screen::Results);
        assert_eq!(session.results(), Some(&prediction(1)));

        session.hide();
        assert_eq!(session.screen(), Screen::Form);
        assert!(session.results().is_none());
        assert_eq!(session.last(), Some(&prediction(1)));

        _ = session.show(prediction(2));
        assert_eq!(session.results(), Some(&prediction(2)));
    }

    #[test]
    fn rejects_unexpected_screen() {
        let session = Session::new();

        assert!(session.expect(Screen::Form, Action::Calculate).is_ok());
        assert_eq!(
            session.expect(Screen::Results, Action::StartNew),
            Err(TransitionError {
                screen: Screen::Form,
                action: Action::StartNew,
            }),
        );
        assert_eq!(
            TransitionError {
                screen: Screen::Form,
                action: Action::StartNew,
            }
            .to_string(),
            "cannot start a new calculation on the Form screen",
        );
    }
}
