//! [`Command`] for starting a new calculation.

use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Prediction;
use crate::{
    domain::{
        session::{Action, Screen, TransitionError},
        Session,
    },
    Service,
};

use super::Command;

/// [`Command`] for switching the [`Session`] back to the [`Screen::Form`].
///
/// The last [`Prediction`] is hidden, but kept until the next successful
/// calculation overwrites it.
#[derive(Debug)]
pub struct StartNewCalculation<'s> {
    /// [`Session`] to switch.
    pub session: &'s mut Session,
}

impl<'s, M> Command<StartNewCalculation<'s>> for Service<M> {
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all)]
    async fn execute(
        &self,
        cmd: StartNewCalculation<'s>,
    ) -> Result<Self::Ok, Self::Err> {
        let StartNewCalculation { session } = cmd;

        session
            .expect(Screen::Results, Action::StartNew)
            .map_err(tracerr::wrap!())?;
        session.hide();

        Ok(())
    }
}

/// Error of [`StartNewCalculation`] [`Command`] execution.
pub type ExecutionError = TransitionError;

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};
    use rust_decimal::Decimal;

    use super::StartNewCalculation;
    use crate::{
        command::Command as _,
        domain::{session::Screen, Inputs, Prediction, Session},
        infra::LinearModel,
        Config, Service,
    };

    fn service() -> Service<LinearModel> {
        let model =
            LinearModel::from_json(br#"{"intercept": 9000000}"#).unwrap();
        Service::new(Config::default(), model)
    }

    #[tokio::test]
    async fn returns_to_form() {
        let service = service();
        let mut session = Session::new();
        let prediction = Prediction {
            price: Money {
                amount: Decimal::from(9_000_000),
                currency: Currency::Rub,
            },
            record: Inputs::default().collect().unwrap(),
        };
        _ = session.show(prediction.clone());

        service
            .execute(StartNewCalculation {
                session: &mut session,
            })
            .await
            .unwrap();

        assert_eq!(session.screen(), Screen::Form);
        assert!(session.results().is_none());
        assert_eq!(session.last(), Some(&prediction));
    }

    #[tokio::test]
    async fn rejects_reset_on_form() {
        let service = service();
        let mut session = Session::new();

        let err = service
            .execute(StartNewCalculation {
                session: &mut session,
            })
            .await
            .unwrap_err();

        assert_eq!(err.as_ref().screen, Screen::Form);
        assert_eq!(session.screen(), Screen::Form);
    }
}
