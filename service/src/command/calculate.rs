//! [`Command`] for calculating a new [`Prediction`].

use common::Money;
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{
        session::{self, Action, Screen},
        FeatureRecord, Prediction, Session,
    },
    infra::{
        model::{self, Predict},
        Model,
    },
    Service,
};

use super::Command;

/// [`Command`] for calculating a new [`Prediction`] out of the
/// [`FeatureRecord`] collected on the [`Screen::Form`], and switching the
/// [`Session`] to the [`Screen::Results`].
///
/// The [`Session`] is left untouched if the [`Model`] fails.
#[derive(Debug)]
pub struct Calculate<'s> {
    /// [`Session`] to switch.
    pub session: &'s mut Session,

    /// [`FeatureRecord`] to predict the price for.
    pub record: FeatureRecord,
}

impl<'s, M> Command<Calculate<'s>> for Service<M>
where
    M: Model<Predict, Ok = f64, Err = Traced<model::Error>>,
{
    type Ok = Prediction;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(
            district = %cmd.record.district_name,
            total_area = cmd.record.total_area,
        ),
    )]
    async fn execute(&self, cmd: Calculate<'s>) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Calculate { session, record } = cmd;

        session
            .expect(Screen::Form, Action::Calculate)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        if let Some(advisory) = record.advisory() {
            tracing::debug!("{advisory}");
        }

        let price = self
            .model()
            .execute(Predict(record.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let amount = Decimal::from_f64_retain(price)
            .ok_or(E::UnrepresentablePrice(price))
            .map_err(tracerr::wrap!())?
            .round_dp(2);

        let prediction = Prediction {
            price: Money {
                amount,
                currency: self.config().currency,
            },
            record,
        };
        tracing::info!(price = %prediction.price, "estimated");

        Ok(session.show(prediction).clone())
    }
}

/// Error of [`Calculate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Model`] failed to predict the price.
    #[display("`Model` failed to predict the price: {_0}")]
    #[from]
    Model(model::Error),

    /// [`Session`] is not on the [`Screen::Form`].
    #[display("{_0}")]
    #[from]
    Transition(session::TransitionError),

    /// Predicted price cannot be represented as [`Money`].
    #[display("predicted price `{_0}` is not representable")]
    UnrepresentablePrice(#[error(not(source))] f64),
}
