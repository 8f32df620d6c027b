//! [`Query`] of the currently shown estimate.

use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{session::Screen, Prediction};
use crate::{
    domain::{
        estimate::{Summary, SummaryError},
        Session,
    },
    Service,
};

use super::Query;

/// Queries the [`Summary`] of the [`Prediction`] shown by a [`Session`].
///
/// Resolves to [`None`] unless the [`Session`] is on the
/// [`Screen::Results`].
#[derive(Clone, Copy, Debug)]
pub struct CurrentEstimate<'s>(pub &'s Session);

impl<'s, M> Query<CurrentEstimate<'s>> for Service<M> {
    type Ok = Option<Summary>;
    type Err = Traced<SummaryError>;

    async fn execute(
        &self,
        CurrentEstimate(session): CurrentEstimate<'s>,
    ) -> Result<Self::Ok, Self::Err> {
        session
            .results()
            .map(|p| p.summary(self.config().reference_year))
            .transpose()
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};
    use rust_decimal::Decimal;

    use super::CurrentEstimate;
    use crate::{
        domain::{Inputs, Prediction, Session},
        infra::LinearModel,
        query::Query as _,
        Config, Service,
    };

    #[tokio::test]
    async fn summarizes_shown_prediction_only() {
        let model = LinearModel::from_json(br#"{"intercept": 1}"#).unwrap();
        let service = Service::new(
            Config {
                reference_year: 2026,
                ..Config::default()
            },
            model,
        );
        let mut session = Session::new();

        assert_eq!(
            service.execute(CurrentEstimate(&session)).await.unwrap(),
            None,
        );

        let mut record = Inputs::default().collect().unwrap();
        record.total_area = 60.0;
        _ = session.show(Prediction {
            price: Money {
                amount: Decimal::from(9_000_000),
                currency: Currency::Rub,
            },
            record,
        });

        let summary = service
            .execute(CurrentEstimate(&session))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.price_per_area.amount, Decimal::from(150_000));
        assert_eq!(summary.building_age, 21);

        session.hide();
        assert_eq!(
            service.execute(CurrentEstimate(&session)).await.unwrap(),
            None,
        );
    }
}
