//! Behaviour tests for the forecasting pipeline: scaling, windowing,
//! autoregressive rollout and post-processing composed over one history.

use stockcast_forecast::{forecast_history, Annotations, ForecastError, TIME_STEP};
use stockcast_tests::{flat_history, history_from_closes, ConstantModel, DriftModel};
use time::macros::date;

fn annotations() -> Annotations {
    Annotations {
        narrative: String::from("narrative"),
        accuracy_label: String::from("87.5%"),
    }
}

#[test]
fn when_history_is_flat_forecast_repeats_the_flat_close() {
    // Given: 60 business days closing at 50.0, ending Friday 2024-03-01
    let history = flat_history("AAPL", date!(2024 - 03 - 01), 50.0);

    // When: a model that always answers 0.5 forecasts one week
    let summary =
        forecast_history(&ConstantModel(0.5), &history, 5, annotations()).expect("forecast");

    // Then: every price maps back to the flat close on the next five weekdays
    let prices: Vec<f64> = summary.forecast.iter().map(|p| p.predicted_close).collect();
    assert_eq!(prices, vec![50.0; 5]);
    let dates: Vec<_> = summary.forecast.iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![
            date!(2024 - 03 - 04),
            date!(2024 - 03 - 05),
            date!(2024 - 03 - 06),
            date!(2024 - 03 - 07),
            date!(2024 - 03 - 08),
        ]
    );
    assert_eq!(summary.growth_percentage, "0.00%");
    assert_eq!(summary.historical_high, 50.0);
    assert_eq!(summary.historical_low, 50.0);
    assert_eq!(summary.ticker.as_str(), "AAPL");
}

#[test]
fn when_final_price_rises_ten_percent_growth_is_reported_with_two_decimals() {
    // Given: closes spanning 100..200 with the last close at 100
    let mut closes = vec![100.0; TIME_STEP];
    closes[0] = 200.0;
    let history = history_from_closes("MSFT", date!(2024 - 06 - 14), &closes);

    // When: the model predicts a scaled 0.1, i.e. 110 in price units
    let summary =
        forecast_history(&ConstantModel(0.1), &history, 5, annotations()).expect("forecast");

    // Then
    assert_eq!(summary.growth_percentage, "10.00%");
}

#[test]
fn when_forecasting_each_step_builds_on_the_previous_prediction() {
    // Given: a rising history and a model that drifts up from the newest close
    let closes: Vec<f64> = (0..TIME_STEP).map(|i| 100.0 + i as f64).collect();
    let history = history_from_closes("NVDA", date!(2024 - 06 - 14), &closes);

    // When
    let summary = forecast_history(&DriftModel { step: 0.01 }, &history, 21, annotations())
        .expect("forecast");

    // Then: predictions climb because each one is fed back into the window
    assert_eq!(summary.forecast.len(), 21);
    assert!(summary
        .forecast
        .windows(2)
        .all(|pair| pair[1].predicted_close > pair[0].predicted_close));
}

#[test]
fn when_forecast_is_repeated_results_are_identical() {
    // Given
    let closes: Vec<f64> = (0..90).map(|i| 120.0 + (i as f64 * 0.7).sin() * 5.0).collect();
    let history = history_from_closes("TSLA", date!(2024 - 06 - 14), &closes);
    let model = DriftModel { step: -0.002 };

    // When
    let first = forecast_history(&model, &history, 21, annotations()).expect("forecast");
    let second = forecast_history(&model, &history, 21, annotations()).expect("forecast");

    // Then
    assert_eq!(first, second);
}

#[test]
fn when_history_is_shorter_than_the_window_forecast_is_refused() {
    // Given: one row short of a full window
    let closes = vec![10.0; TIME_STEP - 1];
    let history = history_from_closes("AAPL", date!(2024 - 06 - 14), &closes);

    // When
    let err = forecast_history(&ConstantModel(0.5), &history, 5, annotations())
        .expect_err("short history must fail");

    // Then
    assert!(matches!(
        err,
        ForecastError::InsufficientHistory {
            required: TIME_STEP,
            actual,
        } if actual == TIME_STEP - 1
    ));
}

#[test]
fn when_horizon_is_a_year_dates_skip_every_weekend() {
    // Given
    let history = flat_history("AAPL", date!(2024 - 03 - 01), 50.0);

    // When
    let summary =
        forecast_history(&ConstantModel(0.5), &history, 252, annotations()).expect("forecast");

    // Then
    assert_eq!(summary.forecast.len(), 252);
    assert!(summary.forecast.iter().all(|p| !matches!(
        p.date.weekday(),
        time::Weekday::Saturday | time::Weekday::Sunday
    )));
    assert!(summary.forecast.windows(2).all(|pair| pair[0].date < pair[1].date));
    assert!(summary.forecast[0].date > date!(2024 - 03 - 01));
}
