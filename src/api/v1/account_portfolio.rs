// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::NaiveDate;

use num_decimal::Num;

use serde::Deserialize;
use serde::Serialize;
use serde_urlencoded::to_string as to_query;

use crate::api::v1::account;
use crate::Str;


/// The resolution of the data points in a portfolio history.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Timeframe {
  /// One data point per minute.
  #[serde(rename = "1Min")]
  OneMinute,
  /// One data point every five minutes.
  #[serde(rename = "5Min")]
  FiveMinutes,
  /// One data point every fifteen minutes.
  #[serde(rename = "15Min")]
  FifteenMinutes,
  /// One data point per hour.
  #[serde(rename = "1H")]
  OneHour,
  /// One data point per day.
  #[serde(rename = "1D")]
  OneDay,
}


/// The historical development of an account's equity.
///
/// The members representing time series all have the same length, with
/// entries at the same index belonging together.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct PortfolioHistory {
  /// The time stamps of the data points, as UNIX epoch seconds. Each
  /// one marks the beginning of the respective interval.
  #[serde(rename = "timestamp")]
  pub timestamps: Vec<i64>,
  /// The equity at each data point.
  #[serde(rename = "equity")]
  pub equity: Vec<Num>,
  /// The profit/loss in dollars at each data point, relative to the
  /// base value.
  #[serde(rename = "profit_loss")]
  pub profit_loss: Vec<Num>,
  /// The profit/loss as a factor of the base value at each data
  /// point. Entries may be absent if the base value is zero.
  #[serde(rename = "profit_loss_pct")]
  pub profit_loss_percent: Vec<Option<Num>>,
  /// The equity at the beginning of the covered period.
  #[serde(rename = "base_value")]
  pub base_value: Num,
  /// The resolution of the data points.
  #[serde(rename = "timeframe")]
  pub timeframe: Timeframe,
}


/// A GET request to be made to the
/// /v1/trading/accounts/{account-id}/account/portfolio/history
/// endpoint.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct HistoryReq {
  /// The duration of the data to report, in `<number><unit>` format
  /// with a unit of `D` (day), `W` (week), `M` (month), or `A`
  /// (year). Defaults to one month.
  #[serde(rename = "period", skip_serializing_if = "Option::is_none")]
  pub period: Option<String>,
  /// The resolution of the data points to report.
  #[serde(rename = "timeframe", skip_serializing_if = "Option::is_none")]
  pub timeframe: Option<Timeframe>,
  /// The last day the history should cover. Defaults to the current
  /// day or, outside of market hours, the previous trading day.
  #[serde(rename = "date_end", skip_serializing_if = "Option::is_none")]
  pub date_end: Option<NaiveDate>,
  /// Whether to include data from extended trading hours. Only
  /// meaningful for intraday timeframes.
  #[serde(rename = "extended_hours", skip_serializing_if = "Option::is_none")]
  pub extended_hours: Option<bool>,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/trading/accounts/{account-id}/account/portfolio/history
  /// endpoint.
  pub Get((account::Id, HistoryReq)),
  Ok => PortfolioHistory, [
    /// The portfolio history was retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
    /// One of the provided filters was invalid.
    /* 422 */ UNPROCESSABLE_ENTITY => InvalidInput,
  ]

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v1/trading/accounts/{}/account/portfolio/history",
      input.0.as_simple()
    )
    .into()
  }

  fn query(input: &Self::Input) -> Result<Option<Str>, Self::ConversionError> {
    Ok(Some(to_query(&input.1)?.into()))
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use http_endpoint::Endpoint;

  use serde_json::from_str as from_json;

  use test_log::test;

  use uuid::Uuid;


  /// Check that we can parse the reference portfolio history object.
  #[test]
  fn parse_reference_history() {
    let response = r#"{
  "timestamp": [1580826600000, 1580827500000, 1580828400000],
  "equity": [27423.73, 27408.19, 27515.97],
  "profit_loss": [11.8, -3.74, 104.04],
  "profit_loss_pct": [0.000430469507254688, -0.0001364369455197062, 0.0037954277571845543],
  "base_value": 27411.93,
  "timeframe": "15Min"
}"#;

    let history = from_json::<PortfolioHistory>(response).unwrap();
    assert_eq!(history.timestamps.len(), 3);
    assert_eq!(history.equity.len(), 3);
    assert_eq!(history.profit_loss.len(), 3);
    assert_eq!(history.timeframe, Timeframe::FifteenMinutes);
    assert!(history.profit_loss_percent[1].as_ref().unwrap().is_negative());
  }

  /// Check that null profit/loss percentages are handled.
  #[test]
  fn parse_history_with_null_percentages() {
    let response = r#"{
  "timestamp": [1580826600000],
  "equity": [0],
  "profit_loss": [0],
  "profit_loss_pct": [null],
  "base_value": 0,
  "timeframe": "1D"
}"#;

    let history = from_json::<PortfolioHistory>(response).unwrap();
    assert_eq!(history.profit_loss_percent, vec![None]);
    assert_eq!(history.base_value, Num::from(0));
  }

  /// Check that only set filters end up in the query string.
  #[test]
  fn serialize_query() {
    let account_id = account::Id(Uuid::new_v4());
    let request = HistoryReq {
      period: Some("1W".to_string()),
      timeframe: Some(Timeframe::OneDay),
      ..Default::default()
    };

    let query = Get::query(&(account_id, request)).unwrap().unwrap();
    assert_eq!(query, "period=1W&timeframe=1D");
  }
}
