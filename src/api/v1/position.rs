// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use http::Method;

use num_decimal::Num;

use serde::Deserialize;
use serde::Serialize;
use serde_urlencoded::to_string as to_query;

use thiserror::Error;

use uuid::Uuid;

use crate::api::v1::account;
use crate::api::v1::order::Order;
use crate::Str;


/// The side of a position.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum Side {
  /// A long position, profiting from price increases.
  #[serde(rename = "long")]
  Long,
  /// A short position, profiting from price decreases.
  #[serde(rename = "short")]
  Short,
}


/// A position held in a trading account.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct Position {
  /// The ID of the asset the position is in.
  #[serde(rename = "asset_id")]
  pub asset_id: Uuid,
  /// The symbol of the asset.
  #[serde(rename = "symbol")]
  pub symbol: String,
  /// The exchange the asset trades on.
  #[serde(rename = "exchange")]
  pub exchange: String,
  /// The class of the asset.
  #[serde(rename = "asset_class")]
  pub asset_class: String,
  /// The average price at which the position was entered.
  #[serde(rename = "avg_entry_price")]
  pub average_entry_price: Num,
  /// The number of shares held.
  #[serde(rename = "qty")]
  pub quantity: Num,
  /// The number of shares available, i.e., not locked up by open
  /// orders.
  #[serde(rename = "qty_available", default)]
  pub quantity_available: Option<Num>,
  /// The side the position is on.
  #[serde(rename = "side")]
  pub side: Side,
  /// The current market value of the position.
  #[serde(rename = "market_value", default)]
  pub market_value: Option<Num>,
  /// The total cost basis of the position.
  #[serde(rename = "cost_basis")]
  pub cost_basis: Num,
  /// The unrealized profit/loss in dollars.
  #[serde(rename = "unrealized_pl", default)]
  pub unrealized_gain_total: Option<Num>,
  /// The unrealized profit/loss as a factor of the cost basis.
  #[serde(rename = "unrealized_plpc", default)]
  pub unrealized_gain_total_percent: Option<Num>,
  /// The unrealized profit/loss in dollars for the day.
  #[serde(rename = "unrealized_intraday_pl", default)]
  pub unrealized_gain_today: Option<Num>,
  /// The unrealized profit/loss for the day as a factor of the
  /// previous day's close.
  #[serde(rename = "unrealized_intraday_plpc", default)]
  pub unrealized_gain_today_percent: Option<Num>,
  /// The asset's current price.
  #[serde(rename = "current_price", default)]
  pub current_price: Option<Num>,
  /// The asset's price as of the previous trading day's close.
  #[serde(rename = "lastday_price", default)]
  pub last_day_price: Option<Num>,
  /// The percent change of the asset's price since the previous
  /// trading day's close.
  #[serde(rename = "change_today", default)]
  pub change_today: Option<Num>,
}


/// An error encountered while constructing a [`CloseReq`].
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum InitError {
  /// Both an absolute quantity and a percentage were provided.
  #[error("only one of quantity and percentage may be provided")]
  ConflictingQuantities,
  /// Neither an absolute quantity nor a percentage was provided.
  #[error("one of quantity and percentage has to be provided")]
  MissingQuantity,
}


/// Parameters controlling how much of a position to liquidate.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CloseReq {
  /// The number of shares to liquidate.
  #[serde(rename = "qty", skip_serializing_if = "Option::is_none")]
  pub quantity: Option<Num>,
  /// The percentage of the position to liquidate, between 0 and 100.
  #[serde(rename = "percentage", skip_serializing_if = "Option::is_none")]
  pub percentage: Option<Num>,
}


/// A helper for initializing [`CloseReq`] objects.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CloseReqInit {
  /// See `CloseReq::quantity`.
  pub quantity: Option<Num>,
  /// See `CloseReq::percentage`.
  pub percentage: Option<Num>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl CloseReqInit {
  /// Create a [`CloseReq`] from a `CloseReqInit`.
  ///
  /// Exactly one of the quantity and percentage members has to be
  /// provided.
  pub fn init(self) -> Result<CloseReq, InitError> {
    match (&self.quantity, &self.percentage) {
      (Some(..), Some(..)) => return Err(InitError::ConflictingQuantities),
      (None, None) => return Err(InitError::MissingQuantity),
      _ => (),
    }

    Ok(CloseReq {
      quantity: self.quantity,
      percentage: self.percentage,
    })
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/trading/accounts/{account-id}/positions/{symbol} endpoint.
  pub Get((account::Id, String)),
  Ok => Position, [
    /// The position was retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, [
    /// No account was found with the given ID or no position exists
    /// for the given symbol.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v1/trading/accounts/{}/positions/{}",
      input.0.as_simple(),
      input.1
    )
    .into()
  }
}


Endpoint! {
  /// The representation of a DELETE request to the
  /// /v1/trading/accounts/{account-id}/positions/{symbol} endpoint.
  pub Delete((account::Id, String, CloseReq)),
  Ok => Order, [
    /// The liquidation order was placed successfully.
    /* 200 */ OK,
  ],
  Err => DeleteError, [
    /// No account was found with the given ID or no position exists
    /// for the given symbol.
    /* 404 */ NOT_FOUND => NotFound,
    /// The liquidation parameters were invalid.
    /* 422 */ UNPROCESSABLE_ENTITY => InvalidInput,
  ]

  #[inline]
  fn method() -> Method {
    Method::DELETE
  }

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v1/trading/accounts/{}/positions/{}",
      input.0.as_simple(),
      input.1
    )
    .into()
  }

  fn query(input: &Self::Input) -> Result<Option<Str>, Self::ConversionError> {
    Ok(Some(to_query(&input.2)?.into()))
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use http_endpoint::Endpoint;

  use serde_json::from_str as from_json;

  use test_log::test;


  /// Check that we can parse the reference position object.
  #[test]
  fn parse_reference_position() {
    let response = r#"{
  "asset_id": "904837e3-3b76-47ec-b432-046db621571b",
  "symbol": "AAPL",
  "exchange": "NASDAQ",
  "asset_class": "us_equity",
  "avg_entry_price": "100.0",
  "qty": "5",
  "qty_available": "4",
  "side": "long",
  "market_value": "600.0",
  "cost_basis": "500.0",
  "unrealized_pl": "100.0",
  "unrealized_plpc": "0.20",
  "unrealized_intraday_pl": "10.0",
  "unrealized_intraday_plpc": "0.0084",
  "current_price": "120.0",
  "lastday_price": "119.0",
  "change_today": "0.0084"
}"#;

    let position = from_json::<Position>(response).unwrap();
    assert_eq!(position.symbol, "AAPL");
    assert_eq!(position.side, Side::Long);
    assert_eq!(position.quantity, Num::from(5));
    assert_eq!(position.quantity_available, Some(Num::from(4)));
    assert_eq!(position.cost_basis, Num::from(500));
    assert_eq!(position.unrealized_gain_total, Some(Num::from(100)));
  }

  /// Check that exactly one of quantity and percentage has to be
  /// provided.
  #[test]
  fn reject_invalid_close_quantities() {
    let result = CloseReqInit {
      quantity: Some(Num::from(5)),
      percentage: Some(Num::from(50)),
      ..Default::default()
    }
    .init();
    assert_eq!(result.unwrap_err(), InitError::ConflictingQuantities);

    let result = CloseReqInit::default().init();
    assert_eq!(result.unwrap_err(), InitError::MissingQuantity);
  }

  /// Check that the liquidation parameters end up in the query
  /// string.
  #[test]
  fn serialize_close_query() {
    let account_id = account::Id(Uuid::new_v4());
    let request = CloseReqInit {
      percentage: Some(Num::from(50)),
      ..Default::default()
    }
    .init()
    .unwrap();

    let input = (account_id, "AAPL".to_string(), request);
    let query = Delete::query(&input).unwrap().unwrap();
    assert_eq!(query, "percentage=50");

    let path = Delete::path(&input);
    assert!(path.ends_with("/positions/AAPL"), "{path}");
  }
}
