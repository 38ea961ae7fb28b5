// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use http::Method;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_urlencoded::to_string as to_query;

use crate::api::v1::account;
use crate::api::v1::order;
use crate::api::v1::position::Position;
use crate::Str;


/// The outcome of an attempt to liquidate a single position as part of
/// a bulk liquidation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct PositionClosure {
  /// The symbol of the position that liquidation was attempted for.
  #[serde(rename = "symbol", default)]
  pub symbol: Option<String>,
  /// The ID of the liquidation order, if one was placed.
  #[serde(rename = "order_id", default)]
  pub order_id: Option<order::Id>,
  /// The HTTP status code of the individual liquidation attempt.
  #[serde(rename = "status", default)]
  pub status: Option<u16>,
  /// The raw body of the individual response. Contains the
  /// liquidation order on success and an error object otherwise.
  #[serde(rename = "body", default)]
  pub body: Option<Value>,
}


/// Parameters for a bulk liquidation of all open positions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CloseAllReq {
  /// If true, all open orders are canceled before the positions are
  /// liquidated.
  #[serde(rename = "cancel_orders", skip_serializing_if = "Option::is_none")]
  pub cancel_orders: Option<bool>,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/trading/accounts/{account-id}/positions endpoint.
  pub Get(account::Id),
  Ok => Vec<Position>, [
    /// The positions were retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  fn path(input: &Self::Input) -> Str {
    format!("/v1/trading/accounts/{}/positions", input.as_simple()).into()
  }
}


Endpoint! {
  /// The representation of a DELETE request to the
  /// /v1/trading/accounts/{account-id}/positions endpoint.
  pub Delete((account::Id, CloseAllReq)),
  Ok => Vec<PositionClosure>, [
    /// The liquidation attempts completed; the status of each
    /// individual position is reported separately.
    /* 207 */ MULTI_STATUS,
  ],
  Err => DeleteError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
    /// Liquidation failed, e.g., because open orders prevented it.
    /* 500 */ INTERNAL_SERVER_ERROR => Failed,
  ]

  #[inline]
  fn method() -> Method {
    Method::DELETE
  }

  fn path(input: &Self::Input) -> Str {
    format!("/v1/trading/accounts/{}/positions", input.0.as_simple()).into()
  }

  fn query(input: &Self::Input) -> Result<Option<Str>, Self::ConversionError> {
    Ok(Some(to_query(&input.1)?.into()))
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use http_endpoint::Endpoint;

  use num_decimal::Num;

  use serde_json::from_str as from_json;

  use test_log::test;

  use uuid::Uuid;

  use crate::api::v1::position::Side;


  /// Check that we can parse a position listing.
  #[test]
  fn parse_reference_positions() {
    let response = r#"[
  {
    "asset_id": "904837e3-3b76-47ec-b432-046db621571b",
    "symbol": "AAPL",
    "exchange": "NASDAQ",
    "asset_class": "us_equity",
    "avg_entry_price": "100.0",
    "qty": "5",
    "side": "long",
    "market_value": "600.0",
    "cost_basis": "500.0",
    "current_price": "120.0",
    "lastday_price": "119.0",
    "change_today": "0.0084"
  }
]"#;

    let positions = from_json::<<Get as Endpoint>::Output>(response).unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].symbol, "AAPL");
    assert_eq!(positions[0].side, Side::Long);
    assert_eq!(positions[0].quantity, Num::from(5));
  }

  /// Check that we can parse the response to a bulk liquidation.
  #[test]
  fn parse_position_closures() {
    let response = r#"[
  {
    "symbol": "BTCUSD",
    "status": 403,
    "body": {
      "code": 40310000,
      "message": "position is not fractionable"
    }
  },
  {
    "symbol": "AAPL",
    "status": 200,
    "order_id": "b018a181-9f9a-4cf8-b0a6-d52a2b4a1b43"
  }
]"#;

    let closures = from_json::<<Delete as Endpoint>::Output>(response).unwrap();
    assert_eq!(closures.len(), 2);
    assert_eq!(closures[0].status, Some(403));
    let body = closures[0].body.as_ref().unwrap();
    assert_eq!(body["message"], "position is not fractionable");
    assert_eq!(closures[1].symbol.as_deref(), Some("AAPL"));
    assert!(closures[1].order_id.is_some());
  }

  /// Check that the order cancellation flag ends up in the query
  /// string.
  #[test]
  fn serialize_close_all_query() {
    let account_id = account::Id(Uuid::new_v4());
    let request = CloseAllReq {
      cancel_orders: Some(true),
    };

    let query = Delete::query(&(account_id, request)).unwrap().unwrap();
    assert_eq!(query, "cancel_orders=true");
  }
}
