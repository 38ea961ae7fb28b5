// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use http::Method;
use http_endpoint::Bytes;

use num_decimal::Num;

use serde::Deserialize;
use serde::Serialize;
use serde_json::to_vec as to_json;

use crate::api::v1::account;
use crate::Str;


/// An enum controlling when day trading margin call checks are
/// applied.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DtbpCheck {
  /// Check both at order entry and at exit.
  #[serde(rename = "both")]
  Both,
  /// Check only at order entry.
  #[serde(rename = "entry")]
  Entry,
  /// Check only at order exit.
  #[serde(rename = "exit")]
  Exit,
}


/// An enum controlling when pattern day trader checks are applied.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PdtCheck {
  /// Check both at order entry and at exit.
  #[serde(rename = "both")]
  Both,
  /// Check only at order entry.
  #[serde(rename = "entry")]
  Entry,
  /// Check only at order exit.
  #[serde(rename = "exit")]
  Exit,
}


/// An enum representing the possible trade confirmation settings.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TradeConfirmation {
  /// Send an e-mail to confirm trades.
  #[serde(rename = "all")]
  Email,
  /// Provide no confirmation for trades.
  #[serde(rename = "none")]
  None,
}


/// The configuration of a trading account.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Configuration {
  /// When day trading margin call checks are applied.
  #[serde(rename = "dtbp_check")]
  pub dtbp_check: DtbpCheck,
  /// Whether the account may trade fractional shares.
  #[serde(rename = "fractional_trading")]
  pub fractional_trading: bool,
  /// The maximum margin multiplier of the account, between 1 and 4.
  #[serde(rename = "max_margin_multiplier")]
  pub max_margin_multiplier: Num,
  /// If enabled, the account can only submit buy orders.
  #[serde(rename = "no_shorting")]
  pub no_shorting: bool,
  /// When pattern day trader checks are applied.
  #[serde(rename = "pdt_check")]
  pub pdt_check: PdtCheck,
  /// If enabled, new orders are blocked.
  #[serde(rename = "suspend_trade")]
  pub trading_suspended: bool,
  /// Whether and how trades are confirmed.
  #[serde(rename = "trade_confirm_email")]
  pub trade_confirmation: TradeConfirmation,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/trading/accounts/{account-id}/account/configurations
  /// endpoint.
  pub Get(account::Id),
  Ok => Configuration, [
    /// The account configuration was retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v1/trading/accounts/{}/account/configurations",
      input.as_simple()
    )
    .into()
  }
}


Endpoint! {
  /// The representation of a PATCH request to the
  /// /v1/trading/accounts/{account-id}/account/configurations
  /// endpoint.
  pub Patch((account::Id, Configuration)),
  Ok => Configuration, [
    /// The account configuration was updated successfully.
    /* 200 */ OK,
  ],
  Err => PatchError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
    /// One of the new values is invalid/unacceptable.
    /* 400 */ BAD_REQUEST => InvalidValues,
  ]

  #[inline]
  fn method() -> Method {
    Method::PATCH
  }

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v1/trading/accounts/{}/account/configurations",
      input.0.as_simple()
    )
    .into()
  }

  fn body(input: &Self::Input) -> Result<Option<Bytes>, Self::ConversionError> {
    let json = to_json(&input.1)?;
    let bytes = Bytes::from(json);
    Ok(Some(bytes))
  }
}
