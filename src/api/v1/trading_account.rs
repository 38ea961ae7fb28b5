// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::DateTime;
use chrono::Utc;

use num_decimal::Num;

use serde::Deserialize;

use crate::api::v1::account;
use crate::api::v1::account::Status;
use crate::Str;


/// The clearing broker an account is assigned to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[non_exhaustive]
pub enum ClearingBroker {
  /// Apex Clearing Corporation.
  #[serde(rename = "APEX")]
  Apex,
  /// Electronic Transaction Clearing.
  #[serde(rename = "ETC")]
  Etc,
  /// Interactive Brokers' clearing arm.
  #[serde(rename = "IC")]
  Ic,
  /// Velox Clearing.
  #[serde(rename = "VELOX")]
  Velox,
  /// Vision Financial Markets.
  #[serde(rename = "VISION")]
  Vision,
  /// Alpaca itself acts as the clearing broker.
  #[serde(rename = "SELF")]
  Self_,
  /// Any other clearing broker that we have not accounted for.
  ///
  /// Note that having any such broker should be considered a bug.
  #[doc(hidden)]
  #[serde(other)]
  Unknown,
}


/// The trading side of a brokerage account.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct TradeAccount {
  /// The account's ID.
  #[serde(rename = "id")]
  pub id: account::Id,
  /// A human friendly identifier for the account.
  #[serde(rename = "account_number")]
  pub account_number: String,
  /// The approval status of the account.
  #[serde(rename = "status")]
  pub status: Status,
  /// The crypto trading status of the account.
  #[serde(rename = "crypto_status", default)]
  pub crypto_status: Option<Status>,
  /// The currency the account's values are reported in.
  #[serde(rename = "currency", default)]
  pub currency: Option<String>,
  /// The currently available buying power.
  #[serde(rename = "buying_power")]
  pub buying_power: Num,
  /// The buying power under Regulation T.
  #[serde(rename = "regt_buying_power")]
  pub regt_buying_power: Num,
  /// The buying power for day trades.
  #[serde(rename = "daytrading_buying_power")]
  pub daytrading_buying_power: Num,
  /// The non-marginable buying power.
  #[serde(rename = "non_marginable_buying_power")]
  pub non_marginable_buying_power: Num,
  /// The cash balance.
  #[serde(rename = "cash")]
  pub cash: Num,
  /// The cash available for withdrawal.
  #[serde(rename = "cash_withdrawable", default)]
  pub cash_withdrawable: Option<Num>,
  /// The cash available for transfer out of the account.
  #[serde(rename = "cash_transferable", default)]
  pub cash_transferable: Option<Num>,
  /// The fees accrued in the account.
  #[serde(rename = "accrued_fees")]
  pub accrued_fees: Num,
  /// The cash pending transfer out of the account.
  #[serde(rename = "pending_transfer_out", default)]
  pub pending_transfer_out: Option<Num>,
  /// The cash pending transfer into the account.
  #[serde(rename = "pending_transfer_in", default)]
  pub pending_transfer_in: Option<Num>,
  /// The total value of cash and holdings.
  #[serde(rename = "portfolio_value")]
  pub portfolio_value: Num,
  /// Whether the account is flagged as a pattern day trader.
  #[serde(rename = "pattern_day_trader")]
  pub pattern_day_trader: bool,
  /// If true, the account is not allowed to place orders.
  #[serde(rename = "trading_blocked")]
  pub trading_blocked: bool,
  /// If true, the account is not allowed to request money transfers.
  #[serde(rename = "transfers_blocked")]
  pub transfers_blocked: bool,
  /// If true, all account activity by the user is prohibited.
  #[serde(rename = "account_blocked")]
  pub account_blocked: bool,
  /// The time stamp the account was created at.
  #[serde(rename = "created_at")]
  pub created_at: DateTime<Utc>,
  /// If true, the account holder suspended trading themselves.
  #[serde(rename = "trade_suspended_by_user")]
  pub trade_suspended_by_user: bool,
  /// The margin multiplier of the account.
  #[serde(rename = "multiplier")]
  pub multiplier: Num,
  /// Whether the account may hold short positions.
  #[serde(rename = "shorting_enabled")]
  pub shorting_enabled: bool,
  /// The sum of cash and long and short market values.
  #[serde(rename = "equity")]
  pub equity: Num,
  /// The equity as of the previous trading day's close.
  #[serde(rename = "last_equity")]
  pub last_equity: Num,
  /// The real-time value of all long positions.
  #[serde(rename = "long_market_value")]
  pub long_market_value: Num,
  /// The real-time value of all short positions.
  #[serde(rename = "short_market_value")]
  pub short_market_value: Num,
  /// The initial margin requirement under Regulation T.
  #[serde(rename = "initial_margin")]
  pub initial_margin: Num,
  /// The maintenance margin requirement.
  #[serde(rename = "maintenance_margin")]
  pub maintenance_margin: Num,
  /// The maintenance margin requirement on the previous trading day.
  #[serde(rename = "last_maintenance_margin")]
  pub last_maintenance_margin: Num,
  /// The value of the Special Memorandum Account.
  #[serde(rename = "sma")]
  pub sma: Num,
  /// The number of day trades made over the last five trading days,
  /// including today.
  #[serde(rename = "daytrade_count")]
  pub daytrade_count: u64,
  /// The close time of the previous trading session.
  #[serde(rename = "previous_close", default)]
  pub previous_close: Option<DateTime<Utc>>,
  /// The value of all long positions as of the previous trading day's
  /// close.
  #[serde(rename = "last_long_market_value", default)]
  pub last_long_market_value: Option<Num>,
  /// The value of all short positions as of the previous trading
  /// day's close.
  #[serde(rename = "last_short_market_value", default)]
  pub last_short_market_value: Option<Num>,
  /// The cash balance as of the previous trading day's close.
  #[serde(rename = "last_cash", default)]
  pub last_cash: Option<Num>,
  /// The initial margin as of the previous trading day's close.
  #[serde(rename = "last_initial_margin", default)]
  pub last_initial_margin: Option<Num>,
  /// The Regulation T buying power as of the previous trading day's
  /// close.
  #[serde(rename = "last_regt_buying_power", default)]
  pub last_regt_buying_power: Option<Num>,
  /// The day trading buying power as of the previous trading day's
  /// close.
  #[serde(rename = "last_daytrading_buying_power", default)]
  pub last_daytrading_buying_power: Option<Num>,
  /// The day trade count as of the previous trading day's close.
  #[serde(rename = "last_daytrade_count", default)]
  pub last_daytrade_count: Option<u64>,
  /// The buying power as of the previous trading day's close.
  #[serde(rename = "last_buying_power", default)]
  pub last_buying_power: Option<Num>,
  /// The clearing broker of the account.
  #[serde(rename = "clearing_broker", default)]
  pub clearing_broker: Option<ClearingBroker>,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/trading/accounts/{account-id}/account endpoint.
  pub Get(account::Id),
  Ok => TradeAccount, [
    /// The trading account was retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  fn path(input: &Self::Input) -> Str {
    format!("/v1/trading/accounts/{}/account", input.as_simple()).into()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use serde_json::from_str as from_json;

  use test_log::test;


  /// Check that we can parse the reference trading account object.
  #[test]
  fn parse_reference_trade_account() {
    let response = r#"{
  "id": "5fc0795e-1f16-40cc-aa90-ede67c39d7a9",
  "account_number": "684486106",
  "status": "ACTIVE",
  "crypto_status": "ACTIVE",
  "currency": "USD",
  "buying_power": "0",
  "regt_buying_power": "0",
  "daytrading_buying_power": "0",
  "non_marginable_buying_power": "0",
  "cash": "0",
  "cash_withdrawable": "0",
  "cash_transferable": "0",
  "accrued_fees": "0",
  "pending_transfer_out": "0",
  "pending_transfer_in": "0",
  "portfolio_value": "0",
  "pattern_day_trader": false,
  "trading_blocked": false,
  "transfers_blocked": false,
  "account_blocked": false,
  "created_at": "2022-04-14T15:51:14.523349Z",
  "trade_suspended_by_user": false,
  "multiplier": "1",
  "shorting_enabled": false,
  "equity": "0",
  "last_equity": "0",
  "long_market_value": "0",
  "short_market_value": "0",
  "initial_margin": "0",
  "maintenance_margin": "0",
  "last_maintenance_margin": "0",
  "sma": "0",
  "daytrade_count": 0,
  "previous_close": "2022-04-13T20:00:00-04:00",
  "last_long_market_value": "0",
  "last_short_market_value": "0",
  "last_cash": "0",
  "last_initial_margin": "0",
  "last_regt_buying_power": "0",
  "last_daytrading_buying_power": "0",
  "last_buying_power": "0",
  "last_daytrade_count": 0,
  "clearing_broker": "VELOX"
}"#;

    let account = from_json::<TradeAccount>(response).unwrap();
    assert_eq!(
      account.id.to_string(),
      "5fc0795e-1f16-40cc-aa90-ede67c39d7a9"
    );
    assert_eq!(account.status, Status::Active);
    assert_eq!(account.currency.as_deref(), Some("USD"));
    assert_eq!(account.multiplier, Num::from(1));
    assert_eq!(account.daytrade_count, 0);
    assert_eq!(account.clearing_broker, Some(ClearingBroker::Velox));
    assert!(account.previous_close.is_some());
    assert!(!account.pattern_day_trader);
  }

  /// Check that a trading account without the optional members still
  /// parses.
  #[test]
  fn parse_minimal_trade_account() {
    let response = r#"{
  "id": "5fc0795e-1f16-40cc-aa90-ede67c39d7a9",
  "account_number": "684486106",
  "status": "ACTIVE",
  "buying_power": "7120.47",
  "regt_buying_power": "7120.47",
  "daytrading_buying_power": "0",
  "non_marginable_buying_power": "3560.23",
  "cash": "3560.23",
  "accrued_fees": "0",
  "portfolio_value": "7213.88",
  "pattern_day_trader": false,
  "trading_blocked": false,
  "transfers_blocked": false,
  "account_blocked": false,
  "created_at": "2022-04-14T15:51:14.523349Z",
  "trade_suspended_by_user": false,
  "multiplier": "2",
  "shorting_enabled": true,
  "equity": "7213.88",
  "last_equity": "7199.45",
  "long_market_value": "3653.65",
  "short_market_value": "0",
  "initial_margin": "1826.82",
  "maintenance_margin": "1096.09",
  "last_maintenance_margin": "1091.83",
  "sma": "0",
  "daytrade_count": 0
}"#;

    let account = from_json::<TradeAccount>(response).unwrap();
    assert_eq!(account.cash_withdrawable, None);
    assert_eq!(account.clearing_broker, None);
    assert_eq!(account.previous_close, None);
    assert_eq!(account.equity, Num::new(721388, 100));
  }
}
