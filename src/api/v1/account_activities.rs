// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use num_decimal::Num;

use serde::de::Error as _;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;
use serde_urlencoded::to_string as to_query;

use thiserror::Error;

use crate::api::v1::account;
use crate::api::v1::order;
use crate::util::enum_slice_to_str;
use crate::Str;


/// An enum representing the type of an account activity.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum ActivityType {
  /// Order fills (both partial and full fills).
  ///
  /// This variant will only ever be set for trade activities.
  #[serde(rename = "FILL")]
  Fill,
  /// ACATS in/out (cash).
  #[serde(rename = "ACATC")]
  AcatsInOutCash,
  /// ACATS in/out (securities).
  #[serde(rename = "ACATS")]
  AcatsInOutSecurities,
  /// Cash in lieu of fractional shares.
  #[serde(rename = "CIL")]
  CashInLieu,
  /// Cash deposit (+).
  #[serde(rename = "CSD")]
  CashDeposit,
  /// Cash withdrawal (-).
  #[serde(rename = "CSW")]
  CashWithdrawal,
  /// Dividend.
  #[serde(rename = "DIV")]
  Dividend,
  /// Dividend (capital gain long term).
  #[serde(rename = "DIVCGL")]
  CapitalGainLongTerm,
  /// Dividend (capital gain short term).
  #[serde(rename = "DIVCGS")]
  CapitalGainShortTerm,
  /// Dividend adjusted (NRA withheld).
  #[serde(rename = "DIVNRA")]
  DividendAdjustedNraWithheld,
  /// Dividend return of capital.
  #[serde(rename = "DIVROC")]
  DividendReturnOfCapital,
  /// Dividend (tax exempt).
  #[serde(rename = "DIVTXEX")]
  DividendTaxExempt,
  /// SEC and FINRA fees.
  #[serde(rename = "FEE")]
  Fee,
  /// Interest (credit/margin).
  #[serde(rename = "INT")]
  Interest,
  /// Journal entry (cash).
  #[serde(rename = "JNLC")]
  JournalEntryCash,
  /// Journal entry (stock).
  #[serde(rename = "JNLS")]
  JournalEntryStock,
  /// Merger/acquisition.
  #[serde(rename = "MA")]
  Acquisition,
  /// Pass through charge.
  #[serde(rename = "PTC")]
  PassThruCharge,
  /// Reorganization.
  #[serde(rename = "REORG")]
  Reorg,
  /// Stock spinoff.
  #[serde(rename = "SPIN")]
  StockSpinoff,
  /// Stock split.
  #[serde(rename = "SPLIT")]
  StockSplit,
  /// Any other activity type that we have not accounted for.
  ///
  /// Note that having any such type should be considered a bug.
  #[doc(hidden)]
  #[serde(other, rename(serialize = "unknown"))]
  Unknown,
}


/// An enumeration describing the side of a trade activity.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum Side {
  /// A buy of an asset.
  #[serde(rename = "buy")]
  Buy,
  /// A sale of an asset.
  #[serde(rename = "sell")]
  Sell,
  /// A short sale of an asset.
  #[serde(rename = "sell_short")]
  ShortSell,
}


/// The fill type of a trade activity.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum FillType {
  /// The order was filled in its entirety.
  #[serde(rename = "fill")]
  Full,
  /// Only a part of the order was filled.
  #[serde(rename = "partial_fill")]
  Partial,
}


/// The processing status of a non-trade activity.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum ActivityStatus {
  /// The activity has been executed.
  #[serde(rename = "executed")]
  Executed,
  /// The activity corrects a previous one.
  #[serde(rename = "correct")]
  Correct,
  /// The activity has been canceled.
  #[serde(rename = "canceled")]
  Canceled,
}


/// A trade related activity.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct TradeActivity {
  /// An ID for the activity. Can be sent as `page_token` in requests
  /// to facilitate the paging of results.
  #[serde(rename = "id")]
  pub id: String,
  /// The ID of the account the activity belongs to.
  #[serde(rename = "account_id")]
  pub account_id: account::Id,
  /// The time at which the execution occurred.
  #[serde(rename = "transaction_time")]
  pub transaction_time: DateTime<Utc>,
  /// Whether the execution filled the order fully or partially.
  #[serde(rename = "type")]
  pub type_: FillType,
  /// The traded symbol.
  #[serde(rename = "symbol")]
  pub symbol: String,
  /// The ID of the order this trade activity belongs to.
  #[serde(rename = "order_id")]
  pub order_id: order::Id,
  /// The side of the trade.
  #[serde(rename = "side")]
  pub side: Side,
  /// The number of shares involved in the execution.
  #[serde(rename = "qty")]
  pub quantity: Num,
  /// The cumulative quantity of shares involved in the execution.
  #[serde(rename = "cum_qty")]
  pub cumulative_quantity: Num,
  /// For partially filled orders, the quantity of shares that are
  /// left to be filled.
  #[serde(rename = "leaves_qty")]
  pub unfilled_quantity: Num,
  /// The per-share price that the trade was executed at.
  #[serde(rename = "price")]
  pub price: Num,
}


/// A non-trade related activity.
///
/// Examples include dividend payments or cash transfers.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct NonTradeActivity {
  /// An ID for the activity. Can be sent as `page_token` in requests
  /// to facilitate the paging of results.
  #[serde(rename = "id")]
  pub id: String,
  /// The ID of the account the activity belongs to.
  #[serde(rename = "account_id")]
  pub account_id: account::Id,
  /// The type of the activity.
  ///
  /// Note that the `Fill` variant will never be used here.
  #[serde(rename = "activity_type")]
  pub type_: ActivityType,
  /// The date on which the activity occurred or on which the
  /// transaction associated with the activity settled.
  #[serde(rename = "date")]
  pub date: NaiveDate,
  /// The net amount of money (positive or negative) associated with
  /// the activity.
  #[serde(rename = "net_amount")]
  pub net_amount: Num,
  /// The symbol of the security involved with the activity. Not
  /// present for all activity types.
  #[serde(rename = "symbol", default)]
  pub symbol: Option<String>,
  /// For dividend activities, the number of shares that contributed
  /// to the payment. Not present for other activity types.
  #[serde(rename = "qty", default)]
  pub quantity: Option<Num>,
  /// For dividend activities, the average amount paid per share. Not
  /// present for other activity types.
  #[serde(rename = "per_share_amount", default)]
  pub per_share_amount: Option<Num>,
  /// A description of the activity.
  #[serde(rename = "description", default)]
  pub description: Option<String>,
  /// The processing status of the activity.
  #[serde(rename = "status", default)]
  pub status: Option<ActivityStatus>,
}


/// An account activity.
#[derive(Clone, Debug, PartialEq)]
pub enum Activity {
  /// A trade activity.
  Trade(TradeActivity),
  /// A non-trade activity (e.g., a dividend payment).
  NonTrade(NonTradeActivity),
}

impl Activity {
  /// Retrieve the activity's ID.
  pub fn id(&self) -> &str {
    match self {
      Activity::Trade(trade) => &trade.id,
      Activity::NonTrade(non_trade) => &non_trade.id,
    }
  }

  /// Retrieve the ID of the account the activity belongs to.
  pub fn account_id(&self) -> account::Id {
    match self {
      Activity::Trade(trade) => trade.account_id,
      Activity::NonTrade(non_trade) => non_trade.account_id,
    }
  }

  /// Convert this activity into a trade activity, if it is of the
  /// corresponding variant.
  pub fn into_trade(self) -> Result<TradeActivity, Self> {
    match self {
      Activity::Trade(trade) => Ok(trade),
      Activity::NonTrade(..) => Err(self),
    }
  }

  /// Convert this activity into a non-trade activity, if it is of the
  /// corresponding variant.
  pub fn into_non_trade(self) -> Result<NonTradeActivity, Self> {
    match self {
      Activity::Trade(..) => Err(self),
      Activity::NonTrade(non_trade) => Ok(non_trade),
    }
  }
}

impl<'de> Deserialize<'de> for Activity {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    // Activity objects are reported in a single stream, with the
    // `activity_type` member acting as the tag deciding the overall
    // shape. Buffer the object and dispatch on said tag.
    let value = Value::deserialize(deserializer)?;
    let tag = value
      .get("activity_type")
      .cloned()
      .ok_or_else(|| D::Error::missing_field("activity_type"))?;
    let tag = ActivityType::deserialize(tag).map_err(D::Error::custom)?;

    match tag {
      ActivityType::Fill => TradeActivity::deserialize(value)
        .map(Activity::Trade)
        .map_err(D::Error::custom),
      _ => NonTradeActivity::deserialize(value)
        .map(Activity::NonTrade)
        .map_err(D::Error::custom),
    }
  }
}


/// The direction in which account activities are reported.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum Direction {
  /// Report account activities in descending order, i.e., from more
  /// recent activities to older ones.
  #[default]
  #[serde(rename = "desc")]
  Descending,
  /// Report account activities in ascending order, i.e., from older
  /// activities to more recent ones.
  #[serde(rename = "asc")]
  Ascending,
}


/// An error encountered while constructing an [`ActivityReq`].
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum InitError {
  /// Both the exact-date filter and a range filter were provided.
  #[error("the date filter cannot be combined with the until/after filters")]
  ConflictingTimeFilters,
}


/// A GET request to be made to the /v1/accounts/activities endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ActivityReq {
  /// Limit the response to activities of the given account.
  #[serde(rename = "account_id", skip_serializing_if = "Option::is_none")]
  pub account_id: Option<account::Id>,
  /// The types of activities to retrieve.
  ///
  /// If empty all activities will be retrieved.
  #[serde(rename = "activity_types", serialize_with = "enum_slice_to_str")]
  pub types: Vec<ActivityType>,
  /// The response will contain only activities that occurred on this
  /// date. Cannot be combined with `until` or `after`.
  #[serde(rename = "date", skip_serializing_if = "Option::is_none")]
  pub date: Option<NaiveDate>,
  /// The response will contain only activities until this time.
  #[serde(rename = "until", skip_serializing_if = "Option::is_none")]
  pub until: Option<DateTime<Utc>>,
  /// The response will contain only activities dated after this time.
  #[serde(rename = "after", skip_serializing_if = "Option::is_none")]
  pub after: Option<DateTime<Utc>>,
  /// The direction in which to report account activities.
  #[serde(rename = "direction")]
  pub direction: Direction,
  /// The maximum number of entries to return in the response.
  #[serde(rename = "page_size", skip_serializing_if = "Option::is_none")]
  pub page_size: Option<usize>,
  /// The ID of the end of your current page of results.
  #[serde(rename = "page_token", skip_serializing_if = "Option::is_none")]
  pub page_token: Option<String>,
}


/// A helper for initializing [`ActivityReq`] objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityReqInit {
  /// See `ActivityReq::account_id`.
  pub account_id: Option<account::Id>,
  /// See `ActivityReq::types`.
  pub types: Vec<ActivityType>,
  /// See `ActivityReq::date`.
  pub date: Option<NaiveDate>,
  /// See `ActivityReq::until`.
  pub until: Option<DateTime<Utc>>,
  /// See `ActivityReq::after`.
  pub after: Option<DateTime<Utc>>,
  /// See `ActivityReq::direction`.
  pub direction: Direction,
  /// See `ActivityReq::page_size`.
  pub page_size: Option<usize>,
  /// See `ActivityReq::page_token`.
  pub page_token: Option<String>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl ActivityReqInit {
  /// Create an [`ActivityReq`] from an `ActivityReqInit`.
  ///
  /// The exact-date filter is mutually exclusive with the `until` and
  /// `after` range filters.
  pub fn init(self) -> Result<ActivityReq, InitError> {
    if self.date.is_some() && (self.until.is_some() || self.after.is_some()) {
      return Err(InitError::ConflictingTimeFilters)
    }

    Ok(ActivityReq {
      account_id: self.account_id,
      types: self.types,
      date: self.date,
      until: self.until,
      after: self.after,
      direction: self.direction,
      page_size: self.page_size,
      page_token: self.page_token,
    })
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/accounts/activities endpoint.
  pub Get(ActivityReq),
  Ok => Vec<Activity>, [
    /// The activities were retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, []

  #[inline]
  fn path(_input: &Self::Input) -> Str {
    "/v1/accounts/activities".into()
  }

  fn query(input: &Self::Input) -> Result<Option<Str>, Self::ConversionError> {
    Ok(Some(to_query(input)?.into()))
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use http_endpoint::Endpoint;

  use serde_json::from_str as from_json;

  use test_log::test;

  use uuid::Uuid;


  /// Check that we can parse a trade activity.
  #[test]
  fn parse_reference_trade_activity() {
    let response = r#"{
  "activity_type": "FILL",
  "account_id": "0d969814-40d6-4b2b-99ac-2e37427f1ad2",
  "cum_qty": "1",
  "id": "20190524113406977::8efc7b9a-8b2b-4000-9955-d36e7db0df74",
  "leaves_qty": "0",
  "price": "1.63",
  "qty": "1",
  "side": "buy",
  "symbol": "LPCN",
  "transaction_time": "2019-05-24T15:34:06.977Z",
  "order_id": "904837e3-3b76-47ec-b432-046db621571b",
  "type": "fill"
}"#;

    let trade = from_json::<Activity>(response)
      .unwrap()
      .into_trade()
      .unwrap();

    let order_id = order::Id(Uuid::parse_str("904837e3-3b76-47ec-b432-046db621571b").unwrap());
    assert_eq!(trade.symbol, "LPCN");
    assert_eq!(trade.order_id, order_id);
    assert_eq!(trade.side, Side::Buy);
    assert_eq!(trade.type_, FillType::Full);
    assert_eq!(trade.quantity, Num::from(1));
    assert_eq!(trade.unfilled_quantity, Num::from(0));
    assert_eq!(trade.price, Num::new(163, 100));
  }

  /// Check that we can parse a non-trade activity.
  #[test]
  fn parse_reference_non_trade_activity() {
    let response = r#"{
  "activity_type": "DIV",
  "account_id": "0d969814-40d6-4b2b-99ac-2e37427f1ad2",
  "id": "20190801011955195::5f596936-6f23-4cef-bdf1-3806aae57dbf",
  "date": "2019-08-01",
  "net_amount": "1.02",
  "symbol": "T",
  "qty": "2",
  "per_share_amount": "0.51",
  "status": "executed"
}"#;

    let non_trade = from_json::<Activity>(response)
      .unwrap()
      .into_non_trade()
      .unwrap();

    assert_eq!(non_trade.type_, ActivityType::Dividend);
    assert_eq!(
      non_trade.date,
      NaiveDate::from_ymd_opt(2019, 8, 1).unwrap()
    );
    assert_eq!(non_trade.symbol.as_deref(), Some("T"));
    assert_eq!(non_trade.per_share_amount, Some(Num::new(51, 100)));
    assert_eq!(non_trade.status, Some(ActivityStatus::Executed));
  }

  /// Check that an activity without an `activity_type` member is
  /// refused.
  #[test]
  fn parse_activity_without_tag() {
    let response = r#"{"id": "foobar"}"#;
    assert!(from_json::<Activity>(response).is_err());
  }

  /// Check that the exact-date filter cannot be combined with the
  /// range filters.
  #[test]
  fn reject_conflicting_time_filters() {
    let result = ActivityReqInit {
      date: Some(NaiveDate::from_ymd_opt(2022, 4, 12).unwrap()),
      until: Some(Utc::now()),
      ..Default::default()
    }
    .init();
    assert_eq!(result.unwrap_err(), InitError::ConflictingTimeFilters);

    let result = ActivityReqInit {
      date: Some(NaiveDate::from_ymd_opt(2022, 4, 12).unwrap()),
      after: Some(Utc::now()),
      ..Default::default()
    }
    .init();
    assert_eq!(result.unwrap_err(), InitError::ConflictingTimeFilters);

    let request = ActivityReqInit {
      date: Some(NaiveDate::from_ymd_opt(2022, 4, 12).unwrap()),
      ..Default::default()
    }
    .init()
    .unwrap();
    assert_eq!(request.date, Some(NaiveDate::from_ymd_opt(2022, 4, 12).unwrap()));
  }

  /// Check that the activity types are serialized as a comma
  /// separated list.
  #[test]
  fn serialize_activity_types_query() {
    let request = ActivityReqInit {
      types: vec![ActivityType::Dividend, ActivityType::Fee],
      ..Default::default()
    }
    .init()
    .unwrap();

    let query = Get::query(&request).unwrap().unwrap();
    assert_eq!(query, "activity_types=DIV%2CFEE&direction=desc");
  }
}
