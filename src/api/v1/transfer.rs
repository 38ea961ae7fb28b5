// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ops::Deref;

use chrono::DateTime;
use chrono::Utc;

use http::Method;
use http_endpoint::Bytes;

use num_decimal::Num;

use serde::Deserialize;
use serde::Serialize;
use serde_json::to_vec as to_json;

use thiserror::Error;

use uuid::Uuid;

use crate::api::v1::account;
use crate::api::v1::ach;
use crate::api::v1::bank;
use crate::Str;


/// An ID uniquely identifying a transfer.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Id(pub Uuid);

impl Deref for Id {
  type Target = Uuid;

  #[inline]
  fn deref(&self) -> &Self::Target {
    &self.0
  }
}


/// The mechanism by which a transfer moves funds.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Type {
  /// A transfer via the Automated Clearing House network, requiring an
  /// established ACH relationship.
  #[serde(rename = "ach")]
  Ach,
  /// A wire transfer, requiring a registered recipient bank.
  #[serde(rename = "wire")]
  Wire,
}


/// The direction in which funds flow.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
  /// Funds flow into the brokerage account.
  #[serde(rename = "INCOMING")]
  Incoming,
  /// Funds flow out of the brokerage account.
  #[serde(rename = "OUTGOING")]
  Outgoing,
}


/// The timing with which a transfer is executed.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum Timing {
  /// The transfer is executed immediately.
  #[default]
  #[serde(rename = "immediate")]
  Immediate,
}


/// The entity paying the fees associated with a transfer.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FeePaymentMethod {
  /// The fee is deducted from the user's account.
  #[serde(rename = "user")]
  User,
  /// The fee is deducted from the invoice of the correspondent.
  #[serde(rename = "invoice")]
  Invoice,
}


/// The status of a transfer.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[non_exhaustive]
pub enum Status {
  /// The transfer is queued for processing.
  #[serde(rename = "QUEUED")]
  Queued,
  /// The transfer has been approved.
  #[serde(rename = "APPROVED")]
  Approved,
  /// The transfer is pending processing.
  #[serde(rename = "PENDING")]
  Pending,
  /// The transfer is being processed.
  #[serde(rename = "PROCESSING")]
  Processing,
  /// The transfer has been sent to the clearing broker.
  #[serde(rename = "SENT_TO_CLEARING")]
  SentToClearing,
  /// The transfer has been rejected.
  #[serde(rename = "REJECTED")]
  Rejected,
  /// The transfer has been canceled.
  #[serde(rename = "CANCELED")]
  Canceled,
  /// The transfer has been returned.
  #[serde(rename = "RETURNED")]
  Returned,
  /// The transfer has completed.
  #[serde(rename = "COMPLETE")]
  Complete,
  /// Any other status that we have not accounted for.
  ///
  /// Note that having any such status should be considered a bug.
  #[doc(hidden)]
  #[serde(other)]
  Unknown,
}


/// A transfer of funds into or out of a brokerage account.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct Transfer {
  /// The transfer's ID.
  #[serde(rename = "id")]
  pub id: Id,
  /// The ID of the brokerage account the transfer belongs to.
  #[serde(rename = "account_id")]
  pub account_id: account::Id,
  /// The mechanism used for the transfer.
  #[serde(rename = "type")]
  pub type_: Type,
  /// The status of the transfer.
  #[serde(rename = "status")]
  pub status: Status,
  /// The amount of money being moved.
  #[serde(rename = "amount")]
  pub amount: Num,
  /// The direction of the transfer.
  #[serde(rename = "direction")]
  pub direction: Direction,
  /// The ID of the ACH relationship used. Only present for ACH
  /// transfers.
  #[serde(rename = "relationship_id", default)]
  pub relationship_id: Option<ach::Id>,
  /// The ID of the recipient bank used. Only present for wire
  /// transfers.
  #[serde(rename = "bank_id", default)]
  pub bank_id: Option<bank::Id>,
  /// The reason for a rejection or return, if any.
  #[serde(rename = "reason", default)]
  pub reason: Option<String>,
  /// The amount requested before fees were applied.
  #[serde(rename = "requested_amount", default)]
  pub requested_amount: Option<Num>,
  /// The fee charged for the transfer.
  #[serde(rename = "fee", default)]
  pub fee: Option<Num>,
  /// The entity paying the transfer fee.
  #[serde(rename = "fee_payment_method", default)]
  pub fee_payment_method: Option<FeePaymentMethod>,
  /// The time stamp the transfer was created at.
  #[serde(rename = "created_at")]
  pub created_at: DateTime<Utc>,
  /// The time stamp the transfer was updated at last.
  #[serde(rename = "updated_at", default)]
  pub updated_at: Option<DateTime<Utc>>,
  /// The time at which the transfer request expires.
  #[serde(rename = "expires_at", default)]
  pub expires_at: Option<DateTime<Utc>>,
}


/// An error encountered while constructing a transfer request.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum InitError {
  /// The transfer amount was zero or negative.
  #[error("the transfer amount must be positive")]
  NonPositiveAmount,
}


/// A request to create an ACH transfer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CreateAchReq {
  /// The mechanism used for the transfer.
  ///
  /// Always [`Type::Ach`].
  #[serde(rename = "transfer_type")]
  pub type_: Type,
  /// The ID of the ACH relationship to move funds through.
  #[serde(rename = "relationship_id")]
  pub relationship_id: ach::Id,
  /// The amount of money to move.
  #[serde(rename = "amount")]
  pub amount: Num,
  /// The direction of the transfer.
  #[serde(rename = "direction")]
  pub direction: Direction,
  /// The timing of the transfer.
  #[serde(rename = "timing")]
  pub timing: Timing,
  /// The entity paying the transfer fee.
  #[serde(
    rename = "fee_payment_method",
    skip_serializing_if = "Option::is_none"
  )]
  pub fee_payment_method: Option<FeePaymentMethod>,
}


/// A helper for initializing [`CreateAchReq`] objects.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CreateAchReqInit {
  /// See `CreateAchReq::timing`.
  pub timing: Timing,
  /// See `CreateAchReq::fee_payment_method`.
  pub fee_payment_method: Option<FeePaymentMethod>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl CreateAchReqInit {
  /// Create a [`CreateAchReq`] from a `CreateAchReqInit`.
  ///
  /// The transfer amount has to be positive.
  pub fn init(
    self,
    relationship_id: ach::Id,
    amount: Num,
    direction: Direction,
  ) -> Result<CreateAchReq, InitError> {
    if amount <= Num::from(0) {
      return Err(InitError::NonPositiveAmount)
    }

    Ok(CreateAchReq {
      type_: Type::Ach,
      relationship_id,
      amount,
      direction,
      timing: self.timing,
      fee_payment_method: self.fee_payment_method,
    })
  }
}


/// A request to create a wire transfer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CreateWireReq {
  /// The mechanism used for the transfer.
  ///
  /// Always [`Type::Wire`].
  #[serde(rename = "transfer_type")]
  pub type_: Type,
  /// The ID of the recipient bank to move funds through.
  #[serde(rename = "bank_id")]
  pub bank_id: bank::Id,
  /// The amount of money to move.
  #[serde(rename = "amount")]
  pub amount: Num,
  /// The direction of the transfer.
  #[serde(rename = "direction")]
  pub direction: Direction,
  /// The timing of the transfer.
  #[serde(rename = "timing")]
  pub timing: Timing,
  /// Additional information to attach to the wire.
  #[serde(
    rename = "additional_information",
    skip_serializing_if = "Option::is_none"
  )]
  pub additional_information: Option<String>,
  /// The entity paying the transfer fee.
  #[serde(
    rename = "fee_payment_method",
    skip_serializing_if = "Option::is_none"
  )]
  pub fee_payment_method: Option<FeePaymentMethod>,
}


/// A helper for initializing [`CreateWireReq`] objects.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateWireReqInit {
  /// See `CreateWireReq::timing`.
  pub timing: Timing,
  /// See `CreateWireReq::additional_information`.
  pub additional_information: Option<String>,
  /// See `CreateWireReq::fee_payment_method`.
  pub fee_payment_method: Option<FeePaymentMethod>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl CreateWireReqInit {
  /// Create a [`CreateWireReq`] from a `CreateWireReqInit`.
  ///
  /// The transfer amount has to be positive.
  pub fn init(
    self,
    bank_id: bank::Id,
    amount: Num,
    direction: Direction,
  ) -> Result<CreateWireReq, InitError> {
    if amount <= Num::from(0) {
      return Err(InitError::NonPositiveAmount)
    }

    Ok(CreateWireReq {
      type_: Type::Wire,
      bank_id,
      amount,
      direction,
      timing: self.timing,
      additional_information: self.additional_information,
      fee_payment_method: self.fee_payment_method,
    })
  }
}


/// A request to create a transfer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CreateReq {
  /// Move funds via the ACH network.
  Ach(CreateAchReq),
  /// Move funds via a wire transfer.
  Wire(CreateWireReq),
}

impl From<CreateAchReq> for CreateReq {
  #[inline]
  fn from(request: CreateAchReq) -> Self {
    Self::Ach(request)
  }
}

impl From<CreateWireReq> for CreateReq {
  #[inline]
  fn from(request: CreateWireReq) -> Self {
    Self::Wire(request)
  }
}


Endpoint! {
  /// The representation of a POST request to the
  /// /v1/accounts/{account-id}/transfers endpoint.
  pub Post((account::Id, CreateReq)),
  Ok => Transfer, [
    /// The transfer was created successfully.
    /* 200 */ OK,
  ],
  Err => PostError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
    /// Some data in the request was invalid.
    /* 422 */ UNPROCESSABLE_ENTITY => InvalidInput,
  ]

  #[inline]
  fn method() -> Method {
    Method::POST
  }

  fn path(input: &Self::Input) -> Str {
    format!("/v1/accounts/{}/transfers", input.0.as_simple()).into()
  }

  fn body(input: &Self::Input) -> Result<Option<Bytes>, Self::ConversionError> {
    let json = to_json(&input.1)?;
    let bytes = Bytes::from(json);
    Ok(Some(bytes))
  }
}


EndpointNoParse! {
  /// The representation of a DELETE request to the
  /// /v1/accounts/{account-id}/transfers/{transfer-id} endpoint.
  pub Delete((account::Id, Id)),
  Ok => (), [
    /// The transfer was canceled successfully.
    /* 204 */ NO_CONTENT,
  ],
  Err => DeleteError, [
    /// No account or transfer was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
    /// The transfer can no longer be canceled.
    /* 422 */ UNPROCESSABLE_ENTITY => NotCancelable,
  ]

  #[inline]
  fn method() -> Method {
    Method::DELETE
  }

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v1/accounts/{}/transfers/{}",
      input.0.as_simple(),
      input.1.as_simple()
    )
    .into()
  }

  fn parse(body: &[u8]) -> Result<Self::Output, Self::ConversionError> {
    debug_assert_eq!(body, b"");
    Ok(())
  }

  fn parse_err(body: &[u8]) -> Result<Self::ApiError, Vec<u8>> {
    serde_json::from_slice::<Self::ApiError>(body).map_err(|_| body.to_vec())
  }
}
