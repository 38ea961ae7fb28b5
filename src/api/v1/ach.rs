// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ops::Deref;

use chrono::DateTime;
use chrono::Utc;

use http::Method;
use http_endpoint::Bytes;

use serde::Deserialize;
use serde::Serialize;
use serde_json::to_vec as to_json;

use uuid::Uuid;

use crate::api::v1::account;
use crate::Str;


/// An ID uniquely identifying an ACH relationship.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Id(pub Uuid);

impl Deref for Id {
  type Target = Uuid;

  #[inline]
  fn deref(&self) -> &Self::Target {
    &self.0
  }
}


/// The type of a bank account backing an ACH relationship.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BankAccountType {
  /// A checking account.
  #[serde(rename = "CHECKING")]
  Checking,
  /// A savings account.
  #[serde(rename = "SAVINGS")]
  Savings,
}


/// The status of an ACH relationship.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[non_exhaustive]
pub enum Status {
  /// The relationship is queued for processing.
  #[serde(rename = "QUEUED")]
  Queued,
  /// The relationship has been approved and can be used for
  /// transfers.
  #[serde(rename = "APPROVED")]
  Approved,
  /// The relationship is pending approval.
  #[serde(rename = "PENDING")]
  Pending,
  /// Cancellation of the relationship has been requested.
  #[serde(rename = "CANCEL_REQUESTED")]
  CancelRequested,
  /// Any other status that we have not accounted for.
  ///
  /// Note that having any such status should be considered a bug.
  #[doc(hidden)]
  #[serde(other)]
  Unknown,
}


/// An ACH relationship between a brokerage account and a bank account.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[non_exhaustive]
pub struct Relationship {
  /// The relationship's ID.
  #[serde(rename = "id")]
  pub id: Id,
  /// The ID of the brokerage account the relationship belongs to.
  #[serde(rename = "account_id")]
  pub account_id: account::Id,
  /// The status of the relationship.
  #[serde(rename = "status")]
  pub status: Status,
  /// The name of the bank account's owner.
  #[serde(rename = "account_owner_name")]
  pub account_owner_name: String,
  /// The type of the bank account.
  #[serde(rename = "bank_account_type")]
  pub bank_account_type: BankAccountType,
  /// The (masked) number of the bank account.
  #[serde(rename = "bank_account_number", default)]
  pub bank_account_number: Option<String>,
  /// The routing number of the bank.
  #[serde(rename = "bank_routing_number", default)]
  pub bank_routing_number: Option<String>,
  /// A friendly name for the relationship.
  #[serde(rename = "nickname", default)]
  pub nickname: Option<String>,
  /// The time stamp the relationship was created at.
  #[serde(rename = "created_at")]
  pub created_at: DateTime<Utc>,
  /// The time stamp the relationship was updated at last.
  #[serde(rename = "updated_at", default)]
  pub updated_at: Option<DateTime<Utc>>,
}


/// A request to create an ACH relationship from explicit bank account
/// details.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CreateDetailsReq {
  /// The name of the bank account's owner.
  #[serde(rename = "account_owner_name")]
  pub account_owner_name: String,
  /// The type of the bank account.
  #[serde(rename = "bank_account_type")]
  pub bank_account_type: BankAccountType,
  /// The number of the bank account.
  #[serde(rename = "bank_account_number")]
  pub bank_account_number: String,
  /// The routing number of the bank.
  #[serde(rename = "bank_routing_number")]
  pub bank_routing_number: String,
  /// A friendly name for the relationship.
  #[serde(rename = "nickname", skip_serializing_if = "Option::is_none")]
  pub nickname: Option<String>,
}


/// A request to create an ACH relationship from a Plaid processor
/// token.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CreateProcessorReq {
  /// The processor token obtained from Plaid.
  #[serde(rename = "processor_token")]
  pub processor_token: String,
}


/// A request to create an ACH relationship.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CreateReq {
  /// Establish the relationship from explicit bank account details.
  Details(CreateDetailsReq),
  /// Establish the relationship from a Plaid processor token.
  Processor(CreateProcessorReq),
}

impl From<CreateDetailsReq> for CreateReq {
  #[inline]
  fn from(request: CreateDetailsReq) -> Self {
    Self::Details(request)
  }
}

impl From<CreateProcessorReq> for CreateReq {
  #[inline]
  fn from(request: CreateProcessorReq) -> Self {
    Self::Processor(request)
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/accounts/{account-id}/ach_relationships endpoint.
  pub Get(account::Id),
  Ok => Vec<Relationship>, [
    /// The ACH relationships were retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  fn path(input: &Self::Input) -> Str {
    format!("/v1/accounts/{}/ach_relationships", input.as_simple()).into()
  }
}


Endpoint! {
  /// The representation of a POST request to the
  /// /v1/accounts/{account-id}/ach_relationships endpoint.
  pub Post((account::Id, CreateReq)),
  Ok => Relationship, [
    /// The ACH relationship was created successfully.
    /* 200 */ OK,
  ],
  Err => PostError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
    /// The provided data was invalid or the account already has an
    /// active ACH relationship.
    /* 409 */ CONFLICT => AlreadyExists,
    /// Some data in the request was invalid.
    /* 422 */ UNPROCESSABLE_ENTITY => InvalidInput,
  ]

  #[inline]
  fn method() -> Method {
    Method::POST
  }

  fn path(input: &Self::Input) -> Str {
    format!("/v1/accounts/{}/ach_relationships", input.0.as_simple()).into()
  }

  fn body(input: &Self::Input) -> Result<Option<Bytes>, Self::ConversionError> {
    let json = to_json(&input.1)?;
    let bytes = Bytes::from(json);
    Ok(Some(bytes))
  }
}


EndpointNoParse! {
  /// The representation of a DELETE request to the
  /// /v1/accounts/{account-id}/ach_relationships/{relationship-id}
  /// endpoint.
  pub Delete((account::Id, Id)),
  Ok => (), [
    /// The ACH relationship was deleted successfully.
    /* 204 */ NO_CONTENT,
  ],
  Err => DeleteError, [
    /// No account or ACH relationship was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  #[inline]
  fn method() -> Method {
    Method::DELETE
  }

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v1/accounts/{}/ach_relationships/{}",
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


#[cfg(test)]
mod tests {
  use super::*;

  use serde_json::from_str as from_json;
  use serde_json::to_value;

  use test_log::test;


  /// Check that we can parse the reference ACH relationship object.
  #[test]
  fn parse_reference_relationship() {
    let response = r#"{
  "id": "794c4c0f-cfb0-4365-b5e3-bba33a2bfca4",
  "account_id": "14f9ed4f-de50-4d06-860f-f07b310b8cdc",
  "created_at": "2022-04-14T15:51:14.523349Z",
  "updated_at": "2022-04-14T15:51:14.523349Z",
  "status": "QUEUED",
  "account_owner_name": "John Doe",
  "bank_account_type": "CHECKING",
  "bank_account_number": "32131231abc",
  "bank_routing_number": "121000358",
  "nickname": "Bank of America Checking"
}"#;

    let relationship = from_json::<Relationship>(response).unwrap();
    assert_eq!(
      relationship.id.to_string(),
      "794c4c0f-cfb0-4365-b5e3-bba33a2bfca4"
    );
    assert_eq!(relationship.status, Status::Queued);
    assert_eq!(relationship.bank_account_type, BankAccountType::Checking);
    assert_eq!(
      relationship.nickname.as_deref(),
      Some("Bank of America Checking")
    );
  }

  /// Check that both flavors of creation request serialize to a flat
  /// object.
  #[test]
  fn serialize_create_requests() {
    let request = CreateReq::from(CreateDetailsReq {
      account_owner_name: "John Doe".to_string(),
      bank_account_type: BankAccountType::Savings,
      bank_account_number: "32131231abc".to_string(),
      bank_routing_number: "121000358".to_string(),
      nickname: None,
    });

    let json = to_value(&request).unwrap();
    assert_eq!(json["bank_account_type"], "SAVINGS");
    assert!(!json.as_object().unwrap().contains_key("nickname"));

    let request = CreateReq::from(CreateProcessorReq {
      processor_token: "processor-sandbox-161c86dd".to_string(),
    });

    let json = to_value(&request).unwrap();
    assert_eq!(json["processor_token"], "processor-sandbox-161c86dd");
    assert!(!json.as_object().unwrap().contains_key("bank_account_type"));
  }

  /// Check that an unexpected relationship status maps to the
  /// `Unknown` variant.
  #[test]
  fn parse_unknown_status() {
    let status = from_json::<Status>(r#""SUSPENDED""#).unwrap();
    assert_eq!(status, Status::Unknown);
  }
}
