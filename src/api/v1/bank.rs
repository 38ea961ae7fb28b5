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

use thiserror::Error;

use uuid::Uuid;

use crate::api::v1::account;
use crate::Str;


/// An ID uniquely identifying a recipient bank.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Id(pub Uuid);

impl Deref for Id {
  type Target = Uuid;

  #[inline]
  fn deref(&self) -> &Self::Target {
    &self.0
  }
}


/// The scheme identifying a bank.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum IdentifierType {
  /// An ABA routing number, used for domestic banks.
  #[serde(rename = "ABA")]
  Aba,
  /// A BIC code, used for international banks.
  #[serde(rename = "BIC")]
  Bic,
}


/// The status of a recipient bank.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[non_exhaustive]
pub enum Status {
  /// The bank is queued for processing.
  #[serde(rename = "QUEUED")]
  Queued,
  /// The bank has been sent to the clearing broker.
  #[serde(rename = "SENT_TO_CLEARING")]
  SentToClearing,
  /// The bank has been approved and can receive transfers.
  #[serde(rename = "APPROVED")]
  Approved,
  /// The bank relationship has been canceled.
  #[serde(rename = "CANCELED")]
  Canceled,
  /// Any other status that we have not accounted for.
  ///
  /// Note that having any such status should be considered a bug.
  #[doc(hidden)]
  #[serde(other)]
  Unknown,
}


/// A bank registered as a wire transfer recipient for an account.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[non_exhaustive]
pub struct Bank {
  /// The bank's ID.
  #[serde(rename = "id")]
  pub id: Id,
  /// The ID of the brokerage account the bank belongs to.
  #[serde(rename = "account_id")]
  pub account_id: account::Id,
  /// The name of the bank.
  #[serde(rename = "name")]
  pub name: String,
  /// The status of the bank.
  #[serde(rename = "status")]
  pub status: Status,
  /// The country the bank is located in. Only present for
  /// international banks.
  #[serde(rename = "country", default)]
  pub country: Option<String>,
  /// The state or province the bank is located in. Only present for
  /// international banks.
  #[serde(rename = "state_province", default)]
  pub state_province: Option<String>,
  /// The postal code of the bank's location. Only present for
  /// international banks.
  #[serde(rename = "postal_code", default)]
  pub postal_code: Option<String>,
  /// The city the bank is located in. Only present for international
  /// banks.
  #[serde(rename = "city", default)]
  pub city: Option<String>,
  /// The street address of the bank. Only present for international
  /// banks.
  #[serde(rename = "street_address", default)]
  pub street_address: Option<String>,
  /// The number of the bank account to wire funds to.
  #[serde(rename = "account_number")]
  pub account_number: String,
  /// The code identifying the bank.
  #[serde(rename = "bank_code")]
  pub bank_code: String,
  /// The scheme of the bank code.
  #[serde(rename = "bank_code_type")]
  pub bank_code_type: IdentifierType,
  /// The time stamp the bank was registered at.
  #[serde(rename = "created_at")]
  pub created_at: DateTime<Utc>,
  /// The time stamp the bank was updated at last.
  #[serde(rename = "updated_at", default)]
  pub updated_at: Option<DateTime<Utc>>,
}


/// An error encountered while constructing a [`CreateReq`].
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum InitError {
  /// An international bank was provided without its full address.
  #[error("international banks require the full bank address to be provided")]
  MissingInternationalFields,
  /// Address details were provided for a domestic bank.
  #[error("domestic banks must not come with international address details")]
  UnexpectedInternationalFields,
}


/// A request to register a recipient bank with an account.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CreateReq {
  /// The name of the bank.
  #[serde(rename = "name")]
  pub name: String,
  /// The scheme of the bank code.
  #[serde(rename = "bank_code_type")]
  pub bank_code_type: IdentifierType,
  /// The code identifying the bank.
  #[serde(rename = "bank_code")]
  pub bank_code: String,
  /// The number of the bank account to wire funds to.
  #[serde(rename = "account_number")]
  pub account_number: String,
  /// The country the bank is located in.
  #[serde(rename = "country", skip_serializing_if = "Option::is_none")]
  pub country: Option<String>,
  /// The state or province the bank is located in.
  #[serde(rename = "state_province", skip_serializing_if = "Option::is_none")]
  pub state_province: Option<String>,
  /// The postal code of the bank's location.
  #[serde(rename = "postal_code", skip_serializing_if = "Option::is_none")]
  pub postal_code: Option<String>,
  /// The city the bank is located in.
  #[serde(rename = "city", skip_serializing_if = "Option::is_none")]
  pub city: Option<String>,
  /// The street address of the bank.
  #[serde(rename = "street_address", skip_serializing_if = "Option::is_none")]
  pub street_address: Option<String>,
}


/// A helper for initializing [`CreateReq`] objects.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateReqInit {
  /// See `CreateReq::country`.
  pub country: Option<String>,
  /// See `CreateReq::state_province`.
  pub state_province: Option<String>,
  /// See `CreateReq::postal_code`.
  pub postal_code: Option<String>,
  /// See `CreateReq::city`.
  pub city: Option<String>,
  /// See `CreateReq::street_address`.
  pub street_address: Option<String>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl CreateReqInit {
  /// Create a [`CreateReq`] from a `CreateReqInit`.
  ///
  /// International banks (identified by a BIC code) require the full
  /// bank address, while domestic banks (identified by an ABA routing
  /// number) must not come with one.
  pub fn init<S>(
    self,
    name: S,
    bank_code_type: IdentifierType,
    bank_code: S,
    account_number: S,
  ) -> Result<CreateReq, InitError>
  where
    S: Into<String>,
  {
    let international = [
      &self.country,
      &self.state_province,
      &self.postal_code,
      &self.city,
      &self.street_address,
    ];

    match bank_code_type {
      IdentifierType::Bic => {
        if international.iter().any(|field| field.is_none()) {
          return Err(InitError::MissingInternationalFields)
        }
      },
      IdentifierType::Aba => {
        if international.iter().any(|field| field.is_some()) {
          return Err(InitError::UnexpectedInternationalFields)
        }
      },
    }

    Ok(CreateReq {
      name: name.into(),
      bank_code_type,
      bank_code: bank_code.into(),
      account_number: account_number.into(),
      country: self.country,
      state_province: self.state_province,
      postal_code: self.postal_code,
      city: self.city,
      street_address: self.street_address,
    })
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/accounts/{account-id}/recipient_banks endpoint.
  pub Get(account::Id),
  Ok => Vec<Bank>, [
    /// The recipient banks were retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  fn path(input: &Self::Input) -> Str {
    format!("/v1/accounts/{}/recipient_banks", input.as_simple()).into()
  }
}


Endpoint! {
  /// The representation of a POST request to the
  /// /v1/accounts/{account-id}/recipient_banks endpoint.
  pub Post((account::Id, CreateReq)),
  Ok => Bank, [
    /// The recipient bank was registered successfully.
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
    format!("/v1/accounts/{}/recipient_banks", input.0.as_simple()).into()
  }

  fn body(input: &Self::Input) -> Result<Option<Bytes>, Self::ConversionError> {
    let json = to_json(&input.1)?;
    let bytes = Bytes::from(json);
    Ok(Some(bytes))
  }
}


EndpointNoParse! {
  /// The representation of a DELETE request to the
  /// /v1/accounts/{account-id}/recipient_banks/{bank-id} endpoint.
  pub Delete((account::Id, Id)),
  Ok => (), [
    /// The recipient bank was unregistered successfully.
    /* 204 */ NO_CONTENT,
  ],
  Err => DeleteError, [
    /// No account or recipient bank was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  #[inline]
  fn method() -> Method {
    Method::DELETE
  }

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v1/accounts/{}/recipient_banks/{}",
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
