// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::DateTime;
use chrono::Utc;

use serde::Serialize;
use serde_urlencoded::to_string as to_query;

use crate::api::v1::account::Account;
use crate::api::v1::account::Status;
use crate::util::enum_slice_to_str;
use crate::Str;


/// The sub-objects of an account that can be requested to be included
/// in a listing response.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Entity {
  /// The account holder's contact details.
  #[serde(rename = "contact")]
  Contact,
  /// The account holder's identity details.
  #[serde(rename = "identity")]
  Identity,
  /// The account holder's disclosures.
  #[serde(rename = "disclosures")]
  Disclosures,
  /// The agreements the account holder has signed.
  #[serde(rename = "agreements")]
  Agreements,
  /// The documents the account holder has submitted.
  #[serde(rename = "documents")]
  Documents,
  /// The account holder's trusted contact.
  #[serde(rename = "trusted_contact")]
  TrustedContact,
}


/// The chronological ordering of listed items.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Sort {
  /// Oldest items first.
  #[serde(rename = "asc")]
  Ascending,
  /// Newest items first.
  #[serde(rename = "desc")]
  Descending,
}


/// A GET request to be made to the /v1/accounts endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccountsReq {
  /// Space-delimited tokens to match against an account's account
  /// number, phone number, name, or email address.
  #[serde(rename = "query", skip_serializing_if = "Option::is_none")]
  pub query: Option<String>,
  /// Limit the response to accounts that were created before this
  /// time.
  #[serde(rename = "created_before", skip_serializing_if = "Option::is_none")]
  pub created_before: Option<DateTime<Utc>>,
  /// Limit the response to accounts that were created after this time.
  #[serde(rename = "created_after", skip_serializing_if = "Option::is_none")]
  pub created_after: Option<DateTime<Utc>>,
  /// Limit the response to accounts in one of the given states.
  #[serde(rename = "status", serialize_with = "enum_slice_to_str")]
  pub status: Vec<Status>,
  /// The ordering of accounts in the response, by submission time.
  #[serde(rename = "sort")]
  pub sort: Sort,
  /// The sub-objects to include on each returned account. The listing
  /// endpoint leaves all of them out by default to save space.
  #[serde(rename = "entities", serialize_with = "enum_slice_to_str")]
  pub entities: Vec<Entity>,
}

impl Default for AccountsReq {
  fn default() -> Self {
    Self {
      query: None,
      created_before: None,
      created_after: None,
      status: Vec::new(),
      // The service reports newest accounts first.
      sort: Sort::Descending,
      entities: Vec::new(),
    }
  }
}


Endpoint! {
  /// The representation of a GET request to the /v1/accounts endpoint.
  pub Get(AccountsReq),
  Ok => Vec<Account>, [
    /// The list of accounts was retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, []

  #[inline]
  fn path(_input: &Self::Input) -> Str {
    "/v1/accounts".into()
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


  /// Check that a listing response containing partial account objects
  /// parses successfully.
  #[test]
  fn parse_reference_accounts() {
    let response = r#"[
  {
    "id": "5fc0795e-1f16-40cc-aa90-ede67c39d7a9",
    "account_number": "684486106",
    "status": "ACTIVE",
    "crypto_status": "ACTIVE",
    "kyc_results": {
      "reject": {},
      "accept": {},
      "indeterminate": {},
      "summary": "pass"
    },
    "currency": "USD",
    "last_equity": "0",
    "created_at": "2022-04-14T15:51:14.523349Z",
    "account_type": "trading"
  },
  {
    "id": "0d969814-40d6-4b2b-99ac-2e37427f1ad2",
    "account_number": "682389557",
    "status": "ACTIVE",
    "crypto_status": "ACTIVE",
    "kyc_results": {
      "reject": {},
      "accept": {},
      "indeterminate": {},
      "summary": "pass"
    },
    "currency": "USD",
    "last_equity": "0",
    "created_at": "2022-04-12T17:24:31.30283Z",
    "account_type": "trading"
  }
]"#;

    let accounts = from_json::<<Get as Endpoint>::Output>(response).unwrap();
    assert_eq!(accounts.len(), 2);

    for account in &accounts {
      assert_eq!(account.status, Status::Active);
      assert_eq!(account.contact, None);
      assert_eq!(account.identity, None);
      assert_eq!(account.agreements, None);
    }
  }

  /// Check that the entity selection ends up as a comma separated
  /// list in the query string.
  #[test]
  fn serialize_entities_query() {
    let request = AccountsReq {
      entities: vec![Entity::Identity, Entity::Contact],
      ..Default::default()
    };

    let query = Get::query(&request).unwrap().unwrap();
    assert_eq!(query, "sort=desc&entities=identity%2Ccontact");
  }

  /// Check that an empty request only transmits the sort order.
  #[test]
  fn serialize_default_query() {
    let query = Get::query(&AccountsReq::default()).unwrap().unwrap();
    assert_eq!(query, "sort=desc");
  }
}
