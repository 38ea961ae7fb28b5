// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Serialize;
use serde_urlencoded::to_string as to_query;

use crate::api::v1::account;
use crate::api::v1::transfer::Direction;
use crate::api::v1::transfer::Transfer;
use crate::Str;


/// A GET request to be made to the /v1/accounts/{account-id}/transfers
/// endpoint.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TransfersReq {
  /// Limit the response to transfers in the given direction.
  #[serde(rename = "direction", skip_serializing_if = "Option::is_none")]
  pub direction: Option<Direction>,
  /// The maximum number of transfers to return in the response.
  #[serde(rename = "limit", skip_serializing_if = "Option::is_none")]
  pub limit: Option<usize>,
  /// The number of transfers to skip before reporting any.
  #[serde(rename = "offset", skip_serializing_if = "Option::is_none")]
  pub offset: Option<usize>,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/accounts/{account-id}/transfers endpoint.
  pub Get((account::Id, TransfersReq)),
  Ok => Vec<Transfer>, [
    /// The transfers were retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  fn path(input: &Self::Input) -> Str {
    format!("/v1/accounts/{}/transfers", input.0.as_simple()).into()
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

  use crate::api::v1::transfer::Status;
  use crate::api::v1::transfer::Type;


  /// Check that we can parse a transfer listing.
  #[test]
  fn parse_reference_transfers() {
    let response = r#"[
  {
    "id": "be3c368a-4c7c-4384-808e-f02c9f5a8afe",
    "account_id": "0d969814-40d6-4b2b-99ac-2e37427f1ad2",
    "type": "ach",
    "status": "QUEUED",
    "amount": "100",
    "direction": "OUTGOING",
    "relationship_id": "0f08c6bc-8e9f-463d-a73f-fd047fdb5e94",
    "created_at": "2021-05-05T07:55:31.190788Z"
  }
]"#;

    let transfers = from_json::<<Get as Endpoint>::Output>(response).unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].type_, Type::Ach);
    assert_eq!(transfers[0].status, Status::Queued);
    assert_eq!(transfers[0].amount, Num::from(100));
  }

  /// Check that only set filters end up in the query string.
  #[test]
  fn serialize_query() {
    let account_id = account::Id(Uuid::new_v4());
    let request = TransfersReq {
      direction: Some(Direction::Incoming),
      limit: Some(10),
      ..Default::default()
    };

    let query = Get::query(&(account_id, request)).unwrap().unwrap();
    assert_eq!(query, "direction=INCOMING&limit=10");

    let query = Get::query(&(account_id, TransfersReq::default()))
      .unwrap()
      .unwrap();
    assert_eq!(query, "");
  }
}
