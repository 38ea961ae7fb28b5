// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::NaiveDate;

use http::Method;
use http_endpoint::Bytes;

use num_decimal::Num;

use serde::Serialize;
use serde_json::to_vec as to_json;
use serde_json::Error as JsonError;
use serde_json::Value;

use thiserror::Error;

use crate::api::v1::account;
use crate::api::v1::account::Account;
use crate::api::v1::account::EmploymentStatus;
use crate::api::v1::account::FundingSource;
use crate::api::v1::account::VisaType;
use crate::api::v1::ser::RequestFields as _;
use crate::Str;


/// An update to the contact details of an account holder.
///
/// All members are optional. Unset ones are left untouched by the
/// update.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ContactUpdate {
  /// The user's email address.
  #[serde(rename = "email_address", skip_serializing_if = "Option::is_none")]
  pub email_address: Option<String>,
  /// The user's phone number, including the country code.
  #[serde(rename = "phone_number", skip_serializing_if = "Option::is_none")]
  pub phone_number: Option<String>,
  /// The user's street address lines.
  #[serde(rename = "street_address", skip_serializing_if = "Option::is_none")]
  pub street_address: Option<Vec<String>>,
  /// The user's apartment unit, if any.
  #[serde(rename = "unit", skip_serializing_if = "Option::is_none")]
  pub unit: Option<String>,
  /// The city the user resides in.
  #[serde(rename = "city", skip_serializing_if = "Option::is_none")]
  pub city: Option<String>,
  /// The state the user resides in. Required if `country` is "USA".
  #[serde(rename = "state", skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  /// The user's postal code.
  #[serde(rename = "postal_code", skip_serializing_if = "Option::is_none")]
  pub postal_code: Option<String>,
  /// The country the user resides in.
  #[serde(rename = "country", skip_serializing_if = "Option::is_none")]
  pub country: Option<String>,
}


/// An update to the identity details of an account holder.
///
/// Only a subset of the identity is modifiable after account creation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IdentityUpdate {
  /// The user's first name.
  #[serde(rename = "given_name", skip_serializing_if = "Option::is_none")]
  pub given_name: Option<String>,
  /// The user's middle name.
  #[serde(rename = "middle_name", skip_serializing_if = "Option::is_none")]
  pub middle_name: Option<String>,
  /// The user's last name.
  #[serde(rename = "family_name", skip_serializing_if = "Option::is_none")]
  pub family_name: Option<String>,
  /// The user's visa type, for users residing in the USA.
  #[serde(rename = "visa_type", skip_serializing_if = "Option::is_none")]
  pub visa_type: Option<VisaType>,
  /// The expiration date of the user's visa.
  #[serde(
    rename = "visa_expiration_date",
    skip_serializing_if = "Option::is_none"
  )]
  pub visa_expiration_date: Option<NaiveDate>,
  /// The user's date of departure from the USA.
  #[serde(
    rename = "date_of_departure_from_usa",
    skip_serializing_if = "Option::is_none"
  )]
  pub date_of_departure_from_usa: Option<NaiveDate>,
  /// The user's permanent residence status in the USA.
  #[serde(
    rename = "permanent_resident",
    skip_serializing_if = "Option::is_none"
  )]
  pub permanent_resident: Option<bool>,
  /// How the user will fund the account.
  #[serde(rename = "funding_source", skip_serializing_if = "Option::is_none")]
  pub funding_source: Option<Vec<FundingSource>>,
  /// The minimum of the user's income range.
  #[serde(
    rename = "annual_income_min",
    skip_serializing_if = "Option::is_none"
  )]
  pub annual_income_min: Option<Num>,
  /// The maximum of the user's income range.
  #[serde(
    rename = "annual_income_max",
    skip_serializing_if = "Option::is_none"
  )]
  pub annual_income_max: Option<Num>,
  /// The minimum of the user's liquid net worth range.
  #[serde(
    rename = "liquid_net_worth_min",
    skip_serializing_if = "Option::is_none"
  )]
  pub liquid_net_worth_min: Option<Num>,
  /// The maximum of the user's liquid net worth range.
  #[serde(
    rename = "liquid_net_worth_max",
    skip_serializing_if = "Option::is_none"
  )]
  pub liquid_net_worth_max: Option<Num>,
  /// The minimum of the user's total net worth range.
  #[serde(
    rename = "total_net_worth_min",
    skip_serializing_if = "Option::is_none"
  )]
  pub total_net_worth_min: Option<Num>,
  /// The maximum of the user's total net worth range.
  #[serde(
    rename = "total_net_worth_max",
    skip_serializing_if = "Option::is_none"
  )]
  pub total_net_worth_max: Option<Num>,
}


/// An update to the disclosures of an account holder.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct DisclosuresUpdate {
  /// Whether the user holds a controlling position in a publicly
  /// traded company.
  #[serde(
    rename = "is_control_person",
    skip_serializing_if = "Option::is_none"
  )]
  pub is_control_person: Option<bool>,
  /// Whether the user is affiliated with any exchanges or FINRA.
  #[serde(
    rename = "is_affiliated_exchange_or_finra",
    skip_serializing_if = "Option::is_none"
  )]
  pub is_affiliated_exchange_or_finra: Option<bool>,
  /// Whether the user is politically exposed.
  #[serde(
    rename = "is_politically_exposed",
    skip_serializing_if = "Option::is_none"
  )]
  pub is_politically_exposed: Option<bool>,
  /// Whether a member of the user's immediate family is politically
  /// exposed or holds a control position.
  #[serde(
    rename = "immediate_family_exposed",
    skip_serializing_if = "Option::is_none"
  )]
  pub immediate_family_exposed: Option<bool>,
  /// The employment status of the user.
  #[serde(
    rename = "employment_status",
    skip_serializing_if = "Option::is_none"
  )]
  pub employment_status: Option<EmploymentStatus>,
  /// The name of the user's employer, if any.
  #[serde(rename = "employer_name", skip_serializing_if = "Option::is_none")]
  pub employer_name: Option<String>,
  /// The address of the user's employer, if any.
  #[serde(
    rename = "employer_address",
    skip_serializing_if = "Option::is_none"
  )]
  pub employer_address: Option<String>,
  /// The user's employment position, if any.
  #[serde(
    rename = "employment_position",
    skip_serializing_if = "Option::is_none"
  )]
  pub employment_position: Option<String>,
}


/// An update to the trusted contact of an account holder.
///
/// Unlike at account creation time, no means of contact is required
/// here, because a partial update may touch any subset of the fields.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TrustedContactUpdate {
  /// The first name of the trusted contact.
  #[serde(rename = "given_name", skip_serializing_if = "Option::is_none")]
  pub given_name: Option<String>,
  /// The last name of the trusted contact.
  #[serde(rename = "family_name", skip_serializing_if = "Option::is_none")]
  pub family_name: Option<String>,
  /// The email address of the trusted contact.
  #[serde(rename = "email_address", skip_serializing_if = "Option::is_none")]
  pub email_address: Option<String>,
  /// The phone number of the trusted contact.
  #[serde(rename = "phone_number", skip_serializing_if = "Option::is_none")]
  pub phone_number: Option<String>,
  /// The street address of the trusted contact.
  #[serde(rename = "street_address", skip_serializing_if = "Option::is_none")]
  pub street_address: Option<String>,
  /// The city of the trusted contact.
  #[serde(rename = "city", skip_serializing_if = "Option::is_none")]
  pub city: Option<String>,
  /// The state of the trusted contact.
  #[serde(rename = "state", skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  /// The postal code of the trusted contact.
  #[serde(rename = "postal_code", skip_serializing_if = "Option::is_none")]
  pub postal_code: Option<String>,
  /// The country of the trusted contact.
  #[serde(rename = "country", skip_serializing_if = "Option::is_none")]
  pub country: Option<String>,
}


/// An error encountered while constructing an [`UpdateReq`].
#[derive(Debug, Error)]
pub enum InitError {
  /// The update does not contain a single field to change.
  #[error("the update request must contain at least one field to change")]
  Empty,
  /// The state was not provided for a contact in the USA.
  #[error("the state is required when the country is \"USA\"")]
  MissingState,
  /// The update could not be serialized for validation.
  #[error("failed to serialize the update request")]
  Json(#[from] JsonError),
}


/// A request to update an existing brokerage account.
///
/// Objects of this type are created through [`UpdateReqInit::init`],
/// which rejects updates that would not change anything.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateReq {
  /// The new contact details.
  #[serde(rename = "contact", skip_serializing_if = "Option::is_none")]
  pub contact: Option<ContactUpdate>,
  /// The new identity details.
  #[serde(rename = "identity", skip_serializing_if = "Option::is_none")]
  pub identity: Option<IdentityUpdate>,
  /// The new disclosures.
  #[serde(rename = "disclosures", skip_serializing_if = "Option::is_none")]
  pub disclosures: Option<DisclosuresUpdate>,
  /// The new trusted contact details.
  #[serde(
    rename = "trusted_contact",
    skip_serializing_if = "Option::is_none"
  )]
  pub trusted_contact: Option<TrustedContactUpdate>,
}


/// A helper for initializing [`UpdateReq`] objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateReqInit {
  /// See `UpdateReq::contact`.
  pub contact: Option<ContactUpdate>,
  /// See `UpdateReq::identity`.
  pub identity: Option<IdentityUpdate>,
  /// See `UpdateReq::disclosures`.
  pub disclosures: Option<DisclosuresUpdate>,
  /// See `UpdateReq::trusted_contact`.
  pub trusted_contact: Option<TrustedContactUpdate>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl UpdateReqInit {
  /// Create an [`UpdateReq`] from an `UpdateReqInit`.
  ///
  /// The request is rejected if it contains no field to change, or if
  /// the contact update moves the account to the USA without also
  /// providing a state.
  pub fn init(self) -> Result<UpdateReq, InitError> {
    if let Some(contact) = &self.contact {
      if contact.country.as_deref() == Some("USA") && contact.state.is_none() {
        return Err(InitError::MissingState)
      }
    }

    let request = UpdateReq {
      contact: self.contact,
      identity: self.identity,
      disclosures: self.disclosures,
      trusted_contact: self.trusted_contact,
    };

    // An update request in which every sub-object is unset or empty
    // is rejected by the service, so we catch it locally.
    if request.to_request_fields()? == Value::Null {
      return Err(InitError::Empty)
    }

    Ok(request)
  }
}


Endpoint! {
  /// The representation of a PATCH request to the
  /// /v1/accounts/{account-id} endpoint.
  pub Patch((account::Id, UpdateReq)),
  Ok => Account, [
    /// The account was updated successfully.
    /* 200 */ OK,
  ],
  Err => PatchError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
    /// Some data in the provided request was invalid or missing.
    /* 422 */ UNPROCESSABLE_ENTITY => InvalidInput,
  ]

  #[inline]
  fn method() -> Method {
    Method::PATCH
  }

  fn path(input: &Self::Input) -> Str {
    format!("/v1/accounts/{}", input.0.as_simple()).into()
  }

  fn body(input: &Self::Input) -> Result<Option<Bytes>, Self::ConversionError> {
    let fields = input.1.to_request_fields()?;
    let json = to_json(&fields)?;
    let bytes = Bytes::from(json);
    Ok(Some(bytes))
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use http_endpoint::Endpoint;

  use serde_json::from_slice as value_from_json;
  use serde_json::json;

  use test_log::test;

  use uuid::Uuid;


  /// Check that an update without any field to change is rejected.
  #[test]
  fn reject_empty_update() {
    let result = UpdateReqInit::default().init();
    assert!(matches!(result, Err(InitError::Empty)));
  }

  /// Check that an update consisting only of empty sub-objects is
  /// rejected as well.
  #[test]
  fn reject_update_with_empty_sub_objects() {
    let result = UpdateReqInit {
      contact: Some(ContactUpdate::default()),
      identity: Some(IdentityUpdate::default()),
      disclosures: Some(DisclosuresUpdate::default()),
      trusted_contact: Some(TrustedContactUpdate::default()),
      ..Default::default()
    }
    .init();

    assert!(matches!(result, Err(InitError::Empty)));
  }

  /// Check that a contact update placing the account in the USA
  /// without a state is rejected.
  #[test]
  fn reject_usa_contact_update_without_state() {
    let result = UpdateReqInit {
      contact: Some(ContactUpdate {
        country: Some("USA".to_string()),
        ..Default::default()
      }),
      ..Default::default()
    }
    .init();

    assert!(matches!(result, Err(InitError::MissingState)));
  }

  /// Check that the PATCH body contains only the fields actually
  /// being changed.
  #[test]
  fn patch_body_is_sparse() {
    let request = UpdateReqInit {
      trusted_contact: Some(TrustedContactUpdate {
        given_name: Some("Jane".to_string()),
        ..Default::default()
      }),
      ..Default::default()
    }
    .init()
    .unwrap();

    let id = account::Id(Uuid::new_v4());
    let body = Patch::body(&(id, request)).unwrap().unwrap();
    let value = value_from_json::<Value>(&body).unwrap();
    let expected = json!({
      "trusted_contact": {
        "given_name": "Jane"
      }
    });
    assert_eq!(value, expected);
  }

  /// Check that the endpoint describes a PATCH against the account
  /// path.
  #[test]
  fn endpoint_definition() {
    let id = account::Id(Uuid::new_v4());
    let input = (id, UpdateReq::default());
    assert_eq!(Patch::method(), Method::PATCH);
    assert_eq!(
      Patch::path(&input),
      format!("/v1/accounts/{}", id.as_simple())
    );
  }
}
