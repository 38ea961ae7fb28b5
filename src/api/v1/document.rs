// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ops::Deref;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use serde::Deserialize;
use serde::Serialize;

use uuid::Uuid;

use crate::api::v1::account;
use crate::Str;


/// An ID uniquely identifying a document.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Id(pub Uuid);

impl Deref for Id {
  type Target = Uuid;

  #[inline]
  fn deref(&self) -> &Self::Target {
    &self.0
  }
}


/// The type of a document owned by an account.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum DocumentType {
  /// A document verifying the account holder's identity.
  #[serde(rename = "identity_verification")]
  IdentityVerification,
  /// A document verifying the account holder's address.
  #[serde(rename = "address_verification")]
  AddressVerification,
  /// A document verifying the account holder's date of birth.
  #[serde(rename = "date_of_birth_verification")]
  DateOfBirthVerification,
  /// A document verifying the account holder's tax ID.
  #[serde(rename = "tax_id_verification")]
  TaxIdVerification,
  /// A letter approving the account.
  #[serde(rename = "account_approval_letter")]
  AccountApprovalLetter,
  /// A limited trading authorization document.
  #[serde(rename = "limited_trading_authorization")]
  LimitedTradingAuthorization,
  /// A W-8 BEN tax form.
  #[serde(rename = "w8ben")]
  W8Ben,
  /// Any other document type that we have not accounted for.
  ///
  /// Note that having any such type should be considered a bug.
  #[doc(hidden)]
  #[serde(other, rename(serialize = "unknown"))]
  Unknown,
}


/// The media type of an uploaded document's content.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum UploadMimeType {
  /// A PDF file.
  #[serde(rename = "application/pdf")]
  Pdf,
  /// A PNG image.
  #[serde(rename = "image/png")]
  Png,
  /// A JPEG image.
  #[serde(rename = "image/jpeg")]
  Jpeg,
  /// A JSON document.
  #[serde(rename = "application/json")]
  Json,
}


/// The sub-type of an uploaded document.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum UploadSubType {
  /// The initial account application.
  #[serde(rename = "Account Application")]
  AccountApplication,
  /// A W-8 BEN tax form.
  #[serde(rename = "Form W-8BEN")]
  FormW8Ben,
  /// A passport used for identity verification.
  #[serde(rename = "passport")]
  Passport,
}


/// A document attached to a brokerage account.
///
/// The same shape is used both when reporting documents as part of an
/// account object and when providing documents at account creation
/// time, which is why most members are optional.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AccountDocument {
  /// The document's ID.
  ///
  /// Only reported by the service, never provided by the client.
  #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
  pub id: Option<Id>,
  /// The type of the document.
  #[serde(rename = "document_type")]
  pub document_type: DocumentType,
  /// The sub-type of the document.
  #[serde(
    rename = "document_sub_type",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub document_sub_type: Option<UploadSubType>,
  /// The base64 encoded content of the document.
  #[serde(rename = "content", default, skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
  /// The media type of the document's content.
  #[serde(rename = "mime_type", default, skip_serializing_if = "Option::is_none")]
  pub mime_type: Option<UploadMimeType>,
  /// The time stamp the document was created at.
  #[serde(
    rename = "created_at",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub created_at: Option<DateTime<Utc>>,
}


/// The type of a trade related document generated for an account.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum TradeDocumentType {
  /// A monthly account statement.
  #[serde(rename = "account_statement")]
  AccountStatement,
  /// A trade confirmation.
  #[serde(rename = "trade_confirmation")]
  TradeConfirmation,
  /// A trade confirmation in JSON format.
  #[serde(rename = "trade_confirmation_json")]
  TradeConfirmationJson,
  /// A tax statement.
  #[serde(rename = "tax_statement")]
  TaxStatement,
  /// The account application.
  #[serde(rename = "account_application")]
  AccountApplication,
  /// Form 1099 B details.
  #[serde(rename = "tax_1099_b_details")]
  Tax1099BDetails,
  /// Form 1099 B.
  #[serde(rename = "tax_1099_b_form")]
  Tax1099BForm,
  /// Form 1099 DIV details.
  #[serde(rename = "tax_1099_div_details")]
  Tax1099DivDetails,
  /// Form 1099 DIV.
  #[serde(rename = "tax_1099_div_form")]
  Tax1099DivForm,
  /// Form 1099 INT details.
  #[serde(rename = "tax_1099_int_details")]
  Tax1099IntDetails,
  /// Form 1099 INT.
  #[serde(rename = "tax_1099_int_form")]
  Tax1099IntForm,
  /// A W-8 tax form.
  #[serde(rename = "tax_w8")]
  TaxW8,
  /// Any other document type that we have not accounted for.
  ///
  /// Note that having any such type should be considered a bug.
  #[doc(hidden)]
  #[serde(other, rename(serialize = "unknown"))]
  Unknown,
}


/// The sub-type of a trade related document.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum TradeDocumentSubType {
  /// A consolidated 1099 form.
  #[serde(rename = "1099-Comp")]
  Form1099Compound,
  /// A 1042-S form.
  #[serde(rename = "1042-S")]
  Form1042S,
  /// A 480.6 form.
  #[serde(rename = "480.6")]
  Form480_6,
  /// A courtesy statement.
  #[serde(rename = "courtesy_statement")]
  CourtesyStatement,
  /// Any other document sub-type that we have not accounted for.
  ///
  /// Note that having any such sub-type should be considered a bug.
  #[doc(hidden)]
  #[serde(other, rename(serialize = "unknown"))]
  Unknown,
}


/// A trade related document generated for an account.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[non_exhaustive]
pub struct TradeDocument {
  /// The document's ID.
  #[serde(rename = "id")]
  pub id: Id,
  /// The name of the document.
  #[serde(rename = "name")]
  pub name: String,
  /// The type of the document.
  #[serde(rename = "type")]
  pub type_: TradeDocumentType,
  /// An optional qualifier of the document type.
  #[serde(rename = "sub_type", default)]
  pub sub_type: Option<TradeDocumentSubType>,
  /// The date of the document.
  #[serde(rename = "date")]
  pub date: NaiveDate,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/accounts/{account-id}/documents/{document-id} endpoint.
  pub Get((account::Id, Id)),
  Ok => TradeDocument, [
    /// The document was retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, [
    /// No account or document was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v1/accounts/{}/documents/{}",
      input.0.as_simple(),
      input.1.as_simple()
    )
    .into()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use serde_json::from_str as from_json;
  use serde_json::to_value;

  use test_log::test;


  /// Check that we can parse the reference trade document object.
  #[test]
  fn parse_reference_trade_document() {
    let response = r#"{
  "id": "1b560b0f-9efd-44b4-8004-dfd520c7cdc0",
  "name": "",
  "type": "account_statement",
  "sub_type": null,
  "date": "2022-02-27"
}"#;

    let document = from_json::<TradeDocument>(response).unwrap();
    assert_eq!(
      document.id.to_string(),
      "1b560b0f-9efd-44b4-8004-dfd520c7cdc0"
    );
    assert_eq!(document.type_, TradeDocumentType::AccountStatement);
    assert_eq!(document.sub_type, None);
    assert_eq!(
      document.date,
      NaiveDate::from_ymd_opt(2022, 2, 27).unwrap()
    );
  }

  /// Check that we can parse a document as reported inside an account
  /// object.
  #[test]
  fn parse_account_document() {
    let response = r#"{
  "document_type": "identity_verification",
  "document_sub_type": "passport",
  "id": "bb6de14c-9393-4b6c-8e93-c6724ac7b703",
  "content": "https://example.com/not-a-real-url",
  "created_at": "2019-09-30T23:55:31.185998Z"
}"#;

    let document = from_json::<AccountDocument>(response).unwrap();
    assert_eq!(document.document_type, DocumentType::IdentityVerification);
    assert_eq!(document.document_sub_type, Some(UploadSubType::Passport));
    assert!(document.id.is_some());
    assert!(document.created_at.is_some());
  }

  /// Check that absent optional members are skipped when serializing a
  /// document.
  #[test]
  fn serialize_sparse_account_document() {
    let document = AccountDocument {
      id: None,
      document_type: DocumentType::AddressVerification,
      document_sub_type: None,
      content: Some("QWxwYWNh".to_string()),
      mime_type: Some(UploadMimeType::Pdf),
      created_at: None,
    };

    let json = to_value(&document).unwrap();
    let object = json.as_object().unwrap();
    assert!(!object.contains_key("id"));
    assert!(!object.contains_key("document_sub_type"));
    assert!(!object.contains_key("created_at"));
    assert_eq!(json["document_type"], "address_verification");
    assert_eq!(json["mime_type"], "application/pdf");
  }
}
