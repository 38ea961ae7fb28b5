// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::NaiveDate;

use http::Method;
use http_endpoint::Bytes;

use serde::Serialize;
use serde_json::to_vec as to_json;
use serde_json::Value;
use serde_urlencoded::to_string as to_query;

use thiserror::Error;

use crate::api::v1::account;
use crate::api::v1::document::DocumentType;
use crate::api::v1::document::TradeDocument;
use crate::api::v1::document::TradeDocumentType;
use crate::api::v1::document::UploadMimeType;
use crate::api::v1::document::UploadSubType;
use crate::Str;


/// An error encountered while constructing a document request.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum InitError {
  /// The start date of a date range filter lies after its end date.
  #[error("the start date lies after the end date")]
  InvertedDateRange,
  /// A W-8 BEN form was provided to the generic upload request.
  #[error("W-8 BEN forms have to be uploaded via a dedicated W-8 BEN request")]
  ReservedDocumentType,
  /// Neither raw content nor structured content was provided.
  #[error("no document content was provided")]
  MissingContent,
  /// Both raw content and structured content were provided.
  #[error("only one of raw and structured document content may be provided")]
  ConflictingContent,
  /// No media type was provided for the raw document content.
  #[error("no media type was provided for the document content")]
  MissingMimeType,
  /// Structured content was provided with a non-JSON media type.
  #[error("structured document content requires the JSON media type")]
  InvalidMimeType,
}


/// A GET request to be made to the /v1/accounts/{account-id}/documents
/// endpoint.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct DocumentsReq {
  /// The response will contain only documents dated on or after this
  /// date.
  #[serde(rename = "start", skip_serializing_if = "Option::is_none")]
  pub start: Option<NaiveDate>,
  /// The response will contain only documents dated on or before this
  /// date.
  #[serde(rename = "end", skip_serializing_if = "Option::is_none")]
  pub end: Option<NaiveDate>,
  /// The type of documents to retrieve.
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub type_: Option<TradeDocumentType>,
}


/// A helper for initializing [`DocumentsReq`] objects.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DocumentsReqInit {
  /// See `DocumentsReq::start`.
  pub start: Option<NaiveDate>,
  /// See `DocumentsReq::end`.
  pub end: Option<NaiveDate>,
  /// See `DocumentsReq::type_`.
  pub type_: Option<TradeDocumentType>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl DocumentsReqInit {
  /// Create a [`DocumentsReq`] from a `DocumentsReqInit`.
  ///
  /// If both ends of the date range are given, the start must not lie
  /// after the end.
  pub fn init(self) -> Result<DocumentsReq, InitError> {
    if let (Some(start), Some(end)) = (self.start, self.end) {
      if start > end {
        return Err(InitError::InvertedDateRange)
      }
    }

    Ok(DocumentsReq {
      start: self.start,
      end: self.end,
      type_: self.type_,
    })
  }
}


/// A request to upload a document to an account.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UploadReq {
  /// The type of the document being uploaded.
  #[serde(rename = "document_type")]
  pub document_type: DocumentType,
  /// The sub-type of the document being uploaded.
  #[serde(
    rename = "document_sub_type",
    skip_serializing_if = "Option::is_none"
  )]
  pub document_sub_type: Option<UploadSubType>,
  /// The base64 encoded content of the document.
  #[serde(rename = "content")]
  pub content: String,
  /// The media type of the document's content.
  #[serde(rename = "mime_type")]
  pub mime_type: UploadMimeType,
}


/// A helper for initializing [`UploadReq`] objects.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UploadReqInit {
  /// See `UploadReq::document_sub_type`.
  pub document_sub_type: Option<UploadSubType>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl UploadReqInit {
  /// Create an [`UploadReq`] from an `UploadReqInit`.
  ///
  /// W-8 BEN forms are rejected here and have to be uploaded via an
  /// [`W8BenReq`] instead.
  pub fn init<S>(
    self,
    document_type: DocumentType,
    content: S,
    mime_type: UploadMimeType,
  ) -> Result<UploadReq, InitError>
  where
    S: Into<String>,
  {
    if document_type == DocumentType::W8Ben {
      return Err(InitError::ReservedDocumentType)
    }
    if self.document_sub_type == Some(UploadSubType::FormW8Ben) {
      return Err(InitError::ReservedDocumentType)
    }

    Ok(UploadReq {
      document_type,
      document_sub_type: self.document_sub_type,
      content: content.into(),
      mime_type,
    })
  }
}


/// A request to upload a W-8 BEN form to an account.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct W8BenReq {
  /// The type of the document being uploaded.
  ///
  /// Always [`DocumentType::W8Ben`].
  #[serde(rename = "document_type")]
  pub document_type: DocumentType,
  /// The sub-type of the document being uploaded.
  ///
  /// Always [`UploadSubType::FormW8Ben`].
  #[serde(rename = "document_sub_type")]
  pub document_sub_type: UploadSubType,
  /// The base64 encoded content of the form.
  #[serde(rename = "content", skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
  /// The structured content of the form.
  #[serde(rename = "content_data", skip_serializing_if = "Option::is_none")]
  pub content_data: Option<Value>,
  /// The media type of the form's content.
  #[serde(rename = "mime_type")]
  pub mime_type: UploadMimeType,
}


/// A helper for initializing [`W8BenReq`] objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct W8BenReqInit {
  /// See `W8BenReq::content`.
  pub content: Option<String>,
  /// See `W8BenReq::content_data`.
  pub content_data: Option<Value>,
  /// See `W8BenReq::mime_type`.
  ///
  /// Required when raw content is provided. When structured content is
  /// provided it defaults to (and must be) the JSON media type.
  pub mime_type: Option<UploadMimeType>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl W8BenReqInit {
  /// Create a [`W8BenReq`] from a `W8BenReqInit`.
  ///
  /// Exactly one of raw and structured content has to be provided.
  pub fn init(self) -> Result<W8BenReq, InitError> {
    let mime_type = match (&self.content, &self.content_data) {
      (None, None) => return Err(InitError::MissingContent),
      (Some(..), Some(..)) => return Err(InitError::ConflictingContent),
      (Some(..), None) => self.mime_type.ok_or(InitError::MissingMimeType)?,
      (None, Some(..)) => match self.mime_type {
        None | Some(UploadMimeType::Json) => UploadMimeType::Json,
        Some(..) => return Err(InitError::InvalidMimeType),
      },
    };

    Ok(W8BenReq {
      document_type: DocumentType::W8Ben,
      document_sub_type: UploadSubType::FormW8Ben,
      content: self.content,
      content_data: self.content_data,
      mime_type,
    })
  }
}


/// A single document upload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Upload {
  /// An upload of a regular document.
  Document(UploadReq),
  /// An upload of a W-8 BEN form.
  W8Ben(W8BenReq),
}

impl From<UploadReq> for Upload {
  #[inline]
  fn from(request: UploadReq) -> Self {
    Self::Document(request)
  }
}

impl From<W8BenReq> for Upload {
  #[inline]
  fn from(request: W8BenReq) -> Self {
    Self::W8Ben(request)
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/accounts/{account-id}/documents endpoint.
  pub Get((account::Id, DocumentsReq)),
  Ok => Vec<TradeDocument>, [
    /// The documents were retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  fn path(input: &Self::Input) -> Str {
    format!("/v1/accounts/{}/documents", input.0.as_simple()).into()
  }

  fn query(input: &Self::Input) -> Result<Option<Str>, Self::ConversionError> {
    Ok(Some(to_query(&input.1)?.into()))
  }
}


EndpointNoParse! {
  /// The representation of a POST request to the
  /// /v1/accounts/{account-id}/documents/upload endpoint.
  pub Post((account::Id, Vec<Upload>)),
  Ok => (), [
    /// The documents were accepted for processing.
    /* 202 */ ACCEPTED,
  ],
  Err => PostError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
    /// One of the provided documents was invalid.
    /* 422 */ UNPROCESSABLE_ENTITY => InvalidInput,
  ]

  #[inline]
  fn method() -> Method {
    Method::POST
  }

  fn path(input: &Self::Input) -> Str {
    format!("/v1/accounts/{}/documents/upload", input.0.as_simple()).into()
  }

  fn body(input: &Self::Input) -> Result<Option<Bytes>, Self::ConversionError> {
    let json = to_json(&input.1)?;
    let bytes = Bytes::from(json);
    Ok(Some(bytes))
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

  use http_endpoint::Endpoint;

  use serde_json::json;
  use serde_json::to_value;

  use test_log::test;

  use uuid::Uuid;


  /// Check that an inverted date range is refused.
  #[test]
  fn reject_inverted_date_range() {
    let result = DocumentsReqInit {
      start: Some(NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()),
      end: Some(NaiveDate::from_ymd_opt(2022, 2, 1).unwrap()),
      ..Default::default()
    }
    .init();
    assert_eq!(result.unwrap_err(), InitError::InvertedDateRange);

    // A range with both ends on the same day is valid.
    let request = DocumentsReqInit {
      start: Some(NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()),
      end: Some(NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()),
      ..Default::default()
    }
    .init()
    .unwrap();
    assert_eq!(request.start, request.end);
  }

  /// Check that W-8 BEN forms are refused by the generic upload
  /// request.
  #[test]
  fn reject_w8ben_via_generic_upload() {
    let result = UploadReqInit::default().init(
      DocumentType::W8Ben,
      "QWxwYWNh",
      UploadMimeType::Pdf,
    );
    assert_eq!(result.unwrap_err(), InitError::ReservedDocumentType);

    let result = UploadReqInit {
      document_sub_type: Some(UploadSubType::FormW8Ben),
      ..Default::default()
    }
    .init(
      DocumentType::IdentityVerification,
      "QWxwYWNh",
      UploadMimeType::Pdf,
    );
    assert_eq!(result.unwrap_err(), InitError::ReservedDocumentType);
  }

  /// Check that a W-8 BEN request requires exactly one form of
  /// content.
  #[test]
  fn w8ben_content_is_mutually_exclusive() {
    let result = W8BenReqInit::default().init();
    assert_eq!(result.unwrap_err(), InitError::MissingContent);

    let result = W8BenReqInit {
      content: Some("QWxwYWNh".to_string()),
      content_data: Some(json!({"country_citizen": "Germany"})),
      ..Default::default()
    }
    .init();
    assert_eq!(result.unwrap_err(), InitError::ConflictingContent);
  }

  /// Check that structured W-8 BEN content implies the JSON media
  /// type.
  #[test]
  fn w8ben_structured_content_is_json() {
    let request = W8BenReqInit {
      content_data: Some(json!({"country_citizen": "Germany"})),
      ..Default::default()
    }
    .init()
    .unwrap();
    assert_eq!(request.mime_type, UploadMimeType::Json);
    assert_eq!(request.document_type, DocumentType::W8Ben);
    assert_eq!(request.document_sub_type, UploadSubType::FormW8Ben);

    let result = W8BenReqInit {
      content_data: Some(json!({"country_citizen": "Germany"})),
      mime_type: Some(UploadMimeType::Pdf),
      ..Default::default()
    }
    .init();
    assert_eq!(result.unwrap_err(), InitError::InvalidMimeType);
  }

  /// Check that raw W-8 BEN content requires an explicit media type.
  #[test]
  fn w8ben_raw_content_requires_mime_type() {
    let result = W8BenReqInit {
      content: Some("QWxwYWNh".to_string()),
      ..Default::default()
    }
    .init();
    assert_eq!(result.unwrap_err(), InitError::MissingMimeType);
  }

  /// Check that uploads serialize as a flat array of documents.
  #[test]
  fn serialize_uploads() {
    let upload = UploadReqInit {
      document_sub_type: Some(UploadSubType::Passport),
      ..Default::default()
    }
    .init(
      DocumentType::IdentityVerification,
      "QWxwYWNh",
      UploadMimeType::Png,
    )
    .unwrap();

    let uploads = vec![Upload::from(upload)];
    let json = to_value(&uploads).unwrap();
    assert_eq!(
      json,
      json!([{
        "document_type": "identity_verification",
        "document_sub_type": "passport",
        "content": "QWxwYWNh",
        "mime_type": "image/png"
      }])
    );
  }

  /// Check that the document endpoints are wired up properly.
  #[test]
  fn endpoint_definitions() {
    let account_id = account::Id(Uuid::new_v4());
    let request = DocumentsReqInit::default().init().unwrap();
    let path = Get::path(&(account_id, request));
    assert!(path.ends_with("/documents"), "{path}");

    assert_eq!(Post::method(), Method::POST);
    let path = Post::path(&(account_id, Vec::new()));
    assert!(path.ends_with("/documents/upload"), "{path}");
  }
}
