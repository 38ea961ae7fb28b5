// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ops::Deref;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use http::Method;
use http_endpoint::Bytes;

use num_decimal::Num;

use serde::Deserialize;
use serde::Serialize;
use serde_json::to_vec as to_json;

use thiserror::Error;

use uuid::Uuid;

use crate::api::v1::document::AccountDocument;
use crate::Str;


/// An ID uniquely identifying a brokerage account.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Id(pub Uuid);

impl Deref for Id {
  type Target = Uuid;

  #[inline]
  fn deref(&self) -> &Self::Target {
    &self.0
  }
}


/// An enumeration of the various states an account can be in.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum Status {
  /// The account is onboarding.
  #[serde(rename = "ONBOARDING")]
  Onboarding,
  /// The account application submission failed.
  #[serde(rename = "SUBMISSION_FAILED")]
  SubmissionFailed,
  /// The account application has been submitted for review.
  #[serde(rename = "SUBMITTED")]
  Submitted,
  /// The account information is being updated.
  #[serde(rename = "ACCOUNT_UPDATED")]
  AccountUpdated,
  /// The final account approval is pending.
  #[serde(rename = "APPROVAL_PENDING")]
  ApprovalPending,
  /// The account application has been approved but the account is not
  /// yet active.
  #[serde(rename = "APPROVED")]
  Approved,
  /// The account is active for trading.
  #[serde(rename = "ACTIVE")]
  Active,
  /// The account application was rejected.
  #[serde(rename = "REJECTED")]
  Rejected,
  /// The account has been disabled after being active.
  #[serde(rename = "DISABLED")]
  Disabled,
  /// The account has been closed.
  #[serde(rename = "ACCOUNT_CLOSED")]
  AccountClosed,
  /// The account application has been edited.
  #[serde(rename = "EDITED")]
  Edited,
  /// The account is not active.
  #[serde(rename = "INACTIVE")]
  Inactive,
  /// Any other account status that we have not accounted for.
  ///
  /// Note that having any such status should be considered a bug.
  #[doc(hidden)]
  #[serde(other, rename(serialize = "unknown"))]
  Unknown,
}


/// The type of a tax identification number.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum TaxIdType {
  /// A United States Social Security Number.
  #[serde(rename = "USA_SSN")]
  UsaSsn,
  /// An Australian Tax File Number.
  #[serde(rename = "AUS_TFN")]
  AusTfn,
  /// A Brazilian Cadastro de Pessoas Físicas.
  #[serde(rename = "BRA_CPF")]
  BraCpf,
  /// A German tax identification number.
  #[serde(rename = "DEU_TAX_ID")]
  DeuTaxId,
  /// A British National Insurance Number.
  #[serde(rename = "GBR_NINO")]
  GbrNino,
  /// An Indian Permanent Account Number.
  #[serde(rename = "IND_PAN")]
  IndPan,
  /// A Japanese tax identification number.
  #[serde(rename = "JPN_TAX_ID")]
  JpnTaxId,
  /// A Mexican Registro Federal de Contribuyentes.
  #[serde(rename = "MEX_RFC")]
  MexRfc,
  /// A Singaporean National Registration Identity Card number.
  #[serde(rename = "SGP_NRIC")]
  SgpNric,
  /// A Swedish tax identification number.
  #[serde(rename = "SWE_TAX_ID")]
  SweTaxId,
  /// The tax identification scheme was not specified.
  #[serde(rename = "NOT_SPECIFIED")]
  NotSpecified,
  /// Any other tax identification scheme that we have not accounted
  /// for.
  #[doc(hidden)]
  #[serde(other, rename(serialize = "unknown"))]
  Unknown,
}


/// The visa type of a user residing in the USA.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum VisaType {
  #[serde(rename = "B1")]
  B1,
  #[serde(rename = "B2")]
  B2,
  #[serde(rename = "DACA")]
  Daca,
  #[serde(rename = "E1")]
  E1,
  #[serde(rename = "E2")]
  E2,
  #[serde(rename = "E3")]
  E3,
  #[serde(rename = "F1")]
  F1,
  #[serde(rename = "G4")]
  G4,
  #[serde(rename = "H1B")]
  H1B,
  #[serde(rename = "J1")]
  J1,
  #[serde(rename = "L1")]
  L1,
  #[serde(rename = "O1")]
  O1,
  #[serde(rename = "TN1")]
  Tn1,
  /// Any visa type not enumerated separately.
  #[serde(rename = "OTHER")]
  Other,
  #[doc(hidden)]
  #[serde(other, rename(serialize = "unknown"))]
  Unknown,
}


/// The source of funds for an account.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum FundingSource {
  /// Income from employment.
  #[serde(rename = "employment_income")]
  EmploymentIncome,
  /// Proceeds from investments.
  #[serde(rename = "investments")]
  Investments,
  /// An inheritance.
  #[serde(rename = "inheritance")]
  Inheritance,
  /// Income from a business.
  #[serde(rename = "business_income")]
  BusinessIncome,
  /// Personal savings.
  #[serde(rename = "savings")]
  Savings,
  /// Funds provided by family.
  #[serde(rename = "family")]
  Family,
  #[doc(hidden)]
  #[serde(other, rename(serialize = "unknown"))]
  Unknown,
}


/// The employment status of a user.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum EmploymentStatus {
  /// The user is unemployed.
  #[serde(rename = "unemployed")]
  Unemployed,
  /// The user is employed.
  #[serde(rename = "employed")]
  Employed,
  /// The user is a student.
  #[serde(rename = "student")]
  Student,
  /// The user is retired.
  #[serde(rename = "retired")]
  Retired,
  #[doc(hidden)]
  #[serde(other, rename(serialize = "unknown"))]
  Unknown,
}


/// The type of an agreement signed by a user.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub enum AgreementType {
  /// The margin agreement.
  #[serde(rename = "margin_agreement")]
  Margin,
  /// The account agreement.
  #[serde(rename = "account_agreement")]
  Account,
  /// The customer agreement.
  #[serde(rename = "customer_agreement")]
  Customer,
  /// The crypto trading agreement.
  #[serde(rename = "crypto_agreement")]
  Crypto,
  #[doc(hidden)]
  #[serde(other, rename(serialize = "unknown"))]
  Unknown,
}


/// An error indicating an invalid combination of contact fields.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum ContactError {
  /// The state was not provided for a contact in the USA.
  #[error("the state is required when the country is \"USA\"")]
  MissingState,
}


/// The contact details of an account holder.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Contact {
  /// The user's email address.
  #[serde(rename = "email_address")]
  pub email_address: String,
  /// The user's phone number, including the country code.
  #[serde(rename = "phone_number")]
  pub phone_number: String,
  /// The user's street address lines.
  #[serde(rename = "street_address")]
  pub street_address: Vec<String>,
  /// The user's apartment unit, if any.
  #[serde(rename = "unit", skip_serializing_if = "Option::is_none")]
  pub unit: Option<String>,
  /// The city the user resides in.
  #[serde(rename = "city")]
  pub city: String,
  /// The state the user resides in. Required if `country` is "USA".
  #[serde(rename = "state", skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  /// The user's postal code.
  #[serde(rename = "postal_code", skip_serializing_if = "Option::is_none")]
  pub postal_code: Option<String>,
  /// The country the user resides in, as a three letter country code.
  #[serde(rename = "country", skip_serializing_if = "Option::is_none")]
  pub country: Option<String>,
}


/// A helper for initializing [`Contact`] objects.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContactInit {
  /// See `Contact::unit`.
  pub unit: Option<String>,
  /// See `Contact::state`.
  pub state: Option<String>,
  /// See `Contact::postal_code`.
  pub postal_code: Option<String>,
  /// See `Contact::country`.
  pub country: Option<String>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl ContactInit {
  /// Create a [`Contact`] from a `ContactInit`.
  ///
  /// The state is mandatory for contacts residing in the USA.
  pub fn init<S, I>(
    self,
    email_address: S,
    phone_number: S,
    street_address: I,
    city: S,
  ) -> Result<Contact, ContactError>
  where
    S: Into<String>,
    I: IntoIterator<Item = S>,
  {
    if self.country.as_deref() == Some("USA") && self.state.is_none() {
      return Err(ContactError::MissingState)
    }

    Ok(Contact {
      email_address: email_address.into(),
      phone_number: phone_number.into(),
      street_address: street_address.into_iter().map(S::into).collect(),
      unit: self.unit,
      city: city.into(),
      state: self.state,
      postal_code: self.postal_code,
      country: self.country,
    })
  }
}


/// The identity details of an account holder.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Identity {
  /// The user's first name.
  #[serde(rename = "given_name")]
  pub given_name: String,
  /// The user's middle name, if any.
  #[serde(rename = "middle_name", skip_serializing_if = "Option::is_none")]
  pub middle_name: Option<String>,
  /// The user's last name.
  #[serde(rename = "family_name")]
  pub family_name: String,
  /// The user's date of birth.
  #[serde(rename = "date_of_birth")]
  pub date_of_birth: NaiveDate,
  /// The user's country specific tax ID. Required if `tax_id_type` is
  /// provided.
  #[serde(rename = "tax_id", skip_serializing_if = "Option::is_none")]
  pub tax_id: Option<String>,
  /// The type of `tax_id`. Required if `tax_id` is provided.
  #[serde(rename = "tax_id_type", skip_serializing_if = "Option::is_none")]
  pub tax_id_type: Option<TaxIdType>,
  /// The country the user is a citizen of.
  #[serde(
    rename = "country_of_citizenship",
    skip_serializing_if = "Option::is_none"
  )]
  pub country_of_citizenship: Option<String>,
  /// The country the user was born in.
  #[serde(rename = "country_of_birth", skip_serializing_if = "Option::is_none")]
  pub country_of_birth: Option<String>,
  /// The country the user files taxes in.
  #[serde(rename = "country_of_tax_residence")]
  pub country_of_tax_residence: String,
  /// The user's visa type, for users residing in the USA.
  #[serde(rename = "visa_type", skip_serializing_if = "Option::is_none")]
  pub visa_type: Option<VisaType>,
  /// The expiration date of the user's visa. Required if `visa_type`
  /// is set.
  #[serde(
    rename = "visa_expiration_date",
    skip_serializing_if = "Option::is_none"
  )]
  pub visa_expiration_date: Option<NaiveDate>,
  /// The user's date of departure from the USA. Required if
  /// `visa_type` is B1 or B2.
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


/// A helper for initializing [`Identity`] objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentityInit {
  /// See `Identity::middle_name`.
  pub middle_name: Option<String>,
  /// See `Identity::tax_id`.
  pub tax_id: Option<String>,
  /// See `Identity::tax_id_type`.
  pub tax_id_type: Option<TaxIdType>,
  /// See `Identity::country_of_citizenship`.
  pub country_of_citizenship: Option<String>,
  /// See `Identity::country_of_birth`.
  pub country_of_birth: Option<String>,
  /// See `Identity::visa_type`.
  pub visa_type: Option<VisaType>,
  /// See `Identity::visa_expiration_date`.
  pub visa_expiration_date: Option<NaiveDate>,
  /// See `Identity::date_of_departure_from_usa`.
  pub date_of_departure_from_usa: Option<NaiveDate>,
  /// See `Identity::permanent_resident`.
  pub permanent_resident: Option<bool>,
  /// See `Identity::funding_source`.
  pub funding_source: Option<Vec<FundingSource>>,
  /// See `Identity::annual_income_min`.
  pub annual_income_min: Option<Num>,
  /// See `Identity::annual_income_max`.
  pub annual_income_max: Option<Num>,
  /// See `Identity::liquid_net_worth_min`.
  pub liquid_net_worth_min: Option<Num>,
  /// See `Identity::liquid_net_worth_max`.
  pub liquid_net_worth_max: Option<Num>,
  /// See `Identity::total_net_worth_min`.
  pub total_net_worth_min: Option<Num>,
  /// See `Identity::total_net_worth_max`.
  pub total_net_worth_max: Option<Num>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl IdentityInit {
  /// Create an [`Identity`] from an `IdentityInit`.
  pub fn init<S>(
    self,
    given_name: S,
    family_name: S,
    date_of_birth: NaiveDate,
    country_of_tax_residence: S,
  ) -> Identity
  where
    S: Into<String>,
  {
    Identity {
      given_name: given_name.into(),
      middle_name: self.middle_name,
      family_name: family_name.into(),
      date_of_birth,
      tax_id: self.tax_id,
      tax_id_type: self.tax_id_type,
      country_of_citizenship: self.country_of_citizenship,
      country_of_birth: self.country_of_birth,
      country_of_tax_residence: country_of_tax_residence.into(),
      visa_type: self.visa_type,
      visa_expiration_date: self.visa_expiration_date,
      date_of_departure_from_usa: self.date_of_departure_from_usa,
      permanent_resident: self.permanent_resident,
      funding_source: self.funding_source,
      annual_income_min: self.annual_income_min,
      annual_income_max: self.annual_income_max,
      liquid_net_worth_min: self.liquid_net_worth_min,
      liquid_net_worth_max: self.liquid_net_worth_max,
      total_net_worth_min: self.total_net_worth_min,
      total_net_worth_max: self.total_net_worth_max,
    }
  }
}


/// The political and regulatory disclosures of an account holder.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Disclosures {
  /// Whether the user holds a controlling position in a publicly
  /// traded company.
  #[serde(rename = "is_control_person")]
  pub is_control_person: bool,
  /// Whether the user is affiliated with any exchanges or FINRA.
  #[serde(rename = "is_affiliated_exchange_or_finra")]
  pub is_affiliated_exchange_or_finra: bool,
  /// Whether the user is politically exposed.
  #[serde(rename = "is_politically_exposed")]
  pub is_politically_exposed: bool,
  /// Whether a member of the user's immediate family is politically
  /// exposed or holds a control position.
  #[serde(rename = "immediate_family_exposed")]
  pub immediate_family_exposed: bool,
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


/// An agreement signed by an account holder.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Agreement {
  /// The type of the agreement.
  #[serde(rename = "agreement")]
  pub agreement: AgreementType,
  /// The time stamp the agreement was signed at.
  #[serde(rename = "signed_at")]
  pub signed_at: DateTime<Utc>,
  /// The IP address the signed agreement was sent from.
  #[serde(rename = "ip_address")]
  pub ip_address: String,
  /// The revision of the agreement.
  #[serde(rename = "revision")]
  pub revision: Option<String>,
}


/// An error indicating an invalid combination of trusted contact
/// fields.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum TrustedContactError {
  /// No means of contacting the trusted contact was provided.
  #[error(
    "at least one of email address, phone number, or street address is required"
  )]
  MissingContactMethod,
}


/// The trusted contact of an account holder.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TrustedContact {
  /// The first name of the trusted contact.
  #[serde(rename = "given_name")]
  pub given_name: String,
  /// The last name of the trusted contact.
  #[serde(rename = "family_name")]
  pub family_name: String,
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


/// A helper for initializing [`TrustedContact`] objects.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrustedContactInit {
  /// See `TrustedContact::email_address`.
  pub email_address: Option<String>,
  /// See `TrustedContact::phone_number`.
  pub phone_number: Option<String>,
  /// See `TrustedContact::street_address`.
  pub street_address: Option<String>,
  /// See `TrustedContact::city`.
  pub city: Option<String>,
  /// See `TrustedContact::state`.
  pub state: Option<String>,
  /// See `TrustedContact::postal_code`.
  pub postal_code: Option<String>,
  /// See `TrustedContact::country`.
  pub country: Option<String>,
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl TrustedContactInit {
  /// Create a [`TrustedContact`] from a `TrustedContactInit`.
  ///
  /// At least one of the email address, phone number, or street
  /// address has to be set.
  pub fn init<S>(
    self,
    given_name: S,
    family_name: S,
  ) -> Result<TrustedContact, TrustedContactError>
  where
    S: Into<String>,
  {
    if self.email_address.is_none()
      && self.phone_number.is_none()
      && self.street_address.is_none()
    {
      return Err(TrustedContactError::MissingContactMethod)
    }

    Ok(TrustedContact {
      given_name: given_name.into(),
      family_name: family_name.into(),
      email_address: self.email_address,
      phone_number: self.phone_number,
      street_address: self.street_address,
      city: self.city,
      state: self.state,
      postal_code: self.postal_code,
      country: self.country,
    })
  }
}


/// A brokerage account.
///
/// The `contact`, `identity`, `disclosures`, `agreements`,
/// `documents`, and `trusted_contact` members are only reported by
/// endpoints (and with request options) that ask for them and are
/// `None` otherwise.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct Account {
  /// The account's ID.
  #[serde(rename = "id")]
  pub id: Id,
  /// A human friendly identifier for the account.
  #[serde(rename = "account_number")]
  pub account_number: String,
  /// The approval status of the account.
  #[serde(rename = "status")]
  pub status: Status,
  /// The crypto trading status of the account. Only present if crypto
  /// trading is enabled.
  #[serde(rename = "crypto_status", default)]
  pub crypto_status: Option<Status>,
  /// The currency the account's values are reported in.
  #[serde(rename = "currency")]
  pub currency: String,
  /// The total equity value of the account.
  #[serde(rename = "last_equity")]
  pub last_equity: Num,
  /// The time stamp the account was created at.
  #[serde(rename = "created_at")]
  pub created_at: DateTime<Utc>,
  /// The contact details of the account holder.
  #[serde(rename = "contact", default)]
  pub contact: Option<Contact>,
  /// The identity details of the account holder.
  #[serde(rename = "identity", default)]
  pub identity: Option<Identity>,
  /// The disclosures of the account holder.
  #[serde(rename = "disclosures", default)]
  pub disclosures: Option<Disclosures>,
  /// The agreements the account holder has signed.
  #[serde(rename = "agreements", default)]
  pub agreements: Option<Vec<Agreement>>,
  /// The documents the account holder has submitted.
  #[serde(rename = "documents", default)]
  pub documents: Option<Vec<AccountDocument>>,
  /// The trusted contact of the account holder.
  #[serde(rename = "trusted_contact", default)]
  pub trusted_contact: Option<TrustedContact>,
}


/// A request to create a new brokerage account.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateReq {
  /// The contact details of the account holder.
  #[serde(rename = "contact")]
  pub contact: Contact,
  /// The identity details of the account holder.
  #[serde(rename = "identity")]
  pub identity: Identity,
  /// The disclosures of the account holder.
  #[serde(rename = "disclosures")]
  pub disclosures: Disclosures,
  /// The agreements the account holder has signed.
  #[serde(rename = "agreements")]
  pub agreements: Vec<Agreement>,
  /// The documents the account holder has submitted.
  #[serde(rename = "documents", skip_serializing_if = "Option::is_none")]
  pub documents: Option<Vec<AccountDocument>>,
  /// The trusted contact of the account holder.
  #[serde(
    rename = "trusted_contact",
    skip_serializing_if = "Option::is_none"
  )]
  pub trusted_contact: Option<TrustedContact>,
}


Endpoint! {
  /// The representation of a POST request to the /v1/accounts endpoint.
  pub Post(CreateReq),
  Ok => Account, [
    /// The account was submitted and created successfully.
    /* 200 */ OK,
  ],
  Err => PostError, [
    /// Some data in the provided request was invalid or missing.
    /* 422 */ UNPROCESSABLE_ENTITY => InvalidInput,
    /// An account with the given details exists already.
    /* 409 */ CONFLICT => AlreadyExists,
  ]

  #[inline]
  fn method() -> Method {
    Method::POST
  }

  #[inline]
  fn path(_input: &Self::Input) -> Str {
    "/v1/accounts".into()
  }

  fn body(input: &Self::Input) -> Result<Option<Bytes>, Self::ConversionError> {
    let json = to_json(input)?;
    let bytes = Bytes::from(json);
    Ok(Some(bytes))
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/accounts/{account-id} endpoint.
  pub Get(Id),
  Ok => Account, [
    /// The account object for the given ID was retrieved successfully.
    /* 200 */ OK,
  ],
  Err => GetError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  fn path(input: &Self::Input) -> Str {
    format!("/v1/accounts/{}", input.as_simple()).into()
  }
}


EndpointNoParse! {
  /// The representation of a DELETE request to the
  /// /v1/accounts/{account-id} endpoint, requesting the closure of the
  /// account.
  pub Delete(Id),
  Ok => (), [
    /// The account closure was requested successfully.
    /* 204 */ NO_CONTENT,
  ],
  Err => DeleteError, [
    /// No account was found with the given ID.
    /* 404 */ NOT_FOUND => NotFound,
  ]

  #[inline]
  fn method() -> Method {
    Method::DELETE
  }

  fn path(input: &Self::Input) -> Str {
    format!("/v1/accounts/{}", input.as_simple()).into()
  }

  #[inline]
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

  use serde_json::from_str as from_json;

  use test_log::test;


  /// Check that we can parse the reference account object.
  #[test]
  fn parse_reference_account() {
    let response = r#"{
  "id": "0d969814-40d6-4b2b-99ac-2e37427f1ad2",
  "account_number": "682389557",
  "status": "SUBMITTED",
  "crypto_status": "INACTIVE",
  "currency": "USD",
  "last_equity": "0",
  "created_at": "2022-04-12T17:24:31.30283Z",
  "contact": {
    "email_address": "cool_alpaca@example.com",
    "phone_number": "555-666-7788",
    "street_address": [
      "20 N San Mateo Dr"
    ],
    "unit": "Apt 1A",
    "city": "San Mateo",
    "state": "CA",
    "postal_code": "94401"
  },
  "identity": {
    "given_name": "John",
    "family_name": "Doe",
    "middle_name": "Smith",
    "date_of_birth": "1990-01-01",
    "tax_id_type": "USA_SSN",
    "country_of_citizenship": "USA",
    "country_of_birth": "USA",
    "country_of_tax_residence": "USA",
    "funding_source": [
      "employment_income"
    ],
    "visa_type": null,
    "visa_expiration_date": null,
    "date_of_departure_from_usa": null,
    "permanent_resident": null
  },
  "disclosures": {
    "is_control_person": false,
    "is_affiliated_exchange_or_finra": false,
    "is_politically_exposed": false,
    "immediate_family_exposed": false,
    "is_discretionary": false
  },
  "agreements": [
    {
      "agreement": "margin_agreement",
      "signed_at": "2020-09-11T18:09:33Z",
      "ip_address": "185.13.21.99",
      "revision": "16.2021.05"
    },
    {
      "agreement": "account_agreement",
      "signed_at": "2020-09-11T18:13:44Z",
      "ip_address": "185.13.21.99",
      "revision": "16.2021.05"
    },
    {
      "agreement": "customer_agreement",
      "signed_at": "2020-09-11T18:13:44Z",
      "ip_address": "185.13.21.99",
      "revision": "16.2021.05"
    },
    {
      "agreement": "crypto_agreement",
      "signed_at": "2020-09-11T18:13:44Z",
      "ip_address": "185.13.21.99",
      "revision": "04.2021.10"
    }
  ],
  "trusted_contact": {
    "given_name": "Jane",
    "family_name": "Doe",
    "email_address": "jane.doe@example.com"
  },
  "account_type": "trading",
  "trading_configurations": null
}"#;

    let account = from_json::<Account>(response).unwrap();
    assert_eq!(
      account.id.to_string(),
      "0d969814-40d6-4b2b-99ac-2e37427f1ad2"
    );
    assert_eq!(account.account_number, "682389557");
    assert_eq!(account.status, Status::Submitted);
    assert_eq!(account.crypto_status, Some(Status::Inactive));
    assert_eq!(account.currency, "USD");
    assert_eq!(account.last_equity, Num::from(0));

    let contact = account.contact.unwrap();
    assert_eq!(contact.email_address, "cool_alpaca@example.com");
    assert_eq!(contact.street_address, vec!["20 N San Mateo Dr"]);
    assert_eq!(contact.state.as_deref(), Some("CA"));
    assert_eq!(contact.country, None);

    let identity = account.identity.unwrap();
    assert_eq!(identity.given_name, "John");
    assert_eq!(identity.tax_id_type, Some(TaxIdType::UsaSsn));
    assert_eq!(
      identity.date_of_birth,
      NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
    );
    assert_eq!(
      identity.funding_source,
      Some(vec![FundingSource::EmploymentIncome])
    );
    assert_eq!(identity.visa_type, None);

    let agreements = account.agreements.unwrap();
    assert_eq!(agreements.len(), 4);
    assert_eq!(agreements[0].agreement, AgreementType::Margin);
    assert_eq!(agreements[0].revision.as_deref(), Some("16.2021.05"));

    let trusted_contact = account.trusted_contact.unwrap();
    assert_eq!(trusted_contact.given_name, "Jane");
    assert_eq!(
      trusted_contact.email_address.as_deref(),
      Some("jane.doe@example.com")
    );

    assert_eq!(account.documents, None);
  }

  /// Check that a partial account object, as reported by the account
  /// listing endpoint, parses with all optional members unset.
  #[test]
  fn parse_partial_account() {
    let response = r#"{
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
}"#;

    let account = from_json::<Account>(response).unwrap();
    assert_eq!(account.status, Status::Active);
    assert_eq!(account.contact, None);
    assert_eq!(account.identity, None);
    assert_eq!(account.disclosures, None);
    assert_eq!(account.agreements, None);
    assert_eq!(account.documents, None);
    assert_eq!(account.trusted_contact, None);
  }

  /// Check that an unknown account status is mapped to the `Unknown`
  /// variant instead of causing a failure.
  #[test]
  fn parse_unknown_status() {
    let status = from_json::<Status>(r#""PAPER_ONLY""#).unwrap();
    assert_eq!(status, Status::Unknown);
  }

  /// Check that a contact in the USA requires a state.
  #[test]
  fn usa_contact_requires_state() {
    let result = ContactInit {
      country: Some("USA".to_string()),
      ..Default::default()
    }
    .init(
      "john.doe@example.com",
      "555-666-7788",
      ["20 N San Mateo Dr"],
      "San Mateo",
    );
    assert_eq!(result.unwrap_err(), ContactError::MissingState);

    let contact = ContactInit {
      country: Some("USA".to_string()),
      state: Some("CA".to_string()),
      ..Default::default()
    }
    .init(
      "john.doe@example.com",
      "555-666-7788",
      ["20 N San Mateo Dr"],
      "San Mateo",
    )
    .unwrap();
    assert_eq!(contact.state.as_deref(), Some("CA"));
  }

  /// Check that a contact outside the USA does not require a state.
  #[test]
  fn non_usa_contact_without_state() {
    let contact = ContactInit {
      country: Some("DEU".to_string()),
      ..Default::default()
    }
    .init(
      "jane.doe@example.com",
      "+49-30-123456",
      ["Unter den Linden 1"],
      "Berlin",
    )
    .unwrap();
    assert_eq!(contact.state, None);
  }

  /// Check that a trusted contact requires at least one contact
  /// method.
  #[test]
  fn trusted_contact_requires_contact_method() {
    let result = TrustedContactInit::default().init("Jane", "Doe");
    assert_eq!(
      result.unwrap_err(),
      TrustedContactError::MissingContactMethod
    );

    let trusted_contact = TrustedContactInit {
      email_address: Some("jane.doe@example.com".to_string()),
      ..Default::default()
    }
    .init("Jane", "Doe")
    .unwrap();
    assert_eq!(
      trusted_contact.email_address.as_deref(),
      Some("jane.doe@example.com")
    );
  }

  /// Check that the account creation request omits unset optional
  /// members from its serialized form.
  #[test]
  fn serialize_create_request() {
    let contact = ContactInit {
      state: Some("CA".to_string()),
      country: Some("USA".to_string()),
      postal_code: Some("94401".to_string()),
      ..Default::default()
    }
    .init(
      "john.doe@example.com",
      "555-666-7788",
      ["20 N San Mateo Dr"],
      "San Mateo",
    )
    .unwrap();

    let identity = IdentityInit {
      tax_id: Some("666-55-4321".to_string()),
      tax_id_type: Some(TaxIdType::UsaSsn),
      funding_source: Some(vec![FundingSource::EmploymentIncome]),
      ..Default::default()
    }
    .init(
      "John",
      "Doe",
      NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
      "USA",
    );

    let request = CreateReq {
      contact,
      identity,
      disclosures: Disclosures::default(),
      agreements: Vec::new(),
      documents: None,
      trusted_contact: None,
    };

    let json = serde_json::to_value(&request).unwrap();
    let object = json.as_object().unwrap();
    assert!(!object.contains_key("documents"));
    assert!(!object.contains_key("trusted_contact"));
    assert!(!object["identity"]
      .as_object()
      .unwrap()
      .contains_key("visa_type"));
  }

  /// Check that the endpoints describe the documented paths and
  /// methods.
  #[test]
  fn endpoint_definitions() {
    let id = Id(Uuid::new_v4());
    assert_eq!(Get::method(), Method::GET);
    assert_eq!(
      Get::path(&id),
      format!("/v1/accounts/{}", id.as_simple())
    );
    assert_eq!(Post::method(), Method::POST);
    assert_eq!(Delete::method(), Method::DELETE);
  }
}
