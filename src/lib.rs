// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(clippy::let_and_return, clippy::let_unit_value)]
#![warn(
  missing_copy_implementations,
  missing_debug_implementations,
  missing_docs,
  rust_2018_idioms,
  trivial_numeric_casts,
  unused_import_braces,
  unused_qualifications,
  unused_results
)]

//! A crate providing strongly typed data definitions and request
//! descriptions for the Alpaca Broker API. It covers the account
//! onboarding objects (contact, identity, disclosures, agreements,
//! trusted contact), trading account state and configuration,
//! document handling, funding (ACH relationships, recipient banks,
//! transfers), positions, and portfolio history.
//!
//! Requests with cross-field constraints are built through checked
//! constructors that enforce the constraints locally, before any
//! interaction with the service. Issuing the described requests over
//! the network is not part of this crate.

#[macro_use]
extern crate http_endpoint;

#[macro_use]
mod endpoint;

pub mod api;
mod util;

use std::borrow::Cow;

/// A "string" that can deal with both static and owned data.
type Str = Cow<'static, str>;

pub use crate::endpoint::ApiError;
