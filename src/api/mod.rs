// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

/// Definitions for the first version of the Alpaca Broker API.
pub mod v1;

/// The base URL of the production Broker API.
pub const API_BASE_URL: &str = "https://broker-api.alpaca.markets";
/// The base URL of the sandbox Broker API.
pub const API_SANDBOX_BASE_URL: &str = "https://broker-api.sandbox.alpaca.markets";
