// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

/// Definitions pertaining brokerage accounts and their onboarding.
pub mod account;
/// Definitions pertaining account activities.
pub mod account_activities;
/// Definitions pertaining a trading account's configuration.
pub mod account_config;
/// Definitions pertaining an account's portfolio history.
pub mod account_portfolio;
/// Functionality for updating an existing account.
pub mod account_update;
/// Functionality for listing accounts.
pub mod accounts;
/// Definitions surrounding ACH relationships.
pub mod ach;
/// Definitions surrounding wire recipient banks.
pub mod bank;
/// Definitions surrounding documents attached to an account.
pub mod document;
/// Functionality for listing and uploading documents.
pub mod documents;
/// Definitions surrounding orders.
pub mod order;
/// Definitions surrounding open positions.
pub mod position;
/// Functionality for listing and liquidating open positions.
pub mod positions;
/// Serialization functionality for sparse request bodies.
pub mod ser;
/// Definitions pertaining the trading side of an account.
pub mod trading_account;
/// Definitions surrounding funds transfers.
pub mod transfer;
/// Functionality for listing funds transfers.
pub mod transfers;
