// Copyright (C) 2022-2024 The apca-broker Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Serialize;
use serde_json::to_value;
use serde_json::Error as JsonError;
use serde_json::Map;
use serde_json::Value;


/// Recursively remove nulls, empty strings, empty arrays, and empty
/// objects from a JSON value, working bottom up so that an object
/// whose members were all removed disappears as well.
///
/// `false` booleans and `0` numbers are kept: they are meaningful
/// values to the service, not absent ones.
fn prune(value: Value) -> Option<Value> {
  match value {
    Value::Null => None,
    Value::String(string) if string.is_empty() => None,
    Value::Array(array) => {
      let array = array.into_iter().filter_map(prune).collect::<Vec<_>>();
      if array.is_empty() {
        None
      } else {
        Some(Value::Array(array))
      }
    },
    Value::Object(map) => {
      let map = map
        .into_iter()
        .filter_map(|(key, value)| prune(value).map(|value| (key, value)))
        .collect::<Map<_, _>>();
      if map.is_empty() {
        None
      } else {
        Some(Value::Object(map))
      }
    },
    value => Some(value),
  }
}


/// A trait for converting a request object into the set of fields
/// actually being sent to the service.
///
/// The Broker API treats PATCH and POST bodies as sparse: a field that
/// is not meant to change is omitted from the body instead of being
/// transmitted as an explicit `null` (which would be interpreted as a
/// request to clear it). This trait provides said conversion for any
/// serializable request.
pub trait RequestFields: Serialize {
  /// Serialize the object into a JSON value with all null and empty
  /// fields removed.
  fn to_request_fields(&self) -> Result<Value, JsonError> {
    let value = to_value(self)?;
    Ok(prune(value).unwrap_or(Value::Null))
  }
}

impl<T> RequestFields for T where T: Serialize {}


#[cfg(test)]
mod tests {
  use super::*;

  use serde_json::json;

  use test_log::test;


  #[derive(Serialize)]
  struct Inner {
    email: Option<String>,
    phone: Option<String>,
  }

  #[derive(Serialize)]
  struct Outer {
    name: Option<String>,
    inner: Inner,
    tags: Vec<String>,
    suspended: bool,
  }


  /// Check that unset and empty fields are stripped from the
  /// serialized representation while set ones survive.
  #[test]
  fn prune_sparse_request() {
    let request = Outer {
      name: None,
      inner: Inner {
        email: Some("john.doe@example.com".to_string()),
        phone: None,
      },
      tags: Vec::new(),
      suspended: false,
    };

    let fields = request.to_request_fields().unwrap();
    let expected = json!({
      "inner": {
        "email": "john.doe@example.com"
      },
      "suspended": false
    });
    assert_eq!(fields, expected);
  }

  /// Check that an object whose members are all unset is removed
  /// entirely, not kept as an empty object.
  #[test]
  fn prune_empty_sub_object() {
    let request = Outer {
      name: Some("John".to_string()),
      inner: Inner {
        email: None,
        phone: Some(String::new()),
      },
      tags: Vec::new(),
      suspended: true,
    };

    let fields = request.to_request_fields().unwrap();
    let expected = json!({
      "name": "John",
      "suspended": true
    });
    assert_eq!(fields, expected);
  }

  /// Check that a request without any set fields prunes down to
  /// nothing.
  #[test]
  fn prune_everything() {
    let request = Inner {
      email: None,
      phone: None,
    };

    assert_eq!(request.to_request_fields().unwrap(), Value::Null);
  }
}
