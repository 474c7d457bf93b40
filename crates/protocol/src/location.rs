use serde::{Deserialize, Serialize};

use crate::{dual::ObjectOrScalar, payload::RawPayload};

/// Location parameter: either the structured breakdown or the plain string
/// the platform collapsed it to.
pub type Location = ObjectOrScalar<LocationFields>;

/// Structured shape of a [`Location`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationFields {
    #[serde(rename = "admin-area", skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(
        rename = "admin-area.original",
        skip_serializing_if = "String::is_empty"
    )]
    pub region_original: String,
    #[serde(
        rename = "admin-area.object",
        skip_serializing_if = "RawPayload::is_empty"
    )]
    pub region_object: RawPayload,
    #[serde(rename = "subadmin-area", skip_serializing_if = "String::is_empty")]
    pub department: String,
    #[serde(
        rename = "subadmin-area.original",
        skip_serializing_if = "String::is_empty"
    )]
    pub department_original: String,
}

impl Location {
    /// The collapsed string form, or `""` when the structured form was sent.
    pub fn simple(&self) -> &str {
        self.as_scalar().map_or("", String::as_str)
    }

    pub fn region(&self) -> &str {
        self.as_object().map_or("", |f| f.region.as_str())
    }

    pub fn region_original(&self) -> &str {
        self.as_object().map_or("", |f| f.region_original.as_str())
    }

    pub fn department(&self) -> &str {
        self.as_object().map_or("", |f| f.department.as_str())
    }

    pub fn department_original(&self) -> &str {
        self.as_object().map_or("", |f| f.department_original.as_str())
    }
}
