//! User records as served by the upstream user directory.
//!
//! The wire shape nests hair colour, postal code, and department inside
//! sub-objects (`hair.color`, `address.postalCode`, `company.department`).
//! [`UserRecord`] flattens those into optional fields. Decoding never fails on
//! a field of the wrong type; the field is treated as absent instead so a
//! single malformed value cannot sink a whole page.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single user record fed into the aggregation pass.
///
/// Every field is optional. The aggregator decides per field whether a value
/// is usable; see [`crate::aggregate`] for the policy.
///
/// # Example
///
/// ```
/// use department_stats::UserRecord;
///
/// let json = r#"{
///     "id": 1,
///     "firstName": "John",
///     "lastName": "Doe",
///     "age": "thirty",
///     "hair": { "color": "Brown" },
///     "company": { "department": "Engineering" }
/// }"#;
///
/// let record: UserRecord = serde_json::from_str(json).expect("lenient decode");
/// assert_eq!(record.department.as_deref(), Some("Engineering"));
/// assert_eq!(record.age, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserRecordDto", into = "UserRecordDto")]
pub struct UserRecord {
    /// Upstream identifier. Carried through but never aggregated.
    pub id: Option<i64>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Age in years.
    pub age: Option<f64>,
    /// Raw gender label; only `"male"` and `"female"` are counted.
    pub gender: Option<String>,
    /// Hair colour label.
    pub hair_color: Option<String>,
    /// Postal code from the user's address.
    pub postal_code: Option<String>,
    /// Company department, the grouping key.
    pub department: Option<String>,
}

impl UserRecord {
    /// Sets the upstream identifier.
    #[must_use]
    pub const fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the given name.
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Sets the family name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Sets the age in years.
    #[must_use]
    pub const fn with_age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the raw gender label.
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Sets the hair colour label.
    #[must_use]
    pub fn with_hair_color(mut self, hair_color: impl Into<String>) -> Self {
        self.hair_color = Some(hair_color.into());
        self
    }

    /// Sets the postal code.
    #[must_use]
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    /// Sets the department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecordDto {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    age: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    hair: Option<HairDto>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    address: Option<AddressDto>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    company: Option<CompanyDto>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HairDto {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressDto {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    postal_code: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CompanyDto {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    department: Option<String>,
}

/// Decodes a value of `T`, mapping a type mismatch to `None`.
///
/// Only structurally invalid JSON propagates as an error.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

impl From<UserRecordDto> for UserRecord {
    fn from(dto: UserRecordDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            age: dto.age,
            gender: dto.gender,
            hair_color: dto.hair.and_then(|hair| hair.color),
            postal_code: dto.address.and_then(|address| address.postal_code),
            department: dto.company.and_then(|company| company.department),
        }
    }
}

impl From<UserRecord> for UserRecordDto {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            age: record.age,
            gender: record.gender,
            hair: record.hair_color.map(|color| HairDto { color: Some(color) }),
            address: record.postal_code.map(|postal_code| AddressDto {
                postal_code: Some(postal_code),
            }),
            company: record.department.map(|department| CompanyDto {
                department: Some(department),
            }),
        }
    }
}
