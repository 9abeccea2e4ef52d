//! Shared record contract
//!
//! Every record can be exported as a serialized representation, and any
//! field a record declares as secret is replaced by a fixed sentinel in
//! masked exports. Derived unique identifiers (UIDs) are computed here so
//! the same fields always map to the same identifier.

use serde::Serialize;
use serde_json::Value;

use crate::utils::error::AuthResult;

/// Placeholder substituted for every masked secret field, across all
/// record types.
pub const MASKED_ATTRIBUTE_VALUE: &str = "********";

/// Separator between the namespace and value parts of a derived UID.
const UID_SEPARATOR: char = ':';

/// Resource namespaces used when deriving UIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    User,
    Token,
    ApiKey,
    SsoRequest,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::User => write!(f, "user"),
            ResourceType::Token => write!(f, "token"),
            ResourceType::ApiKey => write!(f, "api_key"),
            ResourceType::SsoRequest => write!(f, "sso_request"),
        }
    }
}

/// Derive a unique identifier from a resource namespace and field values.
///
/// Pure function of its inputs: the same namespace and parts always yield
/// the same UID. A UID built from secret material (an API key's hash) is
/// treated as secret itself, since it would otherwise leak an equality
/// oracle for the hash.
pub fn derive_uid(resource_type: ResourceType, parts: &[&str]) -> String {
    let mut uid = resource_type.to_string();
    for part in parts {
        uid.push(UID_SEPARATOR);
        uid.push_str(part);
    }
    uid
}

/// Contract shared by every record in this crate.
///
/// Records with nothing to hide keep the default empty secret-field set,
/// which makes [`Record::mask_secrets`] a plain deep copy.
pub trait Record: Serialize {
    /// Fields replaced by [`MASKED_ATTRIBUTE_VALUE`] in masked exports.
    fn secret_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Serialize this record into its exported representation.
    fn export(&self) -> AuthResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Return a copy of `representation` with every secret field
    /// overwritten by the masking sentinel.
    ///
    /// The input is copied before any field is touched, so shared or
    /// cached representations of the original record are never corrupted.
    /// Secret fields are overwritten unconditionally; there is no
    /// privileged unmasked path through this operation.
    fn mask_secrets(&self, representation: &Value) -> Value {
        let mut masked = representation.clone();
        if let Value::Object(fields) = &mut masked {
            for field in self.secret_fields() {
                fields.insert(
                    (*field).to_string(),
                    Value::String(MASKED_ATTRIBUTE_VALUE.to_string()),
                );
            }
        }
        masked
    }

    /// Export this record and mask its secret fields in one step.
    fn masked_export(&self) -> AuthResult<Value> {
        let representation = self.export()?;
        Ok(self.mask_secrets(&representation))
    }
}
