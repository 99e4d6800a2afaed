//! Registered claims and builder.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Registered claims (RFC 7519 §4.1) plus any custom claims.
///
/// Every registered claim is optional. Custom claims live in `extra` and are
/// flattened into the top-level JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Audience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    /// Expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<NumericDate>,
    /// Not before.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<NumericDate>,
    /// Issued at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<NumericDate>,
    /// JWT ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Custom claims.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Start building claims.
    #[must_use]
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::new()
    }

    /// Set a custom claim.
    pub fn claim(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Custom claim by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

/// The `aud` claim: one audience or several.
///
/// Serializes in the same shape it was built or decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// `"aud": "api"`
    One(String),
    /// `"aud": ["api", "web"]`
    Many(Vec<String>),
}

impl Audience {
    /// Whether `audience` is among the values.
    #[must_use]
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::One(one) => one == audience,
            Audience::Many(many) => many.iter().any(|a| a == audience),
        }
    }

    /// Iterate over the values.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice = match self {
            Audience::One(one) => std::slice::from_ref(one),
            Audience::Many(many) => many.as_slice(),
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for Audience {
    fn from(audience: &str) -> Self {
        Audience::One(audience.to_string())
    }
}

impl From<String> for Audience {
    fn from(audience: String) -> Self {
        Audience::One(audience)
    }
}

impl From<Vec<String>> for Audience {
    fn from(audiences: Vec<String>) -> Self {
        Audience::Many(audiences)
    }
}

/// Seconds since the Unix epoch, as used by `exp`, `nbf` and `iat`.
///
/// Fractional JSON values are accepted and truncated; the value is always
/// written as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumericDate(pub i64);

impl NumericDate {
    /// Current time.
    #[must_use]
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Seconds since the epoch.
    #[must_use]
    pub const fn timestamp(self) -> i64 {
        self.0
    }

    /// As a chrono timestamp, if in range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }
}

impl From<DateTime<Utc>> for NumericDate {
    fn from(time: DateTime<Utc>) -> Self {
        NumericDate(time.timestamp())
    }
}

impl From<i64> for NumericDate {
    fn from(seconds: i64) -> Self {
        NumericDate(seconds)
    }
}

impl Serialize for NumericDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for NumericDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SecondsVisitor;

        impl Visitor<'_> for SecondsVisitor {
            type Value = NumericDate;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("seconds since the epoch")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(NumericDate(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(NumericDate)
                    .map_err(|_| E::custom("numeric date out of range"))
            }

            #[allow(clippy::cast_possible_truncation)]
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                    Ok(NumericDate(v.trunc() as i64))
                } else {
                    Err(E::custom("numeric date out of range"))
                }
            }
        }

        deserializer.deserialize_any(SecondsVisitor)
    }
}

/// Fluent builder for [`Claims`].
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    claims: Claims,
}

impl ClaimsBuilder {
    /// Empty claims.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the issuer (iss) claim.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.claims.iss = Some(iss.into());
        self
    }

    /// Set the subject (sub) claim.
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.claims.sub = Some(sub.into());
        self
    }

    /// Set the audience (aud) claim.
    #[must_use]
    pub fn audience(mut self, aud: impl Into<Audience>) -> Self {
        self.claims.aud = Some(aud.into());
        self
    }

    /// Set the expiration time relative to now.
    #[must_use]
    pub fn expires_in(mut self, dur: Duration) -> Self {
        self.claims.exp = Some(NumericDate::from(Utc::now() + dur));
        self
    }

    /// Set the expiration time.
    #[must_use]
    pub fn expires_at(mut self, exp: impl Into<NumericDate>) -> Self {
        self.claims.exp = Some(exp.into());
        self
    }

    /// Set the not-before (nbf) claim.
    #[must_use]
    pub fn not_before(mut self, nbf: impl Into<NumericDate>) -> Self {
        self.claims.nbf = Some(nbf.into());
        self
    }

    /// Set the issued-at time to now.
    #[must_use]
    pub fn issued_now(mut self) -> Self {
        self.claims.iat = Some(NumericDate::now());
        self
    }

    /// Set the issued-at (iat) claim.
    #[must_use]
    pub fn issued_at(mut self, iat: impl Into<NumericDate>) -> Self {
        self.claims.iat = Some(iat.into());
        self
    }

    /// Set the JWT ID (jti) claim.
    #[must_use]
    pub fn jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.claims.jti = Some(jti.into());
        self
    }

    /// Add a custom claim.
    #[must_use]
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.extra.insert(name.into(), value.into());
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> Claims {
        self.claims
    }
}
