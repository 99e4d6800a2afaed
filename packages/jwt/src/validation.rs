//! Time-claim validation options and checks.
//!
//! Decoding never looks at `exp` or `nbf`. Callers that want those checked
//! run [`Claims::validate`] on the decoded claims.

use chrono::{DateTime, Duration, Utc};

use crate::claims::Claims;
use crate::error::{JwtError, JwtResult};

/// JWT validation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Clock skew tolerated on both `exp` and `nbf`.
    pub leeway: Duration,
    /// Validate expiry.
    pub validate_exp: bool,
    /// Validate not-before.
    pub validate_nbf: bool,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            leeway: Duration::seconds(60),
            validate_exp: true,
            validate_nbf: true,
        }
    }
}

impl Validation {
    /// Check both time claims with no leeway.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            leeway: Duration::zero(),
            ..Self::default()
        }
    }

    /// Set the time leeway for validation.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Set whether to validate expiration.
    #[must_use]
    pub fn validate_exp(mut self, validate: bool) -> Self {
        self.validate_exp = validate;
        self
    }

    /// Set whether to validate not-before.
    #[must_use]
    pub fn validate_nbf(mut self, validate: bool) -> Self {
        self.validate_nbf = validate;
        self
    }
}

impl Claims {
    /// Check `exp` and `nbf` against the current time.
    ///
    /// Absent claims pass.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Expired`] or [`JwtError::NotYetValid`].
    pub fn validate(&self, validation: &Validation) -> JwtResult<()> {
        self.validate_at(Utc::now(), validation)
    }

    /// Check `exp` and `nbf` against `now`.
    ///
    /// A token is expired once `now >= exp + leeway` and not yet valid while
    /// `now + leeway < nbf`.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Expired`] or [`JwtError::NotYetValid`].
    pub fn validate_at(&self, now: DateTime<Utc>, validation: &Validation) -> JwtResult<()> {
        let now = now.timestamp();
        let leeway = validation.leeway.num_seconds();

        let expired = validation.validate_exp
            && self
                .exp
                .is_some_and(|exp| now >= exp.timestamp().saturating_add(leeway));
        if expired {
            tracing::debug!(now, leeway, "token expired");
            return Err(JwtError::Expired);
        }

        let early = validation.validate_nbf
            && self
                .nbf
                .is_some_and(|nbf| now.saturating_add(leeway) < nbf.timestamp());
        if early {
            tracing::debug!(now, leeway, "token not yet valid");
            return Err(JwtError::NotYetValid);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::NumericDate;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap_or_default()
    }

    #[test]
    fn expiry_boundary_honours_leeway() {
        let claims = Claims::builder().expires_at(NumericDate(1_000)).build();
        let strict = Validation::strict();
        assert_eq!(claims.validate_at(at(999), &strict), Ok(()));
        assert_eq!(claims.validate_at(at(1_000), &strict), Err(JwtError::Expired));

        let lenient = Validation::default();
        assert_eq!(claims.validate_at(at(1_059), &lenient), Ok(()));
        assert_eq!(claims.validate_at(at(1_060), &lenient), Err(JwtError::Expired));
    }

    #[test]
    fn not_before_boundary_honours_leeway() {
        let claims = Claims::builder().not_before(NumericDate(1_000)).build();
        let strict = Validation::strict();
        assert_eq!(claims.validate_at(at(999), &strict), Err(JwtError::NotYetValid));
        assert_eq!(claims.validate_at(at(1_000), &strict), Ok(()));

        let lenient = Validation::strict().with_leeway(Duration::seconds(10));
        assert_eq!(claims.validate_at(at(990), &lenient), Ok(()));
        assert_eq!(claims.validate_at(at(989), &lenient), Err(JwtError::NotYetValid));
    }

    #[test]
    fn disabled_checks_and_missing_claims_pass() {
        let claims = Claims::builder()
            .expires_at(NumericDate(10))
            .not_before(NumericDate(5_000))
            .build();
        let off = Validation::strict().validate_exp(false).validate_nbf(false);
        assert_eq!(claims.validate_at(at(1_000), &off), Ok(()));
        assert_eq!(Claims::default().validate_at(at(1_000), &Validation::strict()), Ok(()));
    }
}
