//! Typed Uuids
//!
//! Identifiers tagged with the record they belong to, so an offer uuid cannot
//! be passed where a welcome coupon uuid is expected.

use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use uuid::Uuid;

/// A uuid owned by records of type `T`.
///
/// `T` is only a tag: the id is `Send + Sync + Copy` whatever `T` is.
pub struct TypedUuid<T> {
    uuid: Uuid,
    record: PhantomData<fn() -> T>,
}

impl<T> TypedUuid<T> {
    /// Generate a new time-ordered (v7) identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            record: PhantomData,
        }
    }

    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.uuid
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.uuid
    }
}

impl<T> Default for TypedUuid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedUuid<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedUuid<T> {}

impl<T> Debug for TypedUuid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.uuid, f)
    }
}

impl<T> Display for TypedUuid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.uuid, f)
    }
}

impl<T> FromStr for TypedUuid<T> {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(Self::from_uuid)
    }
}

impl<T> PartialEq for TypedUuid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<T> Eq for TypedUuid<T> {}

impl<T> Hash for TypedUuid<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<T> PartialOrd for TypedUuid<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// v7 ids order by creation time.
impl<T> Ord for TypedUuid<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uuid.cmp(&other.uuid)
    }
}

impl<T> From<Uuid> for TypedUuid<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<TypedUuid<T>> for Uuid {
    fn from(typed: TypedUuid<T>) -> Self {
        typed.into_uuid()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    struct Coupon;

    type CouponUuid = TypedUuid<Coupon>;

    #[test]
    fn later_ids_sort_after_earlier_ones() {
        let first = CouponUuid::new();
        let second = CouponUuid::new();

        assert!(first < second, "v7 ids should be time ordered");
    }

    #[test]
    fn parses_and_displays_as_a_plain_uuid() -> TestResult {
        let raw = "0192b4a0-7c1e-7a3b-9f00-5d2e8c4b1a10";

        let parsed: CouponUuid = raw.parse()?;

        assert_eq!(parsed.to_string(), raw);
        assert_eq!(parsed.as_uuid(), &Uuid::parse_str(raw)?);

        Ok(())
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!("not-a-uuid".parse::<CouponUuid>().is_err(), "expected a parse error");
    }
}
