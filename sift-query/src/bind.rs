//! Generic binding of normalized parameters into criteria composites.
//!
//! [`Coerce`] turns a raw parameter string into a scalar; [`BindTarget`]
//! is implemented by anything a [`ParamValue`] can be assigned into.
//! Composites derive their implementation through the
//! [`bind_composite!`](crate::bind_composite) macro, which maps normalized
//! keys onto fields and recurses through nested composites.
//!
//! Coercion is forgiving by design: a string that fails to parse as a
//! number or boolean binds the type's default value rather than an error.
//! Shape mismatches (a map where a scalar is expected, or the reverse) do
//! error, since they indicate a miswired destination rather than bad user
//! input.

use tracing::debug;

use crate::error::{BindError, BindResult};
use crate::params::{ParamMap, ParamValue};

/// Convert a raw parameter string into a scalar value.
///
/// Implementations never fail: unparsable input yields the type's default.
pub trait Coerce: Sized {
    /// Coerce the string, falling back to the default on parse failure.
    fn coerce(raw: &str) -> Self;
}

impl Coerce for i64 {
    fn coerce(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            debug!(raw, "integer coercion failed; using default");
            0
        })
    }
}

impl Coerce for f64 {
    fn coerce(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            debug!(raw, "float coercion failed; using default");
            0.0
        })
    }
}

impl Coerce for bool {
    fn coerce(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            debug!(raw, "boolean coercion failed; using default");
            false
        })
    }
}

impl Coerce for String {
    fn coerce(raw: &str) -> Self {
        raw.to_string()
    }
}

/// A destination a [`ParamValue`] can be bound into.
///
/// Scalars and `Option` scalars accept raw strings; composites accept
/// parameter maps and dispatch each entry onto a field.
pub trait BindTarget {
    /// Bind a single parameter value into this destination.
    fn bind_value(&mut self, value: &ParamValue) -> BindResult<()>;

    /// Bind a full parameter map into this destination.
    ///
    /// Only composites support this; the default rejects the call.
    fn bind_map(&mut self, _map: &ParamMap) -> BindResult<()> {
        Err(BindError::invalid_target(
            "bind destination must be a criteria composite",
        ))
    }

    /// Whether this destination is a composite of named fields.
    fn is_composite() -> bool
    where
        Self: Sized,
    {
        false
    }
}

macro_rules! impl_scalar_bind {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BindTarget for $ty {
                fn bind_value(&mut self, value: &ParamValue) -> BindResult<()> {
                    match value {
                        ParamValue::Str(raw) => {
                            *self = <$ty as Coerce>::coerce(raw);
                            Ok(())
                        }
                        ParamValue::Map(_) => Err(BindError::invalid_target(
                            "scalar destination cannot hold a parameter map",
                        )),
                    }
                }
            }

            impl BindTarget for Option<$ty> {
                fn bind_value(&mut self, value: &ParamValue) -> BindResult<()> {
                    match value {
                        ParamValue::Str(raw) => {
                            *self = Some(<$ty as Coerce>::coerce(raw));
                            Ok(())
                        }
                        ParamValue::Map(_) => Err(BindError::invalid_target(
                            "scalar destination cannot hold a parameter map",
                        )),
                    }
                }
            }
        )*
    };
}

impl_scalar_bind!(i64, f64, bool, String);

/// Bind a normalized parameter map into a composite destination.
pub fn bind_params<T: BindTarget>(dst: &mut T, params: &ParamMap) -> BindResult<()> {
    dst.bind_map(params)
}

/// Normalize raw multi-value query parameters and bind them in one step.
pub fn bind_query_params<T, K, V, I>(dst: &mut T, params: I) -> BindResult<()>
where
    T: BindTarget,
    I: IntoIterator<Item = (K, Vec<V>)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let normalized = ParamMap::from_query_params(params);
    bind_params(dst, &normalized)
}

/// Bind one field of a composite, wrapping any failure with the field's
/// normalized key. Used by the generated composite impls.
#[doc(hidden)]
pub fn bind_field<T: BindTarget>(
    key: &str,
    field: &mut T,
    value: &ParamValue,
) -> BindResult<()> {
    field
        .bind_value(value)
        .map_err(|err| BindError::binding_failed(format!("{key}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_coerce_integers() {
        assert_eq!(i64::coerce("42"), 42);
        assert_eq!(i64::coerce("-7"), -7);
        assert_eq!(i64::coerce("nope"), 0);
        assert_eq!(i64::coerce("4.5"), 0);
    }

    #[test]
    fn test_coerce_floats() {
        assert_eq!(f64::coerce("2.5"), 2.5);
        assert_eq!(f64::coerce("xyz"), 0.0);
    }

    #[test]
    fn test_coerce_booleans() {
        assert!(bool::coerce("true"));
        assert!(!bool::coerce("false"));
        assert!(!bool::coerce("TRUE"));
        assert!(!bool::coerce("1"));
    }

    #[test]
    fn test_option_binds_default_on_bad_input() {
        let mut target: Option<i64> = None;
        target.bind_value(&ParamValue::from("not-a-number")).unwrap();
        assert_eq!(target, Some(0));
    }

    #[test]
    fn test_scalar_rejects_map() {
        let mut target = String::new();
        let err = target
            .bind_value(&ParamValue::Map(ParamMap::new()))
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_target");
    }

    #[test]
    fn test_bind_map_default_rejects_scalars() {
        let mut target = 0i64;
        let err = target.bind_map(&ParamMap::new()).unwrap_err();
        assert_eq!(err.kind(), "invalid_target");
    }

    #[test]
    fn test_bind_field_wraps_error_with_key() {
        let mut target = 0i64;
        let err = bind_field("Equals", &mut target, &ParamValue::Map(ParamMap::new()))
            .unwrap_err();
        assert_eq!(err.kind(), "binding_failed");
        assert!(err.to_string().contains("Equals"));
    }
}
