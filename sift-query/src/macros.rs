//! Declarative macros for wiring criteria composites.
//!
//! [`bind_composite!`](crate::bind_composite) attaches a
//! [`BindTarget`](crate::bind::BindTarget) implementation to an existing
//! struct by mapping normalized parameter keys onto its fields.
//! [`criteria!`](crate::criteria) declares the struct and the mapping in
//! one go for the common case.

/// Implement [`BindTarget`](crate::bind::BindTarget) for a struct by
/// mapping normalized parameter keys onto its fields.
///
/// Each listed key is looked up in the incoming parameter map; entries
/// with no matching key are skipped, and a failure on one field aborts
/// the bind without rolling back fields already assigned.
///
/// ```rust
/// use sift_query::bind_composite;
/// use sift_query::bind::bind_params;
/// use sift_query::params::ParamMap;
///
/// #[derive(Debug, Default)]
/// struct AgeFilter {
///     gte: Option<i64>,
///     lte: Option<i64>,
/// }
///
/// bind_composite!(AgeFilter {
///     "Gte" => gte,
///     "Lte" => lte,
/// });
///
/// let mut params = ParamMap::new();
/// params.insert("Gte", "18");
///
/// let mut filter = AgeFilter::default();
/// bind_params(&mut filter, &params).unwrap();
/// assert_eq!(filter.gte, Some(18));
/// assert_eq!(filter.lte, None);
/// ```
#[macro_export]
macro_rules! bind_composite {
    ($name:ident { $($key:literal => $field:ident),* $(,)? }) => {
        impl $crate::bind::BindTarget for $name {
            fn bind_value(
                &mut self,
                value: &$crate::params::ParamValue,
            ) -> $crate::error::BindResult<()> {
                match value {
                    $crate::params::ParamValue::Map(map) => {
                        $crate::bind::BindTarget::bind_map(self, map)
                    }
                    $crate::params::ParamValue::Str(_) => {
                        Err($crate::error::BindError::invalid_source(concat!(
                            stringify!($name),
                            " expects a parameter map",
                        )))
                    }
                }
            }

            fn bind_map(
                &mut self,
                map: &$crate::params::ParamMap,
            ) -> $crate::error::BindResult<()> {
                $(
                    if let Some(value) = map.get($key) {
                        $crate::bind::bind_field($key, &mut self.$field, value)?;
                    }
                )*
                Ok(())
            }

            fn is_composite() -> bool {
                true
            }
        }
    };
}

/// Declare a criteria composite: the struct and its key-to-field mapping
/// in one block.
///
/// The struct derives `Debug`, `Clone`, `Default` and `PartialEq`; extra
/// attributes written above the struct are kept.
///
/// ```rust
/// use sift_query::criteria;
/// use sift_query::bind::bind_query_params;
///
/// criteria! {
///     pub struct UserCriteria {
///         "Name" => name: Option<String>,
///         "VIP" => vip: Option<bool>,
///     }
/// }
///
/// let mut criteria = UserCriteria::default();
/// bind_query_params(&mut criteria, [("vip", vec!["true".to_string()])]).unwrap();
/// assert_eq!(criteria.vip, Some(true));
/// ```
#[macro_export]
macro_rules! criteria {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($key:literal => $field:ident: $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(pub $field: $ty),*
        }

        $crate::bind_composite!($name { $($key => $field),* });
    };
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::bind::{bind_params, bind_query_params, BindTarget};
    use crate::params::{ParamMap, ParamValue};

    criteria! {
        struct Inner {
            "Equals" => equals: Option<i64>,
            "Gte" => gte: Option<i64>,
        }
    }

    criteria! {
        struct Outer {
            "Age" => age: Inner,
            "LIMIT" => limit: Option<i64>,
        }
    }

    #[test]
    fn test_composite_skips_missing_keys() {
        let mut params = ParamMap::new();
        params.insert("Gte", "21");

        let mut inner = Inner::default();
        bind_params(&mut inner, &params).unwrap();
        assert_eq!(inner.equals, None);
        assert_eq!(inner.gte, Some(21));
    }

    #[test]
    fn test_composite_rejects_raw_string() {
        let mut inner = Inner::default();
        let err = inner.bind_value(&ParamValue::from("5")).unwrap_err();
        assert_eq!(err.kind(), "invalid_source");
        assert!(err.to_string().contains("Inner"));
    }

    #[test]
    fn test_nested_composite_binds_through() {
        let mut outer = Outer::default();
        bind_query_params(
            &mut outer,
            [
                ("age.gte", vec!["18".to_string()]),
                ("limit", vec!["10".to_string()]),
            ],
        )
        .unwrap();

        assert_eq!(outer.age.gte, Some(18));
        assert_eq!(outer.limit, Some(10));
    }

    #[test]
    fn test_nested_failure_names_the_field() {
        let mut params = ParamMap::new();
        params.insert("LIMIT", ParamMap::new());

        let mut outer = Outer::default();
        let err = bind_params(&mut outer, &params).unwrap_err();
        assert_eq!(err.kind(), "binding_failed");
        assert!(err.to_string().contains("LIMIT"));
    }

    #[test]
    fn test_earlier_fields_keep_values_on_failure() {
        let mut params = ParamMap::new();
        let mut age = ParamMap::new();
        age.insert("Gte", "30");
        params.insert("Age", age);
        params.insert("LIMIT", ParamMap::new());

        let mut outer = Outer::default();
        assert!(bind_params(&mut outer, &params).is_err());
        assert_eq!(outer.age.gte, Some(30));
    }

    #[test]
    fn test_is_composite() {
        assert!(Inner::is_composite());
        assert!(!<Option<i64> as BindTarget>::is_composite());
    }
}
