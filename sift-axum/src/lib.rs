//! Axum integration for sift query criteria.
//!
//! [`CriteriaQuery`] is an extractor that parses the request query
//! string, normalizes it, and binds it into a caller-declared criteria
//! composite. A bind failure rejects the request with `400 Bad Request`.
//!
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use sift_axum::CriteriaQuery;
//! use sift_query::criteria;
//! use sift_query::prelude::*;
//!
//! criteria! {
//!     pub struct UserCriteria {
//!         "Name" => name: StringFilter,
//!         "Age" => age: IntFilter,
//!     }
//! }
//!
//! // GET /users?name.contains=al&age.gte=18
//! async fn list_users(CriteriaQuery(criteria): CriteriaQuery<UserCriteria>) -> String {
//!     let query = SelectQuery::postgres("users");
//!     let query = build_string_specification(query, "name", &criteria.name);
//!     let query = build_int_specification(query, "age", &criteria.age);
//!     let (sql, _params) = query.build_sql();
//!     sql
//! }
//!
//! let app: Router = Router::new().route("/users", get(list_users));
//! ```

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::response::IntoResponse;
use thiserror::Error;
use tracing::debug;
use url::form_urlencoded;

use sift_query::bind::{bind_params, BindTarget};
use sift_query::error::BindError;
use sift_query::params::ParamMap;

/// Rejection returned when the query string cannot be bound into the
/// criteria composite.
#[derive(Debug, Error)]
pub enum CriteriaRejection {
    /// Binding the normalized parameters failed.
    #[error("invalid query criteria: {0}")]
    Bind(#[from] BindError),
}

impl IntoResponse for CriteriaRejection {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// Parse a raw query string and bind it into a fresh criteria composite.
///
/// Percent-decoding follows `application/x-www-form-urlencoded` rules;
/// repeated keys keep their first value.
pub fn criteria_from_query<T>(query: &str) -> Result<T, BindError>
where
    T: BindTarget + Default,
{
    let params = ParamMap::from_query_pairs(
        form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned())),
    );
    let mut criteria = T::default();
    bind_params(&mut criteria, &params)?;
    Ok(criteria)
}

/// Extractor that binds the request query string into a criteria
/// composite `T`.
///
/// `T` is any type declared through `sift_query::criteria!` (or with a
/// hand-written `BindTarget` implementation) that also implements
/// `Default`. An empty or absent query string yields `T::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriteriaQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for CriteriaQuery<T>
where
    T: BindTarget + Default + Send,
    S: Send + Sync,
{
    type Rejection = CriteriaRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        debug!(query, "binding request criteria");
        let criteria = criteria_from_query(query)?;
        Ok(CriteriaQuery(criteria))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{criteria_from_query, CriteriaQuery, CriteriaRejection};
    pub use sift_query::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use axum::http::Request;
    use sift_query::criteria;
    use sift_query::criteria::{IntFilter, StringFilter};
    use sift_query::params::ParamValue;

    criteria! {
        struct UserCriteria {
            "Name" => name: StringFilter,
            "Age" => age: IntFilter,
        }
    }

    #[test]
    fn test_criteria_from_query() {
        let criteria: UserCriteria =
            criteria_from_query("name.contains=al&age.gte=18&age.lt=65").unwrap();

        assert_eq!(criteria.name.contains.as_deref(), Some("al"));
        assert_eq!(criteria.age.gte, Some(18));
        assert_eq!(criteria.age.lt, Some(65));
    }

    #[test]
    fn test_criteria_from_query_percent_decoding() {
        let criteria: UserCriteria =
            criteria_from_query("name.equals=a%20b%26c").unwrap();
        assert_eq!(criteria.name.equals.as_deref(), Some("a b&c"));
    }

    #[test]
    fn test_empty_query_yields_default() {
        let criteria: UserCriteria = criteria_from_query("").unwrap();
        assert_eq!(criteria, UserCriteria::default());
    }

    #[test]
    fn test_repeated_keys_keep_first_value() {
        let criteria: UserCriteria =
            criteria_from_query("age.gte=18&age.gte=21").unwrap();
        assert_eq!(criteria.age.gte, Some(18));
    }

    #[test]
    fn test_scalar_target_rejects() {
        let err = criteria_from_query::<Option<i64>>("age.gte=18").unwrap_err();
        assert_eq!(err.kind(), "invalid_target");
    }

    #[test]
    fn test_shape_mismatch_inside_composite() {
        // `name` arrives as a whole (uppercased) scalar key, so the
        // composite never sees it; `Name` only binds through dotted keys.
        let criteria: UserCriteria = criteria_from_query("name=al").unwrap();
        assert_eq!(criteria.name, StringFilter::default());
    }

    #[test]
    fn test_param_value_shapes() {
        let params = ParamMap::from_query_pairs([("age.gte", "18"), ("limit", "5")]);
        assert!(params.get("Age").is_some_and(ParamValue::is_map));
        assert!(params.get("LIMIT").is_some_and(|v| !v.is_map()));
    }

    #[tokio::test]
    async fn test_extractor_from_request_parts() {
        let request = Request::builder()
            .uri("/users?name.contains=al&age.gte=18")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let CriteriaQuery(criteria) =
            CriteriaQuery::<UserCriteria>::from_request_parts(&mut parts, &())
                .await
                .unwrap();

        assert_eq!(criteria.name.contains.as_deref(), Some("al"));
        assert_eq!(criteria.age.gte, Some(18));
    }

    #[tokio::test]
    async fn test_extractor_with_no_query() {
        let request = Request::builder().uri("/users").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let CriteriaQuery(criteria) =
            CriteriaQuery::<UserCriteria>::from_request_parts(&mut parts, &())
                .await
                .unwrap();

        assert_eq!(criteria, UserCriteria::default());
    }
}
