//! The API endpoints URIs.
//!
//! Routes that take a parameter, e.g., '/api/users/{user_id}/categories', are
//! written with the parameter in braces the way axum expects.

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/coffee";
/// The route to ask for a category suggestion.
pub const CATEGORIZE: &str = "/api/categorize";
/// The route to list a user's categories.
pub const USER_CATEGORIES: &str = "/api/users/{user_id}/categories";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/users/{user_id}/categories',
/// '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| param_start + offset + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::COFFEE);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIZE);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::USER_CATEGORIES, "user-1"));
    }

    #[test]
    fn replaces_parameter_in_middle() {
        let formatted_path = format_endpoint(endpoints::USER_CATEGORIES, "user-1");

        assert_eq!(formatted_path, "/api/users/user-1/categories");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn replaces_parameter_at_end() {
        let formatted_path = format_endpoint("/hello/{world}", "1");

        assert_eq!(formatted_path, "/hello/1");
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", "1");

        assert_eq!(formatted_path, "/hello/world");
    }
}
