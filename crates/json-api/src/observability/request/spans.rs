//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    /// Path with identifiers collapsed, used as the metrics route label.
    pub(super) route: String,
    pub(super) span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = normalise_path(path);
    let span_name = format!("{method} {route}");

    RequestSpanName { route, span_name }
}

fn normalise_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_collapsed() {
        let names = request_span_name(
            "GET",
            "/offers/0190f3c6-6c1e-7a8e-9d0b-3f1f6a9c2b11/usage",
        );

        assert_eq!(names.route, "/offers/{uuid}/usage");
        assert_eq!(names.span_name, "GET /offers/{uuid}/usage");
    }

    #[test]
    fn plain_paths_are_kept() {
        assert_eq!(
            request_span_name("POST", "/discounts/validate").route,
            "/discounts/validate"
        );
        assert_eq!(request_span_name("GET", "/").route, "/");
    }
}
