//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Collapse identifiers so every room, assignment and uploaded file shares one
/// route label.
fn normalise_path_for_span_name(path: &str) -> String {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        return "/".to_owned();
    }

    if trimmed == "uploads" || trimmed.starts_with("uploads/") {
        return "/uploads/{file}".to_owned();
    }

    let segments: Vec<&str> = trimmed
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_collapsed() {
        let uuid = Uuid::now_v7();

        assert_eq!(
            normalise_path_for_span_name(&format!("/assignments/{uuid}/checkout")),
            "/assignments/{uuid}/checkout"
        );
        assert_eq!(
            normalise_path_for_span_name(&format!("/rooms/public/{uuid}")),
            "/rooms/public/{uuid}"
        );
    }

    #[test]
    fn uploaded_files_share_one_label() {
        assert_eq!(
            normalise_path_for_span_name("/uploads/rooms/0191f5c2.png"),
            "/uploads/{file}"
        );
    }

    #[test]
    fn root_and_trailing_slashes() {
        assert_eq!(normalise_path_for_span_name("/"), "/");
        assert_eq!(normalise_path_for_span_name("/rooms/"), "/rooms");
    }

    #[test]
    fn span_name_prefixes_method() {
        let names = request_span_name("GET", "/assignments/pending");

        assert_eq!(names.otel_span_name, "GET /assignments/pending");
    }
}
