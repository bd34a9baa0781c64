use url::Url;

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Derive a local filename from a download URL, falling back to the request
/// title when the URL has no usable path segment.
pub fn file_name_for_url(url: &str, title: &str) -> String {
    let from_path = Url::parse(url).ok().and_then(|parsed| {
        parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .map(str::to_string)
    });

    match from_path {
        Some(name) => sanitize_filename(&name),
        None => format!("{}.download", sanitize_filename(title)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("test/file.zip"), "test_file.zip");
        assert_eq!(sanitize_filename("normal-name.zip"), "normal-name.zip");
    }

    #[test]
    fn test_file_name_from_url_path() {
        assert_eq!(
            file_name_for_url("https://example.com/archive/master.zip", "Glide"),
            "master.zip"
        );
    }

    #[test]
    fn test_file_name_falls_back_to_title() {
        assert_eq!(
            file_name_for_url("https://example.com", "My: Download"),
            "My_ Download.download"
        );
    }
}
