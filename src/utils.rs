//! Utility functions for filename handling

/// Make a display title safe to use as a filename inside a workspace
///
/// Path separators, NUL, and other control characters are replaced with `_`
/// so a hostile or merely unusual title can never escape its workspace
/// directory. The extraction binary sanitizes its own output names; this is
/// for names we build ourselves (lyric files named after titles).
///
/// # Examples
///
/// ```
/// use media_dl::utils::sanitize_filename;
///
/// assert_eq!(sanitize_filename("AC/DC - Back in Black"), "AC_DC - Back in Black");
/// assert_eq!(sanitize_filename("plain title"), "plain title");
/// ```
#[must_use]
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Build a Content-Disposition header value for an attachment download
///
/// Emits both the plain `filename` parameter (ASCII fallback, quotes and
/// backslashes stripped) and the RFC 5987 `filename*` parameter so non-ASCII
/// titles survive the round trip through every client.
///
/// # Examples
///
/// ```
/// use media_dl::utils::attachment_content_disposition;
///
/// let value = attachment_content_disposition("Song A.mp3");
/// assert_eq!(value, "attachment; filename=\"Song A.mp3\"; filename*=UTF-8''Song%20A.mp3");
/// ```
#[must_use]
pub fn attachment_content_disposition(filename: &str) -> String {
    let ascii_fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii() && c != '"' && c != '\\' && !c.is_ascii_control() {
                c
            } else {
                '_'
            }
        })
        .collect();

    let encoded = urlencoding::encode(filename);

    format!("attachment; filename=\"{ascii_fallback}\"; filename*=UTF-8''{encoded}")
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_filename("a/b"), "a_b");
        assert_eq!(sanitize_filename("a\\b"), "a_b");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
    }

    #[test]
    fn sanitize_replaces_control_characters() {
        assert_eq!(sanitize_filename("tab\there"), "tab_here");
        assert_eq!(sanitize_filename("nul\0byte"), "nul_byte");
    }

    #[test]
    fn sanitize_keeps_ordinary_titles() {
        assert_eq!(sanitize_filename("Song A"), "Song A");
        assert_eq!(sanitize_filename("日本語タイトル"), "日本語タイトル");
        assert_eq!(sanitize_filename("dots.and-dashes_ok"), "dots.and-dashes_ok");
    }

    #[test]
    fn content_disposition_plain_ascii() {
        let value = attachment_content_disposition("track.mp3");
        assert_eq!(
            value,
            "attachment; filename=\"track.mp3\"; filename*=UTF-8''track.mp3"
        );
    }

    #[test]
    fn content_disposition_encodes_spaces_and_unicode() {
        let value = attachment_content_disposition("Söng Ä.mp3");
        assert!(value.starts_with("attachment; filename=\"S_ng _.mp3\""));
        assert!(value.contains("filename*=UTF-8''S%C3%B6ng%20%C3%84.mp3"));
    }

    #[test]
    fn content_disposition_strips_quotes_from_fallback() {
        let value = attachment_content_disposition("a\"b.zip");
        assert!(value.contains("filename=\"a_b.zip\""));
        assert!(value.contains("filename*=UTF-8''a%22b.zip"));
    }
}
