use std::sync::OnceLock;
use wedding_errors::AppError;

pub const MAX_FIELD_LENGTH: usize = 200;

pub struct InputSanitizer;

impl InputSanitizer {
    /// Trims, strips control characters and collapses runs of whitespace.
    /// Empty results are rejected with a message naming `label`.
    pub fn require_text(label: &str, value: &str) -> Result<String, AppError> {
        Self::require_text_within(label, value, MAX_FIELD_LENGTH)
    }

    pub fn require_text_within(label: &str, value: &str, max_chars: usize) -> Result<String, AppError> {
        Self::optional_text_within(label, value, max_chars)?
            .ok_or_else(|| AppError::Validation(format!("{} is required", label)))
    }

    /// Like [`require_text`](Self::require_text) but an empty value is `None`.
    pub fn optional_text(label: &str, value: &str) -> Result<Option<String>, AppError> {
        Self::optional_text_within(label, value, MAX_FIELD_LENGTH)
    }

    pub fn optional_text_within(
        label: &str,
        value: &str,
        max_chars: usize,
    ) -> Result<Option<String>, AppError> {
        let cleaned = Self::clean(value);

        if cleaned.is_empty() {
            return Ok(None);
        }

        let length = cleaned.chars().count();
        if length > max_chars {
            tracing::warn!("Rejected over-long {} ({} chars)", label, length);
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                label, max_chars
            )));
        }

        Ok(Some(cleaned))
    }

    /// Cleans `value` and cuts it to `max_chars` instead of rejecting it.
    pub fn truncated(value: &str, max_chars: usize) -> String {
        Self::clean(value).chars().take(max_chars).collect()
    }

    fn clean(value: &str) -> String {
        static WHITESPACE: OnceLock<regex_lite::Regex> = OnceLock::new();
        let whitespace = WHITESPACE.get_or_init(|| {
            regex_lite::Regex::new(r"\s+").unwrap_or_else(|_| regex_lite::Regex::new(" +").unwrap())
        });

        let printable: String = value
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();

        whitespace.replace_all(printable.trim(), " ").into_owned()
    }
}
