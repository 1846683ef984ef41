use thiserror::Error;

/// Errors surfaced by a conversion call.
///
/// A failed conversion is a plain return value; it leaves no state behind
/// and has no effect on subsequent calls.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input text is not valid JSON. Carries the parser's own
    /// diagnostic so the boundary layer can report it verbatim.
    #[error("invalid JSON input: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document flattened to zero rows.
    #[error("no data found in input document")]
    EmptyInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_keeps_parser_message() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let parser_message = err.to_string();

        let wrapped = ConvertError::from(err);
        assert!(wrapped.to_string().contains(&parser_message));
    }

    #[test]
    fn test_empty_input_message() {
        assert_eq!(
            ConvertError::EmptyInput.to_string(),
            "no data found in input document"
        );
    }
}
