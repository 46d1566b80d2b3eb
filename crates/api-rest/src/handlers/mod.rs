//! Request handlers

pub mod admin;
pub mod feedback;

use crate::error::ApiError;

/// Map the first reported validation failure into the error envelope
pub(crate) fn validation_error(errors: validator::ValidationErrors) -> ApiError {
    let first = errors
        .field_errors()
        .into_iter()
        .next()
        .and_then(|(field, field_errors)| {
            field_errors.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                (field.to_string(), message)
            })
        });

    let (field, message) =
        first.unwrap_or_else(|| ("payload".to_string(), "invalid payload".to_string()));
    ApiError::Validation { field, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmitFeedbackRequest;
    use validator::Validate;

    #[test]
    fn test_validation_error_names_the_field() {
        let request = SubmitFeedbackRequest {
            rating: 0,
            review: "A review long enough to pass".to_string(),
        };
        let errors = request.validate().unwrap_err();

        match validation_error(errors) {
            ApiError::Validation { field, message } => {
                assert_eq!(field, "rating");
                assert!(message.contains("between 1 and 5"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
