//! Form feedback formatting
//!
//! Field messages for rejected forms, success notices, and the cause chain
//! of a failed submission.

use std::error::Error;

use crate::error::FinanceError;
use crate::services::Notice;
use crate::validation::ValidationErrors;

/// One line per invalid field, in field order
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut output = String::from("Please fix the following:\n");
    for (field, message) in errors.iter() {
        output.push_str(&format!("  {}: {}\n", field, message));
    }
    output
}

/// Title and description of a success notice
pub fn format_notice(notice: Notice) -> String {
    format!("{}\n  {}\n", notice.title(), notice.description())
}

/// The user-facing message of an error, with field messages or causes below it
pub fn format_error(error: &FinanceError) -> String {
    if let Some(errors) = error.validation_errors() {
        return format_validation_errors(errors);
    }

    let mut output = format!("Error: {}\n", error);
    let mut source = error.source();
    while let Some(cause) = source {
        output.push_str(&format!("  caused by: {}\n", cause));
        source = cause.source();
    }
    output
}
