//! Error reporting for the biofiles CLI

use biofiles_core::{BioFilesError, ErrorKind};

/// Exit status for a failed run: 2 for an unknown gene, 3 for an invalid
/// neighbour window, 1 for everything else.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match core_error(error).map(BioFilesError::kind) {
        Some(ErrorKind::Lookup) => 2,
        Some(ErrorKind::Validation) => 3,
        Some(ErrorKind::Io) | None => 1,
    }
}

fn core_error(error: &anyhow::Error) -> Option<&BioFilesError> {
    error.chain().find_map(|cause| cause.downcast_ref::<BioFilesError>())
}

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &anyhow::Error) -> String {
    let mut message = format!("{:#}", error);

    match core_error(error) {
        Some(BioFilesError::Io { path, .. }) => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the input and write permissions for the output directory",
                path.display()
            ));
        }
        Some(BioFilesError::GeneNotFound { .. }) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Gene names are matched exactly against /gene qualifiers of CDS features\n\
                 • Only genes annotated inside a CDS feature can be selected",
            );
        }
        Some(BioFilesError::TooManyBefore { .. }) | Some(BioFilesError::TooManyAfter { .. }) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Lower --before or --after for genes near the ends of the record",
            );
        }
        None => {}
    }

    message
}
