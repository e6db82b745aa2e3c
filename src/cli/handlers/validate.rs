use crate::cli::output::OutputFormatter;
use crate::error::{NotifierError, Result};
use crate::validation::{Field, Validation};
use serde_json::json;

/// Handle the validate command
///
/// An invalid value is reported as an error so the exit status reflects it.
pub fn handle_validate_command(field: &str, value: &str, formatter: &OutputFormatter) -> Result<()> {
    let field: Field = field.parse()?;
    let outcome = field.validate(value);

    if formatter.is_json() {
        formatter.json(&json!({ "field": field, "result": outcome }))?;
    }

    match outcome {
        Validation::Valid => {
            formatter.success(&format!("✅ Valid {field}"));
            Ok(())
        },
        Validation::Invalid(reason) => Err(NotifierError::InvalidInput(reason)),
    }
}
