//! User confirmation prompts for state-changing operations

use dialoguer::Confirm;

/// Ask before sending an update
///
/// Skipped (returns `true`) when `auto_confirm` or batch mode is set.
pub fn confirm_update(
    description: &str,
    auto_confirm: bool,
    batch: bool,
) -> Result<bool, dialoguer::Error> {
    if auto_confirm || batch {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(format!("{}?", description))
        .default(false)
        .interact()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_confirm_skips_prompt() {
        assert!(confirm_update("Update variable 'var-1'", true, false).unwrap());
    }

    #[test]
    fn test_batch_skips_prompt() {
        assert!(confirm_update("Update variable 'var-1'", false, true).unwrap());
    }
}
