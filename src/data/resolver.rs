use crate::error::ResolveError;

use super::model::SchoolDirectory;

// ---------------------------------------------------------------------------
// ResolvedSchool
// ---------------------------------------------------------------------------

/// A school identified by user input, with its position on the school axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchool {
    pub name: String,
    pub code: String,
    pub index: usize,
}

/// Resolve a school name or code against the directory.
///
/// Lookup order:
/// * exact name match → code from that entry
/// * exact code match → name by reverse lookup
/// * otherwise → [`ResolveError::InvalidIdentifier`]
///
/// The index is the code's position among all directory codes.
pub fn resolve(input: &str, directory: &SchoolDirectory) -> Result<ResolvedSchool, ResolveError> {
    let (name, code) = if let Some(code) = directory.code_for_name(input) {
        (input, code)
    } else if let Some(name) = directory.name_for_code(input) {
        (name, input)
    } else {
        return Err(ResolveError::InvalidIdentifier(input.to_string()));
    };

    let index = directory
        .index_of_code(code)
        .ok_or_else(|| ResolveError::InvalidIdentifier(input.to_string()))?;

    Ok(ResolvedSchool {
        name: name.to_string(),
        code: code.to_string(),
        index,
    })
}
