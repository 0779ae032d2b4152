//! `--filter ROLE=VALUE` arguments.

use insight_model::{FilterState, ModelError, RoleFilter, SemanticRole};

/// Parses `role=value`. The role accepts the same aliases as settings files;
/// the value is kept verbatim apart from surrounding whitespace.
pub fn parse_filter(arg: &str) -> Result<(SemanticRole, RoleFilter), ModelError> {
    let (role, value) = arg
        .split_once('=')
        .ok_or_else(|| ModelError::InvalidFilter(arg.to_string()))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ModelError::InvalidFilter(arg.to_string()));
    }
    Ok((role.parse()?, RoleFilter::from(value)))
}

/// Builds the filter state for one report run. Later filters for the same
/// role win.
pub fn filter_state<'a>(
    search: Option<&str>,
    filters: impl IntoIterator<Item = &'a str>,
) -> Result<FilterState, ModelError> {
    let mut state = FilterState::new().with_search(search.unwrap_or_default());
    for arg in filters {
        let (role, filter) = parse_filter(arg)?;
        state.set_role_filter(role, filter);
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_aliases_are_accepted() {
        let (role, filter) = parse_filter("dept=Sales").expect("valid");
        assert_eq!(role, SemanticRole::Department);
        assert_eq!(filter, RoleFilter::Only("Sales".to_string()));
    }

    #[test]
    fn missing_separator_is_rejected() {
        assert!(matches!(
            parse_filter("region"),
            Err(ModelError::InvalidFilter(_))
        ));
        assert!(matches!(
            parse_filter("region= "),
            Err(ModelError::InvalidFilter(_))
        ));
        assert!(matches!(
            parse_filter("colour=red"),
            Err(ModelError::UnknownRole(_))
        ));
    }
}
