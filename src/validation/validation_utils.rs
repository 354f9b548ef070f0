use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashSet;
use validator::ValidationError;

pub(crate) fn fail_validation_on_duplicates<T: Serialize>(
    duplicates: &[T],
    error_id: &'static str,
    reason: &str,
) -> Result<(), ValidationError> {
    if duplicates.is_empty() {
        Ok(())
    } else {
        let mut error = ValidationError::new(error_id);
        error.add_param(Cow::from("duplicates"), &duplicates);
        Err(error.with_message(Cow::Owned(reason.to_string())))
    }
}

/// Collects every name that occurs more than once, in order of first repetition.
pub(crate) fn find_duplicates<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = vec![];
    for name in names {
        if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}

pub(crate) fn validate_regex(regex: &str) -> Result<(), ValidationError> {
    match Regex::new(regex) {
        Ok(_) => Ok(()),
        Err(err) => {
            let mut error = ValidationError::new("invalid_regex");
            error.add_param(Cow::from("regex"), &regex);
            Err(error.with_message(Cow::Owned(err.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_fail_on_duplicates_fail() {
        let duplicates = vec!["rsa".to_string()];
        let res =
            fail_validation_on_duplicates(&duplicates, "duplicate_tables", "Duplicate tables");
        assert!(res.is_err());
    }

    #[rstest]
    fn test_fail_on_duplicates_pass() {
        let duplicates: Vec<String> = vec![];
        let res =
            fail_validation_on_duplicates(&duplicates, "duplicate_tables", "Duplicate tables");
        assert!(res.is_ok());
    }

    #[rstest]
    fn test_find_duplicates() {
        let duplicates = find_duplicates(["rsa", "uds", "rsa", "dsm", "rsa", "uds"]);
        assert_eq!(duplicates, vec!["rsa".to_string(), "uds".to_string()]);
    }

    #[rstest]
    fn test_validate_regex() {
        let regex = r"^test_Opiate300_\d+$";
        let res = validate_regex(regex);
        assert!(res.is_ok());
    }
    #[rstest]
    fn validate_regex_err() {
        let regex = "^test_(Opiate300";
        let res = validate_regex(regex);
        assert!(res.is_err());
    }
}
