use crate::error::ParseError;
use crate::outcome::ReturnCode;

/// A `@<code>@<value>...` data field split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFieldParts {
    pub return_code: ReturnCode,
    /// Remaining components, verbatim.
    pub values: Vec<Vec<u8>>,
}

/// Split a result data field into its hex return code and values.
///
/// The text must start with `@` and carry a non-empty hex return code in
/// the second component.
pub fn slice_data_field_in_parts(data: &str) -> Result<DataFieldParts, ParseError> {
    if data.is_empty() {
        return Err(ParseError::EmptyDataField);
    }

    let parts: Vec<&str> = data.split('@').collect();
    if parts.len() < 2 {
        return Err(ParseError::CannotProcessDataField);
    }
    if parts[1].is_empty() {
        return Err(ParseError::NoReturnCode);
    }
    if !parts[0].is_empty() {
        return Err(ParseError::CannotProcessDataField);
    }

    let code = hex::decode(parts[1]).map_err(|_| ParseError::CannotProcessDataField)?;

    Ok(DataFieldParts {
        return_code: ReturnCode::from_text(&String::from_utf8_lossy(&code)),
        values: parts[2..].iter().map(|part| part.as_bytes().to_vec()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_errors() {
        assert_eq!(
            slice_data_field_in_parts(""),
            Err(ParseError::EmptyDataField)
        );
        assert_eq!(
            slice_data_field_in_parts("claimRewards"),
            Err(ParseError::CannotProcessDataField)
        );
        assert_eq!(
            slice_data_field_in_parts("aaa@@"),
            Err(ParseError::NoReturnCode)
        );
        assert_eq!(slice_data_field_in_parts("@"), Err(ParseError::NoReturnCode));
        assert_eq!(
            slice_data_field_in_parts("aaa@6f6b"),
            Err(ParseError::CannotProcessDataField)
        );
        assert_eq!(
            slice_data_field_in_parts("@zz"),
            Err(ParseError::CannotProcessDataField)
        );
    }

    #[test]
    fn test_slice_ok_with_values() {
        let parts = slice_data_field_in_parts("@6f6b@03@").unwrap();
        assert_eq!(parts.return_code, ReturnCode::Ok);
        assert_eq!(parts.values, vec![b"03".to_vec(), Vec::new()]);
    }

    #[test]
    fn test_slice_user_error() {
        let parts = slice_data_field_in_parts("@75736572206572726f72@07").unwrap();
        assert_eq!(parts.return_code, ReturnCode::UserError);
        assert_eq!(parts.values, vec![b"07".to_vec()]);
    }

    #[test]
    fn test_slice_unknown_code() {
        let parts = slice_data_field_in_parts("@6e6f7065").unwrap();
        assert_eq!(parts.return_code, ReturnCode::Other("nope".into()));
        assert!(parts.values.is_empty());
    }
}
