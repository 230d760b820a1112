use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },

    #[error("Duplicate column name '{0}'.")]
    DuplicateColumn(String),
}

/// Splits a `-S` override into its key and value at the first `=`.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(input.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: input.to_string(),
        });
    }
    Ok((key, value.trim()))
}

/// Parses a comma separated list of column names, e.g. `RMSD,MCQ,TM-score`.
pub fn parse_columns(input: &str) -> Result<Vec<String>, ParseError> {
    let mut columns: Vec<String> = Vec::new();
    for name in input.split(',').map(str::trim) {
        if name.is_empty() {
            return Err(ParseError::EmptyComponent {
                component: "column",
                input: input.to_string(),
            });
        }
        if columns.iter().any(|c| c == name) {
            return Err(ParseError::DuplicateColumn(name.to_string()));
        }
        columns.push(name.to_string());
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_splits_at_first_equals() {
        assert_eq!(
            parse_key_value("scoring.atoms=C5',P").unwrap(),
            ("scoring.atoms", "C5',P")
        );
        assert_eq!(parse_key_value(" a = b=c ").unwrap(), ("a", "b=c"));
    }

    #[test]
    fn key_value_requires_equals_and_key() {
        assert_eq!(
            parse_key_value("scoring.atoms"),
            Err(ParseError::InvalidKeyValue("scoring.atoms".into()))
        );
        assert!(matches!(
            parse_key_value("=P"),
            Err(ParseError::EmptyComponent {
                component: "key",
                ..
            })
        ));
    }

    #[test]
    fn columns_are_trimmed_in_order() {
        assert_eq!(
            parse_columns("RMSD, MCQ ,TM-score").unwrap(),
            vec!["RMSD", "MCQ", "TM-score"]
        );
    }

    #[test]
    fn columns_reject_empty_and_duplicate_names() {
        assert!(matches!(
            parse_columns("RMSD,,MCQ"),
            Err(ParseError::EmptyComponent {
                component: "column",
                ..
            })
        ));
        assert_eq!(
            parse_columns("RMSD,RMSD"),
            Err(ParseError::DuplicateColumn("RMSD".into()))
        );
    }
}
