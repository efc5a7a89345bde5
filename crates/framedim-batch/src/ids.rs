//! Identifier lists (`.gcd` files): one refcode per line.

use std::path::Path;

use crate::error::BatchError;

/// Trimmed identifiers in file order; blank lines and `#` comments skipped.
pub fn parse_identifiers(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn read_identifiers(path: &Path) -> Result<Vec<String>, BatchError> {
    let text = std::fs::read_to_string(path).map_err(|source| BatchError::ReadIdentifiers {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_identifiers(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blanks_and_comments() {
        let ids = parse_identifiers("# exported list\nABCDEF\n\n  GHIJKL  \r\n#XYZ\nMNOPQR");
        assert_eq!(ids, vec!["ABCDEF", "GHIJKL", "MNOPQR"]);
    }

    #[test]
    fn empty_file_has_no_identifiers() {
        assert!(parse_identifiers("").is_empty());
        assert!(parse_identifiers("\n\n   \n").is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(parse_identifiers("A\nA"), vec!["A", "A"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_identifiers(Path::new("/nonexistent/list.gcd")).unwrap_err();
        assert!(matches!(err, BatchError::ReadIdentifiers { .. }));
    }
}
