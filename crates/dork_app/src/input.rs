use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dork_core::parse_dorks;

/// Reads a UTF-8 dork file, one dork per line, dropping blank lines.
pub(crate) fn load_dorks(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to load dork file {}", path.display()))?;
    Ok(parse_dorks(&raw))
}

#[cfg(test)]
mod tests {
    use super::load_dorks;
    use std::fs;

    #[test]
    fn loads_trimmed_non_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dorks.txt");
        fs::write(&path, "inurl:admin\r\n\n   \n  intitle:\"index of\"  \n").unwrap();

        assert_eq!(
            load_dorks(&path).unwrap(),
            vec!["inurl:admin", "intitle:\"index of\""]
        );
    }

    #[test]
    fn non_utf8_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dorks.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(load_dorks(&path).is_err());
    }
}
