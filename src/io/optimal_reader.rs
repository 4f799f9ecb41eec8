use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::parse_decimal;

/// Source of known-optimal values. Queried at most once per instance.
pub trait OptimalLookup {
    fn lookup(&mut self, instance: &str) -> Option<f64>;
}

impl<F: FnMut(&str) -> Option<f64>> OptimalLookup for F {
    fn lookup(&mut self, instance: &str) -> Option<f64> {
        self(instance)
    }
}

/// Directory holding one reference file per instance, named exactly like the instance.
#[derive(Debug, Clone)]
pub struct ReferenceDirectory {
    path: PathBuf,
}

impl ReferenceDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OptimalLookup for ReferenceDirectory {
    fn lookup(&mut self, instance: &str) -> Option<f64> {
        read_optimal_value(&self.path, instance)
    }
}

/// Reads the known-optimal value of `instance` from `directory/instance`.
///
/// This is a soft lookup: a missing or unreadable file yields `None`, as does a file whose
/// last non-blank line is not a single decimal number.
pub fn read_optimal_value(directory: &Path, instance: &str) -> Option<f64> {
    let path = directory.join(instance);

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No reference file {path:?}");
            return None;
        }
        Err(e) => {
            warn!("Cannot open reference file {path:?}: {e}");
            return None;
        }
    };

    match optimal_from_reader(BufReader::new(file)) {
        Ok(optimal) => {
            debug!("Optimal value of {instance}: {optimal:?}");
            optimal
        }
        Err(e) => {
            warn!("Cannot read reference file {path:?}: {e}");
            None
        }
    }
}

/// Extracts the optimal value from the last non-blank line of `reader`.
///
/// Only read errors are reported as `Err`; every other kind of absence is `Ok(None)`.
pub fn optimal_from_reader(reader: impl BufRead) -> std::io::Result<Option<f64>> {
    let mut last_line = None;
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            last_line = Some(line);
        }
    }

    Ok(last_line.and_then(|line| single_token_value(&line)))
}

fn single_token_value(line: &str) -> Option<f64> {
    let mut tokens = line.split_whitespace();
    let token = tokens.next()?;
    if tokens.next().is_some() {
        // several numbers on the last line are ordinary instance data
        return None;
    }
    parse_decimal(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_optimal {
        ($name : ident, $str : expr, $expected : expr) => {
            #[test]
            fn $name() {
                let data: &[u8] = $str;
                assert_eq!(optimal_from_reader(data).unwrap(), $expected);
            }
        };
    }

    assert_optimal!(single_number, b"5 3\n1 2 7\n80\n", Some(80.0));
    assert_optimal!(trailing_blank_lines, b"1 2 7\n  1234.5 \n\n   \n\t\n", Some(1234.5));
    assert_optimal!(no_trailing_newline, b"1 2 7\n42", Some(42.0));
    assert_optimal!(crlf_line_endings, b"1 2 7\r\n42\r\n\r\n", Some(42.0));
    assert_optimal!(two_tokens, b"80\n10 20\n", None);
    assert_optimal!(not_a_number, b"80\nEOF\n", None);
    assert_optimal!(empty_file, b"", None);
    assert_optimal!(only_whitespace, b"\n  \n\t\n", None);
    assert_optimal!(negative_and_exponent, b"-1.5e2\n", Some(-150.0));

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let data: &[u8] = b"12\n\xff\xfe\n";
        assert!(optimal_from_reader(data).is_err());
    }

    #[test]
    fn reference_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("I1"), "3\n1 2 10\n80\n").unwrap();
        std::fs::write(dir.path().join("I2"), "3\n1 2 10\n10 20\n").unwrap();
        std::fs::create_dir(dir.path().join("I3")).unwrap();

        let mut lookup = ReferenceDirectory::new(dir.path());
        assert_eq!(lookup.lookup("I1"), Some(80.0));
        assert_eq!(lookup.lookup("I2"), None);
        assert_eq!(lookup.lookup("I3"), None);
        assert_eq!(lookup.lookup("missing"), None);
    }
}
