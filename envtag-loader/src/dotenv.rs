//! Env file reading
//!
//! Files are parsed with `dotenvy` without touching the process
//! environment; their entries only ever feed a [`MapSource`].

use crate::error::LoadError;
use crate::options::EnvFile;
use envtag_core::MapSource;
use std::io::ErrorKind;
use tracing::{info, warn};

/// Name of the source holding merged file values.
pub const FILES_SOURCE: &str = "files";

/// Read one env file into `(key, value)` pairs in file order.
///
/// Returns `Ok(None)` for a missing or unreadable optional file. Lines that
/// fail to parse are skipped; any other read error fails a required file.
///
/// An unterminated quote swallows the rest of the file into one value that
/// never closes, so no entry after it is returned.
pub fn read_env_file(file: &EnvFile) -> Result<Option<Vec<(String, String)>>, LoadError> {
    let iter = match dotenvy::from_path_iter(&file.path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(err)) if err.kind() == ErrorKind::NotFound && !file.required => {
            warn!(path = %file.path.display(), "optional env file not found, skipping");
            return Ok(None);
        }
        Err(source) => return Err(file_error(file, source)),
    };

    let mut entries = Vec::new();
    for item in iter {
        match item {
            Ok(entry) => entries.push(entry),
            Err(err @ dotenvy::Error::LineParse(..)) => {
                warn!(path = %file.path.display(), error = %err, "skipping unparsable env file line");
            }
            // Read errors repeat on every call, so stop at the first one.
            Err(source) if file.required => return Err(file_error(file, source)),
            Err(err) => {
                warn!(path = %file.path.display(), error = %err, "optional env file unreadable, skipping");
                return Ok(None);
            }
        }
    }

    info!(path = %file.path.display(), entries = entries.len(), "loaded env file");
    Ok(Some(entries))
}

fn file_error(file: &EnvFile, source: dotenvy::Error) -> LoadError {
    LoadError::EnvFile {
        path: file.path.clone(),
        source,
    }
}

/// Read `files` in order into one source; later files override earlier ones.
pub fn read_env_files(files: &[EnvFile]) -> Result<MapSource, LoadError> {
    let mut source = MapSource::new(FILES_SOURCE);
    for file in files {
        if let Some(entries) = read_env_file(file)? {
            source.extend(entries);
        }
    }
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use envtag_core::ValueSource;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn env_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn required(path: impl Into<PathBuf>) -> EnvFile {
        EnvFile {
            path: path.into(),
            required: true,
        }
    }

    #[test]
    fn test_reads_quoted_values_and_skips_comments() {
        let file = env_file("# comment\n\nPLAIN=value\nDOUBLE=\"two words\"\nSINGLE='single'\n");
        let entries = read_env_file(&required(file.path())).unwrap().unwrap();
        assert_eq!(
            entries,
            vec![
                ("PLAIN".to_string(), "value".to_string()),
                ("DOUBLE".to_string(), "two words".to_string()),
                ("SINGLE".to_string(), "single".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_required_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.env");
        let err = read_env_file(&required(&path)).unwrap_err();
        match err {
            LoadError::EnvFile { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected env file error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_optional_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let file = EnvFile {
            path: dir.path().join("absent.env"),
            required: false,
        };
        assert!(read_env_file(&file).unwrap().is_none());
    }

    #[test]
    fn test_unreadable_required_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_env_file(&required(dir.path())).unwrap_err();
        match err {
            LoadError::EnvFile { path, source } => {
                assert_eq!(path, dir.path());
                assert!(matches!(source, dotenvy::Error::Io(_)));
            }
            other => panic!("expected env file error, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_optional_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let file = EnvFile {
            path: dir.path().to_path_buf(),
            required: false,
        };
        assert!(read_env_file(&file).unwrap().is_none());
    }

    #[test]
    fn test_unparsable_line_is_skipped() {
        let file = env_file("BAD LINE\nGOOD=1\n");
        let entries = read_env_file(&required(file.path())).unwrap().unwrap();
        assert_eq!(entries, vec![("GOOD".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_unterminated_quote_drops_rest_of_file() {
        let file = env_file("A='open\nGOOD=1\n");
        let entries = read_env_file(&required(file.path())).unwrap().unwrap();
        assert!(entries.is_empty(), "{entries:?}");
    }

    #[test]
    fn test_later_files_override_earlier() {
        let base = env_file("A=base\nB=base\n");
        let local = env_file("B=local\n");
        let source = read_env_files(&[required(base.path()), required(local.path())]).unwrap();
        assert_eq!(source.name(), FILES_SOURCE);
        assert_eq!(source.lookup("A").as_deref(), Some("base"));
        assert_eq!(source.lookup("B").as_deref(), Some("local"));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeMap;

        fn contents(values: &BTreeMap<String, String>) -> String {
            values.iter().map(|(k, v)| format!("{k}={v}\n")).collect()
        }

        proptest! {
            #[test]
            fn prop_later_file_wins(
                base in prop::collection::btree_map("[A-E]{1,2}", "[a-z0-9]{0,6}", 0..8),
                local in prop::collection::btree_map("[A-E]{1,2}", "[a-z0-9]{0,6}", 0..8),
            ) {
                let base_file = env_file(&contents(&base));
                let local_file = env_file(&contents(&local));
                let source = read_env_files(&[required(base_file.path()), required(local_file.path())]).unwrap();

                for key in base.keys().chain(local.keys()) {
                    let expected = local.get(key).or_else(|| base.get(key));
                    let actual = source.lookup(key);
                    prop_assert_eq!(actual.as_ref(), expected, "{}", key);
                }
            }
        }
    }
}
