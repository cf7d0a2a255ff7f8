//! Input discovery and JSON decoding for the `price` command

use rayon::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::cli::AppError;

const STDIN_ARG: &str = "-";
const STDIN_LABEL: &str = "<stdin>";

/// One API response payload and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Response {
    /// `path` for a single-response file, `path:N` otherwise
    pub(crate) label: String,
    pub(crate) value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Stdin,
    File(PathBuf),
}

fn has_glob_meta(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Expand the command line inputs into sources, keeping argument order.
fn resolve_sources(inputs: &[String]) -> Result<Vec<Source>, AppError> {
    let mut sources = Vec::new();
    for input in inputs {
        if input == STDIN_ARG {
            sources.push(Source::Stdin);
        } else if has_glob_meta(input) {
            let mut matched: Vec<PathBuf> = glob::glob(input)?
                .filter_map(Result::ok)
                .filter(|p| p.is_file())
                .collect();
            if matched.is_empty() {
                return Err(AppError::NoMatch {
                    pattern: input.clone(),
                });
            }
            matched.sort();
            sources.extend(matched.into_iter().map(Source::File));
        } else {
            sources.push(Source::File(PathBuf::from(input)));
        }
    }
    Ok(sources)
}

/// Decode a JSON document, a JSON array, or a stream of JSON values (JSON lines).
fn parse_values(content: &str, path: &Path) -> Result<Vec<Value>, AppError> {
    let mut values = Vec::new();
    for item in serde_json::Deserializer::from_str(content).into_iter::<Value>() {
        match item.map_err(|source| AppError::Json {
            path: path.to_path_buf(),
            source,
        })? {
            Value::Array(items) => values.extend(items),
            value => values.push(value),
        }
    }
    Ok(values)
}

fn label_responses(name: &str, values: Vec<Value>) -> Vec<Response> {
    if values.len() == 1 {
        return values
            .into_iter()
            .map(|value| Response {
                label: name.to_string(),
                value,
            })
            .collect();
    }
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| Response {
            label: format!("{name}:{}", i + 1),
            value,
        })
        .collect()
}

fn read_source(source: &Source, stdin: Option<&str>) -> Result<Vec<Response>, AppError> {
    let (path, content) = match source {
        Source::Stdin => (PathBuf::from(STDIN_LABEL), stdin.unwrap_or_default().to_string()),
        Source::File(path) => {
            let content = fs::read_to_string(path).map_err(|source| AppError::Io {
                path: path.clone(),
                source,
            })?;
            (path.clone(), content)
        }
    };

    let values = parse_values(&content, &path)?;
    if values.is_empty() {
        return Err(AppError::Empty { path });
    }
    tracing::debug!(path = %path.display(), responses = values.len(), "decoded input");
    Ok(label_responses(&path.display().to_string(), values))
}

/// Load every response named by `inputs`, in argument order.
///
/// Files are read and decoded in parallel; stdin is read once up front.
pub(crate) fn load_responses(inputs: &[String]) -> Result<Vec<Response>, AppError> {
    let sources = resolve_sources(inputs)?;
    tracing::debug!(sources = sources.len(), "resolved inputs");

    let stdin = if sources.contains(&Source::Stdin) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| AppError::Io {
                path: PathBuf::from(STDIN_LABEL),
                source,
            })?;
        Some(buf)
    } else {
        None
    };

    let per_source = sources
        .par_iter()
        .map(|source| read_source(source, stdin.as_deref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(per_source.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn single_object_keeps_plain_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "one.json", r#"{"usage": {"seconds": 1}}"#);
        let arg = path.display().to_string();

        let responses = load_responses(&[arg.clone()]).unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].label, arg);
        assert_eq!(responses[0].value, json!({"usage": {"seconds": 1}}));
    }

    #[test]
    fn arrays_and_json_lines_are_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let array = write(dir.path(), "a.json", r#"[{"n": 1}, {"n": 2}]"#);
        let lines = write(dir.path(), "b.jsonl", "{\"n\": 3}\n\n{\"n\": 4}\n{\"n\": 5}\n");

        let responses = load_responses(&[
            array.display().to_string(),
            lines.display().to_string(),
        ])
        .unwrap();
        let labels: Vec<_> = responses.iter().map(|r| r.label.clone()).collect();
        assert_eq!(
            labels,
            vec![
                format!("{}:1", array.display()),
                format!("{}:2", array.display()),
                format!("{}:1", lines.display()),
                format!("{}:2", lines.display()),
                format!("{}:3", lines.display()),
            ]
        );
        assert_eq!(responses[4].value, json!({"n": 5}));
    }

    #[test]
    fn glob_expands_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", r#"{"n": 2}"#);
        write(dir.path(), "a.json", r#"{"n": 1}"#);
        write(dir.path(), "notes.txt", "ignored");

        let pattern = dir.path().join("*.json").display().to_string();
        let responses = load_responses(&[pattern]).unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].value, json!({"n": 1}));
        assert_eq!(responses[1].value, json!({"n": 2}));
    }

    #[test]
    fn glob_without_match_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("*.json").display().to_string();
        let err = load_responses(&[pattern]).unwrap_err();
        assert!(matches!(err, AppError::NoMatch { .. }));
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json").display().to_string();
        assert!(matches!(
            load_responses(&[path]).unwrap_err(),
            AppError::Io { .. }
        ));
    }

    #[test]
    fn invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.json", "{\"usage\": ");
        let err = load_responses(&[path.display().to_string()]).unwrap_err();
        assert!(matches!(err, AppError::Json { .. }));
    }

    #[test]
    fn empty_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "empty.json", "  \n");
        let err = load_responses(&[path.display().to_string()]).unwrap_err();
        assert!(matches!(err, AppError::Empty { .. }));
    }
}
