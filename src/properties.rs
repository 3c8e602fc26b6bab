//! Reader for `key=value` properties files with `${name}` interpolation.

use crate::error::{AddVersionError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Parsed properties, with references already expanded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    /// Load and interpolate a properties file
    ///
    /// Properties files are ISO-8859-1, so every byte maps to one char.
    pub fn load(path: &Path) -> Result<Self> {
        let text: String = fs::read(path)?.into_iter().map(char::from).collect();
        Self::parse(&text).map_err(|e| match e {
            AddVersionError::Properties(msg) => {
                AddVersionError::properties(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse properties text
    ///
    /// Blank lines and lines starting with `#` or `!` are skipped. Keys and
    /// values are separated by the first `=` or `:` and trimmed. Lines without
    /// a separator define a key with an empty value.
    pub fn parse(text: &str) -> Result<Self> {
        let mut raw = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let (key, value) = match line.find(['=', ':']) {
                Some(idx) => (line[..idx].trim(), line[idx + 1..].trim()),
                None => (line, ""),
            };
            raw.insert(key.to_string(), value.to_string());
        }

        let reference = Regex::new(r"\$\{([^}]+)\}")?;
        let mut values = HashMap::with_capacity(raw.len());
        for key in raw.keys() {
            let mut chain = Vec::new();
            let value = resolve(key, &raw, &reference, &mut chain)?;
            values.insert(key.clone(), value);
        }

        Ok(Properties { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing key is an error
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| AddVersionError::properties(format!("missing property '{}'", key)))
    }
}

fn resolve(
    key: &str,
    raw: &HashMap<String, String>,
    reference: &Regex,
    chain: &mut Vec<String>,
) -> Result<String> {
    if chain.iter().any(|k| k == key) {
        chain.push(key.to_string());
        return Err(AddVersionError::properties(format!(
            "reference cycle: {}",
            chain.join(" -> ")
        )));
    }

    let value = raw.get(key).ok_or_else(|| {
        AddVersionError::properties(format!("undefined reference '${{{}}}'", key))
    })?;

    chain.push(key.to_string());
    let mut expanded = String::with_capacity(value.len());
    let mut last = 0;
    for caps in reference.captures_iter(value) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        expanded.push_str(&value[last..whole.start()]);
        expanded.push_str(&resolve(name.as_str().trim(), raw, reference, chain)?);
        last = whole.end();
    }
    expanded.push_str(&value[last..]);
    chain.pop();

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values() {
        let props = Properties::parse("# comment\n! also\n\nversion.base=9.1.0\nname : lucene\n").unwrap();
        assert_eq!(props.get("version.base"), Some("9.1.0"));
        assert_eq!(props.get("name"), Some("lucene"));
    }

    #[test]
    fn test_interpolation() {
        let props = Properties::parse(
            "version.base=9.1.0\nversion.suffix=SNAPSHOT\nversion.full=${version.base}-${version.suffix}\n",
        )
        .unwrap();
        assert_eq!(props.get("version.full"), Some("9.1.0-SNAPSHOT"));
    }

    #[test]
    fn test_nested_interpolation() {
        let props = Properties::parse("a=${b}/x\nb=${c}\nc=root\n").unwrap();
        assert_eq!(props.get("a"), Some("root/x"));
    }

    #[test]
    fn test_undefined_reference() {
        let err = Properties::parse("a=${missing}\n").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_cycle_is_reported() {
        let err = Properties::parse("a=${b}\nb=${a}\n").unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_require() {
        let props = Properties::parse("k=v\n").unwrap();
        assert_eq!(props.require("k").unwrap(), "v");
        assert!(props.require("nope").is_err());
    }

    #[test]
    fn test_load_decodes_latin1() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("build-options.properties");
        fs::write(&path, b"# maintained by J\xe9r\xf4me\nversion.base=9.1.0\nowner=Andr\xe9\n").unwrap();

        let props = Properties::load(&path).unwrap();
        assert_eq!(props.get("version.base"), Some("9.1.0"));
        assert_eq!(props.get("owner"), Some("Andr\u{e9}"));
    }

    #[test]
    fn test_value_may_contain_separators() {
        let props = Properties::parse("url=http://example.org/a=b\n").unwrap();
        assert_eq!(props.get("url"), Some("http://example.org/a=b"));
    }
}
