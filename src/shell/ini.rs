//! Line-oriented parser for the ini files the shell helpers read

use super::error::{ShellError, ShellResult};
use std::collections::HashMap;

/// A parsed ini entry: a bare top-level key or a `[section]` of keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniValue {
    Value(String),
    Section(HashMap<String, String>),
}

/// Parse ini text. With `process_sections`, keys nest under their section;
/// otherwise all keys land in one flat map where later duplicates win.
/// `path` is only used for error context.
pub fn parse_ini(
    path: &str,
    content: &str,
    process_sections: bool,
) -> ShellResult<HashMap<String, IniValue>> {
    let mut result: HashMap<String, IniValue> = HashMap::new();
    let mut current_section: Option<String> = None;

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') || line.len() < 3 {
                return Err(ShellError::ini_parse(
                    path,
                    idx + 1,
                    "Malformed section header",
                ));
            }
            let name = line[1..line.len() - 1].trim();
            if name.is_empty() {
                return Err(ShellError::ini_parse(path, idx + 1, "Empty section name"));
            }
            current_section = Some(name.to_string());
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ShellError::ini_parse(path, idx + 1, "Expected 'key = value'"));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ShellError::ini_parse(path, idx + 1, "Empty key"));
        }
        let value = unquote(value.trim());

        match (&current_section, process_sections) {
            (Some(section), true) => {
                let entry = result
                    .entry(section.clone())
                    .or_insert_with(|| IniValue::Section(HashMap::new()));
                // A bare key seen earlier under the same name gives way to the section
                if !matches!(entry, IniValue::Section(_)) {
                    *entry = IniValue::Section(HashMap::new());
                }
                if let IniValue::Section(keys) = entry {
                    keys.insert(key.to_string(), value);
                }
            }
            _ => {
                result.insert(key.to_string(), IniValue::Value(value));
            }
        }
    }

    Ok(result)
}

/// Strip one matching pair of single or double quotes.
fn unquote(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_sections() {
        let content = "[section1]\nvariable = value\n";

        let parsed = parse_ini("test.ini", content, true).unwrap();
        assert_eq!(parsed.len(), 1);

        let Some(IniValue::Section(keys)) = parsed.get("section1") else {
            panic!("Expected a section");
        };
        assert_eq!(keys.get("variable").unwrap(), "value");
    }

    #[test]
    fn test_parse_flat() {
        let content = "[section1]\na = 1\n[section2]\nb = 2\n";

        let parsed = parse_ini("test.ini", content, false).unwrap();
        assert_eq!(parsed.get("a").unwrap(), &IniValue::Value("1".to_string()));
        assert_eq!(parsed.get("b").unwrap(), &IniValue::Value("2".to_string()));
    }

    #[test]
    fn test_keys_before_any_section_stay_top_level() {
        let content = "top = level\n[s]\nnested = yes\n";

        let parsed = parse_ini("test.ini", content, true).unwrap();
        assert_eq!(
            parsed.get("top").unwrap(),
            &IniValue::Value("level".to_string())
        );
        assert!(matches!(parsed.get("s"), Some(IniValue::Section(_))));
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let content = "; a comment\n# another\n\nkey = value\n";

        let parsed = parse_ini("test.ini", content, false).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(
            parsed.get("key").unwrap(),
            &IniValue::Value("value".to_string())
        );
    }

    #[test]
    fn test_quoted_values_unwrapped() {
        let content = "a = \"double\"\nb = 'single'\nc = un\"quoted\n";

        let parsed = parse_ini("test.ini", content, false).unwrap();
        assert_eq!(parsed.get("a").unwrap(), &IniValue::Value("double".to_string()));
        assert_eq!(parsed.get("b").unwrap(), &IniValue::Value("single".to_string()));
        assert_eq!(
            parsed.get("c").unwrap(),
            &IniValue::Value("un\"quoted".to_string())
        );
    }

    #[test]
    fn test_malformed_line_errors() {
        let result = parse_ini("test.ini", "not a pair\n", false);
        assert!(result.is_err());

        if let Err(ShellError::IniParse { path, line, .. }) = result {
            assert_eq!(path, "test.ini");
            assert_eq!(line, 1);
        } else {
            panic!("Expected IniParse error");
        }
    }

    #[test]
    fn test_malformed_section_header_errors() {
        let result = parse_ini("test.ini", "[unclosed\n", true);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_flat_keys_overwrite() {
        let content = "k = first\nk = second\n";

        let parsed = parse_ini("test.ini", content, false).unwrap();
        assert_eq!(
            parsed.get("k").unwrap(),
            &IniValue::Value("second".to_string())
        );
    }

    #[test]
    fn test_empty_content() {
        let parsed = parse_ini("test.ini", "", true).unwrap();
        assert!(parsed.is_empty());
    }
}
