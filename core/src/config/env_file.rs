use std::path::Path;

/// Parse a dotenv-style file into `(KEY, VALUE)` pairs.
///
/// Blank lines and `#` comments are skipped; an optional `export ` prefix is
/// accepted; values wrapped in matching single or double quotes are unquoted
/// and unescaped.
pub fn parse_env_file(path: &Path) -> anyhow::Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read env file {}: {}", path.display(), e))?;
    parse_env_str(&content)
}

pub fn parse_env_str(content: &str) -> anyhow::Result<Vec<(String, String)>> {
    let mut out = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (k, v) = line.split_once('=').ok_or_else(|| {
            anyhow::anyhow!("invalid env entry at line {} (expected KEY=VALUE)", idx + 1)
        })?;
        let key = k.trim();
        if key.is_empty() {
            anyhow::bail!("invalid env entry at line {} (empty key)", idx + 1);
        }
        let value = parse_env_value(v.trim(), idx + 1)?;
        out.push((key.to_string(), value));
    }

    Ok(out)
}

fn parse_env_value(value: &str, line_no: usize) -> anyhow::Result<String> {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return unescape_env_value(&value[1..value.len() - 1], line_no);
        }
    }
    Ok(value.to_string())
}

fn unescape_env_value(value: &str, line_no: usize) -> anyhow::Result<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(next) = chars.next() else {
            anyhow::bail!("invalid escape at line {} (trailing backslash)", line_no);
        };
        match next {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            other => out.push(other),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comments_blanks_and_quotes() {
        let pairs = parse_env_str(
            "# header\n\nBRAINTRUST_API_KEY='sk-1'\nexport OTHER=\"a\\tb\"\nPLAIN=value \n",
        )
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("BRAINTRUST_API_KEY".to_string(), "sk-1".to_string()),
                ("OTHER".to_string(), "a\tb".to_string()),
                ("PLAIN".to_string(), "value".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_line_without_separator() {
        let err = parse_env_str("NOT_A_PAIR\n").unwrap_err();
        assert!(err.to_string().contains("at line 1"), "{err}");
    }

    #[test]
    fn errors_report_the_offending_line_number() {
        let err = parse_env_str("# comment\nOK=1\n=value\n").unwrap_err();
        assert!(err.to_string().contains("at line 3"), "{err}");

        let err = parse_env_str("A=1\nB=\"tail\\\"\n").unwrap_err();
        assert!(err.to_string().contains("at line 2"), "{err}");
    }
}
