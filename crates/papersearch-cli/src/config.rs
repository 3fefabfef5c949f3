use std::path::Path;
use std::{env, fs};

use miette::{IntoDiagnostic, miette};
use papersearch_pager::PagerConfig;

/// Read a TOML pager config, expanding `$VAR` references from the
/// environment first.
pub fn load(path: &Path) -> miette::Result<PagerConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| miette!("error reading config file {}: {}", path.display(), e))?;
    parse(&substitute_env(contents, env::vars()))
}

pub fn parse(contents: &str) -> miette::Result<PagerConfig> {
    let config: PagerConfig =
        toml::from_str(contents).map_err(|e| miette!("error parsing config file {}", e))?;
    config.validate().into_diagnostic()?;
    Ok(config)
}

fn substitute_env(
    mut contents: String,
    vars: impl IntoIterator<Item = (String, String)>,
) -> String {
    let mut vars: Vec<_> = vars.into_iter().collect();
    // Longest names first so `$PAGE_SIZE_MAX` is not eaten by `$PAGE_SIZE`.
    vars.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    for (k, v) in vars {
        contents = contents.replace(&format!("${}", k), &v);
    }
    contents
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config = parse(
            r#"
            page_size = 20
            hidden_class = "is-hidden"

            [authors]
            items = "author-row"
            next = "author-next"
            prev = "author-prev"
            "#,
        )
        .unwrap();

        assert_eq!(config.page_size, 20);
        assert_eq!(config.hidden_class, "is-hidden");
        assert_eq!(config.authors.items, "author-row");
        assert_eq!(config.papers.items, "js-paperTitle");
        assert_eq!(config.offset_attribute, "data-next-start");
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse("").unwrap(), PagerConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse("page_size = 0").is_err());
        assert!(parse("hidden_class = \"\"").is_err());
        assert!(parse("page_size = \"ten\"").is_err());
    }

    #[test]
    fn test_env_substitution() {
        let contents = "page_size = $PAGE_SIZE\nhidden_class = \"$PAGE_SIZE_CLASS\"".to_string();
        let vars = [
            ("PAGE_SIZE".to_string(), "25".to_string()),
            ("PAGE_SIZE_CLASS".to_string(), "gone".to_string()),
        ];
        let config = parse(&substitute_env(contents, vars)).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.hidden_class, "gone");
    }

    #[test]
    fn test_load_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pager.toml");
        let config = load(&path).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.papers.next, "js-nextPaperButton");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/pager.toml")).unwrap_err();
        assert!(err.to_string().starts_with("error reading config file"));
    }
}
