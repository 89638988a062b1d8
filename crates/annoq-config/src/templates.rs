//! Starter files written by `annoq init`.
//!
//! The templates under `templates/` are real TOML documents listing every setting with its
//! default. They are written out commented, so a fresh file changes nothing until the user
//! uncomments a line.

/// Template for a directory `.annoq.toml`.
const LOCAL: &str = include_str!("../templates/config.toml");

/// Template for `~/.annoq.toml`.
const GLOBAL: &str = include_str!("../templates/config-global.toml");

/// Commented starter for a directory config.
pub fn local_template() -> String {
    comment_out(LOCAL)
}

/// Commented starter for the global config.
pub fn global_template() -> String {
    comment_out(GLOBAL)
}

/// Turns every setting and table header into a comment.
fn comment_out(template: &str) -> String {
    template
        .lines()
        .map(|line| match line {
            "" => "\n".to_string(),
            l if l.starts_with('#') => format!("{l}\n"),
            l => format!("# {l}\n"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    #[test]
    fn raw_templates_are_valid_settings() {
        let local = parse_config(LOCAL).unwrap();
        assert_eq!(local.root, Some(false));
        assert_eq!(local.translate.unwrap().operator.as_deref(), Some("or"));

        let global = parse_config(GLOBAL).unwrap();
        assert!(global.root.is_none());
        assert_eq!(global.analyzer.unwrap().max_token_length, Some(128));
    }

    #[test]
    fn written_templates_set_nothing() {
        for template in [local_template(), global_template()] {
            let config = parse_config(&template).unwrap();
            assert!(config.root.is_none());
            assert!(config.translate.is_none());
            assert!(config.analyzer.is_none());
        }
    }

    #[test]
    fn comment_out_keeps_existing_comments() {
        assert_eq!(
            comment_out("# keep\n\n[analyzer]\nmax_token_length = 8\n"),
            "# keep\n\n# [analyzer]\n# max_token_length = 8\n"
        );
    }
}
