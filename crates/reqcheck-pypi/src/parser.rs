//! Requirement-line parsing.
//!
//! Input is raw `requirements.txt`-style text, one specifier per line.
//! Parsing is deliberately shallow: lines are filtered and split on
//! recognized operators, nothing more. There is no PEP 508 grammar here,
//! and inline comments on non-blank lines are not stripped; a line like
//! `requests==2.28.2  # note` keeps the comment inside its version token.
//! The imprecision is part of the modeled behavior.

use crate::types::{Operator, Requirement};

/// Splits raw requirements text into individual requirement lines.
///
/// Each line is trimmed; empty lines and lines starting with `#` are
/// dropped. Everything else is kept verbatim for downstream splitting, so
/// the returned count equals the number of non-blank, non-comment lines.
///
/// # Examples
///
/// ```
/// use reqcheck_pypi::parser::parse_requirement_lines;
///
/// let lines = parse_requirement_lines("# pinned\nFlask==2.2.3\n\nrequests\n");
/// assert_eq!(lines, vec!["Flask==2.2.3", "requests"]);
/// ```
pub fn parse_requirement_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect()
}

/// Splits one requirement line into name, operator, and version.
///
/// The name is the prefix before the earliest occurrence of any of the six
/// operators, trimmed. The operator is found separately by scanning in the
/// fixed priority order `==`, `>=`, `<=`, `>`, `<`, `~=`, and the version
/// token is whatever follows its first occurrence, kept raw (trailing
/// comments and all). On a multi-constraint line the two rules can
/// disagree about position: `urllib3<1.27,>=1.21.1` has name `urllib3`
/// from the `<` at position 7 but operator `>=` because `>=` outranks `<`
/// in the scan order. A line carrying none of the operators is a bare,
/// unconstrained package name.
///
/// # Examples
///
/// ```
/// use reqcheck_pypi::parser::split_specifier;
/// use reqcheck_pypi::types::Operator;
///
/// let req = split_specifier("pandas>=1.5,<2.0");
/// assert_eq!(req.name, "pandas");
/// assert_eq!(req.operator, Some(Operator::GreaterEq));
/// assert_eq!(req.version.as_deref(), Some("1.5,<2.0"));
/// ```
pub fn split_specifier(line: &str) -> Requirement {
    let name = Operator::SCAN_ORDER
        .iter()
        .filter_map(|operator| line.find(operator.as_str()))
        .min()
        .map_or(line, |position| &line[..position])
        .trim()
        .to_owned();

    for operator in Operator::SCAN_ORDER {
        if let Some((_, version)) = line.split_once(operator.as_str()) {
            return Requirement {
                name,
                operator: Some(operator),
                version: Some(version.to_owned()),
            };
        }
    }

    Requirement {
        name,
        operator: None,
        version: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count_matches_non_comment_lines() {
        let text = "\n# header comment\nFlask==2.2.3\n   \nWerkzeug==1.0.1\n# trailing\n";
        let lines = parse_requirement_lines(text);
        assert_eq!(lines, vec!["Flask==2.2.3", "Werkzeug==1.0.1"]);
    }

    #[test]
    fn test_lines_are_trimmed_but_kept_verbatim() {
        let lines = parse_requirement_lines("  requests==2.28.2  # note\n");
        assert_eq!(lines, vec!["requests==2.28.2  # note"]);
    }

    #[test]
    fn test_empty_input_yields_no_lines() {
        assert!(parse_requirement_lines("").is_empty());
        assert!(parse_requirement_lines("   \n# only a comment\n").is_empty());
    }

    #[test]
    fn test_split_exact_pin() {
        let req = split_specifier("name==1.2.3");
        assert_eq!(req.name, "name");
        assert_eq!(req.operator, Some(Operator::Exact));
        assert_eq!(req.version.as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_split_bare_name() {
        let req = split_specifier("name");
        assert_eq!(req.name, "name");
        assert_eq!(req.operator, None);
        assert_eq!(req.version, None);
    }

    #[test]
    fn test_split_each_operator() {
        let cases = [
            ("a>=1.0", Operator::GreaterEq),
            ("a<=1.0", Operator::LessEq),
            ("a>1.0", Operator::Greater),
            ("a<1.0", Operator::Less),
            ("a~=1.0", Operator::Compatible),
        ];
        for (line, expected) in cases {
            let req = split_specifier(line);
            assert_eq!(req.name, "a");
            assert_eq!(req.operator, Some(expected), "line: {line}");
            assert_eq!(req.version.as_deref(), Some("1.0"));
        }
    }

    #[test]
    fn test_two_char_operators_win_over_prefixes() {
        let req = split_specifier("Werkzeug>=2.2.2");
        assert_eq!(req.operator, Some(Operator::GreaterEq));
        assert_eq!(req.version.as_deref(), Some("2.2.2"));
    }

    #[test]
    fn test_multi_constraint_name_and_operator_split_independently() {
        // Name comes from the earliest operator position, operator from
        // the scan priority; they land on different constraints here.
        let req = split_specifier("urllib3<1.27,>=1.21.1");
        assert_eq!(req.name, "urllib3");
        assert_eq!(req.operator, Some(Operator::GreaterEq));
        assert_eq!(req.version.as_deref(), Some("1.21.1"));
    }

    #[test]
    fn test_inline_comment_stays_in_version_token() {
        let req = split_specifier("requests==2.28.2  # note");
        assert_eq!(req.name, "requests");
        assert_eq!(req.version.as_deref(), Some("2.28.2  # note"));
    }

    #[test]
    fn test_name_is_trimmed_version_is_raw() {
        let req = split_specifier("Flask == 2.2.3");
        assert_eq!(req.name, "Flask");
        assert_eq!(req.version.as_deref(), Some(" 2.2.3"));
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(split_specifier("Flask==2.2.3").name, "Flask");
        assert_eq!(split_specifier("flask==2.2.3").name, "flask");
    }
}
