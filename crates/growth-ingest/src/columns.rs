//! Column identification for reference tables.
//!
//! Reference files disagree on header spelling (`L`, ` l `, `L (power)`,
//! `SD2neg`, `-2 SD`, ...). Each required column is described by a
//! [`ColumnTarget`] with a list of aliases, and [`resolve_columns`] assigns
//! every target to at most one header.

/// A required column and the normalized spellings it may appear under.
#[derive(Debug, Clone)]
pub struct ColumnTarget {
    pub label: &'static str,
    pub aliases: Vec<String>,
}

impl ColumnTarget {
    fn new(label: &'static str, aliases: &[&str]) -> Self {
        Self {
            label,
            aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchPass {
    Exact,
    Token,
    Contains,
}

/// Lowercases and removes all whitespace.
pub fn normalize_name(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn tokens(name: &str) -> impl Iterator<Item = &str> {
    name.split(|ch: char| !(ch.is_alphanumeric() || ch == '-' || ch == '+'))
        .filter(|token| !token.is_empty())
}

fn is_bare_number(alias: &str) -> bool {
    alias
        .chars()
        .all(|ch| ch.is_ascii_digit() || ch == '-' || ch == '+')
}

fn matches(name: &str, target: &ColumnTarget, pass: MatchPass) -> bool {
    target.aliases.iter().any(|alias| match pass {
        MatchPass::Exact => name == alias,
        MatchPass::Token => tokens(name).any(|token| token == alias),
        // Bare numbers like "3" would match inside "sd3neg"; only exact and
        // token passes may claim them.
        MatchPass::Contains => !is_bare_number(alias) && name.contains(alias.as_str()),
    })
}

/// Assigns targets to header positions.
///
/// Column 0 is the age column and never matches a target. Passes run from
/// strictest to loosest (exact name, exact token, substring) and a claimed
/// column is not offered to later targets, so earlier targets win ties.
pub fn resolve_columns(headers: &[String], targets: &[ColumnTarget]) -> Vec<Option<usize>> {
    let names: Vec<String> = headers.iter().map(|h| normalize_name(h)).collect();
    let mut resolved: Vec<Option<usize>> = vec![None; targets.len()];
    let mut claimed = vec![false; names.len()];
    if let Some(age) = claimed.first_mut() {
        *age = true;
    }
    for pass in [MatchPass::Exact, MatchPass::Token, MatchPass::Contains] {
        for (target_idx, target) in targets.iter().enumerate() {
            if resolved[target_idx].is_some() {
                continue;
            }
            let found = names
                .iter()
                .enumerate()
                .find(|(idx, name)| !claimed[*idx] && matches(name, target, pass))
                .map(|(idx, _)| idx);
            if let Some(idx) = found {
                claimed[idx] = true;
                resolved[target_idx] = Some(idx);
            }
        }
    }
    resolved
}

/// Targets for the L, M and S columns.
pub fn lms_targets() -> Vec<ColumnTarget> {
    vec![
        ColumnTarget::new("L", &["l"]),
        ColumnTarget::new("M", &["m"]),
        ColumnTarget::new("S", &["s"]),
    ]
}

/// Targets for the seven boundary columns, Z = -3 first.
pub fn boundary_targets() -> Vec<ColumnTarget> {
    vec![
        ColumnTarget::new("SD3neg", &negative_aliases(3)),
        ColumnTarget::new("SD2neg", &negative_aliases(2)),
        ColumnTarget::new("SD1neg", &negative_aliases(1)),
        ColumnTarget::new("SD0", &["sd0", "0sd", "z0", "0", "median"]),
        ColumnTarget::new("SD1", &positive_aliases(1)),
        ColumnTarget::new("SD2", &positive_aliases(2)),
        ColumnTarget::new("SD3", &positive_aliases(3)),
    ]
}

fn negative_aliases(n: u8) -> Vec<&'static str> {
    match n {
        1 => vec!["sd1neg", "-1sd", "sd-1", "z-1", "-1"],
        2 => vec!["sd2neg", "-2sd", "sd-2", "z-2", "-2"],
        _ => vec!["sd3neg", "-3sd", "sd-3", "z-3", "-3"],
    }
}

fn positive_aliases(n: u8) -> Vec<&'static str> {
    match n {
        1 => vec!["sd1", "+1sd", "1sd", "sd+1", "z+1", "z1", "+1", "1"],
        2 => vec!["sd2", "+2sd", "2sd", "sd+2", "z+2", "z2", "+2", "2"],
        _ => vec!["sd3", "+3sd", "3sd", "sd+3", "z+3", "z3", "+3", "3"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn exact_lms_headers() {
        let resolved = resolve_columns(&headers(&["Month", " l ", "M", "S"]), &lms_targets());
        assert_eq!(resolved, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn decorated_lms_headers() {
        let resolved = resolve_columns(
            &headers(&["Age (months)", "L (power)", "M (median)", "S (cv)"]),
            &lms_targets(),
        );
        assert_eq!(resolved, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn contains_pass_tolerates_surrounding_characters() {
        let resolved = resolve_columns(&headers(&["Month", "[L]:", "*M*", "S_"]), &lms_targets());
        assert_eq!(resolved, vec![Some(1), Some(2), Some(3)]);

        let resolved = resolve_columns(&headers(&["Month", "Lpow", "Mmed", "Scv"]), &lms_targets());
        assert_eq!(resolved, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn age_column_is_never_claimed() {
        let resolved = resolve_columns(&headers(&["S", "L", "M"]), &lms_targets());
        assert_eq!(resolved, vec![Some(1), Some(2), None]);
    }

    #[test]
    fn who_boundary_headers() {
        let resolved = resolve_columns(
            &headers(&[
                "Month", "SD3neg", "SD2neg", "SD1neg", "SD0", "SD1", "SD2", "SD3",
            ]),
            &boundary_targets(),
        );
        let expected: Vec<Option<usize>> = (1..=7).map(Some).collect();
        assert_eq!(resolved, expected);
    }

    #[test]
    fn numeric_boundary_headers_in_any_order() {
        let resolved = resolve_columns(
            &headers(&["Month", "3", "2", "1", "0", "-1", "-2", "-3"]),
            &boundary_targets(),
        );
        assert_eq!(
            resolved,
            vec![Some(7), Some(6), Some(5), Some(4), Some(3), Some(2), Some(1)]
        );
    }

    #[test]
    fn negative_boundaries_claim_before_positive() {
        let resolved = resolve_columns(
            &headers(&[
                "Month",
                "SD3neg (cm)",
                "SD2neg (cm)",
                "SD1neg (cm)",
                "SD0 (cm)",
                "SD1 (cm)",
                "SD2 (cm)",
                "SD3 (cm)",
            ]),
            &boundary_targets(),
        );
        let expected: Vec<Option<usize>> = (1..=7).map(Some).collect();
        assert_eq!(resolved, expected);
    }
}
