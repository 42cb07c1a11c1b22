use dotgrid_core::{MatchRule, PuzzleConfig, TargetShape};

pub(crate) const QUERY_SHAPE: &str = "shape";
pub(crate) const QUERY_SPACING: &str = "spacing";
pub(crate) const QUERY_MATCH: &str = "match";

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct QueryOverrides {
    pub(crate) shape: Option<String>,
    pub(crate) spacing: Option<String>,
    pub(crate) match_rule: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct InitConfig {
    pub(crate) config: PuzzleConfig,
    pub(crate) target: TargetShape,
}

pub(crate) fn load_init_config() -> (InitConfig, Vec<String>) {
    let overrides = load_query_overrides().unwrap_or_default();
    apply_overrides(&overrides)
}

/// Unparseable values are skipped and reported back as warnings.
pub(crate) fn apply_overrides(overrides: &QueryOverrides) -> (InitConfig, Vec<String>) {
    let mut init = InitConfig::default();
    let mut warnings = Vec::new();
    if let Some(slug) = overrides.shape.as_deref() {
        match TargetShape::from_slug(slug) {
            Ok(target) => init.target = target,
            Err(err) => warnings.push(err.to_string()),
        }
    }
    if let Some(raw) = overrides.spacing.as_deref() {
        match raw.trim().parse::<f64>() {
            Ok(spacing) if spacing.is_finite() && spacing > 0.0 => {
                init.config.grid_spacing = spacing;
            }
            _ => warnings.push(format!("ignoring invalid spacing '{raw}'")),
        }
    }
    if let Some(raw) = overrides.match_rule.as_deref() {
        match raw.parse::<MatchRule>() {
            Ok(rule) => init.config.match_rule = rule,
            Err(err) => warnings.push(err.to_string()),
        }
    }
    (init, warnings)
}

#[cfg(target_arch = "wasm32")]
fn load_query_overrides() -> Option<QueryOverrides> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    parse_query_overrides(&search)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_query_overrides() -> Option<QueryOverrides> {
    None
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn parse_query_overrides(search: &str) -> Option<QueryOverrides> {
    let search = search.trim();
    if search.is_empty() {
        return None;
    }
    let params = web_sys::UrlSearchParams::new_with_str(search).ok()?;
    let read = |key: &str| params.get(key).filter(|value| !value.trim().is_empty());
    Some(QueryOverrides {
        shape: read(QUERY_SHAPE),
        spacing: read(QUERY_SPACING),
        match_rule: read(QUERY_MATCH),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_keep_defaults() {
        let (init, warnings) = apply_overrides(&QueryOverrides::default());
        assert!(warnings.is_empty());
        assert_eq!(init.config, PuzzleConfig::default());
        assert_eq!(init.target.slug(), "ell");
    }

    #[test]
    fn valid_overrides_apply() {
        let overrides = QueryOverrides {
            shape: Some("Square".to_string()),
            spacing: Some(" 80 ".to_string()),
            match_rule: Some("unordered".to_string()),
        };
        let (init, warnings) = apply_overrides(&overrides);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(init.target.slug(), "square");
        assert_eq!(init.config.grid_spacing, 80.0);
        assert_eq!(init.config.match_rule, MatchRule::Unordered);
    }

    #[test]
    fn invalid_overrides_warn_and_fall_back() {
        let overrides = QueryOverrides {
            shape: Some("hexagon".to_string()),
            spacing: Some("-5".to_string()),
            match_rule: Some("fuzzy".to_string()),
        };
        let (init, warnings) = apply_overrides(&overrides);
        assert_eq!(warnings.len(), 3);
        assert_eq!(init.target.slug(), "ell");
        assert_eq!(init.config.grid_spacing, 100.0);
        assert_eq!(init.config.match_rule, MatchRule::ExactSequence);
    }
}
