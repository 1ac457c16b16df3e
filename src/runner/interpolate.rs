//! Variable interpolation for configuration values
//!
//! Config values may reference `${VAR}`; lookups go to the context variables
//! first and then to the process environment.

use crate::error::{InterpolationError, InterpolationResult};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::env;
use std::sync::OnceLock;

/// Upper bound on expansion rounds before giving up
const MAX_ROUNDS: usize = 32;

fn var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid pattern"))
}

fn lookup(name: &str, vars: &BTreeMap<String, String>) -> Option<String> {
    vars.get(name).cloned().or_else(|| env::var(name).ok())
}

/// Interpolate variables in a string, leaving unknown references as they are
pub fn interpolate(s: &str, vars: &BTreeMap<String, String>) -> InterpolationResult<String> {
    let re = var_pattern();
    let mut result = s.to_string();

    for _ in 0..MAX_ROUNDS {
        let mut changed = false;

        result = re
            .replace_all(&result, |caps: &Captures| {
                let name = &caps[1];
                match lookup(name, vars) {
                    Some(value) => {
                        changed = true;
                        value
                    }
                    None => caps[0].to_string(),
                }
            })
            .into_owned();

        if !changed {
            return Ok(result);
        }
    }

    Err(InterpolationError::RecursiveInterpolation)
}

/// Interpolate and fail on any reference that could not be resolved
pub fn interpolate_strict(
    s: &str,
    vars: &BTreeMap<String, String>,
) -> InterpolationResult<String> {
    let result = interpolate(s, vars)?;

    if let Some(caps) = var_pattern().captures(&result) {
        let name = &caps[1];
        if lookup(name, vars).is_some() {
            return Err(InterpolationError::RecursiveInterpolation);
        }
        return Err(InterpolationError::UndefinedVariable(name.to_string()));
    }

    Ok(result)
}

/// Strictly interpolate every value of a map
pub fn interpolate_map(
    map: &BTreeMap<String, String>,
    vars: &BTreeMap<String, String>,
) -> InterpolationResult<BTreeMap<String, String>> {
    map.iter()
        .map(|(key, value)| Ok((key.clone(), interpolate_strict(value, vars)?)))
        .collect()
}

/// Strictly interpolate a list of strings
pub fn interpolate_list(
    list: &[String],
    vars: &BTreeMap<String, String>,
) -> InterpolationResult<Vec<String>> {
    list.iter().map(|s| interpolate_strict(s, vars)).collect()
}
