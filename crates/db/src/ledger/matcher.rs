//! Selector evaluation for the in-process ledger.
//!
//! Supports the predicate language the repositories emit: implicit
//! equality, `$eq`, `$ne`, `$gt`, `$gte`, `$lt`, `$lte`, `$in`, `$exists`,
//! `$regex`, `$elemMatch`, and the `$and` / `$or` combinators. Field names
//! may be dotted paths into nested objects.

use std::cmp::Ordering;

use agritrace_core::ledger::LedgerError;
use regex::Regex;
use serde_json::{Map, Value};

/// Whether `doc` satisfies `selector`.
pub fn matches(selector: &Value, doc: &Value) -> Result<bool, LedgerError> {
    match selector {
        Value::Object(map) => match_selector(map, doc),
        _ => Err(LedgerError::Query("selector must be a JSON object".into())),
    }
}

fn match_selector(selector: &Map<String, Value>, doc: &Value) -> Result<bool, LedgerError> {
    for (key, condition) in selector {
        let matched = match key.as_str() {
            "$and" => {
                let mut all = true;
                for clause in clauses(key, condition)? {
                    if !matches(clause, doc)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            "$or" => {
                let mut any = false;
                for clause in clauses(key, condition)? {
                    if matches(clause, doc)? {
                        any = true;
                        break;
                    }
                }
                any
            }
            op if op.starts_with('$') => {
                return Err(LedgerError::Query(format!(
                    "unsupported combination operator {op}"
                )));
            }
            field => match_condition(condition, lookup(doc, field))?,
        };
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

fn clauses<'a>(op: &str, condition: &'a Value) -> Result<&'a Vec<Value>, LedgerError> {
    condition
        .as_array()
        .ok_or_else(|| LedgerError::Query(format!("{op} expects an array")))
}

fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |value, segment| value.get(segment))
}

/// The condition's operators, if it is an operator object.
fn operators(condition: &Value) -> Option<&Map<String, Value>> {
    condition
        .as_object()
        .filter(|map| !map.is_empty() && map.keys().all(|k| k.starts_with('$')))
}

fn match_condition(condition: &Value, value: Option<&Value>) -> Result<bool, LedgerError> {
    let Some(ops) = operators(condition) else {
        return Ok(value.is_some_and(|v| values_equal(v, condition)));
    };

    for (op, arg) in ops {
        let ok = match op.as_str() {
            "$eq" => value.is_some_and(|v| values_equal(v, arg)),
            "$ne" => value.is_some_and(|v| !values_equal(v, arg)),
            "$gt" => compare(value, arg) == Some(Ordering::Greater),
            "$gte" => matches!(compare(value, arg), Some(Ordering::Greater | Ordering::Equal)),
            "$lt" => compare(value, arg) == Some(Ordering::Less),
            "$lte" => matches!(compare(value, arg), Some(Ordering::Less | Ordering::Equal)),
            "$in" => {
                let candidates = arg
                    .as_array()
                    .ok_or_else(|| LedgerError::Query("$in expects an array".into()))?;
                value.is_some_and(|v| candidates.iter().any(|c| values_equal(v, c)))
            }
            "$exists" => {
                let wanted = arg
                    .as_bool()
                    .ok_or_else(|| LedgerError::Query("$exists expects a boolean".into()))?;
                value.is_some() == wanted
            }
            "$regex" => {
                let pattern = arg
                    .as_str()
                    .ok_or_else(|| LedgerError::Query("$regex expects a string".into()))?;
                let re = Regex::new(pattern)
                    .map_err(|e| LedgerError::Query(format!("invalid $regex: {e}")))?;
                value.and_then(Value::as_str).is_some_and(|s| re.is_match(s))
            }
            "$elemMatch" => {
                let Some(elements) = value.and_then(Value::as_array) else {
                    return Ok(false);
                };
                let mut any = false;
                for element in elements {
                    let hit = if operators(arg).is_some() {
                        match_condition(arg, Some(element))?
                    } else {
                        matches(arg, element)?
                    };
                    if hit {
                        any = true;
                        break;
                    }
                }
                any
            }
            other => {
                return Err(LedgerError::Query(format!("unsupported operator {other}")));
            }
        };
        if !ok {
            return Ok(false);
        }
    }
    Ok(true)
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn compare(value: Option<&Value>, bound: &Value) -> Option<Ordering> {
    match (value?, bound) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn packing() -> Value {
        json!({
            "id": "P-1",
            "gmp": "GMP-NORTH-01",
            "packingHouseName": "Chiang Mai Fresh",
            "forecastWeight": 120.5,
            "createdAt": "2024-03-01T08:00:00Z",
            "packerGmp": {"id": "G-7"},
            "processSteps": [
                {"step": 1, "status": "received"},
                {"step": 2, "status": "packed"}
            ]
        })
    }

    #[test]
    fn empty_selector_matches_everything() {
        assert!(matches(&json!({}), &packing()).unwrap());
    }

    #[test]
    fn implicit_equality_and_dotted_paths() {
        assert!(matches(&json!({"id": "P-1", "packerGmp.id": "G-7"}), &packing()).unwrap());
        assert!(!matches(&json!({"packerGmp.id": "G-8"}), &packing()).unwrap());
        assert!(!matches(&json!({"missing": "x"}), &packing()).unwrap());
    }

    #[test]
    fn numeric_equality_ignores_representation() {
        assert!(matches(&json!({"n": 10}), &json!({"n": 10.0})).unwrap());
    }

    #[test]
    fn inclusive_numeric_range() {
        let doc = packing();
        assert!(matches(&json!({"forecastWeight": {"$gte": 100, "$lte": 120.5}}), &doc).unwrap());
        assert!(!matches(&json!({"forecastWeight": {"$gte": 121, "$lte": 200}}), &doc).unwrap());
    }

    #[test]
    fn date_strings_compare_lexicographically() {
        let selector = json!({"createdAt": {
            "$gte": "2024-03-01T00:00:00Z",
            "$lte": "2024-03-31T23:59:59Z"
        }});
        assert!(matches(&selector, &packing()).unwrap());
    }

    #[test]
    fn mismatched_types_never_compare() {
        assert!(!matches(&json!({"forecastWeight": {"$gte": "100"}}), &packing()).unwrap());
    }

    #[test]
    fn regex_inside_or_group() {
        let selector = json!({"$and": [
            {},
            {"$or": [
                {"gmp": {"$regex": "SOUTH"}},
                {"packingHouseName": {"$regex": "Fresh"}}
            ]}
        ]});
        assert!(matches(&selector, &packing()).unwrap());
    }

    #[test]
    fn elem_match_on_object_elements() {
        let doc = packing();
        assert!(matches(&json!({"processSteps": {"$elemMatch": {"status": "packed"}}}), &doc).unwrap());
        assert!(!matches(
            &json!({"processSteps": {"$elemMatch": {"status": "packed", "step": 1}}}),
            &doc
        )
        .unwrap());
    }

    #[test]
    fn elem_match_on_scalar_elements() {
        let doc = json!({"tags": ["organic", "export"]});
        assert!(matches(&json!({"tags": {"$elemMatch": {"$eq": "export"}}}), &doc).unwrap());
    }

    #[test]
    fn in_and_exists() {
        let doc = packing();
        assert!(matches(&json!({"id": {"$in": ["P-0", "P-1"]}}), &doc).unwrap());
        assert!(matches(&json!({"remark": {"$exists": false}}), &doc).unwrap());
    }

    #[test]
    fn unknown_operator_is_a_query_error() {
        assert_matches!(
            matches(&json!({"id": {"$near": 1}}), &packing()),
            Err(LedgerError::Query(_))
        );
    }

    #[test]
    fn invalid_regex_is_a_query_error() {
        assert_matches!(
            matches(&json!({"gmp": {"$regex": "("}}), &packing()),
            Err(LedgerError::Query(_))
        );
    }
}
