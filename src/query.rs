//! Query-string building for probe URLs

use std::collections::HashMap;

use url::form_urlencoded;

use crate::catalog::EndpointDescriptor;

/// Build the query string for a probe
///
/// Iterates the descriptor's declared parameter order, never the value map's
/// iteration order, so identical inputs always produce an identical string.
/// Values that trim to empty are treated as absent; values under names the
/// descriptor does not declare are ignored.
pub fn build_query(
    descriptor: &EndpointDescriptor,
    values: &HashMap<String, String>,
) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;

    for &name in descriptor.params {
        if let Some(value) = values.get(name) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                serializer.append_pair(name, trimmed);
                any = true;
            }
        }
    }

    if any {
        serializer.finish()
    } else {
        String::new()
    }
}

/// Build the full probe URL: `{base}{path}`, plus `?query` when any
/// parameter survived
pub fn build_url(
    base: &str,
    path: &str,
    descriptor: &EndpointDescriptor,
    values: &HashMap<String, String>,
) -> String {
    let query = build_query(descriptor, values);
    if query.is_empty() {
        format!("{}{}", base, path)
    } else {
        format!("{}{}?{}", base, path, query)
    }
}

/// Decode a stored example query string into (name, value) pairs
pub fn parse_example(example: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(example.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::lookup;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_all_empty_values_yield_bare_path() {
        let desc = lookup("ip");
        let url = build_url("https://api.test", "/v2/ip", &desc, &values(&[("ip", "")]));
        assert_eq!(url, "https://api.test/v2/ip");
        assert!(!url.contains('?'));
    }

    #[test]
    fn test_whitespace_only_value_is_absent() {
        let desc = lookup("ip");
        let query = build_query(&desc, &values(&[("ip", "   \t")]));
        assert!(query.is_empty());
    }

    #[test]
    fn test_declared_order_wins_over_map_order() {
        let desc = lookup("hash");
        // Insert in reverse of the declared order; HashMap order is arbitrary anyway
        let vals = values(&[("algorithm", "md5"), ("text", "hello")]);
        let url = build_url("https://api.test", "/v2/hash", &desc, &vals);
        assert!(url.ends_with("?text=hello&algorithm=md5"));
    }

    #[test]
    fn test_undeclared_params_are_ignored() {
        let desc = lookup("ip");
        let query = build_query(&desc, &values(&[("ip", "8.8.8.8"), ("bogus", "1")]));
        assert_eq!(query, "ip=8.8.8.8");
    }

    #[test]
    fn test_values_are_trimmed_and_encoded() {
        let desc = lookup("fanyi");
        let query = build_query(&desc, &values(&[("text", "  hello world "), ("from", "en"), ("to", "zh")]));
        assert_eq!(query, "text=hello+world&from=en&to=zh");
    }

    #[test]
    fn test_query_round_trips() {
        let desc = lookup("fanyi");
        let vals = values(&[("text", "你好, world & more"), ("from", "zh"), ("to", "en")]);
        let query = build_query(&desc, &vals);
        let decoded: HashMap<String, String> = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(decoded.get("text").unwrap(), "你好, world & more");
        assert_eq!(decoded.get("from").unwrap(), "zh");
        assert_eq!(decoded.get("to").unwrap(), "en");
    }

    #[test]
    fn test_builder_is_deterministic() {
        let desc = lookup("exchange_rate");
        let vals = values(&[("from", "USD"), ("to", "CNY")]);
        let first = build_url("https://api.test", "/v2/exchange_rate", &desc, &vals);
        let second = build_url("https://api.test", "/v2/exchange_rate", &desc, &vals);
        assert_eq!(first, second);
        assert!(first.ends_with("?from=USD&to=CNY"));
    }

    #[test]
    fn test_parse_example_pairs() {
        let pairs = parse_example("text=hello&from=en&to=zh");
        assert_eq!(
            pairs,
            vec![
                ("text".to_string(), "hello".to_string()),
                ("from".to_string(), "en".to_string()),
                ("to".to_string(), "zh".to_string()),
            ]
        );
    }
}
