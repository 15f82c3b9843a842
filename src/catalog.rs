//! Endpoint catalogue - static registry of every probe-able endpoint
//!
//! The upstream service owns the response schemas; this side only declares
//! what is needed to render an input form and build a query string.

use crate::constants::API_PREFIX;

/// Grouping used when listing the catalogue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Daily,
    Rankings,
    Utility,
    Fun,
    Misc,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Daily => "Daily digests",
            Category::Rankings => "Hot rankings",
            Category::Utility => "Utilities",
            Category::Fun => "Fun",
            Category::Misc => "Misc",
        }
    }
}

/// Static schema for one endpoint: declared parameter names plus display metadata
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndpointDescriptor {
    pub name: &'static str,
    /// Parameter names in declaration order; the query builder follows this order
    pub params: &'static [&'static str],
    pub description: &'static str,
    /// Pre-encoded example query, fillable into the form with one key
    pub example: Option<&'static str>,
    pub category: Category,
}

impl EndpointDescriptor {
    /// Request path for this endpoint, e.g. `/v2/hash`
    pub fn path(&self) -> String {
        format!("{}/{}", API_PREFIX, self.name)
    }
}

/// Fallback descriptor for names the catalogue does not know
///
/// The catalogue may lag behind the live service, so unknown names degrade
/// to a bare form instead of failing.
pub const GENERIC: EndpointDescriptor = EndpointDescriptor {
    name: "",
    params: &[],
    description: "generic service",
    example: None,
    category: Category::Misc,
};

/// The full catalogue, ordered by category for display
pub const CATALOG: &[EndpointDescriptor] = &[
    // Daily digests
    EndpointDescriptor {
        name: "60s",
        params: &[],
        description: "Daily 60-second world news digest",
        example: None,
        category: Category::Daily,
    },
    EndpointDescriptor {
        name: "bing",
        params: &[],
        description: "Bing wallpaper of the day",
        example: None,
        category: Category::Daily,
    },
    EndpointDescriptor {
        name: "exchange_rate",
        params: &["from", "to"],
        description: "Daily currency exchange rates",
        example: Some("from=USD&to=CNY"),
        category: Category::Daily,
    },
    EndpointDescriptor {
        name: "today_in_history",
        params: &[],
        description: "Events on this day in history",
        example: None,
        category: Category::Daily,
    },
    // Hot rankings
    EndpointDescriptor {
        name: "bili",
        params: &[],
        description: "Bilibili hot search ranking",
        example: None,
        category: Category::Rankings,
    },
    EndpointDescriptor {
        name: "maoyan",
        params: &[],
        description: "Maoyan box office ranking",
        example: None,
        category: Category::Rankings,
    },
    EndpointDescriptor {
        name: "weibo",
        params: &[],
        description: "Weibo hot search ranking",
        example: None,
        category: Category::Rankings,
    },
    EndpointDescriptor {
        name: "zhihu",
        params: &[],
        description: "Zhihu trending topics",
        example: None,
        category: Category::Rankings,
    },
    EndpointDescriptor {
        name: "douyin",
        params: &[],
        description: "Douyin hot search ranking",
        example: None,
        category: Category::Rankings,
    },
    EndpointDescriptor {
        name: "toutiao",
        params: &[],
        description: "Toutiao trending headlines",
        example: None,
        category: Category::Rankings,
    },
    // Utilities
    EndpointDescriptor {
        name: "epic",
        params: &[],
        description: "Free games on Epic Games",
        example: None,
        category: Category::Utility,
    },
    EndpointDescriptor {
        name: "baike",
        params: &["q"],
        description: "Baike encyclopedia entry",
        example: Some("q=rust"),
        category: Category::Utility,
    },
    EndpointDescriptor {
        name: "fanyi",
        params: &["text", "from", "to"],
        description: "Text translation (109 languages)",
        example: Some("text=hello&from=en&to=zh"),
        category: Category::Utility,
    },
    EndpointDescriptor {
        name: "fanyi/langs",
        params: &[],
        description: "Languages supported by the translator",
        example: None,
        category: Category::Utility,
    },
    EndpointDescriptor {
        name: "ip",
        params: &["ip"],
        description: "Public IP address lookup",
        example: Some("ip=8.8.8.8"),
        category: Category::Utility,
    },
    EndpointDescriptor {
        name: "og",
        params: &["url"],
        description: "Open Graph metadata for a link",
        example: Some("url=https://example.com"),
        category: Category::Utility,
    },
    EndpointDescriptor {
        name: "hash",
        params: &["text", "algorithm"],
        description: "Hash digest of a text",
        example: Some("text=hello&algorithm=md5"),
        category: Category::Utility,
    },
    EndpointDescriptor {
        name: "weather",
        params: &["city"],
        description: "Current weather lookup",
        example: Some("city=Beijing"),
        category: Category::Utility,
    },
    EndpointDescriptor {
        name: "weather/7d",
        params: &["city"],
        description: "7-day weather forecast",
        example: Some("city=Beijing"),
        category: Category::Utility,
    },
    EndpointDescriptor {
        name: "lunar",
        params: &[],
        description: "Lunar calendar info",
        example: None,
        category: Category::Utility,
    },
    // Fun
    EndpointDescriptor {
        name: "changya",
        params: &[],
        description: "Random sing-along audio clip",
        example: None,
        category: Category::Fun,
    },
    EndpointDescriptor {
        name: "chemical",
        params: &["name"],
        description: "Chemical compound lookup",
        example: Some("name=caffeine"),
        category: Category::Fun,
    },
    EndpointDescriptor {
        name: "hitokoto",
        params: &[],
        description: "Random one-line quote",
        example: None,
        category: Category::Fun,
    },
    EndpointDescriptor {
        name: "luck",
        params: &[],
        description: "Daily fortune",
        example: None,
        category: Category::Fun,
    },
    EndpointDescriptor {
        name: "duanzi",
        params: &[],
        description: "Random joke",
        example: None,
        category: Category::Fun,
    },
    EndpointDescriptor {
        name: "fabing",
        params: &[],
        description: "Random meltdown copypasta",
        example: None,
        category: Category::Fun,
    },
    EndpointDescriptor {
        name: "answer",
        params: &["q"],
        description: "Book of answers",
        example: Some("q=is+it+done+yet"),
        category: Category::Fun,
    },
    EndpointDescriptor {
        name: "kfc",
        params: &[],
        description: "Crazy Thursday KFC copypasta",
        example: None,
        category: Category::Fun,
    },
    // Misc
    EndpointDescriptor {
        name: "bizhi",
        params: &[],
        description: "Random wallpaper",
        example: None,
        category: Category::Misc,
    },
    EndpointDescriptor {
        name: "dog",
        params: &[],
        description: "Random dog picture",
        example: None,
        category: Category::Misc,
    },
];

/// Look up a descriptor by endpoint name
///
/// Pure lookup with no error path: unknown names return [`GENERIC`].
pub fn lookup(name: &str) -> EndpointDescriptor {
    CATALOG
        .iter()
        .find(|d| d.name == name)
        .copied()
        .unwrap_or(GENERIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_endpoint() {
        let desc = lookup("hash");
        assert_eq!(desc.name, "hash");
        assert_eq!(desc.params, &["text", "algorithm"]);
    }

    #[test]
    fn test_lookup_unknown_degrades_to_generic() {
        let desc = lookup("no-such-endpoint");
        assert_eq!(desc.description, "generic service");
        assert!(desc.params.is_empty());
    }

    #[test]
    fn test_catalog_names_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.name, b.name, "duplicate catalogue entry: {}", a.name);
            }
        }
    }

    #[test]
    fn test_examples_only_use_declared_params() {
        for desc in CATALOG {
            if let Some(example) = desc.example {
                for (key, _) in crate::query::parse_example(example) {
                    assert!(
                        desc.params.contains(&key.as_str()),
                        "{}: example key {} not declared",
                        desc.name,
                        key
                    );
                }
            }
        }
    }

    #[test]
    fn test_path_includes_prefix() {
        assert_eq!(lookup("60s").path(), "/v2/60s");
        assert_eq!(lookup("weather/7d").path(), "/v2/weather/7d");
    }
}
