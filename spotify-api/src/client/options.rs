use std::collections::BTreeMap;

/// Optional query parameters accepted by some endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOption {
    /// Maximum number of items to return.
    Limit(u32),
    /// Index of the first item to return.
    Offset(u32),
    /// An ISO 3166-1 alpha-2 country code used for track relinking.
    Market(String),
    Country(String),
    Locale(String),
}

impl RequestOption {
    fn key(&self) -> &'static str {
        match self {
            RequestOption::Limit(_) => "limit",
            RequestOption::Offset(_) => "offset",
            RequestOption::Market(_) => "market",
            RequestOption::Country(_) => "country",
            RequestOption::Locale(_) => "locale",
        }
    }

    fn value(&self) -> String {
        match self {
            RequestOption::Limit(n) | RequestOption::Offset(n) => n.to_string(),
            RequestOption::Market(s) | RequestOption::Country(s) | RequestOption::Locale(s) => {
                s.clone()
            }
        }
    }
}

/// Query parameters, kept sorted by key so encoding is stable.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Form-urlencoded `key=value` pairs joined by `&`.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

pub fn process_options(opts: &[RequestOption]) -> Params {
    let mut params = Params::new();

    for opt in opts {
        params.set(opt.key(), opt.value());
    }

    params
}
