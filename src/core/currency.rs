//! The fixed catalog of currencies the selection controls offer.

/// A selectable currency. The catalog is built once at module load and
/// never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyOption {
    pub code: &'static str,
    pub country: &'static str,
    pub label: &'static str,
}

impl CurrencyOption {
    /// Picker value for this option, identical to its code.
    pub fn value(&self) -> &'static str {
        self.code
    }
}

pub static CATALOG: &[CurrencyOption] = &[
    CurrencyOption {
        code: "BRL",
        country: "Brazil",
        label: "🇧🇷 Brazil",
    },
    CurrencyOption {
        code: "USD",
        country: "United States",
        label: "🇺🇸 United States",
    },
    CurrencyOption {
        code: "EUR",
        country: "Eurozone",
        label: "🇪🇺 Eurozone",
    },
    CurrencyOption {
        code: "JPY",
        country: "Japan",
        label: "🇯🇵 Japan",
    },
    CurrencyOption {
        code: "GBP",
        country: "United Kingdom",
        label: "🇬🇧 United Kingdom",
    },
    CurrencyOption {
        code: "AUD",
        country: "Australia",
        label: "🇦🇺 Australia",
    },
    CurrencyOption {
        code: "CAD",
        country: "Canada",
        label: "🇨🇦 Canada",
    },
    CurrencyOption {
        code: "CHF",
        country: "Switzerland",
        label: "🇨🇭 Switzerland",
    },
    CurrencyOption {
        code: "CNY",
        country: "China",
        label: "🇨🇳 China",
    },
    CurrencyOption {
        code: "INR",
        country: "India",
        label: "🇮🇳 India",
    },
    CurrencyOption {
        code: "MXN",
        country: "Mexico",
        label: "🇲🇽 Mexico",
    },
    CurrencyOption {
        code: "ZAR",
        country: "South Africa",
        label: "🇿🇦 South Africa",
    },
];

/// Case-insensitive catalog lookup.
pub fn find(code: &str) -> Option<&'static CurrencyOption> {
    CATALOG.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("usd").unwrap().code, "USD");
        assert_eq!(find("Eur").unwrap().code, "EUR");
    }

    #[test]
    fn test_find_unknown_code() {
        assert!(find("XYZ").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_value_matches_code() {
        for option in CATALOG {
            assert_eq!(option.value(), option.code);
        }
    }

    #[test]
    fn test_catalog_codes_are_unique() {
        let mut codes: Vec<_> = CATALOG.iter().map(|c| c.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), CATALOG.len());
    }
}
