use chrono::NaiveDate;

use super::types::Provider;

/// Length of a `-YYYY-MM-DD` snapshot suffix.
const DATE_SUFFIX_LEN: usize = 11;

/// Strip a trailing snapshot date, e.g. `gpt-4.1-nano-2025-04-14` → `gpt-4.1-nano`.
pub(super) fn strip_date_suffix(model: &str) -> &str {
    if model.len() <= DATE_SUFFIX_LEN || !model.is_char_boundary(model.len() - DATE_SUFFIX_LEN) {
        return model;
    }
    let (base, suffix) = model.split_at(model.len() - DATE_SUFFIX_LEN);
    let Some(date) = suffix.strip_prefix('-') else {
        return model;
    };
    let shaped = date.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 => b == b'-',
        _ => b.is_ascii_digit(),
    });
    if shaped && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() {
        base
    } else {
        model
    }
}

/// Table key for a model name: trimmed, lowercase, without the provider's
/// resource prefix. Snapshot dates are kept.
pub(super) fn table_key(provider: Provider, model: &str) -> String {
    let trimmed = model.trim();
    let name = match provider {
        Provider::Gemini => trimmed.strip_prefix("models/").unwrap_or(trimmed),
        Provider::OpenAi => trimmed.strip_prefix("openai/").unwrap_or(trimmed),
    };
    name.to_ascii_lowercase()
}

/// Keys to try in order: the exact snapshot first, then the undated family.
pub(super) fn lookup_keys(provider: Provider, model: &str) -> Vec<String> {
    let key = table_key(provider, model);
    let base = strip_date_suffix(&key);
    if base.len() == key.len() {
        vec![key]
    } else {
        let base = base.to_string();
        vec![key, base]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_snapshot_date() {
        assert_eq!(strip_date_suffix("gpt-4.1-nano-2025-04-14"), "gpt-4.1-nano");
        assert_eq!(strip_date_suffix("gpt-5-2025-08-07"), "gpt-5");
    }

    #[test]
    fn keeps_names_without_date() {
        assert_eq!(strip_date_suffix("gpt-4.1-nano"), "gpt-4.1-nano");
        assert_eq!(strip_date_suffix("gemini-3-pro-preview"), "gemini-3-pro-preview");
        assert_eq!(strip_date_suffix("-2025-04-14"), "-2025-04-14");
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(strip_date_suffix("gpt-5-2025-13-40"), "gpt-5-2025-13-40");
        assert_eq!(strip_date_suffix("gpt-5-2025x04-14"), "gpt-5-2025x04-14");
    }

    #[test]
    fn table_key_drops_provider_prefix() {
        assert_eq!(
            table_key(Provider::Gemini, "models/gemini-3-flash-preview"),
            "gemini-3-flash-preview"
        );
        assert_eq!(table_key(Provider::OpenAi, " openai/GPT-4.1 "), "gpt-4.1");
    }

    #[test]
    fn lookup_keys_try_snapshot_then_family() {
        assert_eq!(
            lookup_keys(Provider::OpenAi, "openai/GPT-4.1-2025-04-14"),
            vec!["gpt-4.1-2025-04-14".to_string(), "gpt-4.1".to_string()]
        );
        assert_eq!(lookup_keys(Provider::OpenAi, "gpt-5"), vec!["gpt-5".to_string()]);
    }
}
