use crate::core::provider::Provider;

/// Render providers as a table, marking the default with `*`.
pub fn format_provider_table(providers: &[Provider], default_id: Option<&str>) -> String {
    if providers.is_empty() {
        return "No providers configured.\n".to_string();
    }

    let mut content = String::from("Configured Providers:\n\n");
    content.push_str("| Provider | Label | URL | Pinned |\n");
    content.push_str("|---|---|---|:---:|\n");

    for provider in providers {
        let pinned = if provider.pinned { "yes" } else { "" };
        let provider_id = if default_id == Some(provider.id.as_str()) {
            format!("{}*", provider.id)
        } else {
            provider.id.clone()
        };
        content.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            provider_id, provider.label, provider.url, pinned
        ));
    }

    if default_id.is_some() {
        content.push_str("\n* = default provider\n");
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builtin_providers::load_builtin_state;

    #[test]
    fn marks_default_provider() {
        let state = load_builtin_state();
        let table = format_provider_table(&state.providers, Some("claude"));

        assert!(table.contains("| claude* | Claude | https://claude.ai/ | yes |"));
        assert!(table.contains("| gpt | GPT |"));
        assert!(table.ends_with("* = default provider\n"));
    }

    #[test]
    fn empty_collection_has_no_table() {
        assert_eq!(format_provider_table(&[], None), "No providers configured.\n");
    }
}
