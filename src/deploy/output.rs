//! Deployment result rendering.

use crate::config::DeployConfig;
use crate::deploy::client::Deployment;

/// Render the deployment result for the user.
///
/// Either the configured template with `{page}`, `{script}`, `{loader}`
/// and `{binary}` substituted, or a JSON blob of all four when the json
/// flag is set.
pub fn render_output(
    config: &DeployConfig,
    deployment: &Deployment,
) -> Result<String, serde_json::Error> {
    if config.json {
        return serde_json::to_string_pretty(deployment);
    }

    Ok(config
        .template
        .replace("{page}", &deployment.page)
        .replace("{script}", &deployment.script)
        .replace("{loader}", &deployment.loader)
        .replace("{binary}", &deployment.binary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployment() -> Deployment {
        Deployment {
            page: "https://h/page".into(),
            script: "https://h/s.js".into(),
            loader: "https://h/l.js".into(),
            binary: "https://h/b.wasm".into(),
        }
    }

    #[test]
    fn default_template_prints_the_page() {
        let config = DeployConfig::default();
        assert_eq!(render_output(&config, &deployment()).unwrap(), "https://h/page");
    }

    #[test]
    fn custom_template_substitutes_all_variables() {
        let config = DeployConfig {
            template: "{binary} via {loader} ({script})".into(),
            ..DeployConfig::default()
        };
        assert_eq!(
            render_output(&config, &deployment()).unwrap(),
            "https://h/b.wasm via https://h/l.js (https://h/s.js)"
        );
    }

    #[test]
    fn json_output_contains_all_fields() {
        let config = DeployConfig {
            json: true,
            ..DeployConfig::default()
        };
        let out = render_output(&config, &deployment()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["page"], "https://h/page");
        assert_eq!(value["binary"], "https://h/b.wasm");
    }
}
