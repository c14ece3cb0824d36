pub const APP_NAME: &str = "Trader Console";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

pub const USER_AGENT: &str = concat!("trader-console/", env!("CARGO_PKG_VERSION"));

pub fn version_label() -> String {
    if let Some(tag) = GIT_TAG {
        tag.to_string()
    } else {
        format!("v{}", APP_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_starts_with_version_marker() {
        let label = version_label();

        assert!(label.starts_with('v') || GIT_TAG.is_some());
    }
}
