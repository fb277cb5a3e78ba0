//! Bedrock model ID resolution
//!
//! Applies the optional cross-region inference profile prefix to the
//! configured model identifier.

/// Region-group prefixes used by cross-region inference profiles.
const PROFILE_PREFIXES: [&str; 8] = ["us", "eu", "ap", "apac", "me", "sa", "ca", "af"];

/// Resolve the model ID sent to the Converse API.
///
/// - Without `cross_region`, the configured ID is used verbatim.
/// - With `cross_region`, the ID is prefixed with the region group
///   (`us.`, `eu.`, ...) unless it already carries one, or is an ARN.
pub fn resolve_model_id(model_id: &str, cross_region: bool, region: &str) -> String {
    if !cross_region || model_id.starts_with("arn:") || has_profile_prefix(model_id) {
        return model_id.to_string();
    }
    let prefix = inference_profile_prefix(region);
    format!("{prefix}.{model_id}")
}

fn has_profile_prefix(model_id: &str) -> bool {
    model_id
        .split_once('.')
        .is_some_and(|(head, _)| PROFILE_PREFIXES.contains(&head))
}

/// Derive the inference profile region group from an AWS region string.
///
/// Cross-region inference profiles use continent-level prefixes:
/// `us-east-1` → `us`, `eu-west-1` → `eu`, `ap-northeast-1` → `ap`, etc.
fn inference_profile_prefix(region: &str) -> &str {
    match region.split('-').next() {
        Some(prefix @ ("us" | "eu" | "ap" | "me" | "sa" | "ca" | "af")) => prefix,
        _ => "us", // safe fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAIKU: &str = "anthropic.claude-3-haiku-20240307-v1:0";

    #[test]
    fn test_plain_model_id_passthrough() {
        assert_eq!(resolve_model_id(HAIKU, false, "us-east-1"), HAIKU);
    }

    #[test]
    fn test_cross_region_us() {
        assert_eq!(
            resolve_model_id(HAIKU, true, "us-west-2"),
            format!("us.{HAIKU}")
        );
    }

    #[test]
    fn test_cross_region_ap() {
        assert_eq!(
            resolve_model_id(HAIKU, true, "ap-northeast-1"),
            format!("ap.{HAIKU}")
        );
    }

    #[test]
    fn test_cross_region_eu() {
        assert_eq!(
            resolve_model_id(HAIKU, true, "eu-central-1"),
            format!("eu.{HAIKU}")
        );
    }

    #[test]
    fn test_already_prefixed_is_kept() {
        let id = "eu.anthropic.claude-3-haiku-20240307-v1:0";
        assert_eq!(resolve_model_id(id, true, "us-east-1"), id);
    }

    #[test]
    fn test_arn_is_kept() {
        let arn = "arn:aws:bedrock:us-east-1:123456789012:inference-profile/my-profile";
        assert_eq!(resolve_model_id(arn, true, "us-east-1"), arn);
    }

    #[test]
    fn test_unknown_region_falls_back_to_us() {
        assert_eq!(
            resolve_model_id(HAIKU, true, "il-central-1"),
            format!("us.{HAIKU}")
        );
    }
}
