//! Overview metadata extraction.

use super::aliases::{
    APP_NAME, FILE_NAME, HASH, MIN_SDK, PACKAGE_NAME, SIZE, TARGET_SDK, VERSION_NAME,
};
use crate::model::AppMetadata;
use serde_json::Value;

pub(super) fn extract_metadata(raw: &Value) -> AppMetadata {
    AppMetadata {
        app_name: APP_NAME.extract(raw),
        file_name: FILE_NAME.extract(raw),
        size: SIZE.extract(raw),
        package_name: PACKAGE_NAME.extract(raw),
        version_name: VERSION_NAME.extract(raw),
        target_sdk: TARGET_SDK.extract(raw),
        min_sdk: MIN_SDK.extract(raw),
        hash: HASH.extract(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_uppercase_service_keys() {
        let meta = extract_metadata(&json!({
            "APP_NAME": "Diva",
            "FILE_NAME": "diva-beta.apk",
            "PACKAGE_NAME": "jakhar.aseem.diva",
            "VERSION_NAME": "1.0",
            "TargetSdkVersion": "23",
            "MinSdkVersion": "15",
            "MD5": "82ab8b2193b3cfb1c737e3a786be363a",
            "apk_size": "1.43MB",
        }));
        assert_eq!(meta.app_name, "Diva");
        assert_eq!(meta.file_name, "diva-beta.apk");
        assert_eq!(meta.package_name, "jakhar.aseem.diva");
        assert_eq!(meta.size, "1.43MB");
        assert_eq!(meta.target_sdk, "23");
        assert_eq!(meta.min_sdk, "15");
        assert_eq!(meta.hash, "82ab8b2193b3cfb1c737e3a786be363a");
    }

    #[test]
    fn test_app_name_falls_back_to_file_name() {
        let meta = extract_metadata(&json!({"file_name": "x.apk"}));
        assert_eq!(meta.app_name, "x.apk");
        assert_eq!(meta.file_name, "x.apk");
    }
}
