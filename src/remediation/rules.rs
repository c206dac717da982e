//! Built-in remediation rules.
//!
//! Order matters: the first pattern that matches a finding title wins, so
//! narrow patterns sit above broad ones. The last entry matches anything.

/// A `(pattern, fix text)` pair. Patterns are case-insensitive regexes.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinRule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub fix: &'static str,
}

pub const FALLBACK_FIX: &str = "Review the finding against the OWASP MASVS guidance for its \
category, confirm whether the flagged code path is reachable, and apply the platform's \
secure default before release.";

pub const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        name: "hardcoded-secrets",
        pattern: r"hard[\s-]?coded|api[\s_-]?key|secret|password|credential|token",
        fix: "Remove hardcoded secrets from the app. Move keys to a backend service or the \
              Android Keystore, rotate every exposed credential, and load configuration at \
              runtime instead of shipping it in the package.",
    },
    BuiltinRule {
        name: "cleartext-traffic",
        pattern: r"clear\s?text|usesCleartextTraffic|insecure (http|connection)|\bhttp://",
        fix: "Set android:usesCleartextTraffic=\"false\" and add a Network Security \
              Configuration that only permits HTTPS endpoints.",
    },
    BuiltinRule {
        name: "tls-validation",
        pattern: r"ssl|tls|certificate|trust ?manager|hostname ?verifier|pinning",
        fix: "Use the platform's default TrustManager and HostnameVerifier, never accept all \
              certificates, and pin certificates for high-value endpoints.",
    },
    BuiltinRule {
        name: "debuggable",
        pattern: r"debuggable|debug (mode|enabled)",
        fix: "Set android:debuggable=\"false\" for release builds and let the build type \
              control it rather than the manifest.",
    },
    BuiltinRule {
        name: "backup",
        pattern: r"allowBackup|backup",
        fix: "Set android:allowBackup=\"false\", or define fullBackupContent / \
              dataExtractionRules that exclude sensitive files.",
    },
    BuiltinRule {
        name: "exported-components",
        pattern: r"exported|intent[\s-]?filter|(activity|service|receiver|provider).*(not protected|unprotected)",
        fix: "Mark components android:exported=\"false\" unless they must be public, and protect \
              public components with a signature-level permission.",
    },
    BuiltinRule {
        name: "weak-crypto",
        pattern: r"\bmd5\b|sha-?1\b|\bdes\b|\becb\b|weak (crypto|cipher|hash)|insecure (cipher|hash)",
        fix: "Replace weak algorithms with AES-GCM for encryption and SHA-256 or better for \
              hashing, and never use ECB mode.",
    },
    BuiltinRule {
        name: "insecure-random",
        pattern: r"random",
        fix: "Use java.security.SecureRandom for anything security-relevant instead of \
              java.util.Random or Math.random().",
    },
    BuiltinRule {
        name: "webview",
        pattern: r"webview|javascript ?interface|setJavaScriptEnabled",
        fix: "Disable JavaScript in WebViews unless required, avoid addJavascriptInterface on \
              untrusted content, and only load HTTPS URLs you control.",
    },
    BuiltinRule {
        name: "sql-injection",
        pattern: r"sql|raw ?query|injection",
        fix: "Use parameterized queries (SQLiteDatabase.query with selectionArgs or Room) \
              instead of building SQL strings from input.",
    },
    BuiltinRule {
        name: "logging",
        pattern: r"\blog(s|ging|cat)?\b",
        fix: "Strip verbose logging from release builds (for example with R8 rules) and never \
              log personal data, tokens or keys.",
    },
    BuiltinRule {
        name: "external-storage",
        pattern: r"external storage|sd ?card|world[\s-]?(readable|writable)|MODE_WORLD",
        fix: "Store sensitive files in app-private internal storage, and encrypt anything \
              that must live on shared storage.",
    },
    BuiltinRule {
        name: "clipboard",
        pattern: r"clipboard",
        fix: "Avoid copying sensitive values to the clipboard, and clear it after use when \
              unavoidable.",
    },
    BuiltinRule {
        name: "tapjacking",
        pattern: r"tapjacking|overlay|filterTouchesWhenObscured",
        fix: "Set filterTouchesWhenObscured on sensitive views to block overlay attacks.",
    },
    BuiltinRule {
        name: "signing",
        pattern: r"signature|signed|signing|janus|v1 scheme",
        fix: "Sign the release with APK Signature Scheme v2 or later and drop v1-only signing.",
    },
    BuiltinRule {
        name: "min-sdk",
        pattern: r"min(imum)? ?sdk|older android|unpatched android",
        fix: "Raise minSdkVersion to a release that still receives security patches.",
    },
    BuiltinRule {
        name: "root-detection",
        pattern: r"root(ed)? (detection|check)|emulator",
        fix: "Add root and emulator detection (for example the Play Integrity API) for apps \
              handling sensitive data.",
    },
    BuiltinRule {
        name: "fallback",
        pattern: r"",
        fix: FALLBACK_FIX,
    },
];
