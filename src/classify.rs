//! Image name classification.
//!
//! Maps a bare image file name to the partition it belongs to. The rule
//! is a two-tier, strict-priority substring match: exact-ish markers are
//! checked first so that `vendor_boot.img` can never be misclassified as
//! `boot` (or `vendor`) by the broader fallback tokens. "No match" is a
//! valid, non-error outcome; unmatched images are skipped by the
//! sequencer, never flashed.

/// Specific markers, most specific to least ambiguous. Checked first and
/// independently of the fallback tier.
const SPECIFIC_MARKERS: &[(&str, &str)] = &[
    ("vendor_boot", "vendor_boot"),
    ("boot.img", "boot"),
    ("system.img", "system"),
    ("vendor.img", "vendor"),
    ("vbmeta.img", "vbmeta"),
    ("recovery.img", "recovery"),
    ("product.img", "product"),
    ("userdata.img", "userdata"),
];

/// Broader tokens, tried in order only when no specific marker matched.
const FALLBACK_TOKENS: &[(&str, &str)] = &[
    ("boot", "boot"),
    ("system", "system"),
    ("vendor", "vendor"),
];

/// Determine the target partition for an image file name.
///
/// Matching is case-insensitive against the whole name. Returns `None`
/// when the name carries no recognizable partition marker.
pub fn classify(file_name: &str) -> Option<&'static str> {
    let lowered = file_name.to_ascii_lowercase();

    for (marker, partition) in SPECIFIC_MARKERS {
        if lowered.contains(marker) {
            return Some(partition);
        }
    }

    for (token, partition) in FALLBACK_TOKENS {
        if lowered.contains(token) {
            return Some(partition);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_markers() {
        assert_eq!(classify("boot.img"), Some("boot"));
        assert_eq!(classify("system.img"), Some("system"));
        assert_eq!(classify("vendor.img"), Some("vendor"));
        assert_eq!(classify("vbmeta.img"), Some("vbmeta"));
        assert_eq!(classify("recovery.img"), Some("recovery"));
        assert_eq!(classify("product.img"), Some("product"));
        assert_eq!(classify("userdata.img"), Some("userdata"));
    }

    #[test]
    fn test_vendor_boot_wins_over_fallbacks() {
        assert_eq!(classify("vendor_boot.img"), Some("vendor_boot"));
        assert_eq!(classify("crosshatch-vendor_boot-v2.img"), Some("vendor_boot"));
        // Must never degrade to "boot" or "vendor"
        assert_ne!(classify("vendor_boot.img"), Some("boot"));
        assert_ne!(classify("vendor_boot.img"), Some("vendor"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("RECOVERY.IMG"), Some("recovery"));
        assert_eq!(classify("Boot.IMG"), Some("boot"));
        assert_eq!(classify("VeNdOr_BoOt.img"), Some("vendor_boot"));
    }

    #[test]
    fn test_fallback_tokens() {
        assert_eq!(classify("a_boot.img"), Some("boot"));
        assert_eq!(classify("b_system.img"), Some("system"));
        assert_eq!(classify("magisk_patched_boot_a.bin"), Some("boot"));
        assert_eq!(classify("vendor-partition.dat"), Some("vendor"));
    }

    #[test]
    fn test_fallback_priority_order() {
        // "boot" outranks "system" which outranks "vendor"
        assert_eq!(classify("system_and_boot_pack"), Some("boot"));
        assert_eq!(classify("vendor_system_pack"), Some("system"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(classify("random_blob.bin"), None);
        assert_eq!(classify("flash-all.sh"), None);
        assert_eq!(classify("android-info.txt"), None);
        assert_eq!(classify(""), None);
    }
}
