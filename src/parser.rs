//! Parsing of raw DMARC TXT record text.

use std::str::FromStr;

use crate::record::DmarcRecord;
use crate::types::{AlignmentMode, ReportingOption};
use crate::DmarcError;

impl DmarcRecord {
    /// Parse a DMARC TXT record string into a record.
    ///
    /// Segments without exactly one `=` are dropped silently, unknown tags
    /// are ignored, and the last occurrence of a duplicate tag wins. The
    /// `v=` and `p=` tags are required; everything else is optional.
    pub fn parse(record: &str) -> Result<Self, DmarcError> {
        let tags = split_tags(record);

        if !tags.iter().any(|(key, _)| key == "v") {
            return Err(DmarcError::MissingField("DMARC version is required"));
        }
        if !tags.iter().any(|(key, _)| key == "p") {
            return Err(DmarcError::MissingField("DMARC policy is required"));
        }

        let mut record = DmarcRecord::new();
        for (key, value) in &tags {
            let value = value.as_str();
            match key.as_str() {
                "v" => {
                    record.version(Some(value));
                }
                "p" => {
                    record.policy(Some(value))?;
                }
                // np never reaches its own field: it rides the subdomain
                // policy setter on the way in and the sp= tag on the way
                // out. Kept as-is to round-trip against the upstream codec.
                "sp" | "np" => {
                    record.subdomain_policy(Some(value))?;
                }
                "pct" => {
                    record.pct(Some(coerce_int(value)));
                }
                "rua" => {
                    record.rua(Some(value))?;
                }
                "ruf" => {
                    record.ruf(Some(value))?;
                }
                "adkim" => {
                    let mode = decode_alignment("adkim", value)?;
                    record.adkim(Some(mode.as_str()))?;
                }
                "aspf" => {
                    let mode = decode_alignment("aspf", value)?;
                    record.aspf(Some(mode.as_str()))?;
                }
                "ro" => {
                    let option = ReportingOption::from_code(value).ok_or_else(|| {
                        DmarcError::UnhandledValue {
                            field: "ro",
                            value: value.to_string(),
                        }
                    })?;
                    record.reporting(Some(option.as_str()))?;
                }
                "ri" => {
                    record.interval(Some(coerce_int(value)));
                }
                "psd" => {
                    record.public_suffix_domain_policy(Some(value))?;
                }
                "t" => {
                    record.testing_mode(Some(value))?;
                }
                _ => {} // unknown tags ignored
            }
        }

        Ok(record)
    }
}

impl FromStr for DmarcRecord {
    type Err = DmarcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DmarcRecord::parse(s)
    }
}

/// Split record text into (key, value) pairs.
///
/// Parts are trimmed, then split on `=`; anything that does not yield
/// exactly two pieces is skipped. Keys and values are trimmed before use,
/// and a duplicate key overwrites the earlier value in place.
fn split_tags(record: &str) -> Vec<(String, String)> {
    let mut tags: Vec<(String, String)> = Vec::new();
    for part in record.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let pieces: Vec<&str> = part.split('=').collect();
        if pieces.len() != 2 {
            continue;
        }
        let key = pieces[0].trim();
        let value = pieces[1].trim();
        if key.is_empty() {
            continue;
        }
        match tags.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => tags.push((key.to_string(), value.to_string())),
        }
    }
    tags
}

/// Integer coercion for pct=/ri= values; non-numeric input collapses to 0.
fn coerce_int(value: &str) -> i64 {
    value.parse().unwrap_or(0)
}

fn decode_alignment(field: &'static str, value: &str) -> Result<AlignmentMode, DmarcError> {
    AlignmentMode::from_code(value).ok_or_else(|| DmarcError::UnhandledValue {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Policy, PsdPolicy, TestingMode};

    #[test]
    fn complete_record() {
        let text = "v=DMARC1; p=none; sp=none; pct=100; rua=mailto:example@example.com; \
                    ruf=mailto:example@example.com; adkim=r; aspf=r; ri=3600;";
        let record = DmarcRecord::parse(text).unwrap();

        assert_eq!(record.version.as_deref(), Some("DMARC1"));
        assert_eq!(record.policy, Some(Policy::None));
        assert_eq!(record.subdomain_policy, Some(Policy::None));
        assert_eq!(record.pct, Some(100));
        assert_eq!(record.rua.as_deref(), Some("mailto:example@example.com"));
        assert_eq!(record.ruf.as_deref(), Some("mailto:example@example.com"));
        assert_eq!(record.adkim, Some(AlignmentMode::Relaxed));
        assert_eq!(record.aspf, Some(AlignmentMode::Relaxed));
        assert_eq!(record.interval, Some(3600));
        assert_eq!(record.to_string(), text);
    }

    #[test]
    fn minimal_record() {
        let record = DmarcRecord::parse("v=DMARC1; p=none;").unwrap();
        assert_eq!(record.version.as_deref(), Some("DMARC1"));
        assert_eq!(record.policy, Some(Policy::None));
        assert_eq!(record.subdomain_policy, None);
        assert_eq!(record.pct, None);
        assert_eq!(record.rua, None);
        assert_eq!(record.ruf, None);
        assert_eq!(record.adkim, None);
        assert_eq!(record.aspf, None);
        assert_eq!(record.reporting, None);
        assert_eq!(record.interval, None);
        assert_eq!(record.np, None);
        assert_eq!(record.psd, None);
        assert_eq!(record.t, None);
    }

    #[test]
    fn surrounding_whitespace_tolerated() {
        let record =
            DmarcRecord::parse("  v=DMARC1;  p=quarantine;  sp=reject;  pct=50;  ").unwrap();
        assert_eq!(record.policy, Some(Policy::Quarantine));
        assert_eq!(record.subdomain_policy, Some(Policy::Reject));
        assert_eq!(record.pct, Some(50));
    }

    #[test]
    fn whitespace_inside_segment_tolerated() {
        let record = DmarcRecord::parse("v = DMARC1 ; p = none ; pct = 75").unwrap();
        assert_eq!(record.policy, Some(Policy::None));
        assert_eq!(record.pct, Some(75));
    }

    #[test]
    fn no_spaces_between_segments() {
        let record = DmarcRecord::parse("v=DMARC1;p=none;pct=75").unwrap();
        assert_eq!(record.policy, Some(Policy::None));
        assert_eq!(record.pct, Some(75));
    }

    #[test]
    fn empty_segments_dropped() {
        let record = DmarcRecord::parse("v=DMARC1; p=quarantine; ; pct=50;").unwrap();
        assert_eq!(record.policy, Some(Policy::Quarantine));
        assert_eq!(record.pct, Some(50));
    }

    #[test]
    fn malformed_segments_dropped() {
        let record = DmarcRecord::parse("v=DMARC1; p=quarantine; invalid-part; pct=50;").unwrap();
        assert_eq!(record.policy, Some(Policy::Quarantine));
        assert_eq!(record.pct, Some(50));
    }

    #[test]
    fn segment_with_two_equals_dropped() {
        let record = DmarcRecord::parse("v=DMARC1; p=none; pct=1=2;").unwrap();
        assert_eq!(record.pct, None);
    }

    #[test]
    fn unknown_tags_ignored() {
        let record = DmarcRecord::parse("v=DMARC1; p=none; fo=1; rf=afrf; x=unknown;").unwrap();
        assert_eq!(record.policy, Some(Policy::None));
        assert_eq!(record.to_string(), "v=DMARC1; p=none;");
    }

    #[test]
    fn duplicate_tag_last_wins() {
        let record = DmarcRecord::parse("v=DMARC1; p=none; p=reject;").unwrap();
        assert_eq!(record.policy, Some(Policy::Reject));
    }

    #[test]
    fn missing_version() {
        let err = DmarcRecord::parse("p=none;").unwrap_err();
        assert_eq!(err, DmarcError::MissingField("DMARC version is required"));
        assert_eq!(err.to_string(), "DMARC version is required");
    }

    #[test]
    fn missing_policy() {
        let err = DmarcRecord::parse("v=DMARC1;").unwrap_err();
        assert_eq!(err, DmarcError::MissingField("DMARC policy is required"));
        assert_eq!(err.to_string(), "DMARC policy is required");
    }

    #[test]
    fn empty_input_missing_version() {
        let err = DmarcRecord::parse("").unwrap_err();
        assert_eq!(err, DmarcError::MissingField("DMARC version is required"));
    }

    #[test]
    fn garbage_input_missing_version() {
        let err = DmarcRecord::parse("invalid-record").unwrap_err();
        assert_eq!(err, DmarcError::MissingField("DMARC version is required"));
    }

    #[test]
    fn version_checked_before_policy() {
        let err = DmarcRecord::parse("sp=none;").unwrap_err();
        assert_eq!(err, DmarcError::MissingField("DMARC version is required"));
    }

    #[test]
    fn invalid_policy_value() {
        let err = DmarcRecord::parse("v=DMARC1; p=invalid;").unwrap_err();
        assert_eq!(
            err,
            DmarcError::Validation {
                field: "policy",
                value: "invalid".into()
            }
        );
    }

    #[test]
    fn invalid_subdomain_policy_value() {
        let err = DmarcRecord::parse("v=DMARC1; p=none; sp=invalid;").unwrap_err();
        assert!(matches!(
            err,
            DmarcError::Validation {
                field: "subdomain_policy",
                ..
            }
        ));
    }

    #[test]
    fn rua_without_mailto_prefix() {
        let err = DmarcRecord::parse("v=DMARC1; p=none; rua=invalid@example.com;").unwrap_err();
        assert_eq!(err, DmarcError::Format { field: "rua" });
    }

    #[test]
    fn ruf_without_mailto_prefix() {
        let err = DmarcRecord::parse("v=DMARC1; p=none; ruf=invalid@example.com;").unwrap_err();
        assert_eq!(err, DmarcError::Format { field: "ruf" });
    }

    #[test]
    fn short_codes_decode_to_long_form() {
        let record =
            DmarcRecord::parse("v=DMARC1; p=quarantine; adkim=r; aspf=s; ro=d;").unwrap();
        assert_eq!(record.adkim, Some(AlignmentMode::Relaxed));
        assert_eq!(record.aspf, Some(AlignmentMode::Strict));
        assert_eq!(record.reporting, Some(ReportingOption::Dkim));
    }

    #[test]
    fn all_reporting_codes() {
        let cases = [
            ("0", ReportingOption::All),
            ("1", ReportingOption::Any),
            ("d", ReportingOption::Dkim),
            ("s", ReportingOption::Spf),
        ];
        for (code, expected) in cases {
            let text = format!("v=DMARC1; p=none; ro={};", code);
            let record = DmarcRecord::parse(&text).unwrap();
            assert_eq!(record.reporting, Some(expected));
        }
    }

    #[test]
    fn all_alignment_codes() {
        for (code, expected) in [("r", AlignmentMode::Relaxed), ("s", AlignmentMode::Strict)] {
            let text = format!("v=DMARC1; p=none; adkim={code}; aspf={code};");
            let record = DmarcRecord::parse(&text).unwrap();
            assert_eq!(record.adkim, Some(expected));
            assert_eq!(record.aspf, Some(expected));
        }
    }

    #[test]
    fn unhandled_adkim_code() {
        let err = DmarcRecord::parse("v=DMARC1; p=none; adkim=invalid;").unwrap_err();
        assert_eq!(
            err,
            DmarcError::UnhandledValue {
                field: "adkim",
                value: "invalid".into()
            }
        );
    }

    #[test]
    fn unhandled_aspf_code() {
        let err = DmarcRecord::parse("v=DMARC1; p=none; aspf=invalid;").unwrap_err();
        assert!(matches!(
            err,
            DmarcError::UnhandledValue { field: "aspf", .. }
        ));
    }

    #[test]
    fn unhandled_ro_code() {
        let err = DmarcRecord::parse("v=DMARC1; p=none; ro=invalid;").unwrap_err();
        assert!(matches!(err, DmarcError::UnhandledValue { field: "ro", .. }));
    }

    #[test]
    fn long_form_adkim_rejected_on_parse() {
        // The wire format carries codes, not long values.
        let err = DmarcRecord::parse("v=DMARC1; p=none; adkim=relaxed;").unwrap_err();
        assert!(matches!(
            err,
            DmarcError::UnhandledValue { field: "adkim", .. }
        ));
    }

    #[test]
    fn np_lands_in_subdomain_policy() {
        let record = DmarcRecord::parse("v=DMARC1; p=reject; np=quarantine;").unwrap();
        assert_eq!(record.subdomain_policy, Some(Policy::Quarantine));
        assert_eq!(record.np, None);
    }

    #[test]
    fn np_must_satisfy_policy_vocabulary() {
        let err = DmarcRecord::parse("v=DMARC1; p=reject; np=y;").unwrap_err();
        assert!(matches!(
            err,
            DmarcError::Validation {
                field: "subdomain_policy",
                ..
            }
        ));
    }

    #[test]
    fn psd_and_t_parsed() {
        let record = DmarcRecord::parse("v=DMARC1; p=none; psd=u; t=y;").unwrap();
        assert_eq!(record.psd, Some(PsdPolicy::Unspecified));
        assert_eq!(record.t, Some(TestingMode::Yes));
    }

    #[test]
    fn invalid_psd_and_t_rejected() {
        assert!(matches!(
            DmarcRecord::parse("v=DMARC1; p=none; psd=z;").unwrap_err(),
            DmarcError::Validation { field: "psd", .. }
        ));
        assert!(matches!(
            DmarcRecord::parse("v=DMARC1; p=none; t=u;").unwrap_err(),
            DmarcError::Validation { field: "t", .. }
        ));
    }

    #[test]
    fn non_numeric_pct_collapses_to_zero() {
        let record = DmarcRecord::parse("v=DMARC1; p=none; pct=abc; ri=xyz;").unwrap();
        assert_eq!(record.pct, Some(0));
        assert_eq!(record.interval, Some(0));
        // Zero is falsy on output, so both tags vanish again.
        assert_eq!(record.to_string(), "v=DMARC1; p=none;");
    }

    #[test]
    fn negative_integers_survive() {
        let record = DmarcRecord::parse("v=DMARC1; p=none; pct=-5;").unwrap();
        assert_eq!(record.pct, Some(-5));
        assert!(record.to_string().contains("pct=-5;"));
    }

    #[test]
    fn round_trip_is_idempotent() {
        let texts = [
            "v=DMARC1; p=none;",
            "v=DMARC1; p=reject; sp=quarantine; pct=75; rua=mailto:test@example.com; \
             ruf=mailto:test@example.com; adkim=s; aspf=r; ro=0; ri=3600;",
            "v=DMARC1; p=quarantine; adkim=r; psd=y; t=n;",
        ];
        for text in texts {
            let once = DmarcRecord::parse(text).unwrap().to_string();
            let twice = DmarcRecord::parse(&once).unwrap().to_string();
            assert_eq!(once, twice);
            assert_eq!(once, text);
        }
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let record: DmarcRecord = "v=DMARC1; p=reject;".parse().unwrap();
        assert_eq!(record.policy, Some(Policy::Reject));
        assert!("p=none;".parse::<DmarcRecord>().is_err());
    }
}
