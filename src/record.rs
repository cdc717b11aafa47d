//! The DMARC record entity and its fluent mutation API.

use std::fmt;

use crate::types::{AlignmentMode, Policy, PsdPolicy, ReportingOption, TestingMode};
use crate::DmarcError;

/// A validated in-memory DMARC policy record.
///
/// Fields are plain values; every mutation path runs through a setter that
/// validates before assigning, so an instance never holds an out-of-domain
/// value. Instances carry no interior locking; a record shared across
/// threads needs the caller's own synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DmarcRecord {
    /// Protocol version (v= tag), conventionally "DMARC1".
    pub version: Option<String>,
    /// Policy for the organizational domain (p= tag).
    pub policy: Option<Policy>,
    /// Policy for subdomains (sp= tag).
    pub subdomain_policy: Option<Policy>,
    /// Percentage of messages the policy applies to (pct= tag).
    pub pct: Option<i64>,
    /// Aggregate report address (rua= tag), mailto: URI.
    pub rua: Option<String>,
    /// Failure report address (ruf= tag), mailto: URI.
    pub ruf: Option<String>,
    /// DKIM alignment mode (adkim= tag).
    pub adkim: Option<AlignmentMode>,
    /// SPF alignment mode (aspf= tag).
    pub aspf: Option<AlignmentMode>,
    /// Failure reporting option (ro= tag).
    pub reporting: Option<ReportingOption>,
    /// Aggregate report interval in seconds (ri= tag).
    pub interval: Option<i64>,
    /// Policy for non-existent subdomains (np= tag, RFC 9091).
    pub np: Option<Policy>,
    /// Public suffix domain marker (psd= tag, RFC 9091).
    pub psd: Option<PsdPolicy>,
    /// Testing mode (t= tag).
    pub t: Option<TestingMode>,
}

impl DmarcRecord {
    /// A fresh record with the conventional defaults: version "DMARC1",
    /// policy "none", everything else absent.
    pub fn new() -> Self {
        DmarcRecord {
            version: Some("DMARC1".to_string()),
            policy: Some(Policy::None),
            subdomain_policy: None,
            pct: None,
            rua: None,
            ruf: None,
            adkim: None,
            aspf: None,
            reporting: None,
            interval: None,
            np: None,
            psd: None,
            t: None,
        }
    }

    /// Set the version tag. Free text, no validation.
    pub fn version(&mut self, version: Option<&str>) -> &mut Self {
        self.version = version.map(str::to_string);
        self
    }

    /// Set the domain policy: "none", "quarantine" or "reject".
    pub fn policy(&mut self, policy: Option<&str>) -> Result<&mut Self, DmarcError> {
        self.policy = validate_policy("policy", policy)?;
        Ok(self)
    }

    /// Set the subdomain policy: "none", "quarantine" or "reject".
    pub fn subdomain_policy(&mut self, policy: Option<&str>) -> Result<&mut Self, DmarcError> {
        self.subdomain_policy = validate_policy("subdomain_policy", policy)?;
        Ok(self)
    }

    /// Set the non-existent subdomain policy: "none", "quarantine" or "reject".
    pub fn non_existent_subdomain_policy(
        &mut self,
        policy: Option<&str>,
    ) -> Result<&mut Self, DmarcError> {
        self.np = validate_policy("np", policy)?;
        Ok(self)
    }

    /// Set the public suffix domain marker: "y", "n" or "u".
    pub fn public_suffix_domain_policy(
        &mut self,
        policy: Option<&str>,
    ) -> Result<&mut Self, DmarcError> {
        self.psd = match policy {
            Some(value) => Some(PsdPolicy::parse(value).ok_or_else(|| {
                DmarcError::Validation {
                    field: "psd",
                    value: value.to_string(),
                }
            })?),
            None => None,
        };
        Ok(self)
    }

    /// Set the testing mode: "y" or "n".
    pub fn testing_mode(&mut self, mode: Option<&str>) -> Result<&mut Self, DmarcError> {
        self.t = match mode {
            Some(value) => Some(TestingMode::parse(value).ok_or_else(|| {
                DmarcError::Validation {
                    field: "t",
                    value: value.to_string(),
                }
            })?),
            None => None,
        };
        Ok(self)
    }

    /// Set the percentage of messages the policy applies to. Unchecked.
    pub fn pct(&mut self, percentage: Option<i64>) -> &mut Self {
        self.pct = percentage;
        self
    }

    /// Set the aggregate report address. Must carry the mailto: scheme.
    pub fn rua(&mut self, mailto: Option<&str>) -> Result<&mut Self, DmarcError> {
        self.rua = validate_mailto("rua", mailto)?;
        Ok(self)
    }

    /// Set the failure report address. Must carry the mailto: scheme.
    pub fn ruf(&mut self, mailto: Option<&str>) -> Result<&mut Self, DmarcError> {
        self.ruf = validate_mailto("ruf", mailto)?;
        Ok(self)
    }

    /// Set the DKIM alignment mode: "relaxed" or "strict".
    pub fn adkim(&mut self, value: Option<&str>) -> Result<&mut Self, DmarcError> {
        self.adkim = validate_alignment("adkim", value)?;
        Ok(self)
    }

    /// Set the SPF alignment mode: "relaxed" or "strict".
    pub fn aspf(&mut self, value: Option<&str>) -> Result<&mut Self, DmarcError> {
        self.aspf = validate_alignment("aspf", value)?;
        Ok(self)
    }

    /// Set the failure reporting option: "all", "any", "dkim" or "spf".
    pub fn reporting(&mut self, value: Option<&str>) -> Result<&mut Self, DmarcError> {
        self.reporting = match value {
            Some(v) => Some(ReportingOption::parse(v).ok_or_else(|| {
                DmarcError::Validation {
                    field: "reporting",
                    value: v.to_string(),
                }
            })?),
            None => None,
        };
        Ok(self)
    }

    /// Set the aggregate report interval in seconds. Unchecked.
    pub fn interval(&mut self, interval: Option<i64>) -> &mut Self {
        self.interval = interval;
        self
    }
}

impl Default for DmarcRecord {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_policy(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Policy>, DmarcError> {
    match value {
        Some(v) => Policy::parse(v).map(Some).ok_or_else(|| DmarcError::Validation {
            field,
            value: v.to_string(),
        }),
        None => Ok(None),
    }
}

fn validate_alignment(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<AlignmentMode>, DmarcError> {
    match value {
        Some(v) => AlignmentMode::parse(v)
            .map(Some)
            .ok_or_else(|| DmarcError::Validation {
                field,
                value: v.to_string(),
            }),
        None => Ok(None),
    }
}

fn validate_mailto(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<String>, DmarcError> {
    match value {
        Some(addr) => {
            if !addr.starts_with("mailto:") {
                return Err(DmarcError::Format { field });
            }
            Ok(Some(addr.to_string()))
        }
        None => Ok(None),
    }
}

impl fmt::Display for DmarcRecord {
    /// Canonical record text: `tag=value; ` segments in fixed order,
    /// absent fields omitted, trailing space trimmed.
    ///
    /// A zero pct= or ri= is dropped along with absent ones, and np= is
    /// emitted as a second sp= tag. Both quirks match the behavior this
    /// codec round-trips against.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        if let Some(version) = self.version.as_deref().filter(|v| !v.is_empty()) {
            out.push_str(&format!("v={}; ", version));
        }
        if let Some(policy) = self.policy {
            out.push_str(&format!("p={}; ", policy));
        }
        if let Some(policy) = self.subdomain_policy {
            out.push_str(&format!("sp={}; ", policy));
        }
        if let Some(pct) = self.pct.filter(|p| *p != 0) {
            out.push_str(&format!("pct={}; ", pct));
        }
        if let Some(rua) = &self.rua {
            out.push_str(&format!("rua={}; ", rua));
        }
        if let Some(ruf) = &self.ruf {
            out.push_str(&format!("ruf={}; ", ruf));
        }
        if let Some(mode) = self.adkim {
            out.push_str(&format!("adkim={}; ", mode.code()));
        }
        if let Some(mode) = self.aspf {
            out.push_str(&format!("aspf={}; ", mode.code()));
        }
        if let Some(reporting) = self.reporting {
            out.push_str(&format!("ro={}; ", reporting.code()));
        }
        if let Some(interval) = self.interval.filter(|i| *i != 0) {
            out.push_str(&format!("ri={}; ", interval));
        }
        if let Some(policy) = self.np {
            out.push_str(&format!("sp={}; ", policy));
        }
        if let Some(psd) = self.psd {
            out.push_str(&format!("psd={}; ", psd));
        }
        if let Some(t) = self.t {
            out.push_str(&format!("t={}; ", t));
        }
        f.write_str(out.trim_end())
    }
}
