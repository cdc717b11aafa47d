/// DMARC disposition policy (`p=`, `sp=`, `np=` tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Policy {
    /// No action, monitoring only.
    None,
    /// Treat as suspicious (spam folder).
    Quarantine,
    /// Reject the message.
    Reject,
}

impl Policy {
    /// Parse the long-form value: "none", "quarantine" or "reject".
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Policy::None),
            "quarantine" => Some(Policy::Quarantine),
            "reject" => Some(Policy::Reject),
            _ => Option::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::None => "none",
            Policy::Quarantine => "quarantine",
            Policy::Reject => "reject",
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier alignment mode for DKIM/SPF (`adkim=`, `aspf=` tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlignmentMode {
    /// Organizational domain match.
    Relaxed,
    /// Exact domain match.
    Strict,
}

impl AlignmentMode {
    /// Parse the long-form value: "relaxed" or "strict".
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relaxed" => Some(AlignmentMode::Relaxed),
            "strict" => Some(AlignmentMode::Strict),
            _ => None,
        }
    }

    /// Decode the wire short code: "r" → Relaxed, "s" → Strict.
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "r" => Some(AlignmentMode::Relaxed),
            "s" => Some(AlignmentMode::Strict),
            _ => None,
        }
    }

    /// Wire short code emitted in the record text.
    pub fn code(&self) -> &'static str {
        match self {
            AlignmentMode::Relaxed => "r",
            AlignmentMode::Strict => "s",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlignmentMode::Relaxed => "relaxed",
            AlignmentMode::Strict => "strict",
        }
    }
}

impl std::fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reporting option (`ro=` tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReportingOption {
    /// Report when all mechanisms fail.
    All,
    /// Report when any mechanism fails.
    Any,
    /// Report on DKIM failure.
    Dkim,
    /// Report on SPF failure.
    Spf,
}

impl ReportingOption {
    /// Parse the long-form value: "all", "any", "dkim" or "spf".
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(ReportingOption::All),
            "any" => Some(ReportingOption::Any),
            "dkim" => Some(ReportingOption::Dkim),
            "spf" => Some(ReportingOption::Spf),
            _ => None,
        }
    }

    /// Decode the wire short code: "0" → All, "1" → Any, "d" → Dkim, "s" → Spf.
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "0" => Some(ReportingOption::All),
            "1" => Some(ReportingOption::Any),
            "d" => Some(ReportingOption::Dkim),
            "s" => Some(ReportingOption::Spf),
            _ => None,
        }
    }

    /// Wire short code emitted in the record text.
    pub fn code(&self) -> &'static str {
        match self {
            ReportingOption::All => "0",
            ReportingOption::Any => "1",
            ReportingOption::Dkim => "d",
            ReportingOption::Spf => "s",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportingOption::All => "all",
            ReportingOption::Any => "any",
            ReportingOption::Dkim => "dkim",
            ReportingOption::Spf => "spf",
        }
    }
}

impl std::fmt::Display for ReportingOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public suffix domain marker (`psd=` tag, RFC 9091).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PsdPolicy {
    #[cfg_attr(feature = "serde", serde(rename = "y"))]
    Yes,
    #[cfg_attr(feature = "serde", serde(rename = "n"))]
    No,
    #[cfg_attr(feature = "serde", serde(rename = "u"))]
    Unspecified,
}

impl PsdPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "y" => Some(PsdPolicy::Yes),
            "n" => Some(PsdPolicy::No),
            "u" => Some(PsdPolicy::Unspecified),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PsdPolicy::Yes => "y",
            PsdPolicy::No => "n",
            PsdPolicy::Unspecified => "u",
        }
    }
}

impl std::fmt::Display for PsdPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Testing mode (`t=` tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TestingMode {
    #[cfg_attr(feature = "serde", serde(rename = "y"))]
    Yes,
    #[cfg_attr(feature = "serde", serde(rename = "n"))]
    No,
}

impl TestingMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "y" => Some(TestingMode::Yes),
            "n" => Some(TestingMode::No),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TestingMode::Yes => "y",
            TestingMode::No => "n",
        }
    }
}

impl std::fmt::Display for TestingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
