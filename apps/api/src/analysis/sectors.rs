//! The closed set of career sectors and the keyword table that scores them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Career sector a job description is routed to. Declaration order is table
/// order, and table order decides ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "Climate/ESG")]
    ClimateEsg,
    #[serde(rename = "AI/Tech")]
    AiTech,
    #[default]
    #[serde(rename = "Partnerships/BD")]
    PartnershipsBd,
    #[serde(rename = "Program Mgmt")]
    ProgramMgmt,
    Operations,
    #[serde(rename = "Think Tank/Policy")]
    ThinkTankPolicy,
    #[serde(rename = "Human Rights")]
    HumanRights,
    #[serde(rename = "Impact Investing")]
    ImpactInvesting,
    Communications,
    Membership,
    #[serde(rename = "Research/Strategy")]
    ResearchStrategy,
    Fintech,
    #[serde(rename = "Grants/Dev")]
    GrantsDev,
}

impl Sector {
    pub const ALL: [Sector; 13] = [
        Sector::ClimateEsg,
        Sector::AiTech,
        Sector::PartnershipsBd,
        Sector::ProgramMgmt,
        Sector::Operations,
        Sector::ThinkTankPolicy,
        Sector::HumanRights,
        Sector::ImpactInvesting,
        Sector::Communications,
        Sector::Membership,
        Sector::ResearchStrategy,
        Sector::Fintech,
        Sector::GrantsDev,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::ClimateEsg => "Climate/ESG",
            Sector::AiTech => "AI/Tech",
            Sector::PartnershipsBd => "Partnerships/BD",
            Sector::ProgramMgmt => "Program Mgmt",
            Sector::Operations => "Operations",
            Sector::ThinkTankPolicy => "Think Tank/Policy",
            Sector::HumanRights => "Human Rights",
            Sector::ImpactInvesting => "Impact Investing",
            Sector::Communications => "Communications",
            Sector::Membership => "Membership",
            Sector::ResearchStrategy => "Research/Strategy",
            Sector::Fintech => "Fintech",
            Sector::GrantsDev => "Grants/Dev",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sector '{0}'")]
pub struct UnknownSector(pub String);

impl FromStr for Sector {
    type Err = UnknownSector;

    /// Matches the display name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Sector::ALL
            .into_iter()
            .find(|sector| sector.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSector(wanted.to_string()))
    }
}

/// Keywords per sector, matched as lowercase whole words.
pub const SECTOR_KEYWORDS: &[(Sector, &[&str])] = &[
    (
        Sector::ClimateEsg,
        &[
            "climate",
            "esg",
            "sustainability",
            "environmental",
            "carbon",
            "renewable",
            "green energy",
            "net zero",
            "decarbonization",
            "clean energy",
        ],
    ),
    (
        Sector::AiTech,
        &[
            "ai",
            "artificial intelligence",
            "machine learning",
            "ml",
            "llm",
            "neural",
            "algorithm",
            "data science",
            "software",
            "engineering",
            "platform",
        ],
    ),
    (
        Sector::PartnershipsBd,
        &[
            "partnerships",
            "business development",
            "bd",
            "strategic partnerships",
            "alliance",
            "channel",
            "ecosystem",
            "stakeholder engagement",
        ],
    ),
    (
        Sector::ProgramMgmt,
        &[
            "program manager",
            "program management",
            "project manager",
            "pmo",
            "agile",
            "scrum",
            "delivery",
            "implementation",
        ],
    ),
    (
        Sector::Operations,
        &[
            "operations",
            "ops",
            "operational",
            "process",
            "efficiency",
            "logistics",
            "supply chain",
            "execution",
        ],
    ),
    (
        Sector::ThinkTankPolicy,
        &[
            "policy",
            "think tank",
            "research institute",
            "public policy",
            "advocacy",
            "regulatory",
            "government affairs",
            "legislation",
        ],
    ),
    (
        Sector::HumanRights,
        &[
            "human rights",
            "humanitarian",
            "refugee",
            "asylum",
            "democracy",
            "freedom",
            "civil society",
            "civil liberties",
            "justice",
        ],
    ),
    (
        Sector::ImpactInvesting,
        &[
            "impact investing",
            "social impact",
            "impact fund",
            "blended finance",
            "impact measurement",
            "sri",
            "esg investing",
            "social finance",
        ],
    ),
    (
        Sector::Communications,
        &[
            "communications",
            "comms",
            "public relations",
            "pr",
            "media",
            "content",
            "storytelling",
            "brand",
            "marketing",
        ],
    ),
    (
        Sector::Membership,
        &[
            "membership",
            "member services",
            "association",
            "trade association",
            "professional organization",
            "community",
        ],
    ),
    (
        Sector::ResearchStrategy,
        &[
            "research",
            "strategy",
            "strategic",
            "analysis",
            "insights",
            "market research",
            "competitive intelligence",
            "consulting",
        ],
    ),
    (
        Sector::Fintech,
        &[
            "fintech",
            "financial technology",
            "payments",
            "blockchain",
            "crypto",
            "defi",
            "banking technology",
            "digital banking",
        ],
    ),
    (
        Sector::GrantsDev,
        &[
            "grants",
            "development",
            "fundraising",
            "donor",
            "philanthropy",
            "foundation",
            "grantmaking",
            "resource development",
        ],
    ),
];
