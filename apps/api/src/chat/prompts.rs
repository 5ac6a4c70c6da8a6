// Prompt fragments used to assemble chat conversations.

/// Chat replies get a little more room than enrichment.
pub const CHAT_TEMPERATURE: f32 = 0.3;

pub const JD_SUMMARY_PREFIX: &str = "JD summary: ";

/// Replace `{sector}` before sending.
pub const SECTOR_NOTE_TEMPLATE: &str = "Current sector and routing context: {sector}. \
    Keep recommendations inside Arc Athena routing.";

pub const LETTER_DRAFT_PREFIX: &str = "Here is the current assembled letter draft. \
    When editing, change as little as possible and obey the Inviolable Code. ";

pub const PATTERN_FRAGMENTS_PREFIX: &str = "Pattern fragments you can reference:\n";

pub const DEFAULT_MODE_DIRECTIVE: &str =
    "Mode default: keep guidance concise and practical.";

pub const JD_MODE_DIRECTIVE: &str = "Mode jd: interpret the JD, highlight what the role \
    is about, and propose sector routing and variables succinctly.";

pub const LETTER_MODE_DIRECTIVE: &str = "Mode letter: suggest concrete edits or replacements \
    for specific sentences. Preserve numerical details and role titles. Avoid abstract advice.";
