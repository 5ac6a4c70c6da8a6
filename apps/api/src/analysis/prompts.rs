// LLM prompt constants for JD enrichment.
// The persona prompt lives in llm_client::prompts.

/// Low temperature: enrichment should be close to extraction, not creative.
pub const JD_ANALYZE_TEMPERATURE: f32 = 0.2;

/// JD enrichment prompt template.
/// Replace: {sectors}, {patterns}, then {jd_text} last.
pub const JD_ANALYZE_PROMPT_TEMPLATE: &str = r#"Parse the following job description into a JSON object with these keys:
- "role": the job title
- "organization": the hiring organization
- "sector": exactly one of {sectors}
- "template": the letter template to start from
- "routingTarget": the routing table entry for this role
- "themes": 1-3 short phrases
- "organizationInsight": one sentence on what the organization does

Use the existing sector and routing table logic. Keep numbers intact.
Respond with the JSON object only.

Pattern fragments by sector:
{patterns}

JD:
"""
{jd_text}
""""#;
