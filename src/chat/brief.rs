//! Campaign brief generation.
//!
//! The reply "model" is a template: one campaign type is picked at random and
//! the user's prompt is quoted into a fixed multi-section brief. Selection and
//! rendering are a pure function over a caller-supplied random source, so tests
//! can seed it; [`CampaignBriefGenerator`] owns a source for production use.

use std::fmt;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Headline labels a brief can be written for.
pub const CAMPAIGN_TYPES: [&str; 5] = [
    "Social Media Campaign",
    "Email Marketing Campaign",
    "Content Marketing Campaign",
    "Influencer Partnership Campaign",
    "Product Launch Campaign",
];

/// Reply generation failed; the pending reply is dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The random source could not be used.
    #[error("random source unavailable: {0}")]
    SourceUnavailable(String),

    /// The generation task did not complete.
    #[error("generation interrupted: {0}")]
    Interrupted(String),
}

/// Produces the assistant's reply for a user prompt.
pub trait BriefGenerator: Send + Sync + fmt::Debug {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Pick a campaign type uniformly at random and render its brief.
pub fn generate_reply<R: Rng>(prompt: &str, rng: &mut R) -> String {
    let label = CAMPAIGN_TYPES[rng.random_range(0..CAMPAIGN_TYPES.len())];
    render_brief(label, prompt)
}

/// Render the brief document for `label`, quoting `prompt` verbatim.
#[must_use]
pub fn render_brief(label: &str, prompt: &str) -> String {
    format!(
        r#"🎯 **{label} Brief**

**Campaign Objective:**
Based on your request: "{prompt}", I recommend focusing on building brand awareness and driving engagement through targeted messaging.

**Target Audience:**
- Primary: Demographics 25-45, tech-savvy professionals
- Secondary: Early adopters and brand enthusiasts
- Psychographics: Value innovation, quality, and authentic brand connections

**Key Messages:**
1. **Primary Message:** Transform your approach with our innovative solution
2. **Supporting Messages:**
   - Proven results that speak for themselves
   - Join thousands of satisfied customers
   - Experience the difference quality makes

**Channels & Tactics:**
📱 **Digital Channels:**
- Social media platforms (Instagram, LinkedIn, Facebook)
- Email marketing sequences
- Content marketing (blog posts, videos)
- Paid social advertising

🎨 **Creative Direction:**
- Modern, clean aesthetic with bold colors
- User-generated content integration
- Behind-the-scenes storytelling
- Customer testimonial highlights

**Success Metrics:**
- Engagement rate: Target 3.5%+
- Click-through rate: Target 2.8%+
- Conversion rate: Target 12%+
- Brand awareness lift: Target 25%+

**Budget Allocation:**
- Content creation: 40%
- Paid advertising: 35%
- Influencer partnerships: 15%
- Analytics & optimization: 10%

**Timeline:**
- Week 1-2: Creative development
- Week 3-4: Campaign launch
- Week 5-8: Optimization & scaling
- Week 9: Performance analysis

Ready to dive deeper into any specific aspect of this campaign? 🚀"#
    )
}

/// Default generator backed by a [`StdRng`].
#[derive(Debug)]
pub struct CampaignBriefGenerator {
    rng: Mutex<StdRng>,
}

impl CampaignBriefGenerator {
    /// Seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic sequence of campaign types for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Build from an optional seed.
    #[must_use]
    pub fn with_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for CampaignBriefGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BriefGenerator for CampaignBriefGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|err| GenerationError::SourceUnavailable(err.to_string()))?;
        Ok(generate_reply(prompt, &mut *rng))
    }
}

/// Label used in a rendered brief's heading, if any.
#[must_use]
pub fn campaign_type_of(brief: &str) -> Option<&'static str> {
    let heading = brief.lines().next()?;
    CAMPAIGN_TYPES
        .iter()
        .copied()
        .find(|label| heading == format!("🎯 **{label} Brief**"))
}
