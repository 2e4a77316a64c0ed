use crate::{Error, GenerationRequest, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_LENGTH_WORDS: u32 = 100;
pub const MAX_LENGTH_WORDS: u32 = 2000;

/// Rough words-to-tokens ratio for English prose.
const TOKENS_PER_WORD: f32 = 1.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    General,
    Email,
    Article,
    Story,
    Social,
    Script,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        Self::General,
        Self::Email,
        Self::Article,
        Self::Story,
        Self::Social,
        Self::Script,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "General text",
            Self::Email => "Email",
            Self::Article => "Article",
            Self::Story => "Story",
            Self::Social => "Social media",
            Self::Script => "Script",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::General => "Any kind of text based on your prompt",
            Self::Email => "Professional or personal emails",
            Self::Article => "Well-structured articles on any topic",
            Self::Story => "Creative and entertaining stories",
            Self::Social => "Content tuned for social networks",
            Self::Script => "Scripts for videos, podcasts or presentations",
        }
    }

    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            Self::General => &[
                "Write a summary about artificial intelligence",
                "Describe a tropical landscape",
                "Explain how photosynthesis works",
            ],
            Self::Email => &[
                "Job application email for a developer position",
                "Follow-up email after a business meeting",
                "Thank-you email to a customer",
            ],
            Self::Article => &[
                "Article about the benefits of exercise",
                "Technical article about web development",
                "Opinion piece on climate change",
            ],
            Self::Story => &[
                "Short science fiction story",
                "Children's tale about friendship",
                "Mystery story in an old house",
            ],
            Self::Social => &[
                "LinkedIn post about leadership",
                "Viral tweet about technology",
                "Instagram caption for a travel photo",
            ],
            Self::Script => &[
                "Script for a 5 minute tutorial video",
                "Intro for a technology podcast",
                "Presentation on business innovation",
            ],
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Formal,
    Friendly,
    Technical,
    Persuasive,
    Informative,
    Creative,
}

impl Tone {
    pub const ALL: [Tone; 8] = [
        Self::Professional,
        Self::Casual,
        Self::Formal,
        Self::Friendly,
        Self::Technical,
        Self::Persuasive,
        Self::Informative,
        Self::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Formal => "formal",
            Self::Friendly => "friendly",
            Self::Technical => "technical",
            Self::Persuasive => "persuasive",
            Self::Informative => "informative",
            Self::Creative => "creative",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing knobs of the text generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub tone: Tone,
    /// Approximate length of the result in words.
    pub length: u32,
    /// 0 = conservative, 1 = most creative. Drives the sampling temperature.
    pub creativity: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            content_type: ContentType::default(),
            tone: Tone::default(),
            length: 500,
            creativity: 0.7,
        }
    }
}

impl GenerationSettings {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_LENGTH_WORDS..=MAX_LENGTH_WORDS).contains(&self.length) {
            return Err(Error::validation(format!(
                "length must be between {} and {} words, got {}",
                MIN_LENGTH_WORDS, MAX_LENGTH_WORDS, self.length
            )));
        }
        if !(0.0..=1.0).contains(&self.creativity) {
            return Err(Error::validation(format!(
                "creativity must be within [0, 1], got {}",
                self.creativity
            )));
        }
        Ok(())
    }

    /// Builds the request the service sees. The user's text is wrapped with
    /// instructions for content type, tone and length; a blank `prompt` stays
    /// blank so that request validation still rejects it.
    pub fn to_request(&self, prompt: &str) -> Result<GenerationRequest> {
        self.validate()?;

        let prompt = prompt.trim();
        let composed = if prompt.is_empty() {
            String::new()
        } else {
            format!(
                "Content type: {} ({}).\nTone: {}.\nLength: about {} words.\n\n{}",
                self.content_type.name(),
                self.content_type.description().to_lowercase(),
                self.tone,
                self.length,
                prompt
            )
        };

        Ok(GenerationRequest::new(composed)
            .with_temperature(self.creativity)
            .with_max_tokens(self.max_tokens()))
    }

    pub fn max_tokens(&self) -> u32 {
        (self.length as f32 * TOKENS_PER_WORD).ceil() as u32
    }
}
