use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    models::{StylistResponse, UserPreferences, UserProfile, WardrobeItem},
    services::{
        prompt::{PromptCompiler, PromptPayload},
        providers::{self, BackendError},
        reasoning::ReasoningGateway,
        rules::RuleEngine,
    },
};

/// Why a request ended up on the rule engine
#[derive(Debug)]
enum FallbackReason {
    Prompt(serde_json::Error),
    Backend(BackendError),
    MalformedResponse,
}

/// Hybrid stylist combining the rule engine with an optional reasoning backend
///
/// Every request returns a structurally valid response. With no backend
/// configured the rule engine answers directly. With a backend, its reply is
/// used when it parses as JSON; a backend error or an unparseable reply falls
/// back to the rule engine. Errors never reach the caller.
///
/// `generate` and `generate_async` share one decision path and differ only in
/// how they wait on the backend.
#[derive(Debug, Clone)]
pub struct HybridStylist {
    rules: Arc<RuleEngine>,
    compiler: PromptCompiler,
    gateway: ReasoningGateway,
}

impl Default for HybridStylist {
    /// Rules-only stylist with the built-in tables
    fn default() -> Self {
        Self::new(Arc::new(RuleEngine::default()), ReasoningGateway::default())
    }
}

impl HybridStylist {
    pub fn new(rules: Arc<RuleEngine>, gateway: ReasoningGateway) -> Self {
        Self {
            rules,
            compiler: PromptCompiler,
            gateway,
        }
    }

    /// Builds the stylist with the backend selected by configuration
    ///
    /// Fails only when a provider is selected but cannot be constructed.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let backend = providers::from_config(config)?;
        Ok(Self::new(
            Arc::new(RuleEngine::default()),
            ReasoningGateway::new(backend),
        ))
    }

    pub fn gateway(&self) -> &ReasoningGateway {
        &self.gateway
    }

    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    /// Blocking variant
    ///
    /// Must not be called from inside an async runtime when a backend is configured.
    pub fn generate(
        &self,
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
        wardrobe: &[WardrobeItem],
        max_outfits: usize,
    ) -> StylistResponse {
        if !self.gateway.is_configured() {
            return self.rule_based(profile, preferences, wardrobe, max_outfits);
        }

        let outcome = self
            .compile(profile, preferences, wardrobe, max_outfits)
            .and_then(|prompt| Self::settle(self.gateway.complete(&prompt)));

        self.finish(outcome, profile, preferences, wardrobe, max_outfits)
    }

    /// Non-blocking variant; suspends only while the backend call is in flight
    pub async fn generate_async(
        &self,
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
        wardrobe: &[WardrobeItem],
        max_outfits: usize,
    ) -> StylistResponse {
        if !self.gateway.is_configured() {
            return self.rule_based(profile, preferences, wardrobe, max_outfits);
        }

        let outcome = match self.compile(profile, preferences, wardrobe, max_outfits) {
            Ok(prompt) => Self::settle(self.gateway.complete_async(&prompt).await),
            Err(reason) => Err(reason),
        };

        self.finish(outcome, profile, preferences, wardrobe, max_outfits)
    }

    fn compile(
        &self,
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
        wardrobe: &[WardrobeItem],
        max_outfits: usize,
    ) -> Result<PromptPayload, FallbackReason> {
        self.compiler
            .compile(profile, preferences, wardrobe, max_outfits)
            .map_err(FallbackReason::Prompt)
    }

    /// Turns a backend reply into a parsed payload or a fallback reason
    fn settle(
        reply: Option<Result<String, BackendError>>,
    ) -> Result<serde_json::Value, FallbackReason> {
        // A gateway that was configured when `generate` started always replies
        let Some(reply) = reply else {
            return Err(FallbackReason::MalformedResponse);
        };

        let text = reply.map_err(FallbackReason::Backend)?;
        ReasoningGateway::parse_response(&text).ok_or(FallbackReason::MalformedResponse)
    }

    fn finish(
        &self,
        outcome: Result<serde_json::Value, FallbackReason>,
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
        wardrobe: &[WardrobeItem],
        max_outfits: usize,
    ) -> StylistResponse {
        match outcome {
            Ok(payload) => {
                tracing::info!(
                    provider = self.gateway.backend_name().unwrap_or("unknown"),
                    "Using backend recommendations"
                );
                StylistResponse::Backend(payload)
            }
            Err(reason) => {
                match &reason {
                    FallbackReason::Prompt(e) => {
                        tracing::error!(error = %e, "Prompt compilation failed, falling back to rules")
                    }
                    FallbackReason::Backend(e) => tracing::warn!(
                        provider = self.gateway.backend_name().unwrap_or("unknown"),
                        error = %e,
                        "Backend call failed, falling back to rules"
                    ),
                    FallbackReason::MalformedResponse => tracing::warn!(
                        provider = self.gateway.backend_name().unwrap_or("unknown"),
                        "Backend reply was not valid JSON, falling back to rules"
                    ),
                }
                self.rule_based(profile, preferences, wardrobe, max_outfits)
            }
        }
    }

    fn rule_based(
        &self,
        profile: &UserProfile,
        preferences: Option<&UserPreferences>,
        wardrobe: &[WardrobeItem],
        max_outfits: usize,
    ) -> StylistResponse {
        tracing::debug!(max_outfits, "Generating rule based recommendations");
        StylistResponse::Rules(self.rules.evaluate(profile, preferences, wardrobe, max_outfits))
    }
}
