use crate::catalog::{Catalog, RankedRecipe, Recipe};
use crate::config::GenerativeConfig;
use crate::error::Result;
use crate::search::generative::{GenerativeClient, GenerativeError};
use crate::search::ranking;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Which stage answers a query first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Ask the generative endpoint, ranking locally if it fails
    Generative,
    /// Rank the local catalog only
    Local,
}

/// Choose the primary strategy for a query
pub fn choose_strategy(config: &GenerativeConfig, query: &str) -> Strategy {
    if config.is_configured() && !query.trim().is_empty() {
        Strategy::Generative
    } else {
        Strategy::Local
    }
}

/// Why a search was answered by the local ranking engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NotConfigured,
    EmptyQuery,
    Requested,
    Network,
    Timeout,
    UpstreamStatus(u16),
    ResponseShape,
}

impl From<&GenerativeError> for FallbackReason {
    fn from(error: &GenerativeError) -> Self {
        match error {
            GenerativeError::NotConfigured => FallbackReason::NotConfigured,
            GenerativeError::Network(_) => FallbackReason::Network,
            GenerativeError::Timeout(_) => FallbackReason::Timeout,
            GenerativeError::UpstreamStatus { status, .. } => {
                FallbackReason::UpstreamStatus(status.as_u16())
            }
            GenerativeError::ResponseShape(_) => FallbackReason::ResponseShape,
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NotConfigured => f.write_str("generative search not configured"),
            FallbackReason::EmptyQuery => f.write_str("empty query"),
            FallbackReason::Requested => f.write_str("local search requested"),
            FallbackReason::Network => f.write_str("generative endpoint unreachable"),
            FallbackReason::Timeout => f.write_str("generative endpoint timed out"),
            FallbackReason::UpstreamStatus(code) => {
                write!(f, "generative endpoint returned HTTP {code}")
            }
            FallbackReason::ResponseShape => f.write_str("generative response was malformed"),
        }
    }
}

/// Result of one search call
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    /// Recipes synthesized by the generative endpoint
    Generated(Vec<Recipe>),
    /// Catalog recipes ranked locally
    Ranked {
        recipes: Vec<RankedRecipe>,
        reason: FallbackReason,
    },
}

impl SearchResults {
    pub fn recipes(&self) -> Vec<&Recipe> {
        match self {
            SearchResults::Generated(recipes) => recipes.iter().collect(),
            SearchResults::Ranked { recipes, .. } => recipes.iter().map(|r| &r.recipe).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SearchResults::Generated(recipes) => recipes.len(),
            SearchResults::Ranked { recipes, .. } => recipes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, SearchResults::Generated(_))
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            SearchResults::Generated(_) => None,
            SearchResults::Ranked { reason, .. } => Some(*reason),
        }
    }
}

/// Entry point for recipe search: generative first when configured, local
/// ranking otherwise or on any failure.
///
/// Cheap to clone; clones share the catalog and HTTP connection pool, and
/// each call owns its own deadline.
#[derive(Clone)]
pub struct QueryResolver {
    catalog: Arc<Catalog>,
    generative: GenerativeClient,
}

impl QueryResolver {
    pub fn new(catalog: Arc<Catalog>, config: GenerativeConfig) -> Result<Self> {
        Ok(Self {
            catalog,
            generative: GenerativeClient::new(config)?,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve a query. Never fails; the worst case is an empty ranked list.
    pub async fn search(&self, query: &str) -> SearchResults {
        match choose_strategy(self.generative.config(), query) {
            Strategy::Local => {
                let reason = if query.trim().is_empty() {
                    FallbackReason::EmptyQuery
                } else {
                    FallbackReason::NotConfigured
                };
                info!("Using local search ({})", reason);
                self.rank_locally(query, reason)
            }
            Strategy::Generative => match self.generative.generate(query).await {
                Ok(recipes) => SearchResults::Generated(recipes),
                Err(e) => {
                    let reason = FallbackReason::from(&e);
                    warn!("Generative search failed, falling back to local search: {}", e);
                    self.rank_locally(query, reason)
                }
            },
        }
    }

    /// Rank the local catalog without consulting the generative endpoint
    pub fn search_local(&self, query: &str) -> SearchResults {
        self.rank_locally(query, FallbackReason::Requested)
    }

    fn rank_locally(&self, query: &str, reason: FallbackReason) -> SearchResults {
        SearchResults::Ranked {
            recipes: ranking::rank(self.catalog.recipes(), query),
            reason,
        }
    }
}
