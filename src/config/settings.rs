use crate::domain::player::Difficulty;

#[derive(Clone)]
pub struct ResolverSettings {
    pub min_query_len: usize,
    pub max_query_len: usize,
    pub max_edit_distance_short: usize,
    pub max_edit_distance_long: usize,
    pub long_query_len: usize,
    pub suggestion_cap: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            max_query_len: 64,
            max_edit_distance_short: 1,
            max_edit_distance_long: 2,
            long_query_len: 8,
            suggestion_cap: 2,
        }
    }
}

#[derive(Clone)]
pub struct GameSettings {
    /// Difficulty tiers guests may be served in random mode.
    pub guest_difficulties: Vec<Difficulty>,
    /// Tiers for authenticated users without the very-hard opt-in.
    pub default_difficulties: Vec<Difficulty>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            guest_difficulties: vec![Difficulty::Easy, Difficulty::Medium],
            default_difficulties: vec![
                Difficulty::Easy,
                Difficulty::Medium,
                Difficulty::Hard,
            ],
        }
    }
}

#[derive(Clone)]
pub struct AdminSettings {
    pub bearer_token: String,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            bearer_token: std::env::var("DARTLE_ADMIN_TOKEN")
                .unwrap_or_else(|_| "change-me".to_string()),
        }
    }
}

#[derive(Clone, Default)]
pub struct AppConfig {
    pub resolver: ResolverSettings,
    pub game: GameSettings,
    pub admin: AdminSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

// Passed explicitly (no globals) so services and handlers stay testable.
