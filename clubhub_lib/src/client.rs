//! Caching wrapper around the API client.

use std::future::Future;

use clubhub_api::types::{
    Admin, AdminCredentials, AdminRegistration, AdminSession, DashboardStats, Health, Leaderboard,
    Match, MatchInput, Member, MemberInput, MessageResponse, News, NewsInput, Page, Registered,
    Tournament, TournamentInput,
};
use clubhub_api::{Client, LeaderboardQuery, MemberQuery};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::TtlCache;
use crate::error::ClubError;

const MEMBERS: &str = "members";
const LEADERBOARD: &str = "leaderboard";
const TOURNAMENTS: &str = "tournaments";
const MATCHES: &str = "matches";
const NEWS: &str = "news";

/// API client wrapper that caches public listings.
///
/// Cache hits bypass the network entirely. Admin mutations go straight to
/// the API and then invalidate every listing they can change, so the next
/// read reflects the edit. Retries, timeouts and credential handling stay
/// with the inner [`Client`].
pub struct CachedClient {
    inner: Client,
    cache: TtlCache,
}

impl CachedClient {
    pub fn new(inner: Client, cache: TtlCache) -> Self {
        Self { inner, cache }
    }

    pub fn inner(&self) -> &Client {
        &self.inner
    }

    async fn cached<T, F, Fut>(&self, key: String, fetch: F) -> Result<T, ClubError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, clubhub_api::ClassifiedError>>,
    {
        if let Some(hit) = self.cache.get(&key) {
            match serde_json::from_value::<T>(hit) {
                Ok(value) => {
                    tracing::debug!("cache hit: {}", key);
                    return Ok(value);
                }
                Err(e) => tracing::warn!("Dropping unreadable cache entry {}: {}", key, e),
            }
        }
        let value = fetch().await?;
        self.cache.set(key, serde_json::to_value(&value)?);
        Ok(value)
    }

    fn invalidate(&self, prefixes: &[&str]) {
        for prefix in prefixes {
            self.cache.invalidate(prefix);
        }
    }

    // -- Public reads --

    pub async fn health(&self) -> Result<Health, ClubError> {
        Ok(self.inner.health().await?)
    }

    pub async fn get_members(&self) -> Result<Vec<Member>, ClubError> {
        self.cached(MEMBERS.to_string(), || self.inner.get_members())
            .await
    }

    /// Fetches the directory (cached) and narrows it client-side.
    pub async fn search_members(&self, query: &MemberQuery) -> Result<Page<Member>, ClubError> {
        let members = self.get_members().await?;
        Ok(query.apply(&members))
    }

    pub async fn get_member(&self, member_id: &str) -> Result<Member, ClubError> {
        self.cached(format!("{}:{}", MEMBERS, member_id), || {
            self.inner.get_member(member_id)
        })
        .await
    }

    pub async fn get_leaderboard(&self, query: &LeaderboardQuery) -> Result<Leaderboard, ClubError> {
        self.cached(format!("{}:{}", LEADERBOARD, query.time_control), || {
            self.inner.get_leaderboard(query)
        })
        .await
    }

    pub async fn get_tournaments(&self) -> Result<Vec<Tournament>, ClubError> {
        self.cached(TOURNAMENTS.to_string(), || self.inner.get_tournaments())
            .await
    }

    pub async fn get_tournament(&self, tournament_id: &str) -> Result<Tournament, ClubError> {
        self.cached(format!("{}:{}", TOURNAMENTS, tournament_id), || {
            self.inner.get_tournament(tournament_id)
        })
        .await
    }

    pub async fn get_matches(&self) -> Result<Vec<Match>, ClubError> {
        self.cached(MATCHES.to_string(), || self.inner.get_matches())
            .await
    }

    pub async fn get_news(&self) -> Result<Vec<News>, ClubError> {
        self.cached(NEWS.to_string(), || self.inner.get_news()).await
    }

    pub async fn get_news_item(&self, news_id: &str) -> Result<News, ClubError> {
        self.cached(format!("{}:{}", NEWS, news_id), || {
            self.inner.get_news_item(news_id)
        })
        .await
    }

    // -- Session --

    pub async fn register(&self, registration: &AdminRegistration) -> Result<Registered, ClubError> {
        Ok(self.inner.register_admin(registration).await?)
    }

    pub async fn login(&self, credentials: &AdminCredentials) -> Result<AdminSession, ClubError> {
        Ok(self.inner.login_admin(credentials).await?)
    }

    pub fn logout(&self) {
        self.inner.logout();
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.is_logged_in()
    }

    pub async fn current_admin(&self) -> Result<Admin, ClubError> {
        Ok(self.inner.current_admin().await?)
    }

    pub async fn get_stats(&self) -> Result<DashboardStats, ClubError> {
        Ok(self.inner.get_stats().await?)
    }

    // -- Admin writes --

    pub async fn create_member(&self, member: &MemberInput) -> Result<Member, ClubError> {
        let created = self.inner.create_member(member).await?;
        self.invalidate(&[MEMBERS, LEADERBOARD]);
        Ok(created)
    }

    pub async fn update_member(
        &self,
        member_id: &str,
        member: &MemberInput,
    ) -> Result<Member, ClubError> {
        let updated = self.inner.update_member(member_id, member).await?;
        self.invalidate(&[MEMBERS, LEADERBOARD]);
        Ok(updated)
    }

    pub async fn delete_member(&self, member_id: &str) -> Result<MessageResponse, ClubError> {
        let resp = self.inner.delete_member(member_id).await?;
        self.invalidate(&[MEMBERS, LEADERBOARD]);
        Ok(resp)
    }

    pub async fn refresh_ratings(&self) -> Result<MessageResponse, ClubError> {
        let resp = self.inner.refresh_ratings().await?;
        self.invalidate(&[MEMBERS, LEADERBOARD]);
        Ok(resp)
    }

    pub async fn create_match(&self, game: &MatchInput) -> Result<Match, ClubError> {
        let created = self.inner.create_match(game).await?;
        self.invalidate(&[MATCHES]);
        Ok(created)
    }

    pub async fn delete_match(&self, match_id: &str) -> Result<MessageResponse, ClubError> {
        let resp = self.inner.delete_match(match_id).await?;
        self.invalidate(&[MATCHES]);
        Ok(resp)
    }

    pub async fn create_tournament(
        &self,
        tournament: &TournamentInput,
    ) -> Result<Tournament, ClubError> {
        let created = self.inner.create_tournament(tournament).await?;
        self.invalidate(&[TOURNAMENTS]);
        Ok(created)
    }

    pub async fn update_tournament(
        &self,
        tournament_id: &str,
        tournament: &TournamentInput,
    ) -> Result<Tournament, ClubError> {
        let updated = self.inner.update_tournament(tournament_id, tournament).await?;
        self.invalidate(&[TOURNAMENTS]);
        Ok(updated)
    }

    pub async fn delete_tournament(&self, tournament_id: &str) -> Result<MessageResponse, ClubError> {
        let resp = self.inner.delete_tournament(tournament_id).await?;
        self.invalidate(&[TOURNAMENTS]);
        Ok(resp)
    }

    pub async fn create_news(&self, news: &NewsInput) -> Result<News, ClubError> {
        let created = self.inner.create_news(news).await?;
        self.invalidate(&[NEWS]);
        Ok(created)
    }

    pub async fn update_news(&self, news_id: &str, news: &NewsInput) -> Result<News, ClubError> {
        let updated = self.inner.update_news(news_id, news).await?;
        self.invalidate(&[NEWS]);
        Ok(updated)
    }

    pub async fn delete_news(&self, news_id: &str) -> Result<MessageResponse, ClubError> {
        let resp = self.inner.delete_news(news_id).await?;
        self.invalidate(&[NEWS]);
        Ok(resp)
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
