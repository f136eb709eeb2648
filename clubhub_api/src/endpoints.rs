//! Typed wrappers around the chess club API routes.

use serde::de::DeserializeOwned;

use crate::{
    credentials::{ADMIN_PROFILE, ADMIN_TOKEN},
    query::{LeaderboardQuery, Query},
    types::{
        Admin, AdminCredentials, AdminRegistration, AdminSession, DashboardStats, Health,
        Leaderboard, Match, MatchInput, Member, MemberInput, MessageResponse, News, NewsInput,
        Registered, Tournament, TournamentInput,
    },
    ClassifiedError, Client, RequestDescriptor,
};

impl Client {
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<T, ClassifiedError> {
        let (status, body) = self.execute_with_status(request).await?;
        body.decode(status)
    }

    /// Attaches the stored admin token, failing locally when there is none.
    fn authorized(&self, request: RequestDescriptor) -> Result<RequestDescriptor, ClassifiedError> {
        match self.credentials().get(ADMIN_TOKEN) {
            Some(token) => Ok(request.with_bearer_token(&token)),
            None => Err(ClassifiedError::not_logged_in()),
        }
    }

    async fn fetch_admin<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<T, ClassifiedError> {
        let request = self.authorized(request)?;
        self.fetch(&request).await
    }

    // -- Public --

    pub async fn health(&self) -> Result<Health, ClassifiedError> {
        self.fetch(&RequestDescriptor::get("/api/health")).await
    }

    /// Fetches the whole member directory.
    pub async fn get_members(&self) -> Result<Vec<Member>, ClassifiedError> {
        self.fetch(&RequestDescriptor::get("/api/members")).await
    }

    pub async fn get_member(&self, member_id: &str) -> Result<Member, ClassifiedError> {
        self.fetch(&RequestDescriptor::get("/api/members").with_segment(member_id))
            .await
    }

    pub async fn get_leaderboard(
        &self,
        query: &LeaderboardQuery,
    ) -> Result<Leaderboard, ClassifiedError> {
        self.fetch(&query.add_to_request(RequestDescriptor::get("/api/leaderboard")))
            .await
    }

    pub async fn get_tournaments(&self) -> Result<Vec<Tournament>, ClassifiedError> {
        self.fetch(&RequestDescriptor::get("/api/tournaments")).await
    }

    pub async fn get_tournament(&self, tournament_id: &str) -> Result<Tournament, ClassifiedError> {
        self.fetch(&RequestDescriptor::get("/api/tournaments").with_segment(tournament_id))
            .await
    }

    pub async fn get_matches(&self) -> Result<Vec<Match>, ClassifiedError> {
        self.fetch(&RequestDescriptor::get("/api/matches")).await
    }

    /// Latest news first, as ordered by the server.
    pub async fn get_news(&self) -> Result<Vec<News>, ClassifiedError> {
        self.fetch(&RequestDescriptor::get("/api/news")).await
    }

    pub async fn get_news_item(&self, news_id: &str) -> Result<News, ClassifiedError> {
        self.fetch(&RequestDescriptor::get("/api/news").with_segment(news_id))
            .await
    }

    // -- Session --

    pub async fn register_admin(
        &self,
        registration: &AdminRegistration,
    ) -> Result<Registered, ClassifiedError> {
        self.fetch(&RequestDescriptor::post("/api/admin/register").with_json(registration)?)
            .await
    }

    /// Logs in and stores the token and profile in the credential store.
    pub async fn login_admin(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<AdminSession, ClassifiedError> {
        let session: AdminSession = self
            .fetch(&RequestDescriptor::post("/api/admin/login").with_json(credentials)?)
            .await?;
        let profile = serde_json::to_string(&session.admin).map_err(ClassifiedError::invalid_request)?;
        self.credentials().set(ADMIN_TOKEN, &session.token);
        self.credentials().set(ADMIN_PROFILE, &profile);
        tracing::info!("Logged in as {}", session.admin.username);
        Ok(session)
    }

    /// Forgets the local session. The backend keeps no server-side session.
    pub fn logout(&self) {
        self.credentials().clear_session();
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials().get(ADMIN_TOKEN).is_some()
    }

    pub async fn current_admin(&self) -> Result<Admin, ClassifiedError> {
        self.fetch_admin(RequestDescriptor::get("/api/admin/me"))
            .await
    }

    // -- Admin: members --

    pub async fn create_member(&self, member: &MemberInput) -> Result<Member, ClassifiedError> {
        self.fetch_admin(RequestDescriptor::post("/api/admin/members").with_json(member)?)
            .await
    }

    pub async fn update_member(
        &self,
        member_id: &str,
        member: &MemberInput,
    ) -> Result<Member, ClassifiedError> {
        self.fetch_admin(
            RequestDescriptor::put("/api/admin/members")
                .with_segment(member_id)
                .with_json(member)?,
        )
        .await
    }

    pub async fn delete_member(&self, member_id: &str) -> Result<MessageResponse, ClassifiedError> {
        self.fetch_admin(RequestDescriptor::delete("/api/admin/members").with_segment(member_id))
            .await
    }

    /// Asks the server to re-pull every member's chess.com ratings.
    pub async fn refresh_ratings(&self) -> Result<MessageResponse, ClassifiedError> {
        self.fetch_admin(RequestDescriptor::post("/api/admin/members/refresh-ratings"))
            .await
    }

    // -- Admin: matches --

    pub async fn create_match(&self, game: &MatchInput) -> Result<Match, ClassifiedError> {
        self.fetch_admin(RequestDescriptor::post("/api/admin/matches").with_json(game)?)
            .await
    }

    pub async fn delete_match(&self, match_id: &str) -> Result<MessageResponse, ClassifiedError> {
        self.fetch_admin(RequestDescriptor::delete("/api/admin/matches").with_segment(match_id))
            .await
    }

    // -- Admin: tournaments --

    pub async fn create_tournament(
        &self,
        tournament: &TournamentInput,
    ) -> Result<Tournament, ClassifiedError> {
        self.fetch_admin(RequestDescriptor::post("/api/admin/tournaments").with_json(tournament)?)
            .await
    }

    pub async fn update_tournament(
        &self,
        tournament_id: &str,
        tournament: &TournamentInput,
    ) -> Result<Tournament, ClassifiedError> {
        self.fetch_admin(
            RequestDescriptor::put("/api/admin/tournaments")
                .with_segment(tournament_id)
                .with_json(tournament)?,
        )
        .await
    }

    pub async fn delete_tournament(
        &self,
        tournament_id: &str,
    ) -> Result<MessageResponse, ClassifiedError> {
        self.fetch_admin(
            RequestDescriptor::delete("/api/admin/tournaments").with_segment(tournament_id),
        )
        .await
    }

    // -- Admin: news --

    pub async fn create_news(&self, news: &NewsInput) -> Result<News, ClassifiedError> {
        self.fetch_admin(RequestDescriptor::post("/api/admin/news").with_json(news)?)
            .await
    }

    pub async fn update_news(&self, news_id: &str, news: &NewsInput) -> Result<News, ClassifiedError> {
        self.fetch_admin(
            RequestDescriptor::put("/api/admin/news")
                .with_segment(news_id)
                .with_json(news)?,
        )
        .await
    }

    pub async fn delete_news(&self, news_id: &str) -> Result<MessageResponse, ClassifiedError> {
        self.fetch_admin(RequestDescriptor::delete("/api/admin/news").with_segment(news_id))
            .await
    }

    pub async fn get_stats(&self) -> Result<DashboardStats, ClassifiedError> {
        self.fetch_admin(RequestDescriptor::get("/api/admin/stats"))
            .await
    }
}
