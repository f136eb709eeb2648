use crate::types::TimeControl;
use crate::RequestDescriptor;

use super::Query;

/// Selects the rating pool the server ranks by.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeaderboardQuery {
    pub time_control: TimeControl,
}

impl LeaderboardQuery {
    pub fn with_time_control(mut self, time_control: TimeControl) -> Self {
        self.time_control = time_control;
        self
    }
}

impl Query for LeaderboardQuery {
    fn add_to_request(&self, request: RequestDescriptor) -> RequestDescriptor {
        request.with_query("time_control", &self.time_control.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_control_param() {
        let req = LeaderboardQuery::default().add_to_request(RequestDescriptor::get("/api/leaderboard"));
        assert_eq!(req.query, vec![("time_control".to_string(), "rapid".to_string())]);

        let req = LeaderboardQuery::default()
            .with_time_control(TimeControl::Bullet)
            .add_to_request(RequestDescriptor::get("/api/leaderboard"));
        assert_eq!(req.query[0].1, "bullet");
    }
}
