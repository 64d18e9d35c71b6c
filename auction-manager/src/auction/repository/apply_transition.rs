use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
        kernel::db::with_deadline,
    },
};

impl Repository {
    pub async fn apply_transition(
        &self,
        auction_id: &entities::AuctionId,
        transition: &entities::Transition,
    ) -> Result<bool, RestError> {
        with_deadline(
            self.deadlines.write,
            "apply_transition",
            self.db.apply_transition(auction_id, transition),
        )
        .await
    }
}
